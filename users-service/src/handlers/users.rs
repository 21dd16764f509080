//! In-memory user routes under `/v1/users`.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    Json,
};
use serde_json::Value;
use service_core::error::AppError;

use crate::{
    dtos::{
        parse_user_id, CreateUserRequest, RemovedUserResponse, UserListResponse, UserResponse,
    },
    AppState,
};

const NOT_FOUND: &str = "Not found";

/// Create a user. Bodies that are empty, not declared as JSON, or not a JSON
/// object get both default values; a JSON body that does not parse is rejected.
pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let request = if !is_json(&headers) || body.iter().all(u8::is_ascii_whitespace) {
        CreateUserRequest::default()
    } else {
        let value: Value = serde_json::from_slice(&body)
            .map_err(|e| AppError::bad_request(format!("Invalid JSON body: {}", e)))?;
        CreateUserRequest::from_value(value)
    };

    let user = state
        .users
        .insert(request.name.as_deref(), request.email.as_deref());
    tracing::info!(user_id = user.id, "User created");

    Ok((StatusCode::CREATED, Json(UserResponse { ok: true, user })))
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}

pub async fn list_users(State(state): State<AppState>) -> Json<UserListResponse> {
    let users = state.users.list();
    Json(UserListResponse {
        ok: true,
        count: users.len(),
        users,
    })
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user = parse_user_id(&raw_id)?
        .and_then(|id| state.users.get(id))
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;

    Ok(Json(UserResponse { ok: true, user }))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<RemovedUserResponse>, AppError> {
    let removed = parse_user_id(&raw_id)?
        .and_then(|id| state.users.remove(id))
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;
    tracing::info!(user_id = removed.id, "User deleted");

    Ok(Json(RemovedUserResponse { ok: true, removed }))
}
