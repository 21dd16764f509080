use axum::{
    body::Body,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use service_core::error::{AppError, ErrorResponse, INTERNAL_SERVER_ERROR_MESSAGE};
use std::any::Any;

use crate::dtos::{numeric_json, parse_number};

pub const HELLO_MESSAGE: &str = "Hello World från Express + TypeScript!";
pub const ROUTE_NOT_FOUND: &str = "Route not found";

pub async fn hello_world() -> &'static str {
    HELLO_MESSAGE
}

/// `GET /:id` echoes a numeric segment back as `{"id": n}`.
pub async fn echo_numeric_id(Path(raw): Path<String>) -> Result<Json<Value>, AppError> {
    let id = parse_number(&raw)?;
    Ok(Json(json!({ "id": numeric_json(id) })))
}

/// Fallback for unknown paths and for known paths hit with an unsupported method.
pub async fn route_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new(ROUTE_NOT_FOUND)))
}

/// Response used by the catch-panic layer. Panic details are logged, never returned.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %detail, "Internal error: request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(INTERNAL_SERVER_ERROR_MESSAGE)),
    )
        .into_response()
}
