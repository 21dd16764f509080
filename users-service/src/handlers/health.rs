use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::ErrorResponse;

use crate::AppState;

/// Acquires the shared connection and pings the database.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let probe = match state.db.acquire().await {
        Ok(db) => db.ping().await,
        Err(e) => Err(e),
    };

    match probe {
        Ok(()) => (StatusCode::OK, Json(json!({ "ok": true, "db": "up" }))).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}
