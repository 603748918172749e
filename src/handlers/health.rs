// src/handlers/health.rs

use axum::{Json, response::IntoResponse};
use serde_json::json;

/// Root endpoint; doubles as the container liveness probe target.
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "East Africa Administration Level API is running."
    }))
}
