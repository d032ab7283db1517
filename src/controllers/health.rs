use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use crate::infrastructure::config::Config;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(config): State<Arc<Config>>) -> impl IntoResponse {
    let mut vendors: Vec<&str> = config.oauth_providers.keys().map(String::as_str).collect();
    vendors.sort_unstable();

    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "oauth_providers": vendors
        })),
    )
}
