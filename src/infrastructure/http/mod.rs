use axum::{middleware, routing::{get, post}, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::controllers::{health, oauth::OAuthController};
use crate::infrastructure::config::Config;

pub mod request_id;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

/// Build the application router with all routes configured
pub fn create_router(config: Arc<Config>, oauth_controller: Arc<OAuthController>) -> Router {
    // OAuth grant routes
    let oauth_routes = Router::new()
        .route("/v1/oauth/:vendor_id", post(OAuthController::request_access_grant))
        .route(
            "/v1/oauth/:vendor_id/refresh",
            post(OAuthController::refresh_access_grant),
        )
        .with_state(oauth_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(config)
        .merge(oauth_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    oauth_controller: Arc<OAuthController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(config.clone(), oauth_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
