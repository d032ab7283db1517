use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use oauth_exchange_backend::controllers::oauth::OAuthController;
use oauth_exchange_backend::domain::oauth::{OAuthExchangeService, SystemClock};
use oauth_exchange_backend::infrastructure::config::{Config, LogFormat};
use oauth_exchange_backend::infrastructure::http::start_http_server;
use oauth_exchange_backend::infrastructure::oauth::ReqwestTransport;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        environment = ?config.environment,
        "Starting OAuth exchange backend on {}:{}",
        config.host,
        config.port
    );

    let mut vendors: Vec<&str> = config.oauth_providers.keys().map(String::as_str).collect();
    vendors.sort_unstable();
    tracing::info!(vendors = ?vendors, "OAuth providers configured");

    if config.oauth_providers.is_empty() {
        tracing::warn!("No OAuth providers configured. Set OAUTH_VENDORS to enable grant exchange");
    }

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    let transport = Arc::new(ReqwestTransport::new());
    let oauth_service = Arc::new(OAuthExchangeService::new(transport, Arc::new(SystemClock)));
    let oauth_controller = Arc::new(OAuthController::new(oauth_service, config.clone()));

    start_http_server(config, oauth_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "oauth_exchange_backend=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
