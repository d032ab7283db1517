use crate::domain::oauth::ProviderConfig;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    /// OAuth providers keyed by vendor id
    pub oauth_providers: HashMap<String, ProviderConfig>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(String),
    #[error("invalid value for {name}: {message}")]
    Invalid { name: String, message: String },
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            oauth_providers: load_oauth_providers(|name| env::var(name).ok())?,
        };

        Ok(config)
    }

    pub fn oauth_provider(&self, vendor_id: &str) -> Option<&ProviderConfig> {
        self.oauth_providers.get(vendor_id)
    }
}

/// Read provider registrations listed in `OAUTH_VENDORS`.
///
/// Each vendor `fitbit` reads `FITBIT_CLIENT_ID`, `FITBIT_CLIENT_SECRET`,
/// `FITBIT_TOKEN_URL`, `FITBIT_CALLBACK_URL` and optionally `FITBIT_INTROSPECT_URL`.
pub fn load_oauth_providers(
    var: impl Fn(&str) -> Option<String>,
) -> Result<HashMap<String, ProviderConfig>, ConfigError> {
    let vendors = var("OAUTH_VENDORS").unwrap_or_default();
    let mut providers = HashMap::new();

    for vendor_id in vendors.split(',').map(str::trim).filter(|v| !v.is_empty()) {
        if !vendor_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::Invalid {
                name: "OAUTH_VENDORS".to_string(),
                message: format!("unsupported vendor id '{}'", vendor_id),
            });
        }

        let prefix = vendor_id.to_uppercase().replace('-', "_");
        let required = |suffix: &str| {
            let name = format!("{}_{}", prefix, suffix);
            var(&name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let provider = ProviderConfig {
            client_id: required("CLIENT_ID")?,
            client_secret: required("CLIENT_SECRET")?,
            endpoint: required("TOKEN_URL")?,
            introspect_endpoint: var(&format!("{}_INTROSPECT_URL", prefix))
                .filter(|value| !value.is_empty()),
            callback_url: required("CALLBACK_URL")?,
        };

        providers.insert(vendor_id.to_string(), provider);
    }

    Ok(providers)
}
