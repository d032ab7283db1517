use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Client registration for a single OAuth provider.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProviderConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Token endpoint used for both the code grant and refresh calls
    pub endpoint: String,
    /// Providers without an introspection endpoint produce grants without scopes
    pub introspect_endpoint: Option<String>,
    pub callback_url: String,
}

/// Single-use authorization code handed back by the provider's consent page
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorizationToken {
    pub vendor_id: String,
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessGrant {
    pub vendor_id: String,
    pub access_token: String,
    pub refresh_token: String,
    pub provider_user_id: String,
    pub created_on: DateTime<Utc>,
    pub expires_on: DateTime<Utc>,
    pub scopes: Vec<String>,
}

/// Status code and decoded body of a provider call.
/// A body that is not valid JSON is held as `Value::Null`.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub status: u16,
    pub body: Value,
}

impl ProviderResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }
}

/// One entry of a provider `errors` array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    pub error_type: String,
    pub message: String,
}
