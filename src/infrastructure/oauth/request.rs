use crate::domain::oauth::ProviderConfig;
use base64::{engine::general_purpose::STANDARD, Engine as _};

pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const FORM_ENCODING_VALUE: &str = "application/x-www-form-urlencoded";

pub const AUTHORIZATION_CODE_VALUE: &str = "authorization_code";
pub const REFRESH_TOKEN_VALUE: &str = "refresh_token";

pub const CLIENT_ID_PROP_NAME: &str = "client_id";
pub const CODE_PROP_NAME: &str = "code";
pub const GRANT_TYPE_PROP_NAME: &str = "grant_type";
pub const REDIRECT_URI_PROP_NAME: &str = "redirect_uri";
pub const REFRESH_TOKEN_PROP_NAME: &str = "refresh_token";
pub const TOKEN_PROP_NAME: &str = "token";

/// Which provider call a request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Grant,
    Refresh,
    Introspect,
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestKind::Grant => write!(f, "grant"),
            RequestKind::Refresh => write!(f, "refresh"),
            RequestKind::Introspect => write!(f, "introspect"),
        }
    }
}

/// A fully built, not yet sent, form POST to the provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    pub kind: RequestKind,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl ProviderRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Build an authenticated form-encoded POST against `url`
pub fn build_provider_request(
    kind: RequestKind,
    provider: &ProviderConfig,
    url: &str,
    params: &[(&str, &str)],
) -> ProviderRequest {
    ProviderRequest {
        kind,
        url: url.to_string(),
        headers: vec![
            (AUTHORIZATION_HEADER.to_string(), basic_auth_header(provider)),
            (CONTENT_TYPE_HEADER.to_string(), FORM_ENCODING_VALUE.to_string()),
        ],
        body: form_encode(params),
    }
}

pub fn grant_request(provider: &ProviderConfig, code: &str) -> ProviderRequest {
    build_provider_request(
        RequestKind::Grant,
        provider,
        &provider.endpoint,
        &[
            (CLIENT_ID_PROP_NAME, provider.client_id.as_str()),
            (GRANT_TYPE_PROP_NAME, AUTHORIZATION_CODE_VALUE),
            (REDIRECT_URI_PROP_NAME, provider.callback_url.as_str()),
            (CODE_PROP_NAME, code),
        ],
    )
}

pub fn refresh_request(provider: &ProviderConfig, refresh_token: &str) -> ProviderRequest {
    build_provider_request(
        RequestKind::Refresh,
        provider,
        &provider.endpoint,
        &[
            (GRANT_TYPE_PROP_NAME, REFRESH_TOKEN_VALUE),
            (REFRESH_TOKEN_PROP_NAME, refresh_token),
        ],
    )
}

pub fn introspect_request(
    provider: &ProviderConfig,
    introspect_endpoint: &str,
    access_token: &str,
) -> ProviderRequest {
    build_provider_request(
        RequestKind::Introspect,
        provider,
        introspect_endpoint,
        &[(TOKEN_PROP_NAME, access_token)],
    )
}

fn basic_auth_header(provider: &ProviderConfig) -> String {
    let credentials = format!("{}:{}", provider.client_id, provider.client_secret);
    format!("Basic {}", STANDARD.encode(credentials.as_bytes()))
}

fn form_encode(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}
