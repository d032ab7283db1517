use super::error::OAuthServiceError;
use super::model::AccessGrant;
use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::sync::OnceLock;

const SCOPE_PROP_NAME: &str = "scope";

/// Expiration is pulled back this far to absorb clock skew with the provider
const EXPIRATION_SKEW_SECONDS: i64 = 60;

fn scope_pair_split_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[\s{},]+").unwrap())
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    access_token: String,
    refresh_token: String,
    user_id: String,
    expires_in: i64,
}

/// Build a grant from a successful token response.
///
/// The vendor id is left empty; the calling flow attaches it.
pub fn decode_grant(body: &Value, now: DateTime<Utc>) -> Result<AccessGrant, OAuthServiceError> {
    let token = TokenBody::deserialize(body)
        .map_err(|e| OAuthServiceError::Decode(format!("invalid token response: {}", e)))?;

    let expires_on = Duration::try_seconds(token.expires_in.saturating_sub(EXPIRATION_SKEW_SECONDS))
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| {
            OAuthServiceError::Decode(format!("expires_in out of range: {}", token.expires_in))
        })?;

    Ok(AccessGrant {
        vendor_id: String::new(),
        access_token: token.access_token,
        refresh_token: token.refresh_token,
        provider_user_id: token.user_id,
        created_on: now,
        expires_on,
        scopes: Vec::new(),
    })
}

/// Parse the scope names out of an introspection response.
///
/// The provider encodes scopes as `{SLEEP=READ, HEARTRATE=READWRITE}` rather than
/// the space-delimited RFC 7662 form. Only the name before `=` is kept.
pub fn decode_scopes(body: &Value) -> Vec<String> {
    let Some(scope) = body.get(SCOPE_PROP_NAME).and_then(Value::as_str) else {
        return Vec::new();
    };

    scope_pair_split_pattern()
        .split(scope)
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((name, _level)) => name.to_string(),
            None => pair.to_string(),
        })
        .collect()
}
