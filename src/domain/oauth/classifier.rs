use super::error::OAuthServiceError;
use super::model::{ErrorEntry, ProviderResponse};
use serde_json::Value;

const ERRORS_PROP_NAME: &str = "errors";
const ERROR_TYPE_PROP_NAME: &str = "errorType";
const MESSAGE_PROP_NAME: &str = "message";

const INVALID_CLIENT_ERRORS: &[&str] = &["invalid_client"];
const INVALID_OR_EXPIRED_ERRORS: &[&str] = &["invalid_token", "expired_token", "invalid_grant"];

/// A predicate over the response paired with the error it raises
struct Rule {
    matches: fn(&ProviderResponse, &[ErrorEntry]) -> bool,
    raise: fn(&ProviderResponse, &[ErrorEntry]) -> OAuthServiceError,
}

// Evaluated top to bottom, first match wins. A 401 is never surfaced as
// unauthorized because clients treat that as "sign in again".
const RULES: &[Rule] = &[
    Rule {
        matches: is_invalid_client,
        raise: raise_configuration,
    },
    Rule {
        matches: is_invalid_or_expired,
        raise: raise_grant_not_found,
    },
    Rule {
        matches: is_forbidden,
        raise: raise_permission_denied,
    },
    Rule {
        matches: is_client_error,
        raise: raise_bad_request,
    },
    Rule {
        matches: is_not_ok,
        raise: raise_service_error,
    },
];

/// Decide whether a provider response may be decoded.
///
/// Returns `Ok(())` only for a 200 that carries no invalid/expired token errors.
pub fn classify(response: &ProviderResponse) -> Result<(), OAuthServiceError> {
    let entries = error_entries(&response.body);

    match RULES.iter().find(|rule| (rule.matches)(response, &entries)) {
        Some(rule) => Err((rule.raise)(response, &entries)),
        None => Ok(()),
    }
}

/// Collect `(errorType, message)` pairs from the `errors` array.
/// Entries without a textual `message` are skipped.
pub fn error_entries(body: &Value) -> Vec<ErrorEntry> {
    let Some(errors) = body.get(ERRORS_PROP_NAME).and_then(Value::as_array) else {
        return Vec::new();
    };

    errors
        .iter()
        .filter_map(|error| {
            let message = error.get(MESSAGE_PROP_NAME)?.as_str()?;
            let error_type = error
                .get(ERROR_TYPE_PROP_NAME)
                .and_then(Value::as_str)
                .unwrap_or_default();
            Some(ErrorEntry {
                error_type: error_type.to_string(),
                message: message.to_string(),
            })
        })
        .collect()
}

/// Space-joined text of every error message in the body
pub fn error_message(body: &Value) -> String {
    join_messages(&error_entries(body))
}

fn join_messages(entries: &[ErrorEntry]) -> String {
    entries
        .iter()
        .map(|entry| entry.message.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn has_error_type(entries: &[ErrorEntry], types: &[&str]) -> bool {
    entries
        .iter()
        .any(|entry| types.contains(&entry.error_type.as_str()))
}

fn is_invalid_client(response: &ProviderResponse, entries: &[ErrorEntry]) -> bool {
    response.status == 401 && has_error_type(entries, INVALID_CLIENT_ERRORS)
}

fn is_invalid_or_expired(response: &ProviderResponse, entries: &[ErrorEntry]) -> bool {
    response.status == 401 || has_error_type(entries, INVALID_OR_EXPIRED_ERRORS)
}

fn is_forbidden(response: &ProviderResponse, _entries: &[ErrorEntry]) -> bool {
    response.status == 403
}

fn is_client_error(response: &ProviderResponse, _entries: &[ErrorEntry]) -> bool {
    response.status > 399 && response.status < 500
}

fn is_not_ok(response: &ProviderResponse, _entries: &[ErrorEntry]) -> bool {
    response.status != 200
}

fn raise_configuration(response: &ProviderResponse, _entries: &[ErrorEntry]) -> OAuthServiceError {
    tracing::error!(
        status_code = response.status,
        body = %response.body,
        "Error retrieving access token: provider rejected client credentials"
    );
    OAuthServiceError::Configuration
}

fn raise_grant_not_found(_response: &ProviderResponse, _entries: &[ErrorEntry]) -> OAuthServiceError {
    OAuthServiceError::GrantNotFound
}

fn raise_permission_denied(_response: &ProviderResponse, entries: &[ErrorEntry]) -> OAuthServiceError {
    OAuthServiceError::PermissionDenied(join_messages(entries))
}

fn raise_bad_request(_response: &ProviderResponse, entries: &[ErrorEntry]) -> OAuthServiceError {
    OAuthServiceError::BadRequest(join_messages(entries))
}

fn raise_service_error(response: &ProviderResponse, _entries: &[ErrorEntry]) -> OAuthServiceError {
    tracing::error!(
        status_code = response.status,
        body = %response.body,
        "Error retrieving access token"
    );
    OAuthServiceError::service(Some(response.status))
}
