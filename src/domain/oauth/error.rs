use crate::error::AppError;

pub const SERVICE_ERROR_MSG: &str = "Error retrieving access token";

#[derive(Debug, thiserror::Error)]
pub enum OAuthServiceError {
    /// The stored client credentials were rejected by the provider
    #[error("provider rejected client credentials")]
    Configuration,
    #[error("OAuth access grant not found")]
    GrantNotFound,
    #[error("OAuth access grant not found")]
    NotFound,
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("{message}")]
    Service {
        message: String,
        status: Option<u16>,
    },
    #[error("malformed provider response: {0}")]
    Decode(String),
    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl OAuthServiceError {
    pub fn service(status: Option<u16>) -> Self {
        OAuthServiceError::Service {
            message: SERVICE_ERROR_MSG.to_string(),
            status,
        }
    }
}

impl From<OAuthServiceError> for AppError {
    fn from(err: OAuthServiceError) -> Self {
        match err {
            OAuthServiceError::GrantNotFound | OAuthServiceError::NotFound => {
                AppError::NotFound("OAuth access grant".to_string())
            }
            OAuthServiceError::PermissionDenied(msg) => AppError::Forbidden(msg),
            OAuthServiceError::BadRequest(msg) => AppError::BadRequest(msg),
            OAuthServiceError::Service { message, .. } => AppError::ExternalService(message),
            OAuthServiceError::Configuration => AppError::Internal(SERVICE_ERROR_MSG.to_string()),
            OAuthServiceError::Decode(msg) | OAuthServiceError::InvalidState(msg) => {
                AppError::Internal(msg)
            }
        }
    }
}
