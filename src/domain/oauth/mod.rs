pub mod classifier;
pub mod decoder;
pub mod error;
pub mod model;
pub mod service;

pub use error::OAuthServiceError;
pub use model::{AccessGrant, AuthorizationToken, ErrorEntry, ProviderConfig, ProviderResponse};
pub use service::{Clock, OAuthExchangeService, OAuthServiceApi, SystemClock};
