use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    domain::oauth::{AccessGrant, AuthorizationToken, OAuthServiceApi, ProviderConfig},
    error::{AppError, AppResult},
    infrastructure::config::Config,
};

#[derive(Debug, Deserialize)]
pub struct AccessGrantRequest {
    #[serde(default)]
    pub auth_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RefreshGrantRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

pub struct OAuthController {
    oauth_service: Arc<dyn OAuthServiceApi>,
    config: Arc<Config>,
}

impl OAuthController {
    pub fn new(oauth_service: Arc<dyn OAuthServiceApi>, config: Arc<Config>) -> Self {
        Self {
            oauth_service,
            config,
        }
    }

    fn provider(&self, vendor_id: &str) -> AppResult<&ProviderConfig> {
        self.config
            .oauth_provider(vendor_id)
            .ok_or_else(|| AppError::NotFound(format!("OAuth provider '{}'", vendor_id)))
    }

    /// POST /v1/oauth/:vendor_id - Exchange an authorization code for an access grant
    pub async fn request_access_grant(
        State(controller): State<Arc<OAuthController>>,
        Path(vendor_id): Path<String>,
        Json(request): Json<AccessGrantRequest>,
    ) -> AppResult<Json<AccessGrant>> {
        let provider = controller.provider(&vendor_id)?;
        let auth_token = AuthorizationToken {
            vendor_id,
            auth_token: request.auth_token,
        };

        let grant = controller
            .oauth_service
            .request_access_grant(provider, &auth_token)
            .await?;

        Ok(Json(grant))
    }

    /// POST /v1/oauth/:vendor_id/refresh - Refresh an access grant
    pub async fn refresh_access_grant(
        State(controller): State<Arc<OAuthController>>,
        Path(vendor_id): Path<String>,
        Json(request): Json<RefreshGrantRequest>,
    ) -> AppResult<Json<AccessGrant>> {
        let provider = controller.provider(&vendor_id)?;

        let grant = controller
            .oauth_service
            .refresh_access_grant(provider, &vendor_id, request.refresh_token.as_deref())
            .await?;

        Ok(Json(grant))
    }
}
