use super::classifier::classify;
use super::decoder::{decode_grant, decode_scopes};
use super::error::{OAuthServiceError, SERVICE_ERROR_MSG};
use super::model::{AccessGrant, AuthorizationToken, ProviderConfig, ProviderResponse};
use crate::infrastructure::oauth::{
    grant_request, introspect_request, refresh_request, ProviderRequest, ProviderTransport,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;

/// Time source for grant timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Performs the OAuth2 code exchange, refresh and introspection calls against a
/// configured provider. Holds no per-call state.
pub struct OAuthExchangeService {
    transport: Arc<dyn ProviderTransport>,
    clock: Arc<dyn Clock>,
}

impl OAuthExchangeService {
    pub fn new(transport: Arc<dyn ProviderTransport>, clock: Arc<dyn Clock>) -> Self {
        Self { transport, clock }
    }

    /// Call the introspection endpoint and fill in the grant's scopes.
    ///
    /// Skipped when the provider has no introspection endpoint. Any provider or
    /// transport failure is logged and leaves the scopes empty; only a grant
    /// without an access token is an error.
    pub async fn add_scopes_to_access_grant(
        &self,
        provider: &ProviderConfig,
        grant: &mut AccessGrant,
    ) -> Result<(), OAuthServiceError> {
        let Some(introspect_endpoint) = provider.introspect_endpoint.as_deref() else {
            return Ok(());
        };
        if grant.access_token.is_empty() {
            return Err(OAuthServiceError::InvalidState(
                "OAuth access grant has no access token".to_string(),
            ));
        }

        let request = introspect_request(provider, introspect_endpoint, &grant.access_token);
        let scopes = self
            .execute_introspect_request(request)
            .await
            .and_then(|response| handle_response(&response, decode_scopes));

        match scopes {
            Ok(scopes) => grant.scopes = scopes,
            Err(e) => {
                tracing::error!(
                    vendor_id = %grant.vendor_id,
                    error = %e,
                    "Could not get scopes for OAuth grant"
                );
            }
        }

        Ok(())
    }

    async fn execute_grant_request(
        &self,
        request: ProviderRequest,
    ) -> Result<ProviderResponse, OAuthServiceError> {
        self.execute(request).await
    }

    async fn execute_refresh_request(
        &self,
        request: ProviderRequest,
    ) -> Result<ProviderResponse, OAuthServiceError> {
        self.execute(request).await
    }

    async fn execute_introspect_request(
        &self,
        request: ProviderRequest,
    ) -> Result<ProviderResponse, OAuthServiceError> {
        self.execute(request).await
    }

    async fn execute(&self, request: ProviderRequest) -> Result<ProviderResponse, OAuthServiceError> {
        let kind = request.kind;
        let raw = self.transport.execute(request).await.map_err(|e| {
            tracing::error!(kind = %kind, error = %e, "{}", SERVICE_ERROR_MSG);
            OAuthServiceError::service(None)
        })?;

        let body = serde_json::from_slice::<Value>(&raw.body).unwrap_or_else(|e| {
            // Keep going with a null body so classification still runs on the status
            tracing::error!(
                kind = %kind,
                status_code = raw.status,
                error = %e,
                "OAuth call failed with invalid JSON"
            );
            Value::Null
        });

        Ok(ProviderResponse::new(raw.status, body))
    }

    async fn finish_grant(
        &self,
        provider: &ProviderConfig,
        response: ProviderResponse,
        vendor_id: &str,
    ) -> Result<AccessGrant, OAuthServiceError> {
        let now = self.clock.now();
        let mut grant = handle_response(&response, |body| decode_grant(body, now))??;
        grant.vendor_id = vendor_id.to_string();
        self.add_scopes_to_access_grant(provider, &mut grant).await?;
        Ok(grant)
    }
}

fn handle_response<T>(
    response: &ProviderResponse,
    converter: impl FnOnce(&Value) -> T,
) -> Result<T, OAuthServiceError> {
    classify(response)?;
    Ok(converter(&response.body))
}

#[async_trait]
pub trait OAuthServiceApi: Send + Sync {
    /// Exchange an authorization code for an access grant.
    ///
    /// A blank or missing code yields `NotFound` without calling the provider,
    /// so callers fall back to refreshing an existing grant.
    async fn request_access_grant(
        &self,
        provider: &ProviderConfig,
        auth_token: &AuthorizationToken,
    ) -> Result<AccessGrant, OAuthServiceError>;

    /// Refresh an access grant with a stored refresh token
    async fn refresh_access_grant(
        &self,
        provider: &ProviderConfig,
        vendor_id: &str,
        refresh_token: Option<&str>,
    ) -> Result<AccessGrant, OAuthServiceError>;
}

#[async_trait]
impl OAuthServiceApi for OAuthExchangeService {
    async fn request_access_grant(
        &self,
        provider: &ProviderConfig,
        auth_token: &AuthorizationToken,
    ) -> Result<AccessGrant, OAuthServiceError> {
        let code = match auth_token.auth_token.as_deref() {
            Some(code) if !code.trim().is_empty() => code,
            _ => return Err(OAuthServiceError::NotFound),
        };

        tracing::info!(vendor_id = %auth_token.vendor_id, "Requesting OAuth access grant");

        let response = self
            .execute_grant_request(grant_request(provider, code))
            .await?;
        self.finish_grant(provider, response, &auth_token.vendor_id)
            .await
    }

    async fn refresh_access_grant(
        &self,
        provider: &ProviderConfig,
        vendor_id: &str,
        refresh_token: Option<&str>,
    ) -> Result<AccessGrant, OAuthServiceError> {
        let Some(refresh_token) = refresh_token else {
            return Err(OAuthServiceError::NotFound);
        };

        tracing::info!(vendor_id = %vendor_id, "Refreshing OAuth access grant");

        let response = self
            .execute_refresh_request(refresh_request(provider, refresh_token))
            .await?;
        self.finish_grant(provider, response, vendor_id).await
    }
}
