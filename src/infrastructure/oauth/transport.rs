use super::request::ProviderRequest;
use async_trait::async_trait;

/// Status code and undecoded body returned by the provider
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request to {url} failed: {message}")]
    Io { url: String, message: String },
}

/// HTTP execution point for provider calls.
///
/// Implementations must read the full response body before returning so the
/// connection is released on every exit path. No retries happen at this layer.
#[async_trait]
pub trait ProviderTransport: Send + Sync {
    async fn execute(&self, request: ProviderRequest) -> Result<RawResponse, TransportError>;
}

/// reqwest-backed transport. Timeouts are the client defaults.
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::new(),
        }
    }

    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderTransport for ReqwestTransport {
    async fn execute(&self, request: ProviderRequest) -> Result<RawResponse, TransportError> {
        let io_error = |e: reqwest::Error| TransportError::Io {
            url: request.url.clone(),
            message: e.to_string(),
        };

        let mut builder = self.http_client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .body(request.body.clone())
            .send()
            .await
            .map_err(io_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(io_error)?.to_vec();

        tracing::debug!(
            kind = %request.kind,
            url = %request.url,
            status_code = status,
            body_size_bytes = body.len(),
            "OAuth provider call completed"
        );

        Ok(RawResponse { status, body })
    }
}
