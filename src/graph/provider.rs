use async_trait::async_trait;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::errors::RemoteError;

use super::client::GraphClient;

/// Supplies ready-to-use authenticated clients bound to the base resource.
///
/// `require_write` asks for a scope that permits mutation; read-only
/// operations pass `false`.
#[async_trait]
pub trait ClientProvider: Send + Sync {
    async fn client(&self, require_write: bool) -> Result<GraphClient, RemoteError>;
}

/// Provider over a caller-managed bearer token.
///
/// Token acquisition and refresh stay with the caller. The scope flag is
/// ignored here, a static token carries whatever scopes it was minted with;
/// the trait keeps the seam for providers that mint scoped tokens per call.
pub struct BearerTokenProvider {
    config: ClientConfig,
    token: String,
    http: reqwest::Client,
}

impl BearerTokenProvider {
    pub fn new(config: ClientConfig, token: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .build()
            .expect("Failed to build HTTP client");

        Self {
            config,
            token: token.into(),
            http,
        }
    }
}

#[async_trait]
impl ClientProvider for BearerTokenProvider {
    async fn client(&self, _require_write: bool) -> Result<GraphClient, RemoteError> {
        Ok(GraphClient::new(
            self.http.clone(),
            self.config.base_url.clone(),
            self.token.clone(),
        ))
    }
}
