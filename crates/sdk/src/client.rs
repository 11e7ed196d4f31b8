//! Main client for the provider service.

use crate::api::*;
use crate::config::{ClientConfig, RetryConfig};
use crate::error::{YokAtlasError, YokAtlasResult};
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Client for a YÖK Atlas provider service.
#[derive(Clone, Debug)]
pub struct YokAtlasClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl YokAtlasClient {
    /// Create a new client builder.
    pub fn builder() -> YokAtlasClientBuilder {
        YokAtlasClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> YokAtlasResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// Base URL the client talks to.
    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// Get the atlas (program detail) API.
    pub fn atlas(&self) -> AtlasApi<'_> {
        AtlasApi::new(self)
    }

    /// Get the search API.
    pub fn search(&self) -> SearchApi<'_> {
        SearchApi::new(self)
    }

    /// Get the capabilities API.
    pub fn capabilities(&self) -> CapabilitiesApi<'_> {
        CapabilitiesApi::new(self)
    }
}

/// Builder for creating a YokAtlasClient.
pub struct YokAtlasClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
    retry_config: RetryConfig,
}

impl YokAtlasClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout: Duration::from_secs(30),
            retry_config: RetryConfig::default(),
        }
    }

    /// Set the base URL of the provider service.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the bearer token sent to the provider.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry configuration.
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Build the client.
    pub fn build(self) -> YokAtlasResult<YokAtlasClient> {
        let base_url_str = self
            .base_url
            .ok_or_else(|| YokAtlasError::Config("base_url is required".to_string()))?;
        let base_url = Url::parse(&base_url_str)?;

        let config = ClientConfig {
            base_url,
            api_key: self.api_key,
            timeout: self.timeout,
            retry_config: self.retry_config,
        };

        YokAtlasClient::from_config(config)
    }
}

impl Default for YokAtlasClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
