//! HTTP transport layer for the provider client.

use crate::config::ClientConfig;
use crate::error::{YokAtlasError, YokAtlasResult};
use reqwest::{header, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// JSON-over-HTTP transport with retry.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    pub fn new(config: Arc<ClientConfig>) -> YokAtlasResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        if let Some(api_key) = &config.api_key {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|_| YokAtlasError::Config("API key contains invalid characters".to_string()))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .user_agent(concat!("yokatlas-sdk/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Append `segments` to the base URL path, each percent-encoded as one segment.
    fn url(&self, segments: &[&str]) -> YokAtlasResult<Url> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                YokAtlasError::Config(format!(
                    "base URL {} cannot carry a path",
                    self.config.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request, repeating it while the retry policy allows.
    ///
    /// `build` is called once per attempt so no request body needs cloning.
    async fn send<F>(&self, build: F) -> YokAtlasResult<Response>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let policy = &self.config.retry_config;
        let mut attempt = 0;

        loop {
            let error = match build(&self.client).send().await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => {
                    let status = response.status().as_u16();
                    let body = response.text().await.unwrap_or_default();
                    YokAtlasError::from_response(status, &body)
                }
                Err(e) => YokAtlasError::from(e),
            };

            if attempt >= policy.max_retries || !policy.should_retry(&error) {
                return Err(error);
            }

            let delay = policy.backoff_for_attempt(attempt);
            attempt += 1;
            warn!(
                attempt,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "Provider request failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Decode a success body, keeping serde's message on malformed payloads.
    async fn decode<T: DeserializeOwned>(response: Response) -> YokAtlasResult<T> {
        let bytes = response.bytes().await?;
        debug!(bytes = bytes.len(), "Provider response received");
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &[&str]) -> YokAtlasResult<T> {
        let url = self.url(path)?;
        debug!(%url, "GET");
        let response = self.send(|client| client.get(url.clone())).await?;
        Self::decode(response).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &[&str], query: &Q) -> YokAtlasResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        debug!(%url, "GET");
        let response = self
            .send(|client| client.get(url.clone()).query(query))
            .await?;
        Self::decode(response).await
    }

    pub async fn post<T, B>(&self, path: &[&str], body: &B) -> YokAtlasResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        debug!(%url, "POST");
        let response = self
            .send(|client| client.post(url.clone()).json(body))
            .await?;
        Self::decode(response).await
    }
}
