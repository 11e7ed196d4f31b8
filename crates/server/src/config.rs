use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use yokatlas_core::SurfacePreference;
use yokatlas_sdk::{RetryConfig, YokAtlasClient};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default)]
    pub search_surface: SurfacePreference,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            search_surface: SurfacePreference::default(),
        }
    }
}

/// Values from the command line or environment that win over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub provider_url: Option<String>,
    pub api_key: Option<String>,
    pub search_surface: Option<SurfacePreference>,
}

impl ServerConfig {
    pub fn load(config_path: &Path) -> Result<Self> {
        // Load config file if it exists, otherwise use defaults
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", config_path.display()))
        } else {
            tracing::info!(path = %config_path.display(), "Configuration file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(url) = overrides.provider_url {
            self.provider.base_url = Some(url);
        }
        if let Some(key) = overrides.api_key {
            self.provider.api_key = Some(key);
        }
        if let Some(surface) = overrides.search_surface {
            self.provider.search_surface = surface;
        }
        self
    }

    /// Build the provider client described by `[provider]`
    pub fn build_client(&self) -> Result<YokAtlasClient> {
        let base_url = self.provider.base_url.as_deref().context(
            "Provider URL is not configured; pass --provider-url, set YOKATLAS_PROVIDER_URL \
             or add [provider].base_url to the config file",
        )?;

        let mut builder = YokAtlasClient::builder()
            .base_url(base_url)
            .timeout(Duration::from_secs(self.provider.timeout_secs))
            .retry_config(RetryConfig::with_max_retries(self.provider.max_retries));
        if let Some(key) = &self.provider.api_key {
            builder = builder.api_key(key);
        }

        builder.build().context("Failed to create provider client")
    }
}
