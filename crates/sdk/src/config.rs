//! Configuration types for the provider client.

use crate::error::YokAtlasError;
use std::time::Duration;
use url::Url;

/// Configuration for the provider client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the provider service.
    pub base_url: Url,
    /// Bearer token, if the provider requires one.
    pub api_key: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retry policy for transient provider failures.
    pub retry_config: RetryConfig,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_key: None,
            timeout: Duration::from_secs(30),
            retry_config: RetryConfig::default(),
        }
    }
}

/// Retry policy: exponential backoff on throttling, 5xx and transport errors.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubles per attempt.
    pub base_delay: Duration,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
    /// Provider statuses worth retrying.
    pub retry_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            retry_statuses: vec![429, 500, 502, 503, 504],
        }
    }
}

impl RetryConfig {
    pub fn no_retry() -> Self {
        Self::with_max_retries(0)
    }

    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    /// Delay before retry number `attempt` (zero-based).
    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.min(16);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Whether a failed attempt is worth repeating.
    pub fn should_retry(&self, error: &YokAtlasError) -> bool {
        match error {
            YokAtlasError::Api { status, .. } => self.retry_statuses.contains(status),
            YokAtlasError::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_until_capped() {
        let config = RetryConfig {
            max_delay: Duration::from_millis(500),
            ..Default::default()
        };

        let delays: Vec<_> = (0..5).map(|a| config.backoff_for_attempt(a).as_millis()).collect();
        assert_eq!(delays, vec![100, 200, 400, 500, 500]);
        assert_eq!(config.backoff_for_attempt(40), Duration::from_millis(500));
    }

    #[test]
    fn test_retries_throttling_and_server_errors_only() {
        let config = RetryConfig::default();

        assert!(config.should_retry(&YokAtlasError::from_response(429, "")));
        assert!(config.should_retry(&YokAtlasError::from_response(503, "")));
        assert!(!config.should_retry(&YokAtlasError::from_response(400, "")));
        assert!(!config.should_retry(&YokAtlasError::from_response(404, "")));
        assert!(!config.should_retry(&YokAtlasError::Config("x".to_string())));
    }

    #[test]
    fn test_retry_budget_constructors() {
        assert_eq!(RetryConfig::with_max_retries(5).max_retries, 5);
        assert_eq!(RetryConfig::no_retry().max_retries, 0);
    }
}
