//! Resilience configuration with builder pattern
//!
//! Bundles the retry policy with the per-attempt request timeout used when
//! talking to the MEF report endpoint.

use super::retry::RetryConfig;
use crate::config::FetchConfig;
use std::time::Duration;

/// Per-attempt timeout applied when nothing else is configured
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// Global resilience configuration for report downloads
#[derive(Debug, Clone)]
pub struct ResilienceConfig {
    pub retry: RetryConfig,
    /// Timeout for one attempt, covering connect and body transfer
    pub request_timeout: Duration,
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self {
            retry: RetryConfig::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ResilienceConfig {
    /// Create a new builder for ResilienceConfig
    pub fn builder() -> ResilienceConfigBuilder {
        ResilienceConfigBuilder::new()
    }

    /// Build from the `[fetch]` section of the config file
    pub fn from_fetch_config(fetch: &FetchConfig) -> Self {
        Self::builder()
            .max_retries(fetch.max_retries)
            .request_timeout(Duration::from_secs(fetch.timeout_secs))
            .base_delay(Duration::from_millis(fetch.retry_base_delay_ms))
            .max_delay(Duration::from_millis(fetch.retry_max_delay_ms))
            .backoff_multiplier(fetch.backoff_multiplier)
            .jitter(fetch.jitter)
            .build()
    }
}

/// Builder for ResilienceConfig
#[derive(Debug)]
pub struct ResilienceConfigBuilder {
    config: ResilienceConfig,
}

impl ResilienceConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ResilienceConfig::default(),
        }
    }

    /// Set max attempts (the first attempt counts)
    pub fn max_retries(mut self, attempts: u32) -> Self {
        self.config.retry.max_attempts = attempts;
        self
    }

    pub fn base_delay(mut self, delay: Duration) -> Self {
        self.config.retry.base_delay = delay;
        self
    }

    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.config.retry.max_delay = delay;
        self
    }

    pub fn backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.config.retry.backoff_multiplier = multiplier;
        self
    }

    pub fn jitter(mut self, enabled: bool) -> Self {
        self.config.retry.jitter = enabled;
        self
    }

    /// Set the per-attempt request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> ResilienceConfig {
        self.config
    }
}

impl Default for ResilienceConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ResilienceConfig::default();

        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.base_delay, Duration::ZERO);
        assert!(!config.retry.jitter);
        assert_eq!(config.request_timeout, Duration::from_secs(90));
    }

    #[test]
    fn test_builder_pattern() {
        let config = ResilienceConfig::builder()
            .max_retries(5)
            .request_timeout(Duration::from_secs(10))
            .base_delay(Duration::from_millis(250))
            .backoff_multiplier(2.0)
            .jitter(true)
            .build();

        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.retry.base_delay, Duration::from_millis(250));
        assert_eq!(config.retry.backoff_multiplier, 2.0);
        assert!(config.retry.jitter);
    }

    #[test]
    fn test_from_fetch_config() {
        let fetch = FetchConfig {
            timeout_secs: 30,
            max_retries: 4,
            ..FetchConfig::default()
        };

        let config = ResilienceConfig::from_fetch_config(&fetch);
        assert_eq!(config.retry.max_attempts, 4);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.retry.base_delay, Duration::ZERO);
    }
}
