//! Configuration management for GitHub client

use std::{path::PathBuf, time::Duration};

use compact_str::CompactString;

use super::error::{ClientError, Result};
use crate::lookup_app::LookupConfig;

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Main configuration for GitHub client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// GitHub API base URL
    pub base_url: CompactString,
    /// User-Agent header sent with every request
    pub user_agent: CompactString,
    /// Request configuration
    pub request: RequestConfig,
    /// Debug configuration
    pub debug: DebugConfig,
}

/// HTTP request configuration
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Simulated latency awaited before every profile lookup.
    /// Repository page requests are never delayed.
    pub lookup_delay: Duration,
}

/// Debug and logging configuration
#[derive(Debug, Clone)]
pub struct DebugConfig {
    /// Enable debug logging of HTTP responses
    pub log_responses: bool,
    /// Directory for storing debug logs
    pub log_directory: Option<PathBuf>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            lookup_delay: Duration::from_secs(2),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_responses: false,
            log_directory: Some(PathBuf::from("ghlookup-responses")),
        }
    }
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<CompactString>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: concat!("ghlookup/", env!("CARGO_PKG_VERSION")).into(),
            request: RequestConfig::default(),
            debug: DebugConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(ClientError::config_validation(
                "github_url",
                "Base URL cannot be empty",
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ClientError::config_validation(
                "github_url",
                "Base URL must start with http:// or https://",
            ));
        }

        if url::Url::parse(&self.base_url).is_err() {
            return Err(ClientError::config_validation(
                "github_url",
                "Base URL is not a valid URL format",
            ));
        }

        if self.user_agent.is_empty() {
            return Err(ClientError::config_validation(
                "user_agent",
                "GitHub rejects requests without a User-Agent",
            ));
        }

        if self.request.timeout.is_zero() {
            return Err(ClientError::config_validation(
                "timeout",
                "Timeout must be greater than zero",
            ));
        }

        Ok(())
    }
}

impl From<LookupConfig> for ClientConfig {
    fn from(config: LookupConfig) -> Self {
        Self::new(config.github_url).with_request(RequestConfig {
            timeout: Duration::from_secs(config.request_timeout_secs),
            lookup_delay: Duration::from_millis(config.lookup_delay_ms),
        })
    }
}

impl ClientConfig {
    /// Set request configuration
    pub fn with_request(mut self, request: RequestConfig) -> Self {
        self.request = request;
        self
    }

    /// Set the simulated lookup latency
    #[cfg(test)]
    pub fn with_lookup_delay(mut self, delay: Duration) -> Self {
        self.request.lookup_delay = delay;
        self
    }

    /// Enable debug logging
    pub fn with_debug_logging(mut self, enabled: bool) -> Self {
        self.debug.log_responses = enabled;
        self
    }
}
