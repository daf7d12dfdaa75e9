// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Configuration for the API client.

use std::time::Duration;

use crate::error::{ApiError, Result};

/// Default API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.nimbus.cloud/v4";

/// Configuration for [`crate::Api`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the REST API, without a trailing slash.
    pub base_url: String,
    /// Personal access token sent as a bearer credential. `None` leaves
    /// requests unauthenticated.
    pub token: Option<String>,
    /// User-Agent header value.
    pub user_agent: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Delay between fetch-until probes.
    pub poll_interval: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: None,
            user_agent: concat!("nimbus/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(3),
        }
    }
}

impl ApiConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration from environment variables.
    ///
    /// Environment variables:
    /// - `NIMBUS_API_URL`: Base URL (default: the public endpoint)
    /// - `NIMBUS_API_TOKEN`: Bearer token (default: unauthenticated)
    /// - `NIMBUS_REQUEST_TIMEOUT_MS`: Per-request timeout in milliseconds (default: 30000)
    /// - `NIMBUS_POLL_INTERVAL_MS`: Fetch-until probe delay in milliseconds (default: 3000)
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("NIMBUS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let token = std::env::var("NIMBUS_API_TOKEN").ok().filter(|t| !t.is_empty());

        let request_timeout_ms: u64 = std::env::var("NIMBUS_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".to_string())
            .parse()
            .map_err(|e| ApiError::Config(format!("invalid NIMBUS_REQUEST_TIMEOUT_MS: {e}")))?;

        let poll_interval_ms: u64 = std::env::var("NIMBUS_POLL_INTERVAL_MS")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| ApiError::Config(format!("invalid NIMBUS_POLL_INTERVAL_MS: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            request_timeout: Duration::from_millis(request_timeout_ms),
            poll_interval: Duration::from_millis(poll_interval_ms),
            ..Self::default()
        })
    }

    /// Set the base URL. A trailing slash is stripped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the User-Agent header value.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the fetch-until probe delay.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert!(config.token.is_none());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.poll_interval, Duration::from_secs(3));
    }

    #[test]
    fn test_builder_methods() {
        let config = ApiConfig::new()
            .with_base_url("https://api.dev.nimbus.cloud/v4")
            .with_token("secret")
            .with_user_agent("console-tests")
            .with_request_timeout(Duration::from_secs(5))
            .with_poll_interval(Duration::from_millis(250));

        assert_eq!(config.base_url, "https://api.dev.nimbus.cloud/v4");
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.user_agent, "console-tests");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.poll_interval, Duration::from_millis(250));
    }

    #[test]
    fn test_base_url_trailing_slash_is_stripped() {
        let config = ApiConfig::new().with_base_url("https://api.dev.nimbus.cloud/v4/");
        assert_eq!(config.base_url, "https://api.dev.nimbus.cloud/v4");
    }
}
