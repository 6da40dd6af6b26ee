// src/config.rs
//! Client configuration.
//!
//! Everything the client needs is carried in one explicit value built at
//! construction time: base URL, credentials, page size, timeout, and the
//! retry policy. There is no global or static configuration.

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS};
use crate::retry::RetryPolicy;
use crate::types::{ApiToken, ValidationError};
use std::time::Duration;
use url::Url;

/// Resolved client configuration, validated and ready to construct a
/// [`SmartlingClient`](crate::SmartlingClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub token: ApiToken,
    /// Page size for paginated reads. Fixed for the lifetime of every
    /// stream the client produces.
    pub page_size: usize,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl ClientConfig {
    /// A configuration with defaults for everything but the token.
    pub fn new(token: ApiToken) -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            token,
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
        }
    }

    /// Starts a builder for overriding defaults.
    pub fn builder(token: ApiToken) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::new(token),
            base_url_override: None,
        }
    }

    /// Resolves a configuration from the environment, reading the token
    /// from `SMARTLING_API_TOKEN`.
    pub fn from_env() -> Result<Self, ValidationError> {
        let token = std::env::var("SMARTLING_API_TOKEN").map_err(|_| {
            ValidationError::MissingConfiguration(
                "SMARTLING_API_TOKEN environment variable not set".to_string(),
            )
        })?;
        Ok(Self::new(ApiToken::new(token)?))
    }
}

/// Builder for [`ClientConfig`].
pub struct ClientConfigBuilder {
    config: ClientConfig,
    base_url_override: Option<String>,
}

impl ClientConfigBuilder {
    /// Point the client at a different API root (e.g. a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url_override = Some(url.into());
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.config.page_size = page_size;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.config.retry = retry;
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> Result<ClientConfig, ValidationError> {
        let mut config = self.config;

        if let Some(raw) = self.base_url_override {
            let url = Url::parse(&raw).map_err(|error| ValidationError::InvalidBaseUrl {
                url: raw.clone(),
                reason: error.to_string(),
            })?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(ValidationError::InvalidBaseUrl {
                    url: raw,
                    reason: "scheme must be http or https".to_string(),
                });
            }
            config.base_url = url;
        }

        if config.page_size == 0 {
            return Err(ValidationError::InvalidPageSize {
                value: config.page_size,
            });
        }

        Ok(config)
    }
}
