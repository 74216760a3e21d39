//! Configuration types for the toolkit.
//!
//! This module provides the configuration used to build clients and
//! resource APIs.
//!
//! # Overview
//!
//! - [`ApiConfig`]: The configuration struct holding all toolkit settings
//! - [`ApiConfigBuilder`]: A builder for constructing [`ApiConfig`] instances
//! - [`BaseUrl`]: A validated service root URL
//! - [`AccessToken`]: A validated OAuth bearer token with masked debug output
//! - [`ApiKey`]: A validated Google API key with masked debug output
//!
//! # Example
//!
//! ```rust
//! use google_api_toolkit::{ApiConfig, AccessToken, BaseUrl};
//!
//! let config = ApiConfig::builder()
//!     .base_url(BaseUrl::new("https://people.googleapis.com/v1").unwrap())
//!     .access_token(AccessToken::new("ya29.token").unwrap())
//!     .page_size(100)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.page_size(), Some(100));
//! assert_eq!(config.num_retries(), 5);
//! ```

mod newtypes;

pub use newtypes::{AccessToken, ApiKey, BaseUrl};

use crate::error::ConfigError;
use crate::pages::DEFAULT_MAX_EMPTY_PAGES;

/// Default number of retries for retryable failures.
pub const DEFAULT_NUM_RETRIES: u32 = 5;

/// Configuration for talking to one REST service.
///
/// # Thread Safety
///
/// `ApiConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    base_url: BaseUrl,
    access_token: Option<AccessToken>,
    api_key: Option<ApiKey>,
    page_size: Option<u32>,
    num_retries: u32,
    max_empty_pages: Option<usize>,
    user_agent_prefix: Option<String>,
}

impl ApiConfig {
    /// Creates a new builder for constructing an `ApiConfig`.
    #[must_use]
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::new()
    }

    /// Returns the service base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the access token, if configured.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Returns the API key, if configured.
    #[must_use]
    pub const fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// Returns the default page size for list requests.
    ///
    /// `None` lets the server pick its own default.
    #[must_use]
    pub const fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    /// Returns the number of retries for retryable failures.
    #[must_use]
    pub const fn num_retries(&self) -> u32 {
        self.num_retries
    }

    /// Returns how many consecutive empty pages an iteration tolerates.
    ///
    /// `None` means unbounded.
    #[must_use]
    pub const fn max_empty_pages(&self) -> Option<usize> {
        self.max_empty_pages
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ApiConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiConfig>();
};

/// Builder for constructing [`ApiConfig`] instances.
///
/// `base_url` is required. All other fields have defaults.
///
/// # Defaults
///
/// - `access_token`: `None`
/// - `api_key`: `None`
/// - `page_size`: `None`
/// - `num_retries`: 5
/// - `max_empty_pages`: `Some(100)`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    base_url: Option<BaseUrl>,
    access_token: Option<AccessToken>,
    api_key: Option<ApiKey>,
    page_size: Option<u32>,
    num_retries: Option<u32>,
    max_empty_pages: Option<Option<usize>>,
    user_agent_prefix: Option<String>,
}

impl ApiConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the service base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the OAuth access token.
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the default page size for list requests.
    #[must_use]
    pub const fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Sets the number of retries for retryable failures.
    #[must_use]
    pub const fn num_retries(mut self, retries: u32) -> Self {
        self.num_retries = Some(retries);
        self
    }

    /// Sets how many consecutive empty pages an iteration tolerates.
    ///
    /// Pass `None` to disable the limit.
    #[must_use]
    pub const fn max_empty_pages(mut self, limit: Option<usize>) -> Self {
        self.max_empty_pages = Some(limit);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ApiConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set.
    /// Returns [`ConfigError::InvalidPageSize`] if the page size is zero.
    pub fn build(self) -> Result<ApiConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        if let Some(size @ 0) = self.page_size {
            return Err(ConfigError::InvalidPageSize { size });
        }

        Ok(ApiConfig {
            base_url,
            access_token: self.access_token,
            api_key: self.api_key,
            page_size: self.page_size,
            num_retries: self.num_retries.unwrap_or(DEFAULT_NUM_RETRIES),
            max_empty_pages: self
                .max_empty_pages
                .unwrap_or(Some(DEFAULT_MAX_EMPTY_PAGES)),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
