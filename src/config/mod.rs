//! Configuration types for the Pinterest client.
//!
//! # Overview
//!
//! - [`PinterestConfig`]: settings shared by the transport and the resource client
//! - [`PinterestConfigBuilder`]: builder for [`PinterestConfig`]
//! - [`BaseUrl`]: validated base URL newtype
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use pinterest_api::PinterestConfig;
//!
//! let config = PinterestConfig::builder()
//!     .timeout(Duration::from_secs(10))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://www.pinterest.com");
//! ```

mod newtypes;

pub use newtypes::BaseUrl;

use std::time::Duration;

use reqwest::header::HeaderValue;

use crate::error::ConfigError;

/// Desktop browser user agent the web frontend is served to.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.1; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/61.0.3163.100 Safari/537.36";

/// Header the resource endpoints require since March 2025.
pub const PWS_HANDLER_HEADER: &str = "x-pinterest-pws-handler";

/// Value sent in [`PWS_HANDLER_HEADER`].
pub const DEFAULT_PWS_HANDLER: &str = "www/pin/[id].js";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the Pinterest client.
///
/// `PinterestConfig` is `Clone`, `Send`, and `Sync`. It holds no session
/// state; cookies live in the transport.
#[derive(Clone, Debug)]
pub struct PinterestConfig {
    base_url: BaseUrl,
    timeout: Duration,
    user_agent: String,
    pws_handler: String,
}

impl PinterestConfig {
    /// Creates a new builder for constructing a `PinterestConfig`.
    #[must_use]
    pub fn builder() -> PinterestConfigBuilder {
        PinterestConfigBuilder::new()
    }

    /// Returns the base URL endpoints are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the `x-pinterest-pws-handler` header value.
    #[must_use]
    pub fn pws_handler(&self) -> &str {
        &self.pws_handler
    }
}

impl Default for PinterestConfig {
    fn default() -> Self {
        Self {
            base_url: BaseUrl::default(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            pws_handler: DEFAULT_PWS_HANDLER.to_string(),
        }
    }
}

// Verify PinterestConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PinterestConfig>();
};

/// Builder for constructing [`PinterestConfig`] instances.
///
/// # Defaults
///
/// - `base_url`: `https://www.pinterest.com`
/// - `timeout`: 5 seconds
/// - `user_agent`: [`DEFAULT_USER_AGENT`]
/// - `pws_handler`: [`DEFAULT_PWS_HANDLER`]
#[derive(Debug, Default)]
pub struct PinterestConfigBuilder {
    base_url: Option<BaseUrl>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    pws_handler: Option<String>,
}

impl PinterestConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL. Mostly useful to point the client at a mock server.
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overrides the `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Overrides the `x-pinterest-pws-handler` header.
    #[must_use]
    pub fn pws_handler(mut self, handler: impl Into<String>) -> Self {
        self.pws_handler = Some(handler.into());
        self
    }

    /// Builds the [`PinterestConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTimeout`] for a zero timeout,
    /// [`ConfigError::EmptyUserAgent`] for a blank user agent, and
    /// [`ConfigError::InvalidHeader`] when a header value holds control
    /// characters.
    pub fn build(self) -> Result<PinterestConfig, ConfigError> {
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        if user_agent.trim().is_empty() {
            return Err(ConfigError::EmptyUserAgent);
        }
        if !is_valid_header_value(&user_agent) {
            return Err(ConfigError::InvalidHeader {
                name: "User-Agent".to_string(),
            });
        }

        let pws_handler = self
            .pws_handler
            .unwrap_or_else(|| DEFAULT_PWS_HANDLER.to_string());
        if !is_valid_header_value(&pws_handler) {
            return Err(ConfigError::InvalidHeader {
                name: PWS_HANDLER_HEADER.to_string(),
            });
        }

        Ok(PinterestConfig {
            base_url: self.base_url.unwrap_or_default(),
            timeout,
            user_agent,
            pws_handler,
        })
    }
}

fn is_valid_header_value(value: &str) -> bool {
    HeaderValue::from_str(value).is_ok()
}
