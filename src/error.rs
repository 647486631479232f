//! Error types for client configuration.
//!
//! This module contains the error type returned while building a
//! [`PinterestConfig`](crate::PinterestConfig) or one of its validated
//! newtypes.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Errors raised while talking to the service live in
//! [`crate::api::ApiError`] and [`crate::clients::TransportError`].
//!
//! # Example
//!
//! ```rust
//! use pinterest_api::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("www.pinterest.com");
//! assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme and host (e.g., 'https://www.pinterest.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Request timeout must be non-zero.
    #[error("Request timeout must be greater than zero.")]
    ZeroTimeout,

    /// User agent cannot be empty.
    #[error("User agent cannot be empty.")]
    EmptyUserAgent,

    /// A header name or value cannot be sent over HTTP.
    #[error("Invalid header '{name}'.")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },
}
