//! Transport-level error types.
//!
//! [`TransportError`] covers everything that can go wrong between handing a
//! URL to a [`Transport`](crate::clients::Transport) and getting a response
//! body back. Decoding the body is not the transport's job; see
//! [`ApiError::Decode`](crate::api::ApiError::Decode).

use thiserror::Error;

/// Error returned by a [`Transport`](crate::clients::Transport) when a
/// request could not be completed.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use pinterest_api::clients::TransportError;
///
/// let error = TransportError::Timeout {
///     url: "https://www.pinterest.com/resource/BoardResource/get/".to_string(),
///     timeout: Duration::from_secs(5),
/// };
/// assert!(error.to_string().contains("timed out"));
/// ```
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request did not complete within the configured timeout.
    #[error("Request to {url} timed out after {timeout:?}")]
    Timeout {
        /// The URL that was requested.
        url: String,
        /// The timeout that expired.
        timeout: std::time::Duration,
    },

    /// The URL handed to the transport does not parse.
    #[error("Invalid request URL {url}: {message}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// The parser's description of the problem.
        message: String,
    },

    /// Connection, TLS, or protocol error from the HTTP stack.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Error raised by a non-reqwest transport.
    #[error("Transport error: {message}")]
    Other {
        /// Description of the failure.
        message: String,
    },
}

impl TransportError {
    /// Returns `true` if this error is a timeout, whichever layer raised it.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Network(e) => e.is_timeout(),
            Self::InvalidUrl { .. } | Self::Other { .. } => false,
        }
    }
}
