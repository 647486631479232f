//! Error types for resource operations.
//!
//! Every operation on [`PinterestApi`](crate::PinterestApi) returns
//! [`ApiError`]. Argument problems are caught before any network access and
//! reported as [`ApiError::InvalidArgument`]; anything after that point is
//! an unserializable payload, a transport failure or a body that is not JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! use pinterest_api::api::{ApiError, InvalidArgumentError};
//!
//! match client.get_related_images(25, &[]).await {
//!     Ok(response) => println!("{} pins", response.items().len()),
//!     Err(ApiError::InvalidArgument(InvalidArgumentError::MissingIdentity { .. })) => {
//!         println!("not a pin URL");
//!     }
//!     Err(ApiError::Transport { source, .. }) if source.is_timeout() => {
//!         println!("slow network, try again");
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::api::endpoints::Operation;
use crate::api::url::UrlKind;
use crate::clients::TransportError;

/// Largest page size the resource endpoints accept.
pub const MAX_PAGE_SIZE: i64 = 50;

/// A caller-supplied argument, or the client's identity, does not satisfy an
/// operation's preconditions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidArgumentError {
    /// The operation needs an identity the client was not built with.
    #[error("{operation} requires a {required} URL")]
    MissingIdentity {
        /// The identity kind the operation needs.
        required: UrlKind,
        /// The operation that was attempted.
        operation: Operation,
    },

    /// Page size below 1.
    #[error("Number of images must be greater than 0, got {num}")]
    PageSizeTooSmall {
        /// The rejected value.
        num: i64,
    },

    /// Page size above [`MAX_PAGE_SIZE`].
    #[error("Number of images must not exceed {max} per request, got {num}")]
    PageSizeTooLarge {
        /// The rejected value.
        num: i64,
        /// The upper bound.
        max: i64,
    },

    /// Username argument is empty.
    #[error("Username cannot be empty")]
    EmptyUsername,

    /// Username argument contains characters outside `[A-Za-z0-9_-]`.
    #[error("Invalid username: {username}")]
    InvalidUsername {
        /// The rejected username.
        username: String,
    },

    /// Board id argument is empty.
    #[error("Board id cannot be empty")]
    EmptyBoardId,
}

/// Error returned by resource operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected before any network access.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgumentError),

    /// The options payload could not be serialized.
    #[error("Failed to encode {operation} request: {source}")]
    Encode {
        /// The operation that was attempted.
        operation: Operation,
        /// The serializer error.
        #[source]
        source: serde_json::Error,
    },

    /// The request could not be completed.
    #[error("Failed to request {operation}: {source}")]
    Transport {
        /// The operation that was attempted.
        operation: Operation,
        /// The underlying transport failure.
        #[source]
        source: TransportError,
    },

    /// The response body is not valid JSON.
    #[error("Failed to decode {operation} response: {source}")]
    Decode {
        /// The operation that was attempted.
        operation: Operation,
        /// The raw response body, kept for diagnosis.
        body: String,
        /// The JSON parse error.
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Returns the operation the error belongs to, if it got that far.
    #[must_use]
    pub const fn operation(&self) -> Option<Operation> {
        match self {
            Self::InvalidArgument(InvalidArgumentError::MissingIdentity { operation, .. })
            | Self::Encode { operation, .. }
            | Self::Transport { operation, .. }
            | Self::Decode { operation, .. } => Some(*operation),
            Self::InvalidArgument(_) => None,
        }
    }

    /// Returns `true` for errors raised before any network access.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiError>();
    assert_send_sync::<InvalidArgumentError>();
};
