//! # Pinterest Resource API Client
//!
//! An async client for the internal resource endpoints behind the Pinterest
//! web frontend. It turns a pasted web URL into paginated pin listings
//! without an API key.
//!
//! ## Overview
//!
//! This crate provides:
//! - URL classification into pin, search, board and profile identities via
//!   [`api::url`]
//! - A static endpoint registry ([`api::Endpoint`])
//! - Deterministic, encoded request URLs ([`clients::RequestBuilder`])
//! - A browser-like HTTP session with a cookie jar ([`HttpTransport`])
//! - The resource client ([`PinterestApi`]) with related-pins, main-pin,
//!   board, board-feed, search and user-pins operations
//! - Lenient response views with bookmarks and extracted media
//!   ([`PinResponse`])
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pinterest_api::{PinterestApi, PinterestConfig};
//!
//! let api = PinterestApi::connect(
//!     "https://www.pinterest.com/pin/555555555/",
//!     None,
//!     PinterestConfig::default(),
//! )
//! .await?;
//!
//! let page = api.get_related_images(25, &[]).await?;
//! for media in page.media() {
//!     println!("{} {}", media.id, media.src);
//! }
//! ```
//!
//! ## Testing Without a Network
//!
//! [`PinterestApi`] is generic over [`Transport`]; inject a stub to record
//! the generated URLs and return canned bodies:
//!
//! ```rust,ignore
//! let api = PinterestApi::with_transport(url, PinterestConfig::default(), stub);
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Bad arguments are rejected before any request
//! - **One round trip per call**: No retries, no background work
//! - **Caller-owned pagination**: Bookmarks go in, bookmarks come out
//! - **Thread-safe**: Clients are `Send + Sync` when their transport is

pub mod api;
pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use api::{ApiError, Identity, InvalidArgumentError, PinMedia, PinResponse, PinterestApi};
pub use config::{BaseUrl, PinterestConfig, PinterestConfigBuilder};
pub use error::ConfigError;

// Re-export HTTP types
pub use clients::{CookieJar, HttpTransport, Transport, TransportError};
