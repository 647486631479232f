//! Resource operations on top of the HTTP plumbing.
//!
//! # Overview
//!
//! - [`PinterestApi`]: the client, built from one web URL
//! - [`url`]: classification of pin, search, board and profile URLs
//! - [`Endpoint`] / [`Operation`]: the static endpoint registry
//! - [`PinResponse`] / [`PinMedia`]: views over the decoded JSON envelope
//! - [`ApiError`] / [`InvalidArgumentError`]: operation failures
//!
//! # Example
//!
//! ```rust
//! use pinterest_api::api::url::{classify, Identity};
//! use pinterest_api::api::{Endpoint, Operation};
//!
//! let identity = classify("https://www.pinterest.com/pin/555555555/").identity();
//! assert_eq!(identity, Identity::Pin { id: "555555555".to_string() });
//!
//! let endpoint = Endpoint::for_operation(Operation::RelatedImages);
//! assert_eq!(endpoint.resource, "RelatedModulesResource");
//! ```

mod client;
mod endpoints;
mod errors;
mod response;
pub mod url;

pub use client::{validate_num, PinterestApi};
pub use endpoints::{Endpoint, HttpMethod, Operation, ENDPOINTS};
pub use errors::{ApiError, InvalidArgumentError, MAX_PAGE_SIZE};
pub use response::{PinMedia, PinResponse, END_BOOKMARK};
pub use url::{BoardRef, Identity, UrlKind, UrlMatches, UrlParseError};
