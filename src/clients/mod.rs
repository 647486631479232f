//! HTTP plumbing for the resource endpoints.
//!
//! # Overview
//!
//! - [`RequestBuilder`]: assembles encoded resource URLs from an endpoint,
//!   a [`RequestOptions`] payload and a source path
//! - [`Transport`]: the injected network seam (one GET per call)
//! - [`HttpTransport`]: the `reqwest` implementation, owning the session
//! - [`CookieJar`]: session cookie store
//! - [`TransportResponse`]: status, headers and raw body
//! - [`TransportError`]: network and timeout failures
//!
//! # Example
//!
//! ```rust
//! use pinterest_api::api::{Endpoint, Operation};
//! use pinterest_api::clients::{RequestBuilder, RequestOptions};
//! use pinterest_api::BaseUrl;
//!
//! let options = RequestOptions::new()
//!     .with("username", "alice")
//!     .with("slug", "cats")
//!     .with("field_set_key", "detailed");
//!
//! let url = RequestBuilder::build_get(
//!     &BaseUrl::default(),
//!     Endpoint::for_operation(Operation::BoardDetail),
//!     &options,
//!     "/alice/cats/",
//! )
//! .unwrap();
//! assert!(url.contains("/resource/BoardResource/get/?source_url="));
//! ```
//!
//! # Retry Behavior
//!
//! None. Each call is exactly one round trip; retry and backoff policy belongs
//! to the caller.

mod cookies;
mod errors;
mod request;
mod response;
mod transport;

pub use cookies::CookieJar;
pub use errors::TransportError;
pub use request::{OptionValue, RequestBuilder, RequestOptions};
pub use response::TransportResponse;
pub use transport::{HttpTransport, Transport};
