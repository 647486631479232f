//! The resource client.
//!
//! [`PinterestApi`] is built from one web URL. The URL is classified once at
//! construction; each operation then checks that the classified
//! [`Identity`] fits, builds the options payload, makes exactly one GET
//! through the injected [`Transport`] and wraps the decoded body in a
//! [`PinResponse`].
//!
//! # Pagination
//!
//! The client keeps no paging state. Pass `&[]` for the first page and the
//! previous response's [`PinResponse::bookmarks`] for each following one,
//! until [`PinResponse::is_last_page`] says to stop.
//!
//! # Example
//!
//! ```rust,ignore
//! use pinterest_api::{PinterestApi, PinterestConfig};
//!
//! let api = PinterestApi::connect(
//!     "https://www.pinterest.com/alice/cats/",
//!     None,
//!     PinterestConfig::default(),
//! )
//! .await?;
//!
//! let board = api.get_board().await?;
//! let board_id = board.board_id().unwrap_or_default();
//!
//! let mut bookmarks = Vec::new();
//! loop {
//!     let page = api.get_board_feed(&board_id, 50, &bookmarks).await?;
//!     for media in page.media() {
//!         println!("{} {}", media.id, media.src);
//!     }
//!     match page.next_bookmarks() {
//!         Some(next) => bookmarks = next,
//!         None => break,
//!     }
//! }
//! ```

use serde_json::Value;

use crate::api::endpoints::{Endpoint, Operation};
use crate::api::errors::{ApiError, InvalidArgumentError, MAX_PAGE_SIZE};
use crate::api::response::PinResponse;
use crate::api::url::{classify, is_valid_segment, BoardRef, Identity, UrlKind, UrlMatches};
use crate::clients::{
    CookieJar, HttpTransport, RequestBuilder, RequestOptions, Transport, TransportError,
    TransportResponse,
};
use crate::config::PinterestConfig;

const MAIN_IMAGE_API_URL: &str = "/v3/users/me/recent/engaged/pin/stories/";
const MAIN_IMAGE_FIELDS: &str = "pin.description,pin.id,pin.images[236x]";

/// Checks a page size against the accepted range `1..=50`.
///
/// # Errors
///
/// Returns [`InvalidArgumentError::PageSizeTooSmall`] below 1 and
/// [`InvalidArgumentError::PageSizeTooLarge`] above 50.
///
/// # Example
///
/// ```rust
/// use pinterest_api::api::validate_num;
///
/// assert_eq!(validate_num(50), Ok(50));
/// assert!(validate_num(0).is_err());
/// assert!(validate_num(51).is_err());
/// ```
pub const fn validate_num(num: i64) -> Result<i64, InvalidArgumentError> {
    if num < 1 {
        return Err(InvalidArgumentError::PageSizeTooSmall { num });
    }
    if num > MAX_PAGE_SIZE {
        return Err(InvalidArgumentError::PageSizeTooLarge {
            num,
            max: MAX_PAGE_SIZE,
        });
    }
    Ok(num)
}

fn validate_username(username: &str) -> Result<&str, InvalidArgumentError> {
    if username.is_empty() {
        return Err(InvalidArgumentError::EmptyUsername);
    }
    if !is_valid_segment(username) {
        return Err(InvalidArgumentError::InvalidUsername {
            username: username.to_string(),
        });
    }
    Ok(username)
}

/// Client for the resource endpoints behind one web URL.
///
/// The identity derived from the URL never changes. Operations whose
/// identity requirement is not met fail with
/// [`InvalidArgumentError::MissingIdentity`] before touching the network.
///
/// # Thread Safety
///
/// `PinterestApi` is `Send + Sync` whenever its transport is.
#[derive(Debug)]
pub struct PinterestApi<T = HttpTransport> {
    url: String,
    matches: UrlMatches,
    identity: Identity,
    config: PinterestConfig,
    transport: T,
}

// Verify PinterestApi is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PinterestApi>();
};

impl PinterestApi<HttpTransport> {
    /// Creates a client with its own HTTP session.
    ///
    /// With `cookies`, the session starts from them. Without, one GET of the
    /// base URL collects the site's default cookies first.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the HTTP client cannot be built or the
    /// default cookies cannot be fetched.
    pub async fn connect(
        url: impl Into<String>,
        cookies: Option<CookieJar>,
        config: PinterestConfig,
    ) -> Result<Self, TransportError> {
        let transport = match cookies {
            Some(jar) => HttpTransport::new(&config, jar)?,
            None => HttpTransport::with_default_cookies(&config).await?,
        };
        Ok(Self::with_transport(url, config, transport))
    }
}

impl<T: Transport> PinterestApi<T> {
    /// Creates a client over an existing transport.
    #[must_use]
    pub fn with_transport(url: impl Into<String>, config: PinterestConfig, transport: T) -> Self {
        let url = url.into();
        let matches = classify(&url);
        let identity = matches.identity();
        tracing::debug!("Classified {} as {:?}", url, identity);

        Self {
            url,
            matches,
            identity,
            config,
            transport,
        }
    }

    /// Returns the URL the client was built from.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the classified identity.
    #[must_use]
    pub const fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Returns every pattern that matched the URL.
    #[must_use]
    pub const fn matches(&self) -> &UrlMatches {
        &self.matches
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &PinterestConfig {
        &self.config
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches pins related to the client's pin.
    ///
    /// # Errors
    ///
    /// Fails with [`ApiError::InvalidArgument`] unless the client targets a
    /// pin and `num` is in `1..=50`; otherwise see [`ApiError`].
    pub async fn get_related_images(
        &self,
        num: i64,
        bookmarks: &[String],
    ) -> Result<PinResponse, ApiError> {
        let operation = Operation::RelatedImages;
        let page_size = validate_num(num)?;
        let pin_id = self.require_pin(operation)?;

        let options = RequestOptions::new()
            .with("pin_id", pin_id)
            .with("context_pin_ids", Vec::<String>::new())
            .with("page_size", page_size)
            .with("bookmarks", bookmarks.to_vec())
            .with("search_query", "")
            .with("source", "deep_linking")
            .with("top_level_source", "deep_linking")
            .with("top_level_source_depth", 1_i64)
            .with("is_pdp", false);

        self.execute(operation, &options, &format!("/pin/{pin_id}/"))
            .await
    }

    /// Fetches the client's pin itself.
    ///
    /// # Errors
    ///
    /// Fails with [`ApiError::InvalidArgument`] unless the client targets a
    /// pin; otherwise see [`ApiError`].
    pub async fn get_main_image(&self) -> Result<PinResponse, ApiError> {
        let operation = Operation::MainImage;
        let pin_id = self.require_pin(operation)?;

        let data = RequestOptions::new()
            .with("fields", MAIN_IMAGE_FIELDS)
            .with("pin_preview_count", 1_i64);
        let options = RequestOptions::new()
            .with("url", MAIN_IMAGE_API_URL)
            .with("data", data);

        self.execute(operation, &options, &format!("/pin/{pin_id}/"))
            .await
    }

    /// Fetches board metadata. The board id is in
    /// [`PinResponse::board_id`].
    ///
    /// # Errors
    ///
    /// Fails with [`ApiError::InvalidArgument`] unless the client targets a
    /// board; otherwise see [`ApiError`].
    pub async fn get_board(&self) -> Result<PinResponse, ApiError> {
        let operation = Operation::BoardDetail;
        let board = self.require_board(operation)?;

        let options = RequestOptions::new()
            .with("username", board.username.as_str())
            .with("slug", board.boardname.as_str())
            .with("field_set_key", "detailed");

        self.execute(operation, &options, &board.path()).await
    }

    /// Fetches a page of the pins saved on the client's board.
    ///
    /// `board_id` comes from [`get_board`](Self::get_board).
    ///
    /// # Errors
    ///
    /// Fails with [`ApiError::InvalidArgument`] unless the client targets a
    /// board, `board_id` is non-empty and `num` is in `1..=50`; otherwise
    /// see [`ApiError`].
    pub async fn get_board_feed(
        &self,
        board_id: &str,
        num: i64,
        bookmarks: &[String],
    ) -> Result<PinResponse, ApiError> {
        let operation = Operation::BoardFeed;
        let page_size = validate_num(num)?;
        let board = self.require_board(operation)?;
        let board_id = board_id.trim();
        if board_id.is_empty() {
            return Err(InvalidArgumentError::EmptyBoardId.into());
        }

        let board_url = board.path();
        let options = RequestOptions::new()
            .with("board_id", board_id)
            .with("board_url", board_url.as_str())
            .with("page_size", page_size)
            .with("bookmarks", bookmarks.to_vec())
            .with("currentFilter", -1_i64)
            .with("field_set_key", "react_grid_pin")
            .with("filter_section_pins", true)
            .with("sort", "default")
            .with("layout", "default")
            .with("redux_normalize_feed", true);

        self.execute(operation, &options, &board_url).await
    }

    /// Fetches a page of search results for the client's query.
    ///
    /// # Errors
    ///
    /// Fails with [`ApiError::InvalidArgument`] unless the client targets a
    /// search and `num` is in `1..=50`; otherwise see [`ApiError`].
    pub async fn get_search(
        &self,
        num: i64,
        bookmarks: &[String],
    ) -> Result<PinResponse, ApiError> {
        let operation = Operation::Search;
        let page_size = validate_num(num)?;
        let query = match &self.identity {
            Identity::Search { query } => query.as_str(),
            _ => return Err(missing_identity(UrlKind::Search, operation).into()),
        };

        let source_url = format!(
            "/search/pins/?q={}&rs=typed",
            RequestBuilder::url_encode(query)
        );
        let options = RequestOptions::new()
            .with("appliedProductFilters", "---")
            .with("auto_correction_disabled", false)
            .with("bookmarks", bookmarks.to_vec())
            .with("page_size", page_size)
            .with("query", query)
            .with("redux_normalize_feed", true)
            .with("rs", "typed")
            .with("scope", "pins")
            .with("source_url", source_url.as_str());

        self.execute(operation, &options, &source_url).await
    }

    /// Fetches a page of the pins `username` created.
    ///
    /// Works from any client, whatever its identity.
    ///
    /// # Errors
    ///
    /// Fails with [`ApiError::InvalidArgument`] for an empty or malformed
    /// username or a `num` outside `1..=50`; otherwise see [`ApiError`].
    pub async fn get_user_pins(
        &self,
        username: &str,
        num: i64,
        bookmarks: &[String],
    ) -> Result<PinResponse, ApiError> {
        let operation = Operation::UserPins;
        let page_size = validate_num(num)?;
        let username = validate_username(username)?;

        let options = RequestOptions::new()
            .with("username", username)
            .with("page_size", page_size)
            .with("bookmarks", bookmarks.to_vec())
            .with("field_set_key", "grid_item")
            .with("include_archived", true);

        self.execute(operation, &options, &format!("/{username}/_created/"))
            .await
    }

    fn require_pin(&self, operation: Operation) -> Result<&str, InvalidArgumentError> {
        match &self.identity {
            Identity::Pin { id } => Ok(id.as_str()),
            _ => Err(missing_identity(UrlKind::Pin, operation)),
        }
    }

    fn require_board(&self, operation: Operation) -> Result<BoardRef, InvalidArgumentError> {
        match &self.identity {
            Identity::Board {
                username,
                boardname,
            } => Ok(BoardRef {
                username: username.clone(),
                boardname: boardname.clone(),
            }),
            _ => Err(missing_identity(UrlKind::Board, operation)),
        }
    }

    async fn execute(
        &self,
        operation: Operation,
        options: &RequestOptions,
        source_url: &str,
    ) -> Result<PinResponse, ApiError> {
        let endpoint = Endpoint::for_operation(operation);
        let url = RequestBuilder::build_get(self.config.base_url(), endpoint, options, source_url)
            .map_err(|source| ApiError::Encode { operation, source })?;
        tracing::debug!("Requesting {}: {} {}", operation, endpoint.method, url);

        let TransportResponse { status, body, .. } = self
            .transport
            .get(&url, self.config.timeout())
            .await
            .map_err(|source| ApiError::Transport { operation, source })?;

        if !(200..300).contains(&status) {
            tracing::warn!("{} returned HTTP {}", operation, status);
        }

        match serde_json::from_str::<Value>(&body) {
            Ok(json) => Ok(PinResponse::new(url, status, json)),
            Err(source) => Err(ApiError::Decode {
                operation,
                body,
                source,
            }),
        }
    }
}

const fn missing_identity(required: UrlKind, operation: Operation) -> InvalidArgumentError {
    InvalidArgumentError::MissingIdentity {
        required,
        operation,
    }
}
