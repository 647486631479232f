//! Read-only view over a resource endpoint's JSON envelope.
//!
//! Resource endpoints wrap their payload as
//!
//! ```text
//! {
//!   "resource": { "options": { "bookmarks": ["..."], ... } },
//!   "resource_response": { "data": ..., "bookmark": "...", "message": ... }
//! }
//! ```
//!
//! [`PinResponse`] keeps the decoded tree as-is and adds accessors for the
//! parts callers need: the item list, the next bookmarks and extracted
//! [`PinMedia`]. The contract is undocumented upstream, so every accessor is
//! lenient and returns an empty or `None` value when a field is missing.
//!
//! # Example
//!
//! ```rust
//! use pinterest_api::PinResponse;
//! use serde_json::json;
//!
//! let response = PinResponse::new(
//!     "https://www.pinterest.com/resource/BoardFeedResource/get/?...",
//!     200,
//!     json!({
//!         "resource": { "options": { "bookmarks": ["-end-"] } },
//!         "resource_response": { "data": [{ "id": "1" }] }
//!     }),
//! );
//!
//! assert_eq!(response.items().len(), 1);
//! assert!(response.is_last_page());
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Bookmark value marking the last page.
pub const END_BOOKMARK: &str = "-end-";

/// Image metadata extracted from a pin item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinMedia {
    /// Pin id.
    pub id: String,
    /// Image URL.
    pub src: String,
    /// Alt text or description, when present.
    pub alt: Option<String>,
    /// The page the pin links to, when present.
    pub origin: Option<String>,
    /// Image width in pixels.
    pub width: Option<u64>,
    /// Image height in pixels.
    pub height: Option<u64>,
}

impl PinMedia {
    /// Extracts media from one pin item.
    ///
    /// Uses `images.orig` when present, otherwise the widest other size.
    /// Returns `None` for items without an id or an image URL (for example
    /// story modules mixed into related-pin feeds).
    #[must_use]
    pub fn from_item(item: &Value) -> Option<Self> {
        let id = match item.get("id")? {
            Value::String(id) => id.clone(),
            Value::Number(id) => id.to_string(),
            _ => return None,
        };

        let images = item.get("images")?.as_object()?;
        let image = images.get("orig").or_else(|| {
            images
                .values()
                .filter(|image| image.get("url").is_some())
                .max_by_key(|image| image.get("width").and_then(Value::as_u64).unwrap_or(0))
        })?;
        let src = image.get("url")?.as_str()?.to_string();

        let alt = ["auto_alt_text", "description", "grid_title", "title"]
            .iter()
            .find_map(|key| non_empty_str(item, key));

        Some(Self {
            id,
            src,
            alt,
            origin: non_empty_str(item, "link"),
            width: image.get("width").and_then(Value::as_u64),
            height: image.get("height").and_then(Value::as_u64),
        })
    }
}

fn non_empty_str(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// A decoded response from one resource call.
#[derive(Clone, Debug, PartialEq)]
pub struct PinResponse {
    request_url: String,
    status: u16,
    json: Value,
}

impl PinResponse {
    /// Wraps a decoded JSON body.
    #[must_use]
    pub fn new(request_url: impl Into<String>, status: u16, json: Value) -> Self {
        Self {
            request_url: request_url.into(),
            status,
            json,
        }
    }

    /// Returns the exact URL that was requested.
    #[must_use]
    pub fn request_url(&self) -> &str {
        &self.request_url
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns the raw JSON tree.
    #[must_use]
    pub const fn json(&self) -> &Value {
        &self.json
    }

    /// Consumes the response, returning the raw JSON tree.
    #[must_use]
    pub fn into_json(self) -> Value {
        self.json
    }

    /// Returns the `resource_response` object.
    #[must_use]
    pub fn resource_response(&self) -> Option<&Value> {
        self.json.get("resource_response")
    }

    /// Returns `resource_response.data`.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.resource_response()
            .and_then(|r| r.get("data"))
            .filter(|data| !data.is_null())
    }

    /// Returns the item list.
    ///
    /// This is `data` when it is an array, or `data.results` for search
    /// responses. Anything else yields an empty slice.
    #[must_use]
    pub fn items(&self) -> &[Value] {
        match self.data() {
            Some(Value::Array(items)) => items.as_slice(),
            Some(Value::Object(data)) => data
                .get("results")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default(),
            _ => &[],
        }
    }

    /// Returns the bookmarks to pass to the next call.
    ///
    /// Read from `resource.options.bookmarks`, falling back to
    /// `resource_response.bookmark`.
    #[must_use]
    pub fn bookmarks(&self) -> Vec<String> {
        let from_options = self
            .json
            .pointer("/resource/options/bookmarks")
            .and_then(Value::as_array);
        if let Some(bookmarks) = from_options {
            return bookmarks
                .iter()
                .filter_map(Value::as_str)
                .map(ToString::to_string)
                .collect();
        }

        self.resource_response()
            .and_then(|r| r.get("bookmark"))
            .and_then(Value::as_str)
            .map(|bookmark| vec![bookmark.to_string()])
            .unwrap_or_default()
    }

    /// Returns `true` if there are no further pages.
    #[must_use]
    pub fn is_last_page(&self) -> bool {
        self.bookmarks()
            .first()
            .map_or(true, |first| first == END_BOOKMARK)
    }

    /// Returns the bookmarks for the next page, or `None` on the last page.
    #[must_use]
    pub fn next_bookmarks(&self) -> Option<Vec<String>> {
        if self.is_last_page() {
            None
        } else {
            Some(self.bookmarks())
        }
    }

    /// Extracts media from every item that carries an image.
    #[must_use]
    pub fn media(&self) -> Vec<PinMedia> {
        self.items().iter().filter_map(PinMedia::from_item).collect()
    }

    /// Returns the board id from a board-detail response (`data.id`).
    #[must_use]
    pub fn board_id(&self) -> Option<String> {
        match self.data()?.get("id")? {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    /// Returns the upstream error message, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        let message = self.resource_response()?.get("message")?;
        message
            .as_str()
            .or_else(|| message.get("message").and_then(Value::as_str))
    }
}
