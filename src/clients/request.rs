//! Request construction for the resource endpoints.
//!
//! Resource endpoints take a GET query string with two parameters:
//!
//! - `source_url`: the web path the request pretends to originate from
//! - `data`: a JSON document `{"options": {...}, "context": {}}`, percent-encoded
//!
//! [`RequestOptions`] is the ordered options payload, [`OptionValue`] the
//! closed set of values it can hold, and [`RequestBuilder`] assembles the final
//! URL. Output is deterministic: the same inputs always produce the same bytes.

use std::borrow::Cow;
use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::api::Endpoint;
use crate::config::BaseUrl;

/// A value inside a [`RequestOptions`] payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionValue {
    /// A JSON string.
    Str(String),
    /// A JSON integer.
    Int(i64),
    /// A JSON boolean.
    Bool(bool),
    /// A JSON array.
    List(Vec<OptionValue>),
    /// A nested JSON object, in insertion order.
    Map(RequestOptions),
}

impl Serialize for OptionValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Str(s) => serializer.serialize_str(s),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(options) => options.serialize(serializer),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<RequestOptions> for OptionValue {
    fn from(value: RequestOptions) -> Self {
        Self::Map(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for OptionValue {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

/// Ordered options payload sent inside the `data` query parameter.
///
/// Keys keep their insertion order when serialized. Inserting an existing key
/// replaces its value in place.
///
/// # Example
///
/// ```rust
/// use pinterest_api::clients::RequestOptions;
///
/// let options = RequestOptions::new()
///     .with("pin_id", "123")
///     .with("page_size", 10_i64)
///     .with("is_pdp", false);
///
/// assert_eq!(
///     serde_json::to_string(&options).unwrap(),
///     r#"{"pin_id":"123","page_size":10,"is_pdp":false}"#
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    entries: Vec<(String, OptionValue)>,
}

impl RequestOptions {
    /// Creates an empty payload.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Sets `key` to `value`, keeping the original position if `key` exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns the number of top-level keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no keys are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for RequestOptions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for RequestOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Self::new();
        for (key, value) in iter {
            options.insert(key, value);
        }
        options
    }
}

/// The `data` document: options plus the (empty) client context block.
#[derive(Serialize)]
struct RequestData<'a> {
    options: &'a RequestOptions,
    context: &'a RequestOptions,
}

/// Assembles encoded request URLs for resource endpoints.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestBuilder;

impl RequestBuilder {
    /// Builds a GET URL for `endpoint` relative to `base_url`.
    ///
    /// The result has the shape
    /// `{base_url}{endpoint.path}?source_url={source}&data={data}` where both
    /// values are encoded with [`url_encode`](Self::url_encode).
    ///
    /// # Errors
    ///
    /// Returns the [`serde_json::Error`] from [`encode_data`](Self::encode_data).
    ///
    /// # Example
    ///
    /// ```rust
    /// use pinterest_api::api::{Endpoint, Operation};
    /// use pinterest_api::clients::{RequestBuilder, RequestOptions};
    /// use pinterest_api::BaseUrl;
    ///
    /// let options = RequestOptions::new().with("username", "alice");
    /// let url = RequestBuilder::build_get(
    ///     &BaseUrl::default(),
    ///     Endpoint::for_operation(Operation::UserPins),
    ///     &options,
    ///     "/alice/_created/",
    /// )
    /// .unwrap();
    /// assert!(url.starts_with(
    ///     "https://www.pinterest.com/resource/UserActivityPinsResource/get/?source_url=%2Falice%2F_created%2F&data="
    /// ));
    /// ```
    pub fn build_get(
        base_url: &BaseUrl,
        endpoint: &Endpoint,
        options: &RequestOptions,
        source_url: &str,
    ) -> Result<String, serde_json::Error> {
        let context = RequestOptions::new();
        let data = Self::encode_data(options, &context)?;
        Ok(format!(
            "{}?source_url={}&data={}",
            base_url.join(endpoint.path),
            Self::url_encode(source_url),
            Self::url_encode(&data)
        ))
    }

    /// Serializes the options and context into the compact `data` document.
    ///
    /// # Errors
    ///
    /// Returns the [`serde_json::Error`] raised by the serializer.
    pub fn encode_data(
        options: &RequestOptions,
        context: &RequestOptions,
    ) -> Result<String, serde_json::Error> {
        serde_json::to_string(&RequestData { options, context })
    }

    /// Percent-encodes everything except `A-Z a-z 0-9 - _ . ~`.
    ///
    /// Spaces become `%20`, never `+`.
    #[must_use]
    pub fn url_encode(input: &str) -> Cow<'_, str> {
        urlencoding::encode(input)
    }

    /// Reverses [`url_encode`](Self::url_encode).
    ///
    /// Percent escapes are decoded (`%26` becomes `&`). If the decoded bytes
    /// are not valid UTF-8 the invalid sequences are replaced rather than
    /// failing.
    #[must_use]
    pub fn url_decode(input: &str) -> String {
        urlencoding::decode(input).map_or_else(
            |_| String::from_utf8_lossy(&urlencoding::decode_binary(input.as_bytes())).into_owned(),
            Cow::into_owned,
        )
    }

    /// Builds the public web search URL for `query`.
    ///
    /// [`crate::api::url::parse_search_query`] recovers `query` from it.
    ///
    /// ```rust
    /// use pinterest_api::clients::RequestBuilder;
    /// use pinterest_api::BaseUrl;
    ///
    /// let url = RequestBuilder::search_url(&BaseUrl::default(), "cute cats");
    /// assert_eq!(url, "https://www.pinterest.com/search/pins/?q=cute%20cats&rs=typed");
    /// ```
    #[must_use]
    pub fn search_url(base_url: &BaseUrl, query: &str) -> String {
        format!(
            "{}/search/pins/?q={}&rs=typed",
            base_url,
            Self::url_encode(query)
        )
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => Err(fmt::Error),
        }
    }
}
