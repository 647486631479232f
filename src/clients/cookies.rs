//! Session cookie store.
//!
//! The resource endpoints reject anonymous requests that carry no session
//! cookies. [`CookieJar`] holds the cookies of one session: it is seeded either
//! by the caller or from the `Set-Cookie` headers of a plain GET against the
//! site root, and rendered into a single `Cookie` header on every request.
//!
//! Storage is a [`cookie_store::CookieStore`], so `Max-Age`, `Expires`,
//! `Domain`, `Path` and `Secure` follow RFC 6265. A deletion cookie
//! (`Max-Age=0` or an `Expires` date in the past) removes the stored cookie.

use cookie_store::{CookieError, CookieStore, RawCookie};
use reqwest::Url;

use crate::config::BaseUrl;

/// A session cookie store scoped to one origin.
///
/// Cookies added with [`insert`](Self::insert) are host-only cookies for the
/// jar's origin with path `/`. Cookies from `Set-Cookie` headers keep the
/// attributes the server sent. Queries only see unexpired cookies, and
/// iteration (and the rendered `Cookie` header) is sorted by name so the header
/// is stable across runs.
///
/// # Example
///
/// ```rust
/// use pinterest_api::clients::CookieJar;
///
/// let mut jar = CookieJar::new();
/// jar.insert("csrftoken", "abc").unwrap();
/// jar.insert("_pinterest_sess", "xyz").unwrap();
///
/// assert_eq!(jar.get("csrftoken"), Some("abc"));
/// assert_eq!(jar.header_value().as_deref(), Some("_pinterest_sess=xyz; csrftoken=abc"));
///
/// let origin = jar.origin().clone();
/// jar.store_set_cookie("csrftoken=; Max-Age=0; Path=/", &origin).unwrap();
/// assert_eq!(jar.get("csrftoken"), None);
/// ```
#[derive(Clone, Debug)]
pub struct CookieJar {
    store: CookieStore,
    origin: Url,
}

impl CookieJar {
    /// Creates an empty jar for the public Pinterest host.
    #[must_use]
    pub fn new() -> Self {
        Self::for_origin(&BaseUrl::default())
    }

    /// Creates an empty jar whose inserted cookies belong to `base_url`.
    #[must_use]
    pub fn for_origin(base_url: &BaseUrl) -> Self {
        Self {
            store: CookieStore::default(),
            origin: base_url.as_url().clone(),
        }
    }

    /// Returns the URL inserted cookies are scoped to.
    #[must_use]
    pub const fn origin(&self) -> &Url {
        &self.origin
    }

    /// Inserts or replaces a cookie on the origin host with path `/`.
    ///
    /// # Errors
    ///
    /// Returns the [`CookieError`] raised by the store when the cookie cannot
    /// be scoped to the origin.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), CookieError> {
        let mut cookie = RawCookie::new(name.into(), value.into());
        cookie.set_path("/");
        self.store.insert_raw(&cookie, &self.origin).map(drop)
    }

    /// Returns the value of the unexpired cookie `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.store
            .iter_unexpired()
            .find(|cookie| cookie.name() == name)
            .map(|cookie| cookie.value())
    }

    /// Removes cookie `name` from the origin host's `/` path, returning its
    /// value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let host = self.origin.host_str()?.to_string();
        self.store
            .remove(&host, "/", name)
            .map(|cookie| cookie.value().to_string())
    }

    /// Returns the number of unexpired cookies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.iter_unexpired().count()
    }

    /// Returns `true` if the jar holds no unexpired cookies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.iter_unexpired().next().is_none()
    }

    /// Iterates over unexpired `(name, value)` pairs sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .store
            .iter_unexpired()
            .map(|cookie| (cookie.name(), cookie.value()))
            .collect();
        pairs.sort_unstable();
        pairs.into_iter()
    }

    /// Applies one `Set-Cookie` header value received from `request_url`.
    ///
    /// A cookie that is already expired deletes any stored cookie with the
    /// same name, domain and path.
    ///
    /// # Errors
    ///
    /// Returns [`CookieError::Expired`] for an expired cookie that replaced
    /// nothing, and other [`CookieError`] variants for unparsable headers or
    /// cookies the request URL may not set.
    pub fn store_set_cookie(&mut self, header: &str, request_url: &Url) -> Result<(), CookieError> {
        self.store.parse(header, request_url).map(drop)
    }

    /// Renders the `Cookie` header for a request to `request_url`, or `None`
    /// when no stored cookie applies.
    #[must_use]
    pub fn header_for(&self, request_url: &Url) -> Option<String> {
        let mut pairs: Vec<(&str, &str)> = self.store.get_request_values(request_url).collect();
        if pairs.is_empty() {
            return None;
        }
        pairs.sort_unstable();
        Some(
            pairs
                .into_iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Renders the `Cookie` header for a request to the origin root.
    #[must_use]
    pub fn header_value(&self) -> Option<String> {
        self.header_for(&self.origin)
    }

    /// Moves the jar's cookies onto `base_url`, keeping names and values.
    ///
    /// Jars built by the caller default to the public host; the transport
    /// rebinds them to whatever base URL it talks to.
    #[must_use]
    pub fn rebased(self, base_url: &BaseUrl) -> Self {
        if self.origin == *base_url.as_url() {
            return self;
        }
        let mut jar = Self::for_origin(base_url);
        jar.extend(self.iter());
        jar
    }
}

impl Default for CookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CookieJar {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut jar = Self::new();
        jar.extend(iter);
        jar
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for CookieJar {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            let name = name.into();
            if let Err(error) = self.insert(name.clone(), value) {
                tracing::warn!("Skipping cookie {}: {}", name, error);
            }
        }
    }
}
