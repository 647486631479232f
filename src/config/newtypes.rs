//! Validated newtype wrappers for configuration values.
//!
//! Invalid values are rejected on construction with clear error messages.

use crate::error::ConfigError;
use reqwest::Url;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated base URL that resource endpoints are appended to.
///
/// The URL must parse as an absolute URL with a host. A trailing slash is
/// stripped so endpoint paths (which start with `/`) can be appended directly.
/// The parsed form scopes the session cookies.
///
/// # Example
///
/// ```rust
/// use pinterest_api::BaseUrl;
///
/// let url = BaseUrl::new("https://www.pinterest.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://www.pinterest.com");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "www.pinterest.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    parsed: Url,
}

impl BaseUrl {
    /// The public Pinterest web host.
    pub const PINTEREST: &'static str = "https://www.pinterest.com";

    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL is relative, fails
    /// to parse, or has an empty host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let parsed = match Url::parse(&url) {
            Ok(parsed) if parsed.host_str().is_some_and(|host| !host.is_empty()) => parsed,
            _ => return Err(ConfigError::InvalidBaseUrl { url }),
        };

        Ok(Self { url, parsed })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        self.parsed.scheme()
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        self.parsed.host_str().unwrap_or_default()
    }

    /// Returns the parsed URL.
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.parsed
    }

    /// Joins an absolute path (starting with `/`) onto this base.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}{path}", self.url)
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self::new(Self::PINTEREST).expect("Pinterest base URL is valid")
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_validates_format() {
        let url = BaseUrl::new("https://www.pinterest.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_name(), "www.pinterest.com");

        // With port
        let url = BaseUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_name(), "127.0.0.1");
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let url = BaseUrl::new("https://www.pinterest.com//").unwrap();
        assert_eq!(url.as_ref(), "https://www.pinterest.com");
        assert_eq!(
            url.join("/resource/BoardResource/get/"),
            "https://www.pinterest.com/resource/BoardResource/get/"
        );
    }

    #[test]
    fn test_base_url_rejects_invalid() {
        assert!(BaseUrl::new("www.pinterest.com").is_err());
        assert!(BaseUrl::new("https://").is_err());
        assert!(BaseUrl::new("://pinterest.com").is_err());
        assert!(BaseUrl::new("ht tp://pinterest.com").is_err());
    }

    #[test]
    fn test_default_matches_parsed_pinterest_url() {
        let parsed = BaseUrl::new(BaseUrl::PINTEREST).unwrap();
        assert_eq!(BaseUrl::default(), parsed);
        assert_eq!(parsed.as_url().as_str(), "https://www.pinterest.com/");
    }

    #[test]
    fn test_base_url_deserialize_validates() {
        let url: BaseUrl = serde_json::from_str(r#""https://www.pinterest.com/""#).unwrap();
        assert_eq!(url.as_ref(), "https://www.pinterest.com");

        let result: Result<BaseUrl, _> = serde_json::from_str(r#""pinterest""#);
        assert!(result.is_err());
    }
}
