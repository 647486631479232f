//! Raw HTTP responses as returned by a [`Transport`](crate::clients::Transport).
//!
//! The body is kept as text. Decoding it into JSON happens one layer up so a
//! malformed body can be reported together with its raw contents.

use std::collections::HashMap;

/// An HTTP response described as plain data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransportResponse {
    /// The HTTP status code.
    pub status: u16,
    /// Response headers, lowercased names (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
}

impl TransportResponse {
    /// Creates a response with no headers.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Adds a header value. Names are stored lowercased.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers
            .entry(name.to_ascii_lowercase())
            .or_default()
            .push(value.into());
        self
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status >= 200 && self.status <= 299
    }

    /// Returns the first value of header `name`.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns every `Set-Cookie` header value.
    #[must_use]
    pub fn set_cookies(&self) -> &[String] {
        self.headers
            .get("set-cookie")
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for status in 200..=299 {
            assert!(TransportResponse::new(status, "").is_ok());
        }
    }

    #[test]
    fn test_is_ok_returns_false_for_4xx_and_5xx() {
        assert!(!TransportResponse::new(403, "").is_ok());
        assert!(!TransportResponse::new(429, "").is_ok());
        assert!(!TransportResponse::new(503, "").is_ok());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = TransportResponse::new(200, "{}").with_header("X-Request-Id", "abc");
        assert_eq!(response.header("x-request-id"), Some("abc"));
        assert_eq!(response.header("X-REQUEST-ID"), Some("abc"));
        assert_eq!(response.header("missing"), None);
    }

    #[test]
    fn test_set_cookies_collects_all_values() {
        let response = TransportResponse::new(200, "")
            .with_header("Set-Cookie", "csrftoken=abc; Path=/")
            .with_header("set-cookie", "_pinterest_sess=xyz; HttpOnly");
        assert_eq!(response.set_cookies().len(), 2);

        assert!(TransportResponse::new(200, "").set_cookies().is_empty());
    }
}
