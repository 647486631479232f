//! HTTP transport for the resource endpoints.
//!
//! [`Transport`] is the seam between the resource client and the network: one
//! GET with a timeout, returning status, headers and the raw body.
//! [`HttpTransport`] is the `reqwest` implementation and owns the session
//! (default headers plus a [`CookieJar`]).

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use cookie_store::CookieError;
use reqwest::Url;

use crate::clients::cookies::CookieJar;
use crate::clients::errors::TransportError;
use crate::clients::response::TransportResponse;
use crate::config::{PinterestConfig, PWS_HANDLER_HEADER};

/// Performs single GET round trips.
///
/// Implementations must surface network failures as [`TransportError`] and
/// return any received body untouched, whatever its status or content.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a GET request to `url`, giving up after `timeout`.
    async fn get(&self, url: &str, timeout: Duration) -> Result<TransportResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, url: &str, timeout: Duration) -> Result<TransportResponse, TransportError> {
        (**self).get(url, timeout).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn get(&self, url: &str, timeout: Duration) -> Result<TransportResponse, TransportError> {
        (**self).get(url, timeout).await
    }
}

/// `reqwest`-backed [`Transport`] holding one browser-like session.
///
/// Every request carries the configured `User-Agent`, the
/// `x-pinterest-pws-handler` header and the cookies that apply to its URL.
/// Cookies set by responses are written back into the jar, and deletion
/// cookies remove their stored counterpart.
///
/// The session is not meant to be shared between clients; give each
/// [`PinterestApi`](crate::PinterestApi) its own transport.
///
/// # Example
///
/// ```rust,ignore
/// use pinterest_api::{HttpTransport, PinterestConfig};
///
/// let config = PinterestConfig::default();
///
/// // Fetch baseline session cookies from the site root
/// let transport = HttpTransport::with_default_cookies(&config).await?;
/// assert!(!transport.cookies().is_empty());
/// ```
#[derive(Debug)]
pub struct HttpTransport {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Session cookies.
    cookies: Mutex<CookieJar>,
}

// Verify HttpTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpTransport>();
};

impl HttpTransport {
    /// Creates a transport seeded with the given cookies.
    ///
    /// The caller's cookies are rebound to the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the TLS backend cannot be
    /// initialized.
    pub fn new(config: &PinterestConfig, cookies: CookieJar) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), config.user_agent().to_string());
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            PWS_HANDLER_HEADER.to_string(),
            config.pws_handler().to_string(),
        );

        Ok(Self {
            client,
            default_headers,
            cookies: Mutex::new(cookies.rebased(config.base_url())),
        })
    }

    /// Creates a transport whose cookies come from one unauthenticated GET of
    /// the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the client cannot be built or the root
    /// page cannot be fetched.
    pub async fn with_default_cookies(config: &PinterestConfig) -> Result<Self, TransportError> {
        let transport = Self::new(config, CookieJar::for_origin(config.base_url()))?;
        let root = config.base_url().join("/");
        let response = transport.get(&root, config.timeout()).await?;

        tracing::debug!(
            "Seeded {} default cookies from {} (status {})",
            transport.cookies().len(),
            root,
            response.status
        );

        Ok(transport)
    }

    /// Returns a snapshot of the session cookies.
    #[must_use]
    pub fn cookies(&self) -> CookieJar {
        self.cookies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the default headers for this transport.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    fn map_error(error: reqwest::Error, url: &str, timeout: Duration) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout {
                url: url.to_string(),
                timeout,
            }
        } else {
            TransportError::Network(error)
        }
    }

    fn store_cookies(&self, response: &TransportResponse, request_url: &Url) {
        if response.set_cookies().is_empty() {
            return;
        }
        let mut jar = self.cookies.lock().unwrap_or_else(PoisonError::into_inner);
        for header in response.set_cookies() {
            match jar.store_set_cookie(header, request_url) {
                Ok(()) => {}
                Err(CookieError::Expired) => {
                    tracing::debug!("Ignoring expired cookie for {}: {}", request_url, header);
                }
                Err(error) => {
                    tracing::warn!("Ignoring Set-Cookie header {}: {}", header, error);
                }
            }
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, timeout: Duration) -> Result<TransportResponse, TransportError> {
        let request_url = Url::parse(url).map_err(|e| TransportError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        let mut req_builder = self.client.get(request_url.clone()).timeout(timeout);

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        let cookie_header = self
            .cookies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .header_for(&request_url);
        if let Some(cookie_header) = cookie_header {
            req_builder = req_builder.header("Cookie", cookie_header);
        }

        let res = req_builder
            .send()
            .await
            .map_err(|e| Self::map_error(e, url, timeout))?;

        let status = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res
            .text()
            .await
            .map_err(|e| Self::map_error(e, url, timeout))?;

        let response = TransportResponse {
            status,
            headers,
            body,
        };
        self.store_cookies(&response, &request_url);

        Ok(response)
    }
}
