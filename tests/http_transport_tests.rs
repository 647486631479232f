//! Integration tests for the `reqwest` transport against a mock server.
//!
//! Tests cover:
//! - Default headers on every request
//! - Caller cookies sent and `Set-Cookie` merged back
//! - Default cookie bootstrap from the site root
//! - Deletion cookies removing session cookies
//! - Timeouts surfacing as transport errors
//! - End-to-end operations through `PinterestApi::connect`

use std::time::Duration;

use pinterest_api::api::Operation;
use pinterest_api::{
    ApiError, BaseUrl, CookieJar, HttpTransport, PinterestApi, PinterestConfig, Transport,
};
use serde_json::json;
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_USER_AGENT: &str = "pinterest-api-tests/1.0";

fn config_for(server: &MockServer) -> PinterestConfig {
    PinterestConfig::builder()
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .user_agent(TEST_USER_AGENT)
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap()
}

// ============================================================================
// Transport
// ============================================================================

#[tokio::test]
async fn test_requests_carry_default_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resource/BoardResource/get/"))
        .and(header("user-agent", TEST_USER_AGENT))
        .and(header("x-pinterest-pws-handler", "www/pin/[id].js"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server);
    let transport = HttpTransport::new(&config, CookieJar::new()).unwrap();
    let url = format!("{}/resource/BoardResource/get/", mock_server.uri());

    let response = transport.get(&url, config.timeout()).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, "{}");
}

#[tokio::test]
async fn test_cookies_are_sent_and_updated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/first"))
        .and(header("cookie", "_auth=1; csrftoken=old"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "csrftoken=new; Path=/")
                .set_body_string("{}"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/second"))
        .and(header("cookie", "_auth=1; csrftoken=new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server);
    let jar: CookieJar = vec![("csrftoken", "old"), ("_auth", "1")]
        .into_iter()
        .collect();
    let transport = HttpTransport::new(&config, jar).unwrap();

    let first = transport
        .get(&format!("{}/first", mock_server.uri()), config.timeout())
        .await
        .unwrap();
    assert_eq!(first.status, 200);
    assert_eq!(transport.cookies().get("csrftoken"), Some("new"));

    let second = transport
        .get(&format!("{}/second", mock_server.uri()), config.timeout())
        .await
        .unwrap();
    assert_eq!(second.status, 200);
}

#[tokio::test]
async fn test_default_cookies_come_from_site_root() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "csrftoken=abc123; Path=/")
                .set_body_string("<html></html>"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = HttpTransport::with_default_cookies(&config_for(&mock_server))
        .await
        .unwrap();

    let cookies = transport.cookies();
    assert_eq!(cookies.len(), 1);
    assert_eq!(cookies.get("csrftoken"), Some("abc123"));
}

#[tokio::test]
async fn test_deleted_default_cookie_is_not_sent_again() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "csrftoken=abc123; Path=/")
                .set_body_string("<html></html>"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/logout"))
        .and(header("cookie", "csrftoken=abc123"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "csrftoken=; Max-Age=0; Path=/")
                .set_body_string("{}"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    // Mounted first so it wins if any cookie is still sent
    Mock::given(method("GET"))
        .and(path("/after"))
        .and(header_exists("cookie"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/after"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server);
    let transport = HttpTransport::with_default_cookies(&config).await.unwrap();
    assert_eq!(transport.cookies().get("csrftoken"), Some("abc123"));

    let logout = transport
        .get(&format!("{}/logout", mock_server.uri()), config.timeout())
        .await
        .unwrap();
    assert_eq!(logout.status, 200);
    assert_eq!(transport.cookies().get("csrftoken"), None);
    assert!(transport.cookies().is_empty());

    let after = transport
        .get(&format!("{}/after", mock_server.uri()), config.timeout())
        .await
        .unwrap();
    assert_eq!(after.status, 200);
}

#[tokio::test]
async fn test_expired_set_cookie_removes_caller_cookie() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/first"))
        .and(header("cookie", "_auth=1; csrftoken=abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "set-cookie",
                    "_auth=1; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Path=/",
                )
                .set_body_string("{}"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/second"))
        .and(header("cookie", "csrftoken=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server);
    let jar: CookieJar = vec![("csrftoken", "abc"), ("_auth", "1")]
        .into_iter()
        .collect();
    let transport = HttpTransport::new(&config, jar).unwrap();

    for step in ["first", "second"] {
        let response = transport
            .get(&format!("{}/{step}", mock_server.uri()), config.timeout())
            .await
            .unwrap();
        assert_eq!(response.status, 200, "{step}");
    }
    assert_eq!(transport.cookies().get("_auth"), None);
    assert_eq!(transport.cookies().len(), 1);
}

#[tokio::test]
async fn test_error_status_is_not_a_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server);
    let transport = HttpTransport::new(&config, CookieJar::new()).unwrap();

    let response = transport
        .get(&format!("{}/anything", mock_server.uri()), config.timeout())
        .await
        .unwrap();
    assert_eq!(response.status, 503);
    assert!(!response.is_ok());
    assert_eq!(response.body, "unavailable");
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server);
    let transport = HttpTransport::new(&config, CookieJar::new()).unwrap();

    let error = transport
        .get(
            &format!("{}/slow", mock_server.uri()),
            Duration::from_millis(200),
        )
        .await
        .unwrap_err();
    assert!(error.is_timeout());
}

// ============================================================================
// End to end
// ============================================================================

#[tokio::test]
async fn test_connect_and_fetch_related_images() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "csrftoken=abc123; Path=/")
                .set_body_string("<html></html>"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/resource/RelatedModulesResource/get/"))
        .and(query_param("source_url", "/pin/555555555/"))
        .and(header("cookie", "csrftoken=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resource": { "options": { "bookmarks": ["next-page"] } },
            "resource_response": { "data": [{
                "id": "777",
                "grid_title": "Tabby",
                "images": {
                    "orig": { "url": "https://i.pinimg.com/originals/777.jpg", "width": 800, "height": 600 }
                }
            }] }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = PinterestApi::connect(
        "https://www.pinterest.com/pin/555555555/",
        None,
        config_for(&mock_server),
    )
    .await
    .unwrap();

    let page = api.get_related_images(10, &[]).await.unwrap();
    assert_eq!(page.status(), 200);
    assert_eq!(page.bookmarks(), vec!["next-page"]);
    assert!(!page.is_last_page());

    let media = page.media();
    assert_eq!(media.len(), 1);
    assert_eq!(media[0].id, "777");
    assert_eq!(media[0].src, "https://i.pinimg.com/originals/777.jpg");
    assert_eq!(media[0].alt.as_deref(), Some("Tabby"));
    assert_eq!(media[0].width, Some(800));
}

#[tokio::test]
async fn test_connect_with_caller_cookies_skips_bootstrap() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/resource/UserActivityPinsResource/get/"))
        .and(query_param("source_url", "/bob/_created/"))
        .and(header("cookie", "_pinterest_sess=secret"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut jar = CookieJar::new();
    jar.insert("_pinterest_sess", "secret").unwrap();

    let api = PinterestApi::connect(
        "https://www.pinterest.com/bob/",
        Some(jar),
        config_for(&mock_server),
    )
    .await
    .unwrap();

    match api.get_user_pins("bob", 25, &[]).await {
        Err(ApiError::Decode {
            operation, body, ..
        }) => {
            assert_eq!(operation, Operation::UserPins);
            assert_eq!(body, "not json");
        }
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_operation_timeout_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resource/BaseSearchResource/get/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let config = PinterestConfig::builder()
        .base_url(BaseUrl::new(mock_server.uri()).unwrap())
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let api = PinterestApi::connect(
        "https://www.pinterest.com/search/pins/?q=cats&rs=typed",
        Some(CookieJar::new()),
        config,
    )
    .await
    .unwrap();

    match api.get_search(10, &[]).await {
        Err(ApiError::Transport { operation, source }) => {
            assert_eq!(operation, Operation::Search);
            assert!(source.is_timeout());
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}
