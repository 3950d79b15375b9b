//! Static file serving through the full router.
//!
//! Tests verify:
//! - MIME types from the fixed table and the generic fallback
//! - `/` and `/index.html` serve the same document
//! - CORS preflight, 404 bodies, full and ranged responses

use axum::http::{header, HeaderName, HeaderValue, Method, StatusCode};

use super::test_utils::{site, test_server, video_bytes, INDEX_HTML};

fn range(value: &'static str) -> (HeaderName, HeaderValue) {
    (header::RANGE, HeaderValue::from_static(value))
}

// =============================================================================
// MIME resolution
// =============================================================================

#[tokio::test]
async fn test_known_extensions_get_table_mime() {
    let dir = site();
    let server = test_server(dir.path());

    for (path, mime) in [
        ("/index.html", "text/html"),
        ("/assets/app.js", "text/javascript"),
        ("/assets/style.css", "text/css"),
        ("/videos/temple.mp4", "video/mp4"),
    ] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::OK, "{path}");
        assert_eq!(response.headers()[header::CONTENT_TYPE], mime, "{path}");
    }
}

#[tokio::test]
async fn test_unknown_extension_is_octet_stream() {
    let dir = site();
    let server = test_server(dir.path());

    let response = server.get("/models/temple.glb").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/octet-stream"
    );
}

// =============================================================================
// Default document and full responses
// =============================================================================

#[tokio::test]
async fn test_root_serves_index() {
    let dir = site();
    let server = test_server(dir.path());

    let root = server.get("/").await;
    let index = server.get("/index.html").await;
    assert_eq!(root.status_code(), StatusCode::OK);
    assert_eq!(root.as_bytes(), index.as_bytes());
    assert_eq!(root.text(), INDEX_HTML);
}

#[tokio::test]
async fn test_full_response_is_byte_identical() {
    let dir = site();
    let server = test_server(dir.path());

    let response = server.get("/videos/temple.mp4").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_LENGTH], "1000");
    assert!(response.headers().get(header::CONTENT_RANGE).is_none());
    assert_eq!(response.as_bytes().as_ref(), video_bytes().as_slice());
}

#[tokio::test]
async fn test_fixed_headers_on_file_response() {
    let dir = site();
    let server = test_server(dir.path());

    let response = server.get("/assets/app.js").await;
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, HEAD, OPTIONS");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Range");
    assert_eq!(headers[header::ACCEPT_RANGES], "bytes");
}

// =============================================================================
// Errors and preflight
// =============================================================================

#[tokio::test]
async fn test_missing_file_is_404_html() {
    let dir = site();
    let server = test_server(dir.path());

    let response = server.get("/videos/missing.mp4").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert!(response.text().contains("404"));
}

#[tokio::test]
async fn test_traversal_is_404() {
    let dir = site();
    let server = test_server(dir.path());

    let response = server.get("/%2e%2e/Cargo.toml").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_options_is_empty_200_with_cors() {
    let dir = site();
    let server = test_server(dir.path());

    for path in ["/videos/temple.mp4", "/does/not/exist"] {
        let response = server.method(Method::OPTIONS, path).await;
        assert_eq!(response.status_code(), StatusCode::OK, "{path}");
        assert!(response.as_bytes().is_empty(), "{path}");
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS], "Range");
    }
}

// =============================================================================
// Byte ranges
// =============================================================================

#[tokio::test]
async fn test_video_range_is_partial_content() {
    let dir = site();
    let server = test_server(dir.path());

    let (name, value) = range("bytes=0-99");
    let response = server.get("/videos/temple.mp4").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(response.headers()[header::CONTENT_RANGE], "bytes 0-99/1000");
    assert_eq!(response.headers()[header::CONTENT_LENGTH], "100");
    assert_eq!(response.as_bytes().as_ref(), &video_bytes()[..100]);
}

#[tokio::test]
async fn test_open_ended_range_runs_to_end() {
    let dir = site();
    let server = test_server(dir.path());

    let (name, value) = range("bytes=900-");
    let response = server.get("/videos/temple.mp4").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(response.headers()[header::CONTENT_RANGE], "bytes 900-999/1000");
    assert_eq!(response.as_bytes().as_ref(), &video_bytes()[900..]);
}

#[tokio::test]
async fn test_range_end_is_clamped() {
    let dir = site();
    let server = test_server(dir.path());

    let (name, value) = range("bytes=990-2000");
    let response = server.get("/videos/temple.mp4").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(response.headers()[header::CONTENT_RANGE], "bytes 990-999/1000");
    assert_eq!(response.headers()[header::CONTENT_LENGTH], "10");
}

#[tokio::test]
async fn test_range_past_end_is_416() {
    let dir = site();
    let server = test_server(dir.path());

    let (name, value) = range("bytes=1000-1100");
    let response = server.get("/videos/temple.mp4").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::RANGE_NOT_SATISFIABLE);
    assert_eq!(response.headers()[header::CONTENT_RANGE], "bytes */1000");
}

#[tokio::test]
async fn test_malformed_range_serves_full_file() {
    let dir = site();
    let server = test_server(dir.path());

    let (name, value) = range("bytes=abc-def");
    let response = server.get("/videos/temple.mp4").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.as_bytes().len(), 1000);
}
