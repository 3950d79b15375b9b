//! Axum middleware layers applied to the router.
//!
//! Includes request tracing, timeout enforcement, and the fixed CORS /
//! range-advertising headers every response carries.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

/// Per-request timeout applied to all routes.
///
/// Bounds the time until response headers are ready; streaming a large video
/// body afterwards is not cut off.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Methods the server answers, as advertised to browsers.
pub const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

/// Headers attached to every response. Safari refuses to play cross-origin
/// video without the CORS pair and `Accept-Ranges`.
pub static FIXED_HEADERS: &[(&str, &str)] = &[
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", ALLOWED_METHODS),
    ("access-control-allow-headers", "Range"),
    ("access-control-expose-headers", "Content-Length, Content-Range"),
    ("accept-ranges", "bytes"),
];

/// One layer per [`FIXED_HEADERS`] entry, overriding any value a handler set.
pub fn fixed_header_layers() -> Vec<SetResponseHeaderLayer<HeaderValue>> {
    FIXED_HEADERS
        .iter()
        .map(|(name, value)| {
            SetResponseHeaderLayer::overriding(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            )
        })
        .collect()
}
