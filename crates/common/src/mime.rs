//! Fixed extension → MIME table for the static file server.

use std::path::Path;

/// MIME type sent for extensions missing from [`MIME_TYPES`].
pub const DEFAULT_MIME: &str = "application/octet-stream";

/// Lower-case extension (without the dot) → `Content-Type` value.
pub static MIME_TYPES: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("js", "text/javascript"),
    ("css", "text/css"),
    ("json", "application/json"),
    ("png", "image/png"),
    ("jpg", "image/jpg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("wav", "audio/wav"),
    ("mp4", "video/mp4"),
    ("woff", "application/font-woff"),
    ("ttf", "application/font-ttf"),
    ("eot", "application/vnd.ms-fontobject"),
    ("otf", "application/font-otf"),
    ("wasm", "application/wasm"),
];

/// Resolve the MIME type for `path` from its extension, case-insensitively.
pub fn mime_for_path(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| {
            MIME_TYPES
                .iter()
                .find(|(known, _)| known.eq_ignore_ascii_case(ext))
                .map(|(_, mime)| *mime)
        })
        .unwrap_or(DEFAULT_MIME)
}

/// `true` for MIME types that are served with byte-range support.
pub fn is_video(mime: &str) -> bool {
    mime.starts_with("video/")
}
