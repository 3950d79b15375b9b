//! Shared fixtures: a temporary document root and a self-signed pair.

use std::path::Path;

use axum_test::TestServer;
use devserver::server::{router, state::AppState};
use tempfile::TempDir;

/// Contents of the `index.html` written by [`site`].
pub const INDEX_HTML: &str = "<!doctype html><title>Temple AR</title>";

/// A 1000-byte "video" whose byte `i` is `i % 251`, so any window is recognisable.
pub fn video_bytes() -> Vec<u8> {
    (0..1000u32).map(|i| (i % 251) as u8).collect()
}

/// A document root laid out like the WebAR site.
pub fn site() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    write(root, "index.html", INDEX_HTML.as_bytes());
    write(root, "assets/app.js", b"export const scene = 'temple';");
    write(root, "assets/style.css", b"body { margin: 0 }");
    write(root, "videos/temple.mp4", &video_bytes());
    write(root, "models/temple.glb", b"glTF");
    dir
}

/// An `axum-test` server over the production router for `root`.
pub fn test_server(root: &Path) -> TestServer {
    TestServer::new(router::build(AppState::new(root, "index.html"))).expect("test server")
}

/// Self-signed `localhost` pair as `(cert_pem, key_pem, cert_der)`.
pub fn self_signed() -> (String, String, rustls::pki_types::CertificateDer<'static>) {
    let rcgen::CertifiedKey { cert, key_pair } =
        rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).expect("rcgen");
    (cert.pem(), key_pair.serialize_pem(), cert.der().clone())
}

fn write(root: &Path, rel: &str, contents: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create dirs");
    }
    std::fs::write(path, contents).expect("write fixture");
}
