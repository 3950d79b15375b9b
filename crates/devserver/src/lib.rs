//! `ar-devserver` — local HTTPS server for the WebAR video site.
//!
//! Mobile browsers only grant camera access on secure origins, so the site is
//! served over TLS with a self-signed certificate that is generated on first
//! start. Videos are streamed with HTTP byte ranges so Safari can seek.

pub mod certs;
pub mod config;
pub mod server;
pub mod telemetry;
