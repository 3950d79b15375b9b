//! TLS listener setup using rustls with the self-signed development pair.
//!
//! Protocol versions are pinned to TLS 1.2 and 1.3 and the offered cipher
//! suites to [`ALLOWED_CIPHER_SUITES`], in server preference order.

use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};
use rustls::{
    crypto::{ring, CryptoProvider},
    version, ServerConfig, SupportedCipherSuite, SupportedProtocolVersion,
};
use tokio_rustls::TlsAcceptor;

use crate::certs::CertificatePaths;

/// Forward-secret AEAD suites offered to clients, most preferred first.
///
/// TLS 1.3 suites are ephemeral by construction; the TLS 1.2 entries are all
/// ECDHE. No null, export, DES/3DES, RC4, MD5, PSK, SRP or Camellia suite is
/// present.
pub static ALLOWED_CIPHER_SUITES: &[SupportedCipherSuite] = &[
    ring::cipher_suite::TLS13_AES_128_GCM_SHA256,
    ring::cipher_suite::TLS13_AES_256_GCM_SHA384,
    ring::cipher_suite::TLS13_CHACHA20_POLY1305_SHA256,
    ring::cipher_suite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,
    ring::cipher_suite::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,
    ring::cipher_suite::TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384,
    ring::cipher_suite::TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384,
    ring::cipher_suite::TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256,
    ring::cipher_suite::TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256,
];

/// Protocol versions accepted by the listener.
pub static PROTOCOL_VERSIONS: &[&SupportedProtocolVersion] = &[&version::TLS13, &version::TLS12];

/// ALPN identifiers, HTTP/2 preferred.
const ALPN_PROTOCOLS: &[&[u8]] = &[b"h2", b"http/1.1"];

/// Build a [`rustls::ServerConfig`] from PEM-encoded certificate and private key bytes.
///
/// # Errors
///
/// Returns an error if the certificate or key cannot be parsed, or if rustls
/// rejects the configuration.
pub fn build_server_config(cert_pem: &[u8], key_pem: &[u8]) -> Result<Arc<ServerConfig>> {
    let certs = rustls_pemfile::certs(&mut std::io::BufReader::new(cert_pem))
        .collect::<Result<Vec<_>, _>>()
        .context("failed to parse TLS certificate chain")?;
    if certs.is_empty() {
        anyhow::bail!("no certificate found in PEM data");
    }

    let key = rustls_pemfile::private_key(&mut std::io::BufReader::new(key_pem))
        .context("failed to read TLS private key")?
        .context("no private key found in PEM data")?;

    let provider = CryptoProvider {
        cipher_suites: ALLOWED_CIPHER_SUITES.to_vec(),
        ..ring::default_provider()
    };

    let mut config = ServerConfig::builder_with_provider(Arc::new(provider))
        .with_protocol_versions(PROTOCOL_VERSIONS)
        .context("cipher suites do not cover the configured TLS versions")?
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .context("failed to build rustls ServerConfig")?;

    config.ignore_client_order = true;
    config.alpn_protocols = ALPN_PROTOCOLS.iter().map(|p| p.to_vec()).collect();

    Ok(Arc::new(config))
}

/// Read the PEM pair at `paths` and wrap the resulting config in a [`TlsAcceptor`].
///
/// # Errors
///
/// Returns an error if either file cannot be read or the pair is invalid.
pub fn load_acceptor(paths: &CertificatePaths) -> Result<TlsAcceptor> {
    let cert_pem = read_pem(&paths.cert, "certificate")?;
    let key_pem = read_pem(&paths.key, "private key")?;
    let config = build_server_config(&cert_pem, &key_pem)?;
    Ok(TlsAcceptor::from(config))
}

fn read_pem(path: &Path, what: &str) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read TLS {what} from {}", path.display()))
}
