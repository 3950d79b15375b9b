//! Configuration loading and validation for the dev server.
//!
//! All values are read from environment variables at startup and every field
//! has a default, so a bare `ar-devserver` run serves the current directory on
//! `https://0.0.0.0:3000`. The process exits with a clear error message if a
//! variable is present but invalid.

use std::{
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::certs::CertificatePaths;

/// Validated dev server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// IP address the HTTPS listener binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Port the HTTPS listener binds to.
    #[serde(default = "default_tls_port")]
    pub tls_port: u16,

    /// Directory whose files are served.
    #[serde(default = "default_doc_root")]
    pub doc_root: PathBuf,

    /// File served for `/` and for directory targets.
    #[serde(default = "default_index_file")]
    pub index_file: String,

    /// PEM certificate path. Generated on first start when absent.
    #[serde(default = "default_tls_cert_path")]
    pub tls_cert_path: PathBuf,

    /// PEM private key path. Generated on first start when absent.
    #[serde(default = "default_tls_key_path")]
    pub tls_key_path: PathBuf,

    /// Program invoked to generate the self-signed pair.
    #[serde(default = "default_openssl_bin")]
    pub openssl_bin: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format: `"text"` or `"json"`.
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0".into()
}
fn default_tls_port() -> u16 {
    3000
}
fn default_doc_root() -> PathBuf {
    PathBuf::from(".")
}
fn default_index_file() -> String {
    "index.html".into()
}
fn default_tls_cert_path() -> PathBuf {
    PathBuf::from("cert.pem")
}
fn default_tls_key_path() -> PathBuf {
    PathBuf::from("key.pem")
}
fn default_openssl_bin() -> String {
    "openssl".into()
}
fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "text".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            tls_port: default_tls_port(),
            doc_root: default_doc_root(),
            index_file: default_index_file(),
            tls_cert_path: default_tls_cert_path(),
            tls_key_path: default_tls_key_path(),
            openssl_bin: default_openssl_bin(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Socket address for the HTTPS listener.
    ///
    /// # Errors
    ///
    /// Returns an error if `bind_addr` is not an IP address.
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .bind_addr
            .trim()
            .parse()
            .with_context(|| format!("BIND_ADDR is not an IP address: {}", self.bind_addr))?;
        Ok(SocketAddr::new(ip, self.tls_port))
    }

    /// Paths of the certificate pair handed to the bootstrapper.
    pub fn certificate_paths(&self) -> CertificatePaths {
        CertificatePaths::new(&self.tls_cert_path, &self.tls_key_path)
    }

    /// `true` when logs should be emitted as JSON lines.
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if self.tls_port == 0 {
            anyhow::bail!("TLS_PORT must be > 0");
        }
        ensure_non_empty_path(&self.doc_root, "DOC_ROOT")?;
        ensure_non_empty_path(&self.tls_cert_path, "TLS_CERT_PATH")?;
        ensure_non_empty_path(&self.tls_key_path, "TLS_KEY_PATH")?;
        ensure_non_empty(&self.openssl_bin, "OPENSSL_BIN")?;
        ensure_non_empty(&self.index_file, "INDEX_FILE")?;

        if self.index_file.contains(['/', '\\']) || self.index_file == ".." {
            anyhow::bail!("INDEX_FILE must be a bare file name, got {}", self.index_file);
        }
        if !matches!(self.log_format.to_ascii_lowercase().as_str(), "text" | "json") {
            anyhow::bail!("LOG_FORMAT must be \"text\" or \"json\", got {}", self.log_format);
        }
        Ok(())
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} must not be empty");
    }
    Ok(())
}

fn ensure_non_empty_path(value: &Path, name: &str) -> Result<()> {
    if value.as_os_str().is_empty() {
        anyhow::bail!("{name} must not be empty");
    }
    Ok(())
}
