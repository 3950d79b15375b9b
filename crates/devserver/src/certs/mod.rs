//! Self-signed certificate bootstrap.
//!
//! Browsers only expose the camera to secure origins, so the dev server must
//! speak HTTPS even on a LAN address. On startup [`ensure_certificates`]
//! checks for the PEM pair and, if either file is missing, asks a
//! [`CertificateProvisioner`] to create one.
//!
//! # Invariants
//!
//! - When both files already exist the provisioner is never invoked.
//! - A successful return means both files exist on disk.

pub mod openssl;

pub use openssl::OpensslProvisioner;

use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info};

/// Location of the PEM certificate and private key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificatePaths {
    /// X.509 certificate (chain), PEM encoded.
    pub cert: PathBuf,
    /// Private key, PEM encoded.
    pub key: PathBuf,
}

impl CertificatePaths {
    /// Create a new pair of paths.
    pub fn new(cert: impl Into<PathBuf>, key: impl Into<PathBuf>) -> Self {
        Self {
            cert: cert.into(),
            key: key.into(),
        }
    }

    /// `true` when both files are present.
    pub fn both_exist(&self) -> bool {
        self.cert.is_file() && self.key.is_file()
    }

    fn missing(&self) -> Vec<&Path> {
        [self.cert.as_path(), self.key.as_path()]
            .into_iter()
            .filter(|p| !p.is_file())
            .collect()
    }
}

/// Errors from a [`CertificateProvisioner`].
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// The generator program could not be started (e.g. not installed).
    #[error("failed to launch `{program}`: {source}")]
    Launch {
        /// Program that was invoked.
        program: String,
        /// Underlying spawn error.
        #[source]
        source: io::Error,
    },

    /// The generator ran but exited unsuccessfully.
    #[error("`{program}` exited with {status}")]
    Failed {
        /// Program that was invoked.
        program: String,
        /// Human-readable exit status.
        status: String,
    },

    /// Output directories could not be prepared.
    #[error("failed to prepare {path}: {source}")]
    Io {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Errors from [`ensure_certificates`].
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The provisioner reported a failure.
    #[error("certificate generation failed: {0}")]
    Provision(#[from] ProvisionError),

    /// The provisioner reported success but a file is still missing.
    #[error("certificate generation did not produce {0}")]
    Incomplete(PathBuf),
}

/// Outcome of a successful [`ensure_certificates`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bootstrap {
    /// Both files were already present; nothing was generated.
    Existing,
    /// A new self-signed pair was generated.
    Generated,
}

/// Creates a self-signed certificate and private key at the given paths.
///
/// The production implementation shells out to OpenSSL; tests substitute a
/// mock so that no external process is spawned.
#[cfg_attr(test, mockall::automock)]
pub trait CertificateProvisioner {
    /// Write a fresh certificate to `paths.cert` and its key to `paths.key`,
    /// overwriting whatever is there.
    ///
    /// # Errors
    ///
    /// Returns a [`ProvisionError`] if generation fails.
    fn provision(&self, paths: &CertificatePaths) -> Result<(), ProvisionError>;
}

/// Make sure a certificate pair exists at `paths`, generating one if needed.
///
/// Idempotent: with both files present this is a no-op returning
/// [`Bootstrap::Existing`].
///
/// # Errors
///
/// Returns [`BootstrapError::Provision`] if the provisioner fails, or
/// [`BootstrapError::Incomplete`] if it succeeds without producing both files.
pub fn ensure_certificates<P>(
    paths: &CertificatePaths,
    provisioner: &P,
) -> Result<Bootstrap, BootstrapError>
where
    P: CertificateProvisioner + ?Sized,
{
    if paths.both_exist() {
        debug!(cert = %paths.cert.display(), key = %paths.key.display(), "using existing certificate pair");
        return Ok(Bootstrap::Existing);
    }

    for missing in paths.missing() {
        info!(path = %missing.display(), "certificate file missing; generating self-signed pair");
    }
    provisioner.provision(paths)?;

    if let Some(missing) = paths.missing().first() {
        return Err(BootstrapError::Incomplete(missing.to_path_buf()));
    }
    info!(cert = %paths.cert.display(), key = %paths.key.display(), "self-signed certificate generated");
    Ok(Bootstrap::Generated)
}
