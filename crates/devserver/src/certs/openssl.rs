//! [`CertificateProvisioner`] backed by the `openssl` command-line tool.

use std::{ffi::OsString, fs, path::Path, process::Command};

use tracing::info;

use super::{CertificatePaths, CertificateProvisioner, ProvisionError};

/// Subject alternative names covering every way a local browser reaches the server.
pub const DEFAULT_SANS: &[&str] = &[
    "DNS:localhost",
    "DNS:*.localhost",
    "IP:127.0.0.1",
    "IP:::1",
];

/// Generates a self-signed RSA pair with `openssl req -x509`.
///
/// The child process inherits the console so OpenSSL's own progress and
/// error output reach the user directly.
#[derive(Debug, Clone)]
pub struct OpensslProvisioner {
    /// Program to run.
    pub program: String,
    /// RSA modulus size in bits.
    pub rsa_bits: u32,
    /// Certificate validity in days.
    pub days: u32,
    /// Distinguished name passed to `-subj`.
    pub subject: String,
    /// Entries for the `subjectAltName` extension.
    pub sans: Vec<String>,
}

impl Default for OpensslProvisioner {
    fn default() -> Self {
        Self {
            program: "openssl".into(),
            rsa_bits: 4096,
            days: 365,
            subject: "/C=US/ST=State/L=City/O=Organization/CN=localhost".into(),
            sans: DEFAULT_SANS.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

impl OpensslProvisioner {
    /// Default settings, invoking `program` instead of `openssl`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Argument vector for a `req -x509` invocation writing to `paths`.
    pub fn args(&self, paths: &CertificatePaths) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["req", "-x509", "-newkey"]
            .into_iter()
            .map(OsString::from)
            .collect();
        args.push(format!("rsa:{}", self.rsa_bits).into());
        args.push("-keyout".into());
        args.push(paths.key.clone().into_os_string());
        args.push("-out".into());
        args.push(paths.cert.clone().into_os_string());
        args.push("-days".into());
        args.push(self.days.to_string().into());
        args.push("-nodes".into());
        args.push("-subj".into());
        args.push(self.subject.clone().into());
        args.push("-addext".into());
        args.push(format!("subjectAltName={}", self.sans.join(",")).into());
        args
    }
}

impl CertificateProvisioner for OpensslProvisioner {
    fn provision(&self, paths: &CertificatePaths) -> Result<(), ProvisionError> {
        create_parent(&paths.cert)?;
        create_parent(&paths.key)?;

        info!(program = %self.program, rsa_bits = self.rsa_bits, days = self.days, "generating SSL certificate");
        let status = Command::new(&self.program)
            .args(self.args(paths))
            .status()
            .map_err(|source| ProvisionError::Launch {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(ProvisionError::Failed {
                program: self.program.clone(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

fn create_parent(path: &Path) -> Result<(), ProvisionError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|source| ProvisionError::Io {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}
