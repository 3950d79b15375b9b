//! `ar-devserver` — binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured logging.
//! 3. Ensure a certificate pair exists, generating a self-signed one if needed.
//! 4. Build the TLS acceptor from the pair.
//! 5. Build the Axum router and start the HTTPS accept loop.

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use devserver::{
    certs::{self, Bootstrap, OpensslProvisioner},
    config::Config,
    server::{self, state::AppState, tls},
    telemetry,
};

/// Printed when the self-signed pair cannot be generated.
const CERT_REMEDIATION: &str = "Failed to generate SSL certificate. Install OpenSSL and try again, \
or point TLS_CERT_PATH and TLS_KEY_PATH at an existing certificate and key.";

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Logging is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(&cfg.log_level, cfg.json_logs())?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        doc_root = %cfg.doc_root.display(),
        "ar-devserver starting"
    );

    // -----------------------------------------------------------------------
    // 3. Certificate bootstrap
    // -----------------------------------------------------------------------
    let cert_paths = cfg.certificate_paths();
    let provisioner = OpensslProvisioner::with_program(cfg.openssl_bin.as_str());
    let outcome = certs::ensure_certificates(&cert_paths, &provisioner).map_err(|e| {
        error!(error = %e, "certificate bootstrap failed");
        eprintln!("{CERT_REMEDIATION}");
        e
    })?;
    match outcome {
        Bootstrap::Existing => info!("using existing SSL certificates"),
        Bootstrap::Generated => info!("SSL certificate generated"),
    }

    // -----------------------------------------------------------------------
    // 4. TLS
    // -----------------------------------------------------------------------
    let acceptor = tls::load_acceptor(&cert_paths)?;

    // -----------------------------------------------------------------------
    // 5. HTTPS server
    // -----------------------------------------------------------------------
    let router = server::router::build(AppState::from_config(&cfg));

    let addr = cfg.listen_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(url = %format!("https://localhost:{}", cfg.tls_port), addr = %addr, "HTTPS server running");
    warn!("browsers will show a security warning for the self-signed certificate; accept it to enable camera access");

    server::serve(listener, acceptor, router, shutdown_signal()).await
}

/// Resolves on Ctrl-C. If the handler cannot be installed the server runs until killed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C; graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
}
