//! Axum HTTPS server, routing, and middleware.
//!
//! # Responsibilities
//! - Build the TLS acceptor from the bootstrapped certificate pair.
//! - Define the Axum router with the static file handler and shared middleware.
//! - Run the accept loop: TCP → TLS handshake → HTTP/1.1 or HTTP/2 per connection.

pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod tls;

use std::future::Future;

use anyhow::{Context, Result};
use axum::Router;
use hyper_util::{
    rt::{TokioExecutor, TokioIo},
    server::conn::auto,
    service::TowerToHyperService,
};
use tokio::net::{TcpListener, TcpStream};
use tokio_rustls::TlsAcceptor;
use tracing::{debug, error, info, warn};

/// Accept loop: terminate TLS on each connection and hand it to `router`.
///
/// Every connection runs on its own Tokio task; a failed handshake or a broken
/// connection is logged and never stops the loop. Returns once `shutdown`
/// resolves. Connections already in flight are left to finish on their own.
///
/// # Errors
///
/// Returns an error if the listener's local address cannot be read.
pub async fn serve<F>(
    listener: TcpListener,
    acceptor: TlsAcceptor,
    router: Router,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send,
{
    let addr = listener
        .local_addr()
        .context("failed to read listener address")?;
    info!(addr = %addr, "accepting HTTPS connections");

    tokio::pin!(shutdown);
    loop {
        let (tcp_stream, peer_addr) = tokio::select! {
            res = listener.accept() => match res {
                Ok(conn) => conn,
                Err(e) => {
                    error!(error = %e, "accept error");
                    continue;
                }
            },
            () = &mut shutdown => {
                info!("shutdown requested; no longer accepting connections");
                return Ok(());
            }
        };

        debug!(%peer_addr, "accepted TCP connection");
        let acceptor = acceptor.clone();
        let router = router.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_connection(tcp_stream, acceptor, router).await {
                warn!(%peer_addr, error = %e, "connection error");
            }
        });
    }
}

/// Handle a single connection: TLS handshake, then HTTP until the peer closes.
async fn handle_connection(tcp: TcpStream, acceptor: TlsAcceptor, router: Router) -> Result<()> {
    let tls = acceptor
        .accept(tcp)
        .await
        .context("TLS handshake failed")?;

    let alpn = tls
        .get_ref()
        .1
        .alpn_protocol()
        .map(|p| String::from_utf8_lossy(p).into_owned());
    debug!(alpn = ?alpn, "TLS handshake complete");

    auto::Builder::new(TokioExecutor::new())
        .serve_connection(TokioIo::new(tls), TowerToHyperService::new(router))
        .await
        .map_err(|e| anyhow::anyhow!("failed to serve connection: {e}"))
}
