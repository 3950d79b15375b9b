//! Structured logging setup.
//!
//! # Telemetry invariants
//!
//! - Private key material never appears in any log field.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`), overridden
//!   by `RUST_LOG` when present.

pub mod init;

pub use init::init_telemetry;
