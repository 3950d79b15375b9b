//! Shared application state injected into every Axum handler.

use std::{path::PathBuf, sync::Arc};

use crate::config::Config;

/// Application state shared across all request handlers.
///
/// Built once at startup and never mutated; both fields are `Arc`-backed so
/// Axum can clone the state for each request without copying.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Directory all request targets are resolved against.
    pub doc_root: Arc<PathBuf>,
    /// File served for `/` and for directory targets.
    pub index_file: Arc<str>,
}

impl AppState {
    /// Create a new [`AppState`] serving `doc_root`.
    pub fn new(doc_root: impl Into<PathBuf>, index_file: impl Into<Arc<str>>) -> Self {
        Self {
            doc_root: Arc::new(doc_root.into()),
            index_file: index_file.into(),
        }
    }

    /// Build the state from a validated [`Config`].
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.doc_root.clone(), cfg.index_file.as_str())
    }
}

impl Default for AppState {
    /// Serves the current directory with `index.html` as the default document.
    fn default() -> Self {
        Self::new(".", "index.html")
    }
}
