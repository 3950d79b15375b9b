//! Common error types shared across crates.

use std::io;

use thiserror::Error;

/// Per-request serving error.
///
/// Variants map to HTTP status codes returned to browsers:
/// - [`ServeError::NotFound`] → 404
/// - [`ServeError::MethodNotAllowed`] → 405
/// - [`ServeError::RangeNotSatisfiable`] → 416
/// - [`ServeError::Io`] → 500
#[derive(Debug, Error)]
pub enum ServeError {
    /// The target does not exist under the document root, or the request
    /// path tried to leave it.
    #[error("not found")]
    NotFound,

    /// The request method is not one of `GET`, `HEAD`, `OPTIONS`.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// A video range request whose window lies outside the resource.
    #[error("range not satisfiable for resource of {size} bytes")]
    RangeNotSatisfiable {
        /// Full size of the resource in bytes.
        size: u64,
    },

    /// Any filesystem failure other than "not found".
    #[error("filesystem error: {0:?}")]
    Io(io::ErrorKind),
}

impl ServeError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServeError::NotFound => 404,
            ServeError::MethodNotAllowed => 405,
            ServeError::RangeNotSatisfiable { .. } => 416,
            ServeError::Io(_) => 500,
        }
    }

    /// Short code identifying the underlying failure, e.g. `PermissionDenied`.
    ///
    /// Only meaningful for [`ServeError::Io`]; the other variants return their
    /// own name.
    pub fn code(&self) -> String {
        match self {
            ServeError::NotFound => "NotFound".into(),
            ServeError::MethodNotAllowed => "MethodNotAllowed".into(),
            ServeError::RangeNotSatisfiable { .. } => "RangeNotSatisfiable".into(),
            ServeError::Io(kind) => format!("{kind:?}"),
        }
    }
}

impl From<io::Error> for ServeError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => ServeError::NotFound,
            kind => ServeError::Io(kind),
        }
    }
}
