//! Error taxonomy, MIME table and range parsing shared across `ar-devserver` crates.

pub mod error;
pub mod mime;
pub mod range;

pub use error::ServeError;
pub use range::{ByteRange, RangeError};
