//! `Range: bytes=...` header parsing for video streaming.
//!
//! Only a single range is supported. Windows are clamped to the resource:
//! an end past the last byte is pulled back to `size - 1`, while a start past
//! the last byte is unsatisfiable.

use thiserror::Error;

/// Errors from [`ByteRange::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    /// Not a single well-formed `bytes=` range. Callers ignore the header.
    #[error("malformed range header")]
    Malformed,

    /// Well-formed, but no byte of the resource falls inside it.
    #[error("range not satisfiable")]
    Unsatisfiable,
}

/// An inclusive byte window `start..=end` inside a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte offset.
    pub start: u64,
    /// Last byte offset, inclusive.
    pub end: u64,
}

impl ByteRange {
    /// Parse a `Range` header value against a resource of `size` bytes.
    ///
    /// Accepts `bytes=<start>-`, `bytes=<start>-<end>` and the suffix form
    /// `bytes=-<len>`.
    ///
    /// # Errors
    ///
    /// - [`RangeError::Malformed`] for other units, multiple ranges,
    ///   non-integer bounds, or an explicit end before the start.
    /// - [`RangeError::Unsatisfiable`] when the start lies past the end of the
    ///   resource, for a zero-length suffix, or for any range on an empty
    ///   resource.
    pub fn parse(header: &str, size: u64) -> Result<Self, RangeError> {
        let ranges = header
            .trim()
            .strip_prefix("bytes=")
            .ok_or(RangeError::Malformed)?;
        if ranges.contains(',') {
            return Err(RangeError::Malformed);
        }
        let (first, last) = ranges.split_once('-').ok_or(RangeError::Malformed)?;
        let (first, last) = (first.trim(), last.trim());

        if first.is_empty() {
            let suffix = parse_bound(last)?;
            if suffix == 0 || size == 0 {
                return Err(RangeError::Unsatisfiable);
            }
            return Ok(Self {
                start: size.saturating_sub(suffix),
                end: size - 1,
            });
        }

        let start = parse_bound(first)?;
        let end = if last.is_empty() {
            None
        } else {
            let end = parse_bound(last)?;
            if end < start {
                return Err(RangeError::Malformed);
            }
            Some(end)
        };

        if start >= size {
            return Err(RangeError::Unsatisfiable);
        }
        let end = end.map_or(size - 1, |e| e.min(size - 1));
        Ok(Self { start, end })
    }

    /// Number of bytes in the window.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// A window always holds at least one byte.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// `Content-Range` header value for this window of a `total`-byte resource.
    pub fn content_range(&self, total: u64) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, total)
    }
}

/// `Content-Range` header value sent with a 416 response.
pub fn unsatisfied_content_range(total: u64) -> String {
    format!("bytes */{total}")
}

fn parse_bound(s: &str) -> Result<u64, RangeError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RangeError::Malformed);
    }
    s.parse().map_err(|_| RangeError::Malformed)
}
