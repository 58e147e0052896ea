//! Pkt-line error types.

use thiserror::Error;

/// Errors that can occur while reading or writing pkt-lines.
#[derive(Debug, Error)]
pub enum PktLineError {
    /// The length prefix is not four hex digits, or names a frame too
    /// short to hold its own prefix.
    #[error("invalid length prefix {0:?}")]
    InvalidLength(String),

    /// The stream ended before the frame did.
    #[error("unexpected length: frame needs {expected} more bytes, stream ended after {actual}")]
    UnexpectedLength {
        /// Bytes the frame still required.
        expected: usize,
        /// Bytes that were available.
        actual: usize,
    },

    /// A payload too large to fit in one frame.
    #[error("payload of {0} bytes does not fit in a pkt-line")]
    PayloadTooLong(usize),

    /// I/O error from the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
