//! Object decoding error types.

use thiserror::Error;

/// Errors that can occur while decoding a git object.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A hex object id in a header line could not be decoded.
    #[error("invalid object id: {0}")]
    InvalidHash(String),

    /// A required header line was absent.
    #[error("missing {0} header")]
    MissingHeader(&'static str),

    /// A tree entry was cut short or lacked its separators.
    #[error("malformed tree entry at offset {offset}: {reason}")]
    MalformedTreeEntry {
        /// Byte offset of the entry within the (decompressed) tree body.
        offset: usize,
        /// What was wrong with the entry.
        reason: &'static str,
    },

    /// A zlib-wrapped tree body failed to inflate.
    #[error("tree decompression failed: {0}")]
    Decompress(#[from] std::io::Error),

    /// The object kind tag is not one of commit, tree or blob.
    #[error("unknown object kind: {0}")]
    UnknownKind(String),
}

impl DecodeError {
    pub(crate) fn malformed_entry(offset: usize, reason: &'static str) -> Self {
        Self::MalformedTreeEntry { offset, reason }
    }
}
