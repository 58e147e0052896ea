//! The pkt-line frame value.

use crate::{PktLineError, Result};

/// Width of the hex length prefix.
pub const LENGTH_PREFIX_LEN: usize = 4;
/// Largest total frame length, prefix included.
pub const MAX_PKT_LEN: usize = 65520;
/// Largest payload a single frame carries.
pub const MAX_PAYLOAD_LEN: usize = MAX_PKT_LEN - LENGTH_PREFIX_LEN;

/// A pkt-line frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PktLine {
    /// Data line with its payload, prefix excluded.
    Data(Vec<u8>),
    /// Flush marker (0000).
    Flush,
}

impl PktLine {
    /// Creates a data line from a string slice.
    pub fn from_string(s: &str) -> Self {
        Self::Data(s.as_bytes().to_vec())
    }

    /// Creates a data line from bytes.
    pub fn from_bytes(b: impl Into<Vec<u8>>) -> Self {
        Self::Data(b.into())
    }

    /// Encodes the frame to bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PktLineError::PayloadTooLong`] if the payload exceeds
    /// [`MAX_PAYLOAD_LEN`].
    pub fn encode(&self) -> Result<Vec<u8>> {
        match self {
            Self::Data(data) => {
                if data.len() > MAX_PAYLOAD_LEN {
                    return Err(PktLineError::PayloadTooLong(data.len()));
                }
                let mut result = format!("{:04x}", data.len() + LENGTH_PREFIX_LEN).into_bytes();
                result.extend_from_slice(data);
                Ok(result)
            }
            Self::Flush => Ok(b"0000".to_vec()),
        }
    }

    /// Returns true if this is a flush marker.
    pub fn is_flush(&self) -> bool {
        matches!(self, Self::Flush)
    }

    /// Returns the payload, or None for a flush marker.
    pub fn data(&self) -> Option<&[u8]> {
        match self {
            Self::Data(data) => Some(data),
            Self::Flush => None,
        }
    }

    /// Consumes the line and returns its payload, or None for a flush marker.
    pub fn into_data(self) -> Option<Vec<u8>> {
        match self {
            Self::Data(data) => Some(data),
            Self::Flush => None,
        }
    }

    /// Returns the payload as a string, trimming any trailing newline.
    pub fn as_str(&self) -> Option<&str> {
        self.data()
            .and_then(|d| std::str::from_utf8(d).ok())
            .map(|s| s.trim_end_matches('\n'))
    }
}
