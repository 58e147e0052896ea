//! Git pkt-line framing for Gitwire.
//!
//! Every frame starts with four hex digits giving the total frame length,
//! prefix included. `0000` is a flush marker that ends a block of lines
//! without ending the stream.

mod decoder;
mod encoder;
mod error;
mod pktline;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::PktLineError;
pub use pktline::{PktLine, LENGTH_PREFIX_LEN, MAX_PAYLOAD_LEN, MAX_PKT_LEN};

/// Result type for pkt-line operations.
pub type Result<T> = std::result::Result<T, PktLineError>;
