//! Reading pkt-lines from a byte stream.

use crate::{PktLine, PktLineError, Result, LENGTH_PREFIX_LEN};
use std::io::Read;
use tracing::trace;

/// Reads pkt-line frames from an underlying byte source.
///
/// The decoder only tracks its position in the source. It never rewinds,
/// and reads through `&mut self`, so one decoder serves one caller.
pub struct Decoder<R> {
    reader: R,
}

impl<R: Read> Decoder<R> {
    /// Creates a new pkt-line decoder.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Reads exactly one frame.
    ///
    /// Returns `Ok(None)` when the stream ends cleanly on a frame boundary,
    /// `Ok(Some(PktLine::Flush))` for a `0000` marker and the payload of a
    /// data frame otherwise.
    ///
    /// # Errors
    ///
    /// - [`PktLineError::InvalidLength`] if the prefix is not hex or names a
    ///   length of 1 to 3.
    /// - [`PktLineError::UnexpectedLength`] if the stream ends inside the
    ///   prefix or the payload.
    /// - [`PktLineError::Io`] if the source fails.
    pub fn read_line(&mut self) -> Result<Option<PktLine>> {
        let prefix = self.read_up_to(LENGTH_PREFIX_LEN)?;
        if prefix.is_empty() {
            return Ok(None);
        }
        if prefix.len() < LENGTH_PREFIX_LEN {
            return Err(PktLineError::UnexpectedLength {
                expected: LENGTH_PREFIX_LEN,
                actual: prefix.len(),
            });
        }

        let len = parse_length(&prefix)?;
        if len == 0 {
            trace!("flush-pkt");
            return Ok(Some(PktLine::Flush));
        }
        if len < LENGTH_PREFIX_LEN {
            return Err(invalid_length(&prefix));
        }

        let expected = len - LENGTH_PREFIX_LEN;
        let payload = self.read_up_to(expected)?;
        if payload.len() < expected {
            return Err(PktLineError::UnexpectedLength {
                expected,
                actual: payload.len(),
            });
        }

        trace!(len, "data-pkt");
        Ok(Some(PktLine::Data(payload)))
    }

    /// Reads data payloads up to the next flush marker or the end of the
    /// stream. The flush marker itself is consumed but not returned.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`Decoder::read_line`].
    pub fn read_block(&mut self) -> Result<Vec<Vec<u8>>> {
        let mut lines = Vec::new();
        while let Some(pkt) = self.read_line()? {
            match pkt {
                PktLine::Flush => break,
                PktLine::Data(data) => lines.push(data),
            }
        }
        Ok(lines)
    }

    /// Reads blocks until one comes back empty and returns all their lines
    /// in order. Flush markers between blocks are dropped.
    ///
    /// An empty block also results from two flush markers in a row, so
    /// reading stops there even if more frames follow.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`Decoder::read_line`].
    pub fn read_all(&mut self) -> Result<Vec<Vec<u8>>> {
        let mut lines = Vec::new();
        loop {
            let block = self.read_block()?;
            if block.is_empty() {
                break;
            }
            lines.extend(block);
        }
        Ok(lines)
    }

    /// Returns a mutable reference to the inner reader.
    pub fn inner_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Consumes the decoder and returns the inner reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Reads until `len` bytes are collected or the source is exhausted.
    fn read_up_to(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(len);
        self.reader.by_ref().take(len as u64).read_to_end(&mut buf)?;
        Ok(buf)
    }
}

/// Yields frames lazily until the stream ends cleanly.
impl<R: Read> Iterator for Decoder<R> {
    type Item = Result<PktLine>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_line().transpose()
    }
}

fn parse_length(prefix: &[u8]) -> Result<usize> {
    let mut raw = [0u8; 2];
    hex::decode_to_slice(prefix, &mut raw).map_err(|_| invalid_length(prefix))?;
    Ok(usize::from(u16::from_be_bytes(raw)))
}

fn invalid_length(prefix: &[u8]) -> PktLineError {
    PktLineError::InvalidLength(String::from_utf8_lossy(prefix).into_owned())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::Encoder;
    use proptest::prelude::*;
    use std::io::Cursor;

    proptest! {
        /// Property: arbitrary input never panics
        #[test]
        fn prop_read_all_never_panics(data in prop::collection::vec(any::<u8>(), 0..2048)) {
            let mut d = Decoder::new(Cursor::new(data));
            let _ = d.read_all();
        }

        /// Property: encoded blocks read back line for line
        #[test]
        fn prop_blocks_read_back(
            blocks in prop::collection::vec(
                prop::collection::vec(prop::collection::vec(any::<u8>(), 0..64), 1..8),
                1..6,
            )
        ) {
            let mut buf = Vec::new();
            {
                let mut encoder = Encoder::new(&mut buf);
                for block in &blocks {
                    for line in block {
                        encoder.write_data(line).unwrap();
                    }
                    encoder.flush_pkt().unwrap();
                }
            }

            let mut d = Decoder::new(Cursor::new(buf));
            for block in &blocks {
                prop_assert_eq!(&d.read_block().unwrap(), block);
            }
            prop_assert!(d.read_line().unwrap().is_none());
        }
    }
}
