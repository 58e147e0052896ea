//! Writing pkt-lines to a byte sink.

use crate::{PktLine, Result};
use std::io::Write;

/// Writes pkt-line frames to an underlying writer.
pub struct Encoder<W> {
    writer: W,
}

impl<W: Write> Encoder<W> {
    /// Creates a new pkt-line encoder.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes a frame.
    ///
    /// # Errors
    ///
    /// Fails if the payload is too long for one frame or the writer fails.
    pub fn write(&mut self, pkt: &PktLine) -> Result<()> {
        self.writer.write_all(&pkt.encode()?)?;
        Ok(())
    }

    /// Writes a data line.
    ///
    /// # Errors
    ///
    /// Fails if the payload is too long for one frame or the writer fails.
    pub fn write_data(&mut self, data: &[u8]) -> Result<()> {
        self.write(&PktLine::Data(data.to_vec()))
    }

    /// Writes a text line, appending a newline if it has none.
    ///
    /// # Errors
    ///
    /// Fails if the line is too long for one frame or the writer fails.
    pub fn write_line(&mut self, s: &str) -> Result<()> {
        let mut data = s.as_bytes().to_vec();
        if !s.ends_with('\n') {
            data.push(b'\n');
        }
        self.write(&PktLine::Data(data))
    }

    /// Writes a flush marker.
    ///
    /// # Errors
    ///
    /// Fails if the writer fails.
    pub fn flush_pkt(&mut self) -> Result<()> {
        self.write(&PktLine::Flush)
    }

    /// Flushes the underlying writer.
    ///
    /// # Errors
    ///
    /// Fails if the writer fails.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Returns the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PktLineError, MAX_PAYLOAD_LEN};

    #[test]
    fn test_write_line() {
        let mut encoder = Encoder::new(Vec::new());
        encoder.write_line("test").unwrap();
        // "test\n" is 5 bytes, + 4 for length = 9
        assert_eq!(encoder.into_inner(), b"0009test\n");
    }

    #[test]
    fn test_write_line_with_newline() {
        let mut encoder = Encoder::new(Vec::new());
        encoder.write_line("test\n").unwrap();
        assert_eq!(encoder.into_inner(), b"0009test\n");
    }

    #[test]
    fn test_write_data_and_flush() {
        let mut encoder = Encoder::new(Vec::new());
        encoder.write_data(b"a\n").unwrap();
        encoder.write_data(b"b\n").unwrap();
        encoder.flush_pkt().unwrap();
        encoder.write(&PktLine::from_string("c\n")).unwrap();
        encoder.flush().unwrap();
        assert_eq!(encoder.into_inner(), b"0006a\n0006b\n00000006c\n");
    }

    #[test]
    fn test_write_too_long_writes_nothing() {
        let mut encoder = Encoder::new(Vec::new());
        let result = encoder.write_data(&vec![0u8; MAX_PAYLOAD_LEN + 1]);
        assert!(matches!(result, Err(PktLineError::PayloadTooLong(_))));
        assert!(encoder.into_inner().is_empty());
    }
}
