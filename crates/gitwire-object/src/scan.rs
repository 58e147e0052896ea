//! Byte scanning helpers shared by the decoders.

/// Splits `bytes` around the first occurrence of `sep`.
pub(crate) fn split_once(bytes: &[u8], sep: u8) -> Option<(&[u8], &[u8])> {
    let pos = bytes.iter().position(|&b| b == sep)?;
    Some((&bytes[..pos], &bytes[pos + 1..]))
}

/// Git stores names and messages as raw bytes; invalid UTF-8 is replaced.
pub(crate) fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
