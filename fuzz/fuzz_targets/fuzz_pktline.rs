//! Fuzz target for pkt-line stream decoding.
//!
//! The decoder must return an error for malformed frames, never panic, and
//! always make forward progress.

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let mut decoder = gitwire_pktline::Decoder::new(Cursor::new(data));

    // Every successful frame consumes at least its 4-byte prefix, so the
    // number of reads is bounded by the input length.
    for _ in 0..=data.len() / 4 {
        match decoder.read_line() {
            Ok(Some(_)) => continue,
            Ok(None) | Err(_) => break,
        }
    }

    let _ = gitwire_pktline::Decoder::new(Cursor::new(data)).read_all();
});
