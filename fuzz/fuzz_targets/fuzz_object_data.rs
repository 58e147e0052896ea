//! Fuzz target for object body decoding.
//!
//! The first byte picks the object kind; the rest is the body.

#![no_main]

use gitwire_object::{decode, Object, ObjectId, ObjectKind};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, body)) = data.split_first() else {
        return;
    };
    let kind = match selector % 3 {
        0 => ObjectKind::Commit,
        1 => ObjectKind::Tree,
        _ => ObjectKind::Blob,
    };

    if let Ok(object) = decode(kind, body) {
        assert_eq!(object.id(), ObjectId::hash_object(kind, body));
    }
});
