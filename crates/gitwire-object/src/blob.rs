//! Blob decoding.

use crate::{ObjectId, ObjectKind};
use serde::Serialize;

/// A decoded blob: its length and id. The content itself is not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Blob {
    id: ObjectId,
    len: usize,
}

impl Blob {
    /// Decodes blob content. Any byte sequence is a valid blob.
    #[must_use]
    pub fn decode(data: &[u8]) -> Self {
        Self {
            id: ObjectId::hash_object(ObjectKind::Blob, data),
            len: data.len(),
        }
    }

    /// Returns the blob id.
    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Returns the content length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true for the empty blob.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
