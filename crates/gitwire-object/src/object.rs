//! The object abstraction shared by commits, trees and blobs.

use crate::{Blob, Commit, ObjectId, ObjectKind, Result, Tree};
use serde::Serialize;

/// Behaviour common to every decoded object.
pub trait Object {
    /// Returns the object's kind tag.
    fn kind(&self) -> ObjectKind;

    /// Returns the object's id.
    fn id(&self) -> ObjectId;
}

impl Object for Commit {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Commit
    }

    fn id(&self) -> ObjectId {
        Commit::id(self)
    }
}

impl Object for Tree {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Tree
    }

    fn id(&self) -> ObjectId {
        Tree::id(self)
    }
}

impl Object for Blob {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Blob
    }

    fn id(&self) -> ObjectId {
        Blob::id(self)
    }
}

/// An object whose kind is only known at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AnyObject {
    /// A decoded commit.
    Commit(Commit),
    /// A decoded tree.
    Tree(Tree),
    /// A decoded blob.
    Blob(Blob),
}

impl Object for AnyObject {
    fn kind(&self) -> ObjectKind {
        match self {
            Self::Commit(_) => ObjectKind::Commit,
            Self::Tree(_) => ObjectKind::Tree,
            Self::Blob(_) => ObjectKind::Blob,
        }
    }

    fn id(&self) -> ObjectId {
        match self {
            Self::Commit(c) => c.id(),
            Self::Tree(t) => t.id(),
            Self::Blob(b) => b.id(),
        }
    }
}

/// Decodes `data` as an object of the given kind.
///
/// # Errors
///
/// Propagates the errors of [`Commit::decode`] and [`Tree::decode`]. Blobs
/// always decode.
pub fn decode(kind: ObjectKind, data: &[u8]) -> Result<AnyObject> {
    Ok(match kind {
        ObjectKind::Commit => AnyObject::Commit(Commit::decode(data)?),
        ObjectKind::Tree => AnyObject::Tree(Tree::decode(data)?),
        ObjectKind::Blob => AnyObject::Blob(Blob::decode(data)),
    })
}

/// Receives raw object content alongside its id.
///
/// This is a hook for callers that stream content somewhere while they
/// decode; the decoders in this crate never call it. Any
/// `FnMut(&ObjectId, &[u8])` closure is a sink.
pub trait ContentSink {
    /// Called with an object's id and its raw content.
    fn content(&mut self, id: &ObjectId, content: &[u8]);
}

impl<F> ContentSink for F
where
    F: FnMut(&ObjectId, &[u8]),
{
    fn content(&mut self, id: &ObjectId, content: &[u8]) {
        self(id, content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_by_kind() {
        let blob = decode(ObjectKind::Blob, b"hello\n").unwrap();
        assert_eq!(blob.kind(), ObjectKind::Blob);
        assert_eq!(blob.id().to_hex(), "ce013625030ba8dba906f756967f9e9ca394464a");

        let tree = decode(ObjectKind::Tree, b"").unwrap();
        assert_eq!(tree.kind(), ObjectKind::Tree);
        assert_eq!(tree.id().to_hex(), "4b825dc642cb6eb9a060e54bf8d69288fbee4904");
    }

    #[test]
    fn test_decode_propagates_errors() {
        assert!(decode(ObjectKind::Commit, b"tree xyz\n\n").is_err());
        assert!(decode(ObjectKind::Tree, b"100644 a").is_err());
    }

    #[test]
    fn test_same_bytes_different_kinds_differ() {
        let data = b"";
        let blob = decode(ObjectKind::Blob, data).unwrap();
        let tree = decode(ObjectKind::Tree, data).unwrap();
        assert_ne!(blob.id(), tree.id());
    }

    #[test]
    fn test_trait_objects() {
        let objects: Vec<Box<dyn Object>> = vec![
            Box::new(Blob::decode(b"x")),
            Box::new(Tree::decode(b"").unwrap()),
        ];
        let kinds: Vec<ObjectKind> = objects.iter().map(|o| o.kind()).collect();
        assert_eq!(kinds, vec![ObjectKind::Blob, ObjectKind::Tree]);
    }

    #[test]
    fn test_serialize_tagged() {
        let blob = decode(ObjectKind::Blob, b"abc").unwrap();
        let json = serde_json::to_value(&blob).unwrap();
        assert_eq!(json["kind"], "blob");
        assert_eq!(json["len"], 3);
    }

    #[test]
    fn test_closure_is_content_sink() {
        let mut seen = Vec::new();
        let mut sink = |id: &ObjectId, content: &[u8]| seen.push((*id, content.len()));

        let data = b"hello\n";
        let blob = Blob::decode(data);
        sink.content(&blob.id(), data);

        assert_eq!(seen, vec![(blob.id(), 6)]);
    }
}
