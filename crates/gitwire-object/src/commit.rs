//! Commit decoding.

use crate::scan::{lossy, split_once};
use crate::{DecodeError, ObjectId, ObjectKind, Result, Signature};
use serde::Serialize;
use tracing::trace;

/// A decoded commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    id: ObjectId,
    tree: ObjectId,
    parents: Vec<ObjectId>,
    author: Signature,
    committer: Signature,
    message: String,
}

impl Commit {
    /// Decodes a commit body: header lines, one blank line, then the message.
    ///
    /// Unknown header lines (`gpgsig`, `encoding`, `mergetag`, ...) are
    /// skipped. Only the first blank line ends the headers; later blank
    /// lines belong to the message.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidHash`] if a `tree` or `parent` line does
    /// not carry a 40-digit hex id, and [`DecodeError::MissingHeader`] if
    /// there is no `tree` line.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let id = ObjectId::hash_object(ObjectKind::Commit, data);

        let mut tree = None;
        let mut parents = Vec::new();
        let mut author = Signature::default();
        let mut committer = Signature::default();
        let mut message = String::new();

        let mut rest = data;
        loop {
            let (line, next) = match split_once(rest, b'\n') {
                Some((line, next)) => (line, Some(next)),
                None => (rest, None),
            };

            if line.is_empty() {
                message = lossy(next.unwrap_or_default());
                break;
            }

            let (key, value) = split_once(line, b' ').unwrap_or((line, b"".as_slice()));
            match key {
                b"tree" => tree = Some(ObjectId::from_hex(value)?),
                b"parent" => parents.push(ObjectId::from_hex(value)?),
                b"author" => author = Signature::parse(value),
                b"committer" => committer = Signature::parse(value),
                _ => {}
            }

            match next {
                Some(next) => rest = next,
                None => break,
            }
        }

        let tree = tree.ok_or(DecodeError::MissingHeader("tree"))?;
        trace!(%id, %tree, parents = parents.len(), "decoded commit");

        Ok(Self {
            id,
            tree,
            parents,
            author,
            committer,
            message,
        })
    }

    /// Returns the commit id.
    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Returns the root tree id.
    #[must_use]
    pub fn tree(&self) -> ObjectId {
        self.tree
    }

    /// Returns the parent ids in the order they appear.
    #[must_use]
    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    /// Returns the author signature.
    #[must_use]
    pub fn author(&self) -> &Signature {
        &self.author
    }

    /// Returns the committer signature.
    #[must_use]
    pub fn committer(&self) -> &Signature {
        &self.committer
    }

    /// Returns the message, everything after the first blank line.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true for a commit with no parents.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Returns true for a commit with more than one parent.
    #[must_use]
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}
