//! Git object decoding for Gitwire.
//!
//! This crate turns the canonical encoding of commits, trees and blobs into
//! typed values and computes the SHA-1 object id exactly as git does. Every
//! decoder is a pure function of its input bytes.

mod blob;
mod commit;
mod error;
mod id;
mod object;
mod scan;
mod signature;
mod tree;

pub use blob::Blob;
pub use commit::Commit;
pub use error::DecodeError;
pub use id::{ObjectId, ObjectKind, ID_LEN};
pub use object::{decode, AnyObject, ContentSink, Object};
pub use signature::Signature;
pub use tree::{Tree, TreeEntry};

/// Result type for object decoding.
pub type Result<T> = std::result::Result<T, DecodeError>;
