//! Object identifiers and kinds.

use crate::{DecodeError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha1::{Digest, Sha1};
use std::fmt;
use std::str::FromStr;

/// Length in bytes of a SHA-1 object id.
pub const ID_LEN: usize = 20;

/// A 20-byte SHA-1 object identifier.
///
/// Two objects with equal ids are the same object.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; ID_LEN]);

impl Serialize for ObjectId {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ObjectId::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl ObjectId {
    /// Creates an ObjectId from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Creates an ObjectId from 40 hex digits (either case).
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidHash`] if the input is not exactly
    /// 40 hex digits.
    pub fn from_hex(hex: impl AsRef<[u8]>) -> Result<Self> {
        let hex = hex.as_ref();
        if hex.len() != ID_LEN * 2 {
            return Err(DecodeError::InvalidHash(format!(
                "expected {} hex digits, got {}",
                ID_LEN * 2,
                hex.len()
            )));
        }
        let mut bytes = [0u8; ID_LEN];
        hex::decode_to_slice(hex, &mut bytes)
            .map_err(|e| DecodeError::InvalidHash(e.to_string()))?;
        Ok(Self(bytes))
    }

    /// Returns the raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }

    /// Returns the lowercase hex representation.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Computes the git id of `data` stored as an object of `kind`.
    ///
    /// The digest covers `"<kind> <len>\0"` followed by the content.
    #[must_use]
    pub fn hash_object(kind: ObjectKind, data: &[u8]) -> Self {
        let header = format!("{} {}\0", kind.as_str(), data.len());
        let mut hasher = Sha1::new();
        hasher.update(header.as_bytes());
        hasher.update(data);
        let result = hasher.finalize();
        let mut bytes = [0u8; ID_LEN];
        bytes.copy_from_slice(&result);
        Self(bytes)
    }
}

impl FromStr for ObjectId {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// The object kinds this crate decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// Commit object.
    Commit,
    /// Directory listing.
    Tree,
    /// File content.
    Blob,
}

impl ObjectKind {
    /// Returns the tag used in object headers.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Commit => "commit",
            Self::Tree => "tree",
            Self::Blob => "blob",
        }
    }
}

impl FromStr for ObjectKind {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "commit" => Ok(Self::Commit),
            "tree" => Ok(Self::Tree),
            "blob" => Ok(Self::Blob),
            _ => Err(DecodeError::UnknownKind(s.to_string())),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: hashing is deterministic
        #[test]
        fn prop_hash_deterministic(data in prop::collection::vec(any::<u8>(), 0..4096)) {
            prop_assert_eq!(
                ObjectId::hash_object(ObjectKind::Blob, &data),
                ObjectId::hash_object(ObjectKind::Blob, &data)
            );
        }

        /// Property: flipping one byte changes the id
        #[test]
        fn prop_single_byte_change_changes_hash(
            data in prop::collection::vec(any::<u8>(), 1..4096),
            index in any::<prop::sample::Index>(),
        ) {
            let mut changed = data.clone();
            let i = index.index(changed.len());
            changed[i] ^= 0x01;
            prop_assert_ne!(
                ObjectId::hash_object(ObjectKind::Blob, &data),
                ObjectId::hash_object(ObjectKind::Blob, &changed)
            );
        }

        /// Property: hex rendering always parses back
        #[test]
        fn prop_hex_roundtrip(bytes in any::<[u8; 20]>()) {
            let id = ObjectId::from_bytes(bytes);
            prop_assert_eq!(ObjectId::from_hex(id.to_hex()).unwrap(), id);
        }
    }
}
