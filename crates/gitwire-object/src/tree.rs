//! Tree decoding.
//!
//! A tree body is a run of `"<mode> <name>\0<20-byte id>"` entries. Bodies
//! handed over still zlib-wrapped are inflated first.

use crate::scan::{lossy, split_once};
use crate::{DecodeError, ObjectId, ObjectKind, Result, ID_LEN};
use flate2::read::ZlibDecoder;
use serde::Serialize;
use std::borrow::Cow;
use std::io::Read;
use tracing::{debug, trace};

/// Compression method nibble for deflate in a zlib header.
const ZLIB_DEFLATE: u8 = 8;
/// Largest window size exponent a zlib header may carry.
const ZLIB_MAX_CINFO: u8 = 7;
/// Preset dictionary flag in the zlib FLG byte.
const ZLIB_FDICT: u8 = 0x20;

/// One name in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeEntry {
    /// Path component.
    pub name: String,
    /// Lowercase hex id of the referenced object.
    pub hash: String,
}

/// A decoded tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tree {
    id: ObjectId,
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Decodes a tree body, inflating it first if it carries a zlib header.
    ///
    /// The id is computed over `data` exactly as given, before any
    /// inflation. Entries keep the order they appear in.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Decompress`] if a zlib stream fails part way,
    /// and [`DecodeError::MalformedTreeEntry`] if an entry lacks its NUL or
    /// space separator or its id is shorter than 20 bytes.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let id = ObjectId::hash_object(ObjectKind::Tree, data);

        let body = if has_zlib_header(data) {
            let mut inflated = Vec::new();
            ZlibDecoder::new(data).read_to_end(&mut inflated)?;
            trace!(%id, compressed = data.len(), inflated = inflated.len(), "inflated tree");
            Cow::Owned(inflated)
        } else {
            if !data.is_empty() {
                debug!(%id, "tree body has no zlib header, parsing raw bytes");
            }
            Cow::Borrowed(data)
        };

        let entries = parse_entries(&body)?;
        trace!(%id, entries = entries.len(), "decoded tree");

        Ok(Self { id, entries })
    }

    /// Returns the tree id.
    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Returns the entries in appearance order.
    #[must_use]
    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    /// Looks up an entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TreeEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

/// Reports whether `data` opens with a header a zlib reader would accept.
///
/// Anything else is parsed as a raw tree body.
fn has_zlib_header(data: &[u8]) -> bool {
    let &[cmf, flg, ..] = data else {
        return false;
    };
    cmf & 0x0f == ZLIB_DEFLATE
        && cmf >> 4 <= ZLIB_MAX_CINFO
        && ((u16::from(cmf) << 8) | u16::from(flg)) % 31 == 0
        && flg & ZLIB_FDICT == 0
}

fn parse_entries(body: &[u8]) -> Result<Vec<TreeEntry>> {
    let mut entries = Vec::new();
    let mut offset = 0;

    while offset < body.len() {
        let rest = &body[offset..];

        let (header, tail) = split_once(rest, 0)
            .ok_or_else(|| DecodeError::malformed_entry(offset, "missing NUL after name"))?;
        let (_mode, name) = split_once(header, b' ')
            .ok_or_else(|| DecodeError::malformed_entry(offset, "missing space after mode"))?;
        let hash = tail
            .get(..ID_LEN)
            .ok_or_else(|| DecodeError::malformed_entry(offset, "truncated object id"))?;

        entries.push(TreeEntry {
            name: lossy(name),
            hash: hex::encode(hash),
        });

        offset += header.len() + 1 + ID_LEN;
    }

    Ok(entries)
}
