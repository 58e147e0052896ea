//! CLI command implementations.

use gitwire_object::{
    decode, AnyObject, ContentSink, DecodeError, Object, ObjectId, ObjectKind, Signature,
};
use gitwire_pktline::{Decoder, PktLineError};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use thiserror::Error;

/// CLI errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("object: {0}")]
    Object(#[from] DecodeError),

    #[error("pkt-line: {0}")]
    PktLine(#[from] PktLineError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

/// Decodes `data` and hands the raw body to `sink` under the decoded id.
pub fn decode_with_sink(
    kind: ObjectKind,
    data: &[u8],
    sink: &mut dyn ContentSink,
) -> Result<AnyObject> {
    let object = decode(kind, data)?;
    sink.content(&object.id(), data);
    Ok(object)
}

/// Decode an object body and print it.
pub fn object(
    kind: ObjectKind,
    path: &str,
    content: bool,
    format: Format,
    out: &mut impl Write,
) -> Result<()> {
    let data = read_input(path)?;
    tracing::info!(%kind, path = %path, len = data.len(), "Decoding object");

    let mut raw = Vec::new();
    let object = if content {
        decode_with_sink(kind, &data, &mut |_: &ObjectId, body: &[u8]| {
            raw.extend_from_slice(body);
        })?
    } else {
        decode(kind, &data)?
    };

    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, &object)?;
            writeln!(out)?;
        }
        Format::Text => print_object(&object, out)?,
    }
    out.write_all(&raw)?;

    Ok(())
}

/// Print the id an object body hashes to.
pub fn hash(kind: ObjectKind, path: &str, format: Format, out: &mut impl Write) -> Result<()> {
    #[derive(Serialize)]
    struct Hashed {
        kind: ObjectKind,
        id: ObjectId,
    }

    let data = read_input(path)?;
    let id = ObjectId::hash_object(kind, &data);

    match format {
        Format::Json => {
            serde_json::to_writer(&mut *out, &Hashed { kind, id })?;
            writeln!(out)?;
        }
        Format::Text => writeln!(out, "{id}")?,
    }

    Ok(())
}

/// Decode a pkt-line stream and print its lines.
pub fn pktline(path: &str, blocks: bool, format: Format, out: &mut impl Write) -> Result<()> {
    let reader: Box<dyn Read> = if path == "-" {
        Box::new(io::stdin().lock())
    } else {
        Box::new(BufReader::new(File::open(path)?))
    };
    let mut decoder = Decoder::new(reader);

    if blocks {
        let mut all = Vec::new();
        loop {
            let block = decoder.read_block()?;
            if block.is_empty() {
                break;
            }
            tracing::debug!(index = all.len(), lines = block.len(), "Read block");
            all.push(block.iter().map(|l| render_line(l)).collect::<Vec<_>>());
        }

        match format {
            Format::Json => {
                serde_json::to_writer(&mut *out, &all)?;
                writeln!(out)?;
            }
            Format::Text => {
                for (i, block) in all.iter().enumerate() {
                    if i > 0 {
                        writeln!(out, "0000")?;
                    }
                    for line in block {
                        writeln!(out, "{line}")?;
                    }
                }
            }
        }
    } else {
        let lines: Vec<String> = decoder.read_all()?.iter().map(|l| render_line(l)).collect();
        tracing::debug!(lines = lines.len(), "Read stream");

        match format {
            Format::Json => {
                serde_json::to_writer(&mut *out, &lines)?;
                writeln!(out)?;
            }
            Format::Text => {
                for line in &lines {
                    writeln!(out, "{line}")?;
                }
            }
        }
    }

    Ok(())
}

fn read_input(path: &str) -> Result<Vec<u8>> {
    if path == "-" {
        let mut data = Vec::new();
        io::stdin().lock().read_to_end(&mut data)?;
        Ok(data)
    } else {
        Ok(std::fs::read(path)?)
    }
}

fn render_line(line: &[u8]) -> String {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}

fn render_signature(sig: &Signature) -> String {
    match sig.when {
        Some(when) => format!("{} <{}> {}", sig.name, sig.email, when.timestamp()),
        None => format!("{} <{}>", sig.name, sig.email),
    }
}

fn print_object(object: &AnyObject, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{} {}", object.kind(), object.id())?;
    match object {
        AnyObject::Commit(commit) => {
            writeln!(out, "tree {}", commit.tree())?;
            for parent in commit.parents() {
                writeln!(out, "parent {parent}")?;
            }
            writeln!(out, "author {}", render_signature(commit.author()))?;
            writeln!(out, "committer {}", render_signature(commit.committer()))?;
            writeln!(out)?;
            write!(out, "{}", commit.message())?;
        }
        AnyObject::Tree(tree) => {
            for entry in tree.entries() {
                writeln!(out, "{}\t{}", entry.hash, entry.name)?;
            }
        }
        AnyObject::Blob(blob) => writeln!(out, "size {}", blob.len())?,
    }
    Ok(())
}
