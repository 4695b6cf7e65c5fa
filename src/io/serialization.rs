// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing file serialization and deserialization.
//!
//! A `.drw` file is a single MessagePack blob holding the whole document:
//! canvas size and every shape in z-order. It is encoded in memory and
//! written in one go, so a failed encode never leaves a half-written
//! file behind.

use crate::models::Document;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File extension of drawing documents, without the dot.
pub const DRAWING_EXTENSION: &str = "drw";

/// Current file format version.
const FILE_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct DrawingFile {
    version: u32,
    document: Document,
}

/// Encode a document to bytes.
pub fn encode(document: &Document) -> Result<Vec<u8>> {
    #[derive(Serialize)]
    struct DrawingFileRef<'a> {
        version: u32,
        document: &'a Document,
    }

    let file = DrawingFileRef {
        version: FILE_FORMAT_VERSION,
        document,
    };
    rmp_serde::to_vec_named(&file).context("Failed to encode drawing")
}

/// Decode a document from bytes.
pub fn decode(bytes: &[u8]) -> Result<Document> {
    let file: DrawingFile = rmp_serde::from_slice(bytes).context("Not a drawing file")?;
    if file.version != FILE_FORMAT_VERSION {
        bail!("Unsupported drawing file version {}", file.version);
    }
    Ok(file.document)
}

/// Save a document to `path`.
pub fn save_drawing(document: &Document, path: &Path) -> Result<()> {
    let bytes = encode(document)?;
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Load a document from `path`.
pub fn load_drawing(path: &Path) -> Result<Document> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    decode(&bytes).with_context(|| format!("Failed to load {}", path.display()))
}

/// Append the `.drw` extension unless the path already ends with it.
pub fn with_drawing_extension(path: PathBuf) -> PathBuf {
    let has_extension = path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext == DRAWING_EXTENSION);
    if has_extension {
        return path;
    }
    let mut name = path.into_os_string();
    name.push(".");
    name.push(DRAWING_EXTENSION);
    PathBuf::from(name)
}
