//! Document discovery and parsing.
//!
//! Stage 1 of the catalog pipeline. Lists the inventory documents in the
//! content directory and turns each one into an [`Item`].
//!
//! ## Directory Structure
//!
//! ```text
//! objets/                      # Content directory
//! ├── config.toml              # Optional configuration
//! ├── index.json               # Written by `vitrine index`
//! ├── 001-cheval.md            # One document per item
//! ├── 002-lampe.md
//! └── brouillons/              # Subdirectories are ignored
//! ```
//!
//! Only regular `.md` files directly inside the directory are documents.
//! Hidden files are ignored. Documents are returned sorted by filename so
//! that every run processes them in the same order.
//!
//! ## Skipping
//!
//! A document that cannot become an item is reported with a [`SkipReason`]
//! and the run continues:
//!
//! - no header block at the top of the file
//! - a header without the id field (an empty header included)
//! - an id that is empty or contains a path separator
//! - content that is not valid UTF-8

use crate::body;
use crate::config::FieldNames;
use crate::metadata;
use crate::types::Item;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Why a document was left out of the catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("no header block")]
    NoHeader,
    #[error("header has no `{0}` field")]
    MissingId(String),
    #[error("invalid id {0:?}")]
    InvalidId(String),
    #[error("not valid UTF-8")]
    InvalidUtf8,
}

/// One document and what became of it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedDocument {
    /// Filename within the content directory.
    pub source: String,
    pub outcome: Result<Item, SkipReason>,
}

/// List the documents in `dir`, sorted by filename.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut documents = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && is_document(path) {
            documents.push(entry.into_path());
        }
    }
    debug!("found {} document(s) in {}", documents.len(), dir.display());
    Ok(documents)
}

fn is_document(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(true);
    !hidden
        && path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("md"))
            .unwrap_or(false)
}

/// Read and parse one document.
///
/// I/O failures are errors; anything wrong with the content is a skip.
pub fn load_document(path: &Path, fields: &FieldNames) -> Result<ScannedDocument, ScanError> {
    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let bytes = fs::read(path)?;
    let outcome = match String::from_utf8(bytes) {
        Ok(text) => parse_document(&source, &text, fields),
        Err(_) => Err(SkipReason::InvalidUtf8),
    };

    Ok(ScannedDocument { source, outcome })
}

/// Turn document text into an [`Item`].
///
/// Windows line endings are normalized first so header and section
/// detection see plain `\n` lines.
pub fn parse_document(source: &str, text: &str, fields: &FieldNames) -> Result<Item, SkipReason> {
    let text = text.replace("\r\n", "\n");
    let metadata::Extracted { header, body } = metadata::extract(&text);
    let header = header.ok_or(SkipReason::NoHeader)?;

    let id = header
        .get(&fields.id)
        .ok_or_else(|| SkipReason::MissingId(fields.id.clone()))?
        .to_string();
    if id.trim().is_empty() || id.contains(['/', '\\']) {
        return Err(SkipReason::InvalidId(id));
    }

    let parsed = body::parse_body(body);
    Ok(Item {
        id,
        source: source.to_string(),
        header,
        title: parsed.title,
        sections: parsed.sections,
        images: parsed.images,
    })
}
