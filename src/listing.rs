//! Document listing for client-side tools.
//!
//! Writes `index.json` into the content directory: a JSON array of the
//! document filenames, sorted, pretty-printed with two-space indentation.
//!
//! ```json
//! [
//!   "001-cheval-a-bascule.md",
//!   "002-lampe-champignon.md"
//! ]
//! ```
//!
//! The file is rewritten on every run. An empty directory yields `[]`; a
//! missing one is reported and nothing is written.

use crate::scan::{self, ScanError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const LISTING_FILENAME: &str = "index.json";

#[derive(Error, Debug)]
pub enum ListingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// How a listing run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingOutcome {
    /// The content directory does not exist. Nothing was written.
    MissingSource(PathBuf),
    Listed(Listing),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub path: PathBuf,
    pub documents: Vec<String>,
}

/// Write the listing of `source` into `source/index.json`.
pub fn write_listing(source: &Path) -> Result<ListingOutcome, ListingError> {
    if !source.is_dir() {
        info!("content directory {} does not exist", source.display());
        return Ok(ListingOutcome::MissingSource(source.to_path_buf()));
    }

    let documents: Vec<String> = scan::discover(source)?
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();

    let path = source.join(LISTING_FILENAME);
    fs::write(&path, serde_json::to_string_pretty(&documents)?)?;
    debug!("listed {} document(s) in {}", documents.len(), path.display());

    Ok(ListingOutcome::Listed(Listing { path, documents }))
}
