//! Build pipeline.
//!
//! Ties the stages together for one run over a content directory:
//!
//! 1. [`crate::scan`] discovers and parses the documents, in filename order
//! 2. [`crate::catalog`] normalizes each parsed item into a view
//! 3. [`crate::generate`] writes one detail page per item as it goes, then the
//!    index page, the filter script and (when absent) the stylesheet
//!
//! A document that cannot be parsed is skipped and the run continues. Pages
//! written before a later failure stay on disk.
//!
//! [`check`] runs the same steps without writing anything.

use crate::catalog::{self, Catalog, CatalogSummary};
use crate::config::SiteConfig;
use crate::generate::{self, GenerateError};
use crate::scan::{self, ScanError, SkipReason};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// How a run ended.
#[derive(Debug)]
pub enum BuildOutcome {
    /// The content directory does not exist. Nothing was written.
    MissingSource(PathBuf),
    /// The content directory holds no documents. Nothing was written.
    NoDocuments(PathBuf),
    Built(BuildReport),
}

/// An item that made it into the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemEntry {
    pub id: String,
    pub title: String,
    /// Detail page filename, relative to the output root.
    pub page: String,
}

/// What became of one document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentReport {
    pub source: String,
    pub result: Result<ItemEntry, SkipReason>,
}

#[derive(Debug)]
pub struct BuildReport {
    /// Output root, or `None` for a check run.
    pub output: Option<PathBuf>,
    /// Every document in processing order.
    pub documents: Vec<DocumentReport>,
    pub summary: CatalogSummary,
    /// Ids seen more than once; the last document wins the page.
    pub duplicates: Vec<String>,
    /// Filter script path, relative to the output root.
    pub script: String,
    /// Stylesheet path when the stock stylesheet was written this run.
    pub stylesheet: Option<String>,
}

impl BuildReport {
    pub fn items(&self) -> impl Iterator<Item = &ItemEntry> {
        self.documents.iter().filter_map(|d| d.result.as_ref().ok())
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&str, &SkipReason)> {
        self.documents
            .iter()
            .filter_map(|d| d.result.as_ref().err().map(|r| (d.source.as_str(), r)))
    }
}

/// Generate the catalog from `source` into `output`.
pub fn build(
    source: &Path,
    output: &Path,
    config: &SiteConfig,
) -> Result<BuildOutcome, BuildError> {
    run(source, Some(output), config)
}

/// Parse every document in `source` and report, writing nothing.
pub fn check(source: &Path, config: &SiteConfig) -> Result<BuildOutcome, BuildError> {
    run(source, None, config)
}

fn run(
    source: &Path,
    output: Option<&Path>,
    config: &SiteConfig,
) -> Result<BuildOutcome, BuildError> {
    if !source.is_dir() {
        info!("content directory {} does not exist", source.display());
        return Ok(BuildOutcome::MissingSource(source.to_path_buf()));
    }

    let paths = scan::discover(source)?;
    if paths.is_empty() {
        info!("no documents found in {}", source.display());
        return Ok(BuildOutcome::NoDocuments(source.to_path_buf()));
    }

    let mut catalog = Catalog::default();
    let mut documents = Vec::with_capacity(paths.len());
    let mut duplicates = Vec::new();

    for path in &paths {
        let scanned = scan::load_document(path, &config.fields)?;
        let result = match scanned.outcome {
            Ok(item) => {
                let view = catalog::normalize(&item, config);
                if catalog.contains_id(&view.id) {
                    warn!(
                        "duplicate id {} in {}: {} is overwritten",
                        view.id, scanned.source, view.page
                    );
                    duplicates.push(view.id.clone());
                }
                if let Some(out) = output {
                    let written = generate::write_item_page(&view, config, out)?;
                    debug!("wrote {}", written.display());
                }
                let entry = ItemEntry {
                    id: view.id.clone(),
                    title: view.title.clone(),
                    page: view.page.clone(),
                };
                catalog.push(view);
                Ok(entry)
            }
            Err(reason) => {
                warn!("skipping {}: {}", scanned.source, reason);
                Err(reason)
            }
        };
        documents.push(DocumentReport {
            source: scanned.source,
            result,
        });
    }

    let mut stylesheet = None;
    if let Some(out) = output {
        let index = generate::write_index(&catalog, config, out)?;
        debug!("wrote {}", index.display());
        generate::write_filter_script(config, out)?;
        if generate::write_stock_stylesheet(config, out)?.is_some() {
            stylesheet = Some(config.site.stylesheet.clone());
        }
    }

    let summary = catalog.summary(&config.catalog.in_stock_status);
    info!(
        "{} item(s), {} in stock, {} skipped",
        summary.total,
        summary.in_stock,
        documents.len() - summary.total
    );

    Ok(BuildOutcome::Built(BuildReport {
        output: output.map(Path::to_path_buf),
        documents,
        summary,
        duplicates,
        script: config.catalog.script_path.clone(),
        stylesheet,
    }))
}
