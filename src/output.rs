//! CLI output formatting for the build, check and index commands.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Each item leads with
//! its positional index and title; the source document is shown as an
//! indented `Source:` line. Skipped documents are listed by filename with the
//! reason, since they have no title to show.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Items
//! 001 Cheval à bascule → produit-1.html
//!     Source: 001-cheval-a-bascule.md
//! 002 Lampe champignon → produit-2.html
//!     Source: 002-lampe-champignon.md
//!
//! Skipped
//!     004-brouillon.md: no header block
//!
//! Index → index.html (2 objets, 1 en stock)
//!     Filters: jouets, luminaires
//! Script → js/filter.js
//! Stylesheet → css/style.css
//!
//! Generated 2 item pages, skipped 1 document
//! ```
//!
//! ## Check
//!
//! Same item listing without targets, ending with a summary line:
//!
//! ```text
//! Checked 3 documents: 2 items, 1 skipped
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::generate::INDEX_FILENAME;
use crate::listing::ListingOutcome;
use crate::naming;
use crate::pipeline::{BuildOutcome, BuildReport};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// English count with a plural `s` for anything but one.
fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// Directory display with a trailing slash.
fn dir_display(path: &Path) -> String {
    let shown = path.display().to_string();
    if shown.ends_with('/') {
        shown
    } else {
        format!("{shown}/")
    }
}

// ============================================================================
// Build and check
// ============================================================================

/// Format the result of a build or check run.
pub fn format_build_outcome(outcome: &BuildOutcome) -> Vec<String> {
    match outcome {
        BuildOutcome::MissingSource(dir) => vec![format!(
            "Content directory {} not found, nothing generated",
            dir_display(dir)
        )],
        BuildOutcome::NoDocuments(dir) => vec![format!(
            "No documents in {}, nothing generated",
            dir_display(dir)
        )],
        BuildOutcome::Built(report) => format_build_report(report),
    }
}

fn format_build_report(report: &BuildReport) -> Vec<String> {
    let writing = report.output.is_some();
    let mut lines = Vec::new();

    lines.push("Items".to_string());
    for (i, doc) in report.documents.iter().enumerate() {
        let Ok(item) = &doc.result else { continue };
        let header = format!("{} {}", format_index(i + 1), item.title);
        if writing {
            lines.push(format!("{} \u{2192} {}", header, item.page));
        } else {
            lines.push(format!("{} (id {})", header, item.id));
        }
        lines.push(format!("{}Source: {}", indent(1), doc.source));
    }

    let skipped: Vec<_> = report.skipped().collect();
    if !skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        for (source, reason) in &skipped {
            lines.push(format!("{}{}: {}", indent(1), source, reason));
        }
    }

    if !report.duplicates.is_empty() {
        lines.push(String::new());
        lines.push("Duplicate ids".to_string());
        for id in &report.duplicates {
            lines.push(format!("{}{}: last document wins", indent(1), id));
        }
    }

    lines.push(String::new());
    let counters = format!(
        "{}, {} en stock",
        naming::count_label(report.summary.total, "objet"),
        report.summary.in_stock
    );
    if writing {
        lines.push(format!("Index \u{2192} {} ({})", INDEX_FILENAME, counters));
    } else {
        lines.push(format!("Index ({})", counters));
    }
    if !report.summary.categories.is_empty() {
        lines.push(format!(
            "{}Filters: {}",
            indent(1),
            report.summary.categories.join(", ")
        ));
    }

    if writing {
        lines.push(format!("Script \u{2192} {}", report.script));
        if let Some(stylesheet) = &report.stylesheet {
            lines.push(format!("Stylesheet \u{2192} {}", stylesheet));
        }
        lines.push(String::new());
        lines.push(format!(
            "Generated {}, skipped {}",
            count(report.summary.total, "item page"),
            count(skipped.len(), "document")
        ));
    } else {
        lines.push(String::new());
        lines.push(format!(
            "Checked {}: {}, {} skipped",
            count(report.documents.len(), "document"),
            count(report.summary.total, "item"),
            skipped.len()
        ));
    }

    lines
}

/// Print build or check output to stdout.
pub fn print_build_outcome(outcome: &BuildOutcome) {
    for line in format_build_outcome(outcome) {
        println!("{}", line);
    }
}

// ============================================================================
// Listing
// ============================================================================

pub fn format_listing(outcome: &ListingOutcome) -> Vec<String> {
    let listing = match outcome {
        ListingOutcome::MissingSource(dir) => {
            return vec![format!(
                "Content directory {} not found, nothing listed",
                dir_display(dir)
            )];
        }
        ListingOutcome::Listed(listing) => listing,
    };
    let mut lines = vec![format!(
        "Listed {} \u{2192} {}",
        count(listing.documents.len(), "document"),
        listing.path.display()
    )];
    for (i, name) in listing.documents.iter().enumerate() {
        lines.push(format!("{}{} {}", indent(1), format_index(i + 1), name));
    }
    lines
}

pub fn print_listing(outcome: &ListingOutcome) {
    for line in format_listing(outcome) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
