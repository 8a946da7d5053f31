//! Shared types passed from document parsing to page generation.

use crate::metadata::{Header, HeaderValue};
use std::collections::BTreeMap;

/// One parsed inventory document.
///
/// Only documents with a header and an id become an `Item`; everything else
/// is reported as skipped by [`crate::scan::parse_document`].
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Identifier from the header, used for the output filename.
    pub id: String,
    /// Source filename (`001-cheval.md`), for reporting.
    pub source: String,
    /// Every header field, including the id.
    pub header: Header,
    /// First `# ` heading, or the default title.
    pub title: String,
    /// Section text keyed by `## ` heading.
    pub sections: BTreeMap<String, String>,
    /// Embedded image filenames; the first one is the primary image.
    pub images: Vec<String>,
}

impl Item {
    /// A header field, if present.
    pub fn field(&self, key: &str) -> Option<&HeaderValue> {
        self.header.get(key)
    }

    /// A section's text, if present and non-blank.
    pub fn section(&self, name: &str) -> Option<&str> {
        self.sections
            .get(name)
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
