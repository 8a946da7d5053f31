//! Shared test utilities for the vitrine test suite.
//!
//! Provides fixture setup and document builders for parsed items.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let source = tmp.path().join("objets");
//! write_doc(&source, "010-vase.md", &doc("10", "décoration", "en_stock", "Vase"));
//!
//! let item = item_from("---\nid: 1\n---\n# Lampe\n");
//! assert_eq!(item.title, "Lampe");
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::config::FieldNames;
use crate::scan;
use crate::types::Item;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/` to a temp directory and return it.
///
/// The inventory documents land in `<tmp>/objets`. Tests get an isolated copy
/// they can mutate without affecting other tests or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Document builders
// =========================================================================

/// Parse document text with the default field names. Panics on skip.
pub fn item_from(doc: &str) -> Item {
    scan::parse_document("test.md", doc, &FieldNames::default())
        .unwrap_or_else(|reason| panic!("document was skipped: {reason}"))
}

/// A minimal document with id, category, status and title.
pub fn doc(id: &str, category: &str, status: &str, title: &str) -> String {
    format!("---\nid: {id}\ncatégorie: {category}\nstatut: {status}\n---\n# {title}\n")
}

/// Write a document into a content directory, creating it if needed.
pub fn write_doc(dir: &Path, name: &str, content: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}
