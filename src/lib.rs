//! # Vitrine
//!
//! A static catalog generator for a second-hand shop. Every item of the
//! inventory is a markdown document; the catalog is plain HTML generated from
//! those documents.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Scan       objets/*.md  →  Item         (header fields, title, sections, photos)
//! 2. Normalize  Item         →  ItemView     (every default resolved once)
//! 3. Generate   ItemView     →  produit-<id>.html, index.html, js/filter.js
//! ```
//!
//! Stages run in a single pass over the documents in filename order; see
//! [`pipeline`]. A document that cannot be parsed is skipped and reported, it
//! never aborts the run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`metadata`] | Header block extraction and scalar/list value typing |
//! | [`body`] | Title, `## ` sections and `![[photo]]` embeds from the document body |
//! | [`scan`] | Stage 1: discovers the documents and parses each one into an [`types::Item`] |
//! | [`catalog`] | Stage 2: normalizes items into views and aggregates the index counters |
//! | [`generate`] | Stage 3: renders the pages with Maud and writes the static assets |
//! | [`pipeline`] | Runs the stages for `build` and `check` |
//! | [`listing`] | `index.json` listing of the documents |
//! | [`config`] | `config.toml` loading, validation and merging over stock defaults |
//! | [`types`] | Shared types passed between stages |
//! | [`naming`] | Page filenames and display labels |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Typed Header Values
//!
//! The header is schema-less: any key may appear, any may be missing. Values
//! are typed once, at extraction, into [`metadata::HeaderValue`] (text,
//! integer, float or list). Everything downstream matches on that type instead
//! of re-parsing strings.
//!
//! ## One Normalize Step
//!
//! Fallbacks (`0` for the price, `Non spécifié` for the category, the
//! placeholder photo...) are all resolved in [`catalog::normalize`]. Templates
//! read a flat [`catalog::ItemView`] and never branch on absence, except for
//! the optional sections that are rendered only when present.
//!
//! ## Maud Over String Templates
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Interpolation is
//! auto-escaped, so a `<` in a title or a tag cannot break the page. The
//! markdown description is the one value inserted as HTML; raw HTML inside it
//! is escaped before rendering.

pub mod body;
pub mod catalog;
pub mod config;
pub mod generate;
pub mod listing;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
