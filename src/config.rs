//! Catalog configuration module.
//!
//! Handles loading, validating, and merging an optional `config.toml` placed in
//! the content directory next to the inventory documents:
//!
//! ```text
//! objets/
//! ├── config.toml              # Optional (overrides stock defaults)
//! ├── 001-cheval.md
//! └── 002-lampe.md
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "Le Sale Garage"
//! logo = "🥑"
//! subtitle = "Brocante & Recyclerie"    # Suffix of the index page <title>
//! tagline = "Achat Vente Objet Cool Adoré D'Occasion"
//! footer = "© 2024 Le Sale Garage - Trouve ton trésor vintage"
//! lang = "fr"
//! stylesheet = "css/style.css"
//!
//! [catalog]
//! page_prefix = "produit-"              # produit-<id>.html
//! photos_dir = "photos"
//! placeholder_image = "placeholder.jpg"
//! script_path = "js/filter.js"
//! in_stock_status = "en_stock"
//! all_filter = "tous"
//! currency = "€"
//!
//! [fields]                              # Header keys read from each document
//! id = "id"
//! category = "catégorie"
//! subcategory = "sous_catégorie"
//! price = "prix_vente_souhaité"
//! status = "statut"
//! tags = "tags"
//! acquisition_date = "date_acquisition"
//! acquisition_place = "lieu_acquisition"
//!
//! [sections]                            # `## ` headings read from each body
//! description = "Description commerciale"
//! dimensions = "Dimensions"
//! condition = "État"
//! notes = "Notes perso"
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Catalog configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Branding shared by every generated page.
    pub site: SiteInfo,
    /// Output naming, asset paths and status tokens.
    pub catalog: CatalogConfig,
    /// Header keys holding each item attribute.
    pub fields: FieldNames,
    /// Section headings holding each optional text block.
    pub sections: SectionNames,
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fields.id.trim().is_empty() {
            return Err(ConfigError::Validation("fields.id must not be empty".into()));
        }
        if self.catalog.in_stock_status.is_empty() {
            return Err(ConfigError::Validation(
                "catalog.in_stock_status must not be empty".into(),
            ));
        }
        if self.catalog.all_filter.is_empty() {
            return Err(ConfigError::Validation(
                "catalog.all_filter must not be empty".into(),
            ));
        }
        if self.catalog.page_prefix.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "catalog.page_prefix must not contain path separators".into(),
            ));
        }
        for (key, path) in [
            ("catalog.script_path", &self.catalog.script_path),
            ("site.stylesheet", &self.site.stylesheet),
        ] {
            if !is_contained_relative(path) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a relative path inside the output directory"
                )));
            }
        }
        Ok(())
    }
}

/// A non-empty relative path with no `..` or root components.
fn is_contained_relative(path: &str) -> bool {
    !path.is_empty()
        && Path::new(path)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Site-wide branding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Shop name, shown in headers and page titles.
    pub name: String,
    /// Short prefix shown before the name in page headers (an emoji works well).
    pub logo: String,
    /// Suffix of the index page title.
    pub subtitle: String,
    /// Line shown under the name on the index page.
    pub tagline: String,
    /// Footer text on every page.
    pub footer: String,
    /// `lang` attribute of the generated documents.
    pub lang: String,
    /// Stylesheet path relative to the output root.
    pub stylesheet: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "Le Sale Garage".to_string(),
            logo: "🥑".to_string(),
            subtitle: "Brocante & Recyclerie".to_string(),
            tagline: "Achat Vente Objet Cool Adoré D'Occasion".to_string(),
            footer: "© 2024 Le Sale Garage - Trouve ton trésor vintage".to_string(),
            lang: "fr".to_string(),
            stylesheet: "css/style.css".to_string(),
        }
    }
}

impl SiteInfo {
    /// Header banner: logo and name, or just the name without a logo.
    pub fn banner(&self) -> String {
        if self.logo.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.logo, self.name)
        }
    }
}

/// Output naming and catalog tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Detail pages are written as `<page_prefix><id>.html`.
    pub page_prefix: String,
    /// Directory (relative to the output root) holding item photos.
    pub photos_dir: String,
    /// Image shown when an item has no photo or a photo fails to load.
    pub placeholder_image: String,
    /// Filter script path relative to the output root.
    pub script_path: String,
    /// Status value counted as available.
    pub in_stock_status: String,
    /// Filter value of the "show everything" control.
    pub all_filter: String,
    /// Currency symbol appended to prices.
    pub currency: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_prefix: "produit-".to_string(),
            photos_dir: "photos".to_string(),
            placeholder_image: "placeholder.jpg".to_string(),
            script_path: "js/filter.js".to_string(),
            in_stock_status: "en_stock".to_string(),
            all_filter: "tous".to_string(),
            currency: "€".to_string(),
        }
    }
}

/// Header keys for each item attribute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldNames {
    pub id: String,
    pub category: String,
    pub subcategory: String,
    pub price: String,
    pub status: String,
    pub tags: String,
    pub acquisition_date: String,
    pub acquisition_place: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            id: "id".to_string(),
            category: "catégorie".to_string(),
            subcategory: "sous_catégorie".to_string(),
            price: "prix_vente_souhaité".to_string(),
            status: "statut".to_string(),
            tags: "tags".to_string(),
            acquisition_date: "date_acquisition".to_string(),
            acquisition_place: "lieu_acquisition".to_string(),
        }
    }
}

/// Section headings for each optional text block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SectionNames {
    pub description: String,
    pub dimensions: String,
    pub condition: String,
    pub notes: String,
}

impl Default for SectionNames {
    fn default() -> Self {
        Self {
            description: "Description commerciale".to_string(),
            dimensions: "Dimensions".to_string(),
            condition: "État".to_string(),
            notes: "Notes perso".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// A missing directory or file yields the stock defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Vitrine Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the content directory, next to the item documents.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site branding
# ---------------------------------------------------------------------------
[site]
name = "Le Sale Garage"
# Shown before the name in page headers. Set to "" to hide.
logo = "🥑"
# Index page <title> is "<name> - <subtitle>".
subtitle = "Brocante & Recyclerie"
tagline = "Achat Vente Objet Cool Adoré D'Occasion"
footer = "© 2024 Le Sale Garage - Trouve ton trésor vintage"
lang = "fr"
# Relative to the output directory. A stock stylesheet is written here
# when no file exists yet.
stylesheet = "css/style.css"

# ---------------------------------------------------------------------------
# Catalog output
# ---------------------------------------------------------------------------
[catalog]
# Detail pages are written as <page_prefix><id>.html.
page_prefix = "produit-"
# Photos are referenced as <photos_dir>/<file> from the output root.
photos_dir = "photos"
placeholder_image = "placeholder.jpg"
script_path = "js/filter.js"
# Status value counted in the "en stock" counter and used when absent.
in_stock_status = "en_stock"
# Filter value of the "Tous" button.
all_filter = "tous"
currency = "€"

# ---------------------------------------------------------------------------
# Header keys read from each document
# ---------------------------------------------------------------------------
[fields]
id = "id"
category = "catégorie"
subcategory = "sous_catégorie"
price = "prix_vente_souhaité"
status = "statut"
tags = "tags"
acquisition_date = "date_acquisition"
acquisition_place = "lieu_acquisition"

# ---------------------------------------------------------------------------
# Section headings (## Name) read from each document body
# ---------------------------------------------------------------------------
[sections]
description = "Description commerciale"
dimensions = "Dimensions"
condition = "État"
notes = "Notes perso"
"##
}
