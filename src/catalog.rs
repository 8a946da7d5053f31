//! Item normalization and catalog aggregation.
//!
//! Header fields are open-ended and any of them may be missing. Rather than
//! scattering fallbacks through the templates, [`normalize`] resolves every
//! default once and produces an [`ItemView`]: a flat record of display-ready
//! strings. Renderers in [`crate::generate`] only ever read an `ItemView`.
//!
//! ## Defaults
//!
//! | Attribute | Fallback |
//! |-----------|----------|
//! | price | `0` |
//! | status | `catalog.in_stock_status` (`en_stock`) |
//! | category, subcategory | `Non spécifié` |
//! | acquisition date, place | `N/A` |
//! | description | `Aucune description disponible` |
//! | primary image | `catalog.placeholder_image` |
//!
//! Empty header values count as missing. The in-stock counter only counts
//! an explicit status: a missing one shows as `en stock` but is not counted.
//!
//! The [`Catalog`] is the ordered list of views for one run. It is consumed by
//! the index page, which needs the [`CatalogSummary`] counters and the
//! distinct category set.

use crate::config::SiteConfig;
use crate::metadata::HeaderValue;
use crate::naming;
use crate::types::Item;
use std::collections::BTreeSet;

pub const NOT_SPECIFIED: &str = "Non spécifié";
pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_DESCRIPTION: &str = "Aucune description disponible";

/// A fully-defaulted, display-ready item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemView {
    pub id: String,
    pub source: String,
    /// Detail page filename (`produit-12.html`).
    pub page: String,
    pub title: String,
    /// Photo path of the primary image, or of the placeholder.
    pub primary_image: String,
    /// Photo path of every embedded image, in order.
    pub images: Vec<String>,
    /// Photo path of the placeholder, used by the `onerror` fallback.
    pub placeholder: String,
    pub tags: Vec<String>,
    /// Price with currency (`15€`).
    pub price: String,
    /// Raw status token, defaulted.
    pub status: String,
    /// Status token as written in the header, `None` when absent or empty.
    pub explicit_status: Option<String>,
    pub status_label: String,
    pub status_class: String,
    /// Raw category for filtering; `None` when absent or empty.
    pub category: Option<String>,
    pub category_display: String,
    pub subcategory: String,
    pub acquisition_date: String,
    pub acquisition_place: String,
    /// Description markdown, defaulted.
    pub description: String,
    pub dimensions: Option<String>,
    pub condition: Option<String>,
    pub notes: Option<String>,
}

/// A header value as display text, treating empty values as missing.
fn text_field(item: &Item, key: &str) -> Option<String> {
    item.field(key)
        .map(HeaderValue::to_string)
        .filter(|s| !s.trim().is_empty())
}

/// Join the photos directory and a filename.
pub fn photo_path(config: &SiteConfig, file: &str) -> String {
    let dir = config.catalog.photos_dir.trim_end_matches('/');
    if dir.is_empty() {
        file.to_string()
    } else {
        format!("{dir}/{file}")
    }
}

pub fn normalize(item: &Item, config: &SiteConfig) -> ItemView {
    let fields = &config.fields;
    let sections = &config.sections;

    let placeholder = photo_path(config, &config.catalog.placeholder_image);
    let images: Vec<String> = item.images.iter().map(|f| photo_path(config, f)).collect();
    let primary_image = images.first().cloned().unwrap_or_else(|| placeholder.clone());

    let tags = item
        .field(&fields.tags)
        .map(HeaderValue::to_list)
        .unwrap_or_default()
        .into_iter()
        .filter(|t| !t.is_empty())
        .collect();

    let price = text_field(item, &fields.price).unwrap_or_else(|| "0".to_string());
    let explicit_status = text_field(item, &fields.status);
    let status = explicit_status
        .clone()
        .unwrap_or_else(|| config.catalog.in_stock_status.clone());
    let category = text_field(item, &fields.category);

    ItemView {
        id: item.id.clone(),
        source: item.source.clone(),
        page: naming::item_page_filename(&config.catalog.page_prefix, &item.id),
        title: item.title.clone(),
        primary_image,
        images,
        placeholder,
        tags,
        price: format!("{price}{}", config.catalog.currency),
        status_label: naming::status_label(&status),
        status_class: naming::status_class(&status),
        status,
        explicit_status,
        category_display: category.clone().unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        category,
        subcategory: text_field(item, &fields.subcategory)
            .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        acquisition_date: text_field(item, &fields.acquisition_date)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        acquisition_place: text_field(item, &fields.acquisition_place)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        description: item
            .section(&sections.description)
            .unwrap_or(NO_DESCRIPTION)
            .to_string(),
        dimensions: item.section(&sections.dimensions).map(str::to_string),
        condition: item.section(&sections.condition).map(str::to_string),
        notes: item.section(&sections.notes).map(str::to_string),
    }
}

/// Aggregate counters shown on the index page.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSummary {
    pub total: usize,
    pub in_stock: usize,
    /// Distinct non-empty categories, sorted.
    pub categories: Vec<String>,
}

/// Every successfully parsed item of one run, in processing order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub items: Vec<ItemView>,
}

impl Catalog {
    pub fn push(&mut self, view: ItemView) {
        self.items.push(view);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether an item with this id was already added.
    pub fn contains_id(&self, id: &str) -> bool {
        self.items.iter().any(|v| v.id == id)
    }

    pub fn summary(&self, in_stock_status: &str) -> CatalogSummary {
        let categories: BTreeSet<&str> = self
            .items
            .iter()
            .filter_map(|v| v.category.as_deref())
            .collect();

        CatalogSummary {
            total: self.items.len(),
            in_stock: self
                .items
                .iter()
                .filter(|v| v.explicit_status.as_deref() == Some(in_stock_status))
                .count(),
            categories: categories.into_iter().map(str::to_string).collect(),
        }
    }
}
