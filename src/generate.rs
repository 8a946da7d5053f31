//! HTML catalog generation.
//!
//! Stage 3 of the catalog pipeline. Takes normalized [`ItemView`]s and renders
//! the static pages.
//!
//! ## Generated Files
//!
//! - **Detail pages** (`/produit-{id}.html`): photos, price, status, sections
//! - **Index page** (`/index.html`): card grid with category filters and counters
//! - **Filter script** (`/js/filter.js`): shows the cards of the selected category
//! - **Stylesheet** (`/css/style.css`): stock styles, only written when absent
//!
//! ## Output Structure
//!
//! ```text
//! ./
//! ├── index.html
//! ├── produit-1.html
//! ├── produit-2.html
//! ├── js/
//! │   └── filter.js
//! ├── css/
//! │   └── style.css
//! └── photos/                  # Not generated, maintained by hand
//!     └── placeholder.jpg
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/filter.js`: Category filtering on the index page
//! - `static/gallery.js`: Thumbnail switching, inlined into detail pages
//! - `static/style.css`: Stock stylesheet
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Every value coming from a document is escaped. The description is rendered
//! from markdown and inserted as HTML, with any raw HTML it contains turned
//! into escaped text.

use crate::catalog::{Catalog, ItemView};
use crate::config::SiteConfig;
use crate::naming;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Event, Parser, html as md_html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub const FILTER_JS: &str = include_str!("../static/filter.js");
const GALLERY_JS: &str = include_str!("../static/gallery.js");
pub const STOCK_CSS: &str = include_str!("../static/style.css");

pub const INDEX_FILENAME: &str = "index.html";

/// Cards show at most this many tags; detail pages show all of them.
const CARD_TAGS: usize = 3;

// ============================================================================
// File writers
// ============================================================================

fn write_file(path: &Path, contents: &str) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}

/// Write an item's detail page and return its path.
pub fn write_item_page(
    view: &ItemView,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<PathBuf, GenerateError> {
    let path = output_dir.join(&view.page);
    write_file(&path, &render_item_page(view, config).into_string())?;
    Ok(path)
}

/// Write the catalog index page and return its path.
pub fn write_index(
    catalog: &Catalog,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<PathBuf, GenerateError> {
    let path = output_dir.join(INDEX_FILENAME);
    write_file(&path, &render_index(catalog, config).into_string())?;
    Ok(path)
}

/// Write the filter script, replacing any previous copy.
pub fn write_filter_script(
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<PathBuf, GenerateError> {
    let path = output_dir.join(&config.catalog.script_path);
    write_file(&path, FILTER_JS)?;
    Ok(path)
}

/// Write the stock stylesheet unless one already exists.
///
/// Returns the path only when a file was written.
pub fn write_stock_stylesheet(
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<Option<PathBuf>, GenerateError> {
    let path = output_dir.join(&config.site.stylesheet);
    if path.exists() {
        return Ok(None);
    }
    write_file(&path, STOCK_CSS)?;
    Ok(Some(path))
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, config: &SiteConfig, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(config.site.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href=(config.site.stylesheet);
            }
            body {
                (content)
            }
        }
    }
}

fn site_footer(config: &SiteConfig) -> Markup {
    html! {
        footer {
            div.container {
                p { (config.site.footer) }
            }
        }
    }
}

/// Client-side fallback for photos missing from disk.
fn image_fallback(view: &ItemView) -> String {
    let quoted = view.placeholder.replace('\\', "\\\\").replace('\'', "\\'");
    format!("this.src='{quoted}'")
}

fn status_badge(view: &ItemView) -> Markup {
    html! {
        span class={ "produit-statut " (view.status_class) } { (view.status_label) }
    }
}

fn info_item(label: &str, value: &str) -> Markup {
    html! {
        div.info-item {
            span.info-label { (label) }
            span.info-value { (value) }
        }
    }
}

/// Markdown to HTML. Raw HTML in the source is emitted as text.
fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

/// Renders the "all" control followed by one control per category.
fn filter_buttons(categories: &[String], all_filter: &str) -> Markup {
    html! {
        button.filter-btn.active data-filter=(all_filter) {
            (naming::category_label(all_filter))
        }
        @for category in categories {
            button.filter-btn data-filter=(category) {
                (naming::category_label(category))
            }
        }
    }
}

/// Renders one compact card of the index grid
fn render_card(view: &ItemView) -> Markup {
    let fallback = image_fallback(view);
    html! {
        a.produit-card href=(view.page) data-category=[view.category.as_deref()] {
            img src=(view.primary_image) alt=(view.title) loading="lazy" onerror=(fallback);
            div.produit-card-content {
                div.produit-id { "#" (view.id) }
                h3 { (view.title) }
                div.produit-tags {
                    @for tag in view.tags.iter().take(CARD_TAGS) {
                        span.tag { (tag) }
                    }
                }
                div.produit-prix { (view.price) }
                (status_badge(view))
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders an item detail page
pub fn render_item_page(view: &ItemView, config: &SiteConfig) -> Markup {
    let fallback = image_fallback(view);
    let page_title = format!("{} - {}", view.title, config.site.name);

    let content = html! {
        header {
            div.container {
                a.back-link href=(INDEX_FILENAME) { "← Retour au catalogue" }
                h1 { (config.site.banner()) }
            }
        }
        main.container {
            div.produit-detail-container {
                div.produit-images {
                    img id="main-image" class="produit-image-main" src=(view.primary_image) alt=(view.title) onerror=(fallback);
                    @if !view.images.is_empty() {
                        div.produit-image-thumbs {
                            @for (idx, image) in view.images.iter().enumerate() {
                                img.thumb.active[idx == 0] src=(image) data-full=(image) alt={ (view.title) " " (idx + 1) } onerror=(fallback);
                            }
                        }
                    }
                }
                div.produit-info {
                    div.produit-id { "#" (view.id) }
                    h2 { (view.title) }
                    div.produit-tags {
                        @for tag in &view.tags {
                            span.tag { (tag) }
                        }
                    }
                    div.info-section {
                        h3 { "Prix" }
                        div.produit-prix { (view.price) }
                        (status_badge(view))
                    }
                    div.info-section {
                        h3 { "Description" }
                        div.description { (PreEscaped(markdown_to_html(&view.description))) }
                    }
                    @if let Some(dimensions) = &view.dimensions {
                        div.info-section {
                            h3 { "Dimensions" }
                            div style="white-space: pre-line;" { (dimensions) }
                        }
                    }
                    div.info-section {
                        h3 { "Informations" }
                        div.info-grid {
                            (info_item("Catégorie", &view.category_display))
                            (info_item("Type", &view.subcategory))
                            (info_item("Acquisition", &view.acquisition_date))
                            (info_item("Lieu", &view.acquisition_place))
                        }
                    }
                    @if let Some(condition) = &view.condition {
                        div.info-section {
                            h3 { "État" }
                            div style="white-space: pre-line;" { (condition) }
                        }
                    }
                    @if let Some(notes) = &view.notes {
                        div.info-section {
                            h3 { "Histoire de l'objet" }
                            p { (notes) }
                        }
                    }
                }
            }
        }
        (site_footer(config))
        script { (PreEscaped(GALLERY_JS)) }
    };

    base_document(&page_title, config, content)
}

/// Renders the catalog index page with filters, counters and card grid
pub fn render_index(catalog: &Catalog, config: &SiteConfig) -> Markup {
    let summary = catalog.summary(&config.catalog.in_stock_status);
    let page_title = format!("{} - {}", config.site.name, config.site.subtitle);

    let content = html! {
        header {
            div.container {
                h1 { (config.site.banner()) }
                p.tagline { (config.site.tagline) }
                nav data-all=(config.catalog.all_filter) {
                    (filter_buttons(&summary.categories, &config.catalog.all_filter))
                }
            }
        }
        main.container {
            div.stats {
                span id="total-objets" { (naming::count_label(summary.total, "objet")) }
                span id="en-stock" { (summary.in_stock) " en stock" }
            }
            div id="catalogue" class="grid" {
                @for view in &catalog.items {
                    (render_card(view))
                }
            }
        }
        (site_footer(config))
        script src=(config.catalog.script_path) {}
    };

    base_document(&page_title, config, content)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::normalize;
    use crate::test_helpers::{doc, item_from};
    use tempfile::TempDir;

    fn view_from(text: &str) -> ItemView {
        normalize(&item_from(text), &SiteConfig::default())
    }

    fn full_view() -> ItemView {
        view_from(
            "---\n\
             id: 12\n\
             catégorie: jouets\n\
             sous_catégorie: bois\n\
             prix_vente_souhaité: 15\n\
             statut: en_stock\n\
             tags: [bois, vintage, enfant, années 70]\n\
             date_acquisition: 2024-03-12\n\
             lieu_acquisition: Emmaüs\n\
             ---\n\
             # Cheval à bascule\n\
             ![[cheval-1.jpg]]\n\
             ![[cheval-2.jpg]]\n\
             ## Description commerciale\n\
             Un **beau** cheval.\n\
             ## Dimensions\n\
             H 60cm\n\
             L 90cm\n\
             ## État\n\
             Bon état.\n\
             ## Notes perso\n\
             Offert par un voisin.\n",
        )
    }

    fn catalog_of(docs: &[String]) -> Catalog {
        let config = SiteConfig::default();
        let mut catalog = Catalog::default();
        for text in docs {
            catalog.push(normalize(&item_from(text), &config));
        }
        catalog
    }

    // =========================================================================
    // Detail page
    // =========================================================================

    #[test]
    fn base_document_includes_doctype() {
        let content = html! { p { "test" } };
        let page = base_document("Test", &SiteConfig::default(), content).into_string();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(r#"lang="fr""#));
        assert!(page.contains(r#"href="css/style.css""#));
    }

    #[test]
    fn item_page_title_and_header() {
        let html = render_item_page(&full_view(), &SiteConfig::default()).into_string();
        assert!(html.contains("<title>Cheval à bascule - Le Sale Garage</title>"));
        assert!(html.contains("🥑 Le Sale Garage"));
        assert!(html.contains("Retour au catalogue"));
        assert!(html.contains("<h2>Cheval à bascule</h2>"));
        assert!(html.contains("#12"));
    }

    #[test]
    fn item_page_primary_image_and_thumbnails() {
        let html = render_item_page(&full_view(), &SiteConfig::default()).into_string();
        assert!(html.contains(r#"id="main-image""#));
        assert!(html.contains(r#"src="photos/cheval-1.jpg""#));
        assert!(html.contains(r#"data-full="photos/cheval-2.jpg""#));
        assert_eq!(html.matches("thumb active").count(), 1);
        assert_eq!(html.matches("data-full=").count(), 2);
        assert!(html.contains("photos/placeholder.jpg"));
    }

    #[test]
    fn item_page_without_images_uses_placeholder() {
        let view = view_from("---\nid: 1\n---\n# Lampe\n");
        let html = render_item_page(&view, &SiteConfig::default()).into_string();
        assert!(html.contains(r#"src="photos/placeholder.jpg""#));
        assert!(!html.contains("produit-image-thumbs"));
    }

    #[test]
    fn item_page_shows_all_tags() {
        let html = render_item_page(&full_view(), &SiteConfig::default()).into_string();
        assert_eq!(html.matches(r#"<span class="tag">"#).count(), 4);
        assert!(html.contains("années 70"));
    }

    #[test]
    fn item_page_price_and_status() {
        let html = render_item_page(&full_view(), &SiteConfig::default()).into_string();
        assert!(html.contains("15€"));
        assert!(html.contains(r#"class="produit-statut statut-en_stock""#));
        assert!(html.contains(">en stock<"));
    }

    #[test]
    fn item_page_defaults() {
        let view = view_from("---\nid: 1\n---\n");
        let html = render_item_page(&view, &SiteConfig::default()).into_string();
        assert!(html.contains("<title>Sans titre - Le Sale Garage</title>"));
        assert!(html.contains("0€"));
        assert!(html.contains("Aucune description disponible"));
        assert_eq!(html.matches("Non spécifié").count(), 2);
        assert_eq!(html.matches("N/A").count(), 2);
    }

    #[test]
    fn item_page_optional_sections_present() {
        let html = render_item_page(&full_view(), &SiteConfig::default()).into_string();
        assert!(html.contains("<h3>Dimensions</h3>"));
        assert!(html.contains("H 60cm\nL 90cm"));
        assert!(html.contains("<h3>État</h3>"));
        assert_eq!(html.matches("white-space: pre-line;").count(), 2);
        assert!(html.contains("<p>Offert par un voisin.</p>"));
    }

    #[test]
    fn item_page_optional_sections_absent() {
        let view = view_from("---\nid: 1\n---\n# Lampe\n## Dimensions\n\n");
        let html = render_item_page(&view, &SiteConfig::default()).into_string();
        assert!(!html.contains("<h3>Dimensions</h3>"));
        assert!(!html.contains("<h3>État</h3>"));
        assert!(!html.contains("Histoire de"));
    }

    #[test]
    fn item_page_info_grid() {
        let html = render_item_page(&full_view(), &SiteConfig::default()).into_string();
        assert!(html.contains("<h3>Informations</h3>"));
        assert!(html.contains(r#"<span class="info-value">jouets</span>"#));
        assert!(html.contains(r#"<span class="info-value">bois</span>"#));
        assert!(html.contains("2024-03-12"));
        assert!(html.contains("Emmaüs"));
    }

    #[test]
    fn item_page_renders_description_markdown() {
        let html = render_item_page(&full_view(), &SiteConfig::default()).into_string();
        assert!(html.contains("<strong>beau</strong>"));
    }

    #[test]
    fn description_raw_html_is_escaped() {
        let mut view = full_view();
        view.description =
            "**gras**\n\n<script>alert(1)</script>\n\ntexte <img src=x onerror=alert(2)>"
                .to_string();
        let html = render_item_page(&view, &SiteConfig::default()).into_string();
        assert!(html.contains("<strong>gras</strong>"));
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<img src=x"));
        assert!(html.contains("&lt;img src=x onerror=alert(2)&gt;"));
    }

    #[test]
    fn image_fallback_quotes_placeholder() {
        let mut view = full_view();
        view.placeholder = r"photos/l'image\x.jpg".to_string();
        assert_eq!(image_fallback(&view), r"this.src='photos/l\'image\\x.jpg'");
    }

    #[test]
    fn item_page_inlines_gallery_script() {
        let html = render_item_page(&full_view(), &SiteConfig::default()).into_string();
        assert!(html.contains("main-image"));
        assert!(html.contains("dataset.full"));
    }

    #[test]
    fn html_escape_in_maud() {
        let view = view_from("---\nid: 1\n---\n# <script>alert(1)</script>\n");
        let html = render_item_page(&view, &SiteConfig::default()).into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    // =========================================================================
    // Index page
    // =========================================================================

    #[test]
    fn index_counters_and_filters() {
        let catalog = catalog_of(&[
            doc("1", "toys", "en_stock", "Toupie"),
            doc("2", "books", "vendu", "Roman"),
        ]);
        let html = render_index(&catalog, &SiteConfig::default()).into_string();

        assert!(html.contains("<title>Le Sale Garage - Brocante &amp; Recyclerie</title>"));
        assert!(html.contains(r#"<span id="total-objets">2 objets</span>"#));
        assert!(html.contains(r#"<span id="en-stock">1 en stock</span>"#));

        let all = html.find(r#"data-filter="tous""#).unwrap();
        let books = html.find(r#"data-filter="books""#).unwrap();
        let toys = html.find(r#"data-filter="toys""#).unwrap();
        assert!(all < books && books < toys);
        assert_eq!(html.matches(r#"class="filter-btn active""#).count(), 1);
        assert_eq!(html.find("data-filter="), Some(all));
        assert!(html.contains(">Tous<"));
        assert!(html.contains(">Books<"));
    }

    #[test]
    fn index_single_item_counter() {
        let catalog = catalog_of(&[doc("1", "toys", "vendu", "Toupie")]);
        let html = render_index(&catalog, &SiteConfig::default()).into_string();
        assert!(html.contains(">1 objet<"));
        assert!(html.contains(">0 en stock<"));
    }

    #[test]
    fn index_category_labels_title_cased() {
        let catalog = catalog_of(&[doc("1", "arts_de_la_table", "en_stock", "Plat")]);
        let html = render_index(&catalog, &SiteConfig::default()).into_string();
        assert!(html.contains(">Arts De La Table<"));
        assert!(html.contains(r#"data-filter="arts_de_la_table""#));
    }

    #[test]
    fn index_card_content() {
        let catalog = catalog_of(&[
            "---\nid: 3\ncatégorie: toys\ntags: [a, b, c, d]\nprix_vente_souhaité: 8\n---\n# Toupie\n![[toupie.jpg]]\n"
                .to_string(),
        ]);
        let html = render_index(&catalog, &SiteConfig::default()).into_string();
        assert!(html.contains(r#"href="produit-3.html""#));
        assert!(html.contains(r#"data-category="toys""#));
        assert!(html.contains(r#"src="photos/toupie.jpg""#));
        assert!(html.contains("<h3>Toupie</h3>"));
        assert!(html.contains("8€"));
        assert_eq!(html.matches(r#"<span class="tag">"#).count(), 3);
        assert!(!html.contains(r#"<span class="tag">d</span>"#));
    }

    #[test]
    fn index_card_without_category() {
        let catalog = catalog_of(&["---\nid: 4\n---\n".to_string()]);
        let html = render_index(&catalog, &SiteConfig::default()).into_string();
        assert!(!html.contains("data-category"));
        assert_eq!(html.matches("filter-btn").count(), 1);
    }

    #[test]
    fn index_references_filter_script() {
        let html = render_index(&Catalog::default(), &SiteConfig::default()).into_string();
        assert!(html.contains(r#"<script src="js/filter.js"></script>"#));
        assert!(html.contains(r#"data-all="tous""#));
        assert!(html.contains(r#"id="catalogue""#));
    }

    // =========================================================================
    // Writers
    // =========================================================================

    #[test]
    fn write_item_page_uses_page_filename() {
        let tmp = TempDir::new().unwrap();
        let path = write_item_page(&full_view(), &SiteConfig::default(), tmp.path()).unwrap();
        assert_eq!(path, tmp.path().join("produit-12.html"));
        assert!(fs::read_to_string(path).unwrap().contains("Cheval à bascule"));
    }

    #[test]
    fn write_filter_script_creates_dir() {
        let tmp = TempDir::new().unwrap();
        let path = write_filter_script(&SiteConfig::default(), tmp.path()).unwrap();
        assert_eq!(path, tmp.path().join("js/filter.js"));
        assert_eq!(fs::read_to_string(path).unwrap(), FILTER_JS);
    }

    #[test]
    fn stock_stylesheet_never_overwrites() {
        let tmp = TempDir::new().unwrap();
        let config = SiteConfig::default();

        let written = write_stock_stylesheet(&config, tmp.path()).unwrap();
        assert_eq!(written, Some(tmp.path().join("css/style.css")));

        fs::write(tmp.path().join("css/style.css"), "body {}").unwrap();
        assert_eq!(write_stock_stylesheet(&config, tmp.path()).unwrap(), None);
        assert_eq!(
            fs::read_to_string(tmp.path().join("css/style.css")).unwrap(),
            "body {}"
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let catalog = catalog_of(&[
            doc("1", "toys", "en_stock", "Toupie"),
            doc("2", "books", "vendu", "Roman"),
        ]);
        let config = SiteConfig::default();
        assert_eq!(
            render_index(&catalog, &config).into_string(),
            render_index(&catalog, &config).into_string()
        );
    }
}
