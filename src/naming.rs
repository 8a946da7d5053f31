//! Centralized naming for generated files and display labels.
//!
//! Raw header tokens use underscores (`en_stock`, `arts_de_la_table`). They are
//! turned into display text in one place so that every page agrees:
//!
//! - `en_stock` → "en stock" (status badge)
//! - `arts_de_la_table` → "Arts De La Table" (filter button label)
//! - id `12` → `produit-12.html` (detail page filename)

/// Filename of an item's detail page, relative to the output root.
pub fn item_page_filename(prefix: &str, id: &str) -> String {
    format!("{prefix}{id}.html")
}

/// Human-readable status: every underscore becomes a space.
pub fn status_label(status: &str) -> String {
    status.replace('_', " ")
}

/// CSS class suffix for a status badge: spaces become underscores.
pub fn status_class(status: &str) -> String {
    format!("statut-{}", status.replace(' ', "_"))
}

/// Filter button label for a category: underscores to spaces, then title case.
pub fn category_label(category: &str) -> String {
    title_case(&category.replace('_', " "))
}

/// Capitalize the first letter of every run of letters and lowercase the rest.
///
/// Any non-letter character (space, digit, apostrophe, dash) starts a new run,
/// so `l'atelier` becomes `L'Atelier` and `3d` becomes `3D`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Pluralize a French count label: `1 objet`, `2 objets`, `0 objet`.
pub fn count_label(count: usize, noun: &str) -> String {
    if count > 1 {
        format!("{count} {noun}s")
    } else {
        format!("{count} {noun}")
    }
}
