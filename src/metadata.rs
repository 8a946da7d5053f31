//! Document metadata extraction.
//!
//! Every inventory document may open with a header block holding one
//! `key: value` pair per line:
//!
//! ```text
//! ---
//! id: 12
//! catégorie: jouets
//! tags: [bois, vintage, années 70]
//! prix_vente_souhaité: 15
//! statut: en_stock
//! ---
//! # Cheval à bascule
//! ...
//! ```
//!
//! The header is not YAML. Each line is split on its first colon, key and
//! value are trimmed, and lines without a colon are ignored.
//!
//! ## Value classification
//!
//! Values are typed by shape. The first rule that matches wins:
//!
//! 1. `[a, b, c]` → [`HeaderValue::List`] of trimmed strings
//! 2. digits with at most one `.` → [`HeaderValue::Integer`] or [`HeaderValue::Float`]
//! 3. `"..."` or `'...'` → [`HeaderValue::Text`] with the quotes stripped
//! 4. anything else → [`HeaderValue::Text`] as written
//!
//! Nothing is validated: an unbalanced bracket or quote falls through to the
//! literal case. [`render_header`] is the inverse of [`extract`], quoting
//! text values that would otherwise be re-read as another type.

use std::collections::BTreeMap;
use std::fmt;

const OPEN: &str = "---\n";
const CLOSE: &str = "\n---\n";

/// A typed header value.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    Text(String),
    Integer(i64),
    Float(f64),
    List(Vec<String>),
}

/// Header fields keyed by name. Duplicate keys keep the last value.
pub type Header = BTreeMap<String, HeaderValue>;

/// Result of splitting a document into header and body.
///
/// `header` is `None` when the document does not start with a header block;
/// the whole text is then the body.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted<'a> {
    pub header: Option<Header>,
    pub body: &'a str,
}

impl HeaderValue {
    /// Values as a list: lists as-is, any scalar as a single entry.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            HeaderValue::List(items) => items.clone(),
            other => vec![other.to_string()],
        }
    }

    /// Serialize the value so that [`parse_value`] reads it back unchanged.
    pub fn to_literal(&self) -> String {
        match self {
            HeaderValue::Text(s) => {
                if s.trim() == s.as_str() && parse_value(s) == *self {
                    s.clone()
                } else {
                    format!("\"{s}\"")
                }
            }
            HeaderValue::List(items) => format!("[{}]", items.join(", ")),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValue::Text(s) => f.write_str(s),
            HeaderValue::Integer(n) => write!(f, "{n}"),
            HeaderValue::Float(x) => f.write_str(&float_literal(*x)),
            HeaderValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

/// Floats always carry a decimal point (`12.0`, not `12`) so they stay floats.
fn float_literal(x: f64) -> String {
    let s = x.to_string();
    if s.contains('.') { s } else { format!("{s}.0") }
}

/// Split a document into its header (if any) and body.
pub fn extract(text: &str) -> Extracted<'_> {
    match split_header(text) {
        Some((block, body)) => Extracted {
            header: Some(parse_block(block)),
            body,
        },
        None => Extracted { header: None, body: text },
    }
}

/// Locate the header block: an opening `---` line at offset zero and the
/// first closing `---` line after it.
fn split_header(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix(OPEN)?;
    let end = rest.find(CLOSE)?;
    Some((&rest[..end], &rest[end + CLOSE.len()..]))
}

/// Parse the lines between the header markers.
pub fn parse_block(block: &str) -> Header {
    block
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            Some((key.trim().to_string(), parse_value(value)))
        })
        .collect()
}

/// Classify a raw header value. See the module docs for the rules.
pub fn parse_value(raw: &str) -> HeaderValue {
    let value = raw.trim();

    if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        return HeaderValue::List(split_list(inner));
    }
    if let Some(number) = parse_number(value) {
        return number;
    }
    if let Some(inner) = strip_quotes(value) {
        return HeaderValue::Text(inner.to_string());
    }
    HeaderValue::Text(value.to_string())
}

fn split_list(inner: &str) -> Vec<String> {
    if inner.trim().is_empty() {
        return Vec::new();
    }
    inner.split(',').map(|s| s.trim().to_string()).collect()
}

fn parse_number(value: &str) -> Option<HeaderValue> {
    if !value.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    let dots = value.matches('.').count();
    if dots > 1 || dots == value.len() {
        return None;
    }
    if dots == 0 {
        value.parse().ok().map(HeaderValue::Integer)
    } else {
        value.parse().ok().map(HeaderValue::Float)
    }
}

fn strip_quotes(value: &str) -> Option<&str> {
    ['"', '\'']
        .into_iter()
        .find_map(|q| value.strip_prefix(q)?.strip_suffix(q))
}

/// Serialize a header back into a delimited block.
pub fn render_header(header: &Header) -> String {
    let lines: Vec<String> = header
        .iter()
        .map(|(key, value)| format!("{key}: {}", value.to_literal()))
        .collect();
    format!("{OPEN}{}{CLOSE}", lines.join("\n"))
}
