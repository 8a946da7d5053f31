//! Body parsing: title, named sections and embedded images.
//!
//! The body is the markdown that follows the header block. Three things are
//! pulled out of it:
//!
//! - **Title**: the first `# ` line, or [`DEFAULT_TITLE`]
//! - **Sections**: each `## Name` heading opens a section running to the next
//!   `## ` heading or the end of the text
//! - **Images**: every `![[file]]` embed, in document order
//!
//! ```text
//! # Cheval à bascule          → title
//! ![[cheval-1.jpg]]           → images[0] (primary)
//! ![[cheval-2.jpg]]           → images[1]
//!
//! ## Dimensions               → sections["Dimensions"]
//! H 60cm
//! L 90cm
//!
//! ## État                     → sections["État"]
//! Quelques éclats de peinture.
//! ```
//!
//! Parsing never fails: a body without headings or embeds yields the default
//! title and empty collections.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Title used when the body has no `# ` heading.
pub const DEFAULT_TITLE: &str = "Sans titre";

static IMAGE_EMBED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[\[([^\]]+)\]\]").expect("image embed pattern is valid"));

/// Everything extracted from a document body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBody {
    pub title: String,
    /// Section text keyed by exact heading text. Later duplicates win.
    pub sections: BTreeMap<String, String>,
    /// Embedded image filenames in document order, duplicates kept.
    pub images: Vec<String>,
}

pub fn parse_body(body: &str) -> ParsedBody {
    ParsedBody {
        title: parse_title(body),
        sections: parse_sections(body),
        images: parse_images(body),
    }
}

/// Return the text of a heading line at the given level (`#` count), if the
/// line is one. `## Foo` is not a level-1 heading and `### Foo` is not level 2.
fn heading_text(line: &str, level: usize) -> Option<&str> {
    let rest = line.strip_prefix(&"#".repeat(level))?;
    if !rest.starts_with(|c: char| c == ' ' || c == '\t') {
        return None;
    }
    let text = rest.trim();
    (!text.is_empty()).then_some(text)
}

fn parse_title(body: &str) -> String {
    body.lines()
        .find_map(|line| heading_text(line, 1))
        .unwrap_or(DEFAULT_TITLE)
        .to_string()
}

fn parse_sections(body: &str) -> BTreeMap<String, String> {
    let mut sections = BTreeMap::new();
    let mut current: Option<(&str, Vec<&str>)> = None;

    for line in body.lines() {
        if let Some(name) = heading_text(line, 2) {
            if let Some((prev, content)) = current.take() {
                sections.insert(prev.to_string(), content.join("\n").trim().to_string());
            }
            current = Some((name, Vec::new()));
        } else if let Some((_, content)) = current.as_mut() {
            content.push(line);
        }
    }
    if let Some((name, content)) = current {
        sections.insert(name.to_string(), content.join("\n").trim().to_string());
    }

    sections
}

fn parse_images(body: &str) -> Vec<String> {
    IMAGE_EMBED
        .captures_iter(body)
        .map(|caps| caps[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_from_first_h1() {
        let parsed = parse_body("\n# Cheval à bascule\n\n# Autre titre");
        assert_eq!(parsed.title, "Cheval à bascule");
    }

    #[test]
    fn title_defaults_when_absent() {
        let parsed = parse_body("Juste du texte.\n## Dimensions\n10cm");
        assert_eq!(parsed.title, DEFAULT_TITLE);
    }

    #[test]
    fn h2_is_not_a_title() {
        let parsed = parse_body("## Dimensions\n10cm\n# Vrai titre");
        assert_eq!(parsed.title, "Vrai titre");
    }

    #[test]
    fn hash_without_space_is_not_a_title() {
        assert_eq!(parse_body("#hashtag").title, DEFAULT_TITLE);
    }

    #[test]
    fn no_h2_means_no_sections() {
        let parsed = parse_body("# Lampe\n\nUne lampe de bureau.");
        assert!(parsed.sections.is_empty());
        assert_eq!(parsed.title, "Lampe");
    }

    #[test]
    fn sections_run_to_next_heading() {
        let body = "# Lampe\n\n## Dimensions\nH 40cm\nL 20cm\n\n## État\n  Très bon état.  \n";
        let parsed = parse_body(body);
        assert_eq!(parsed.sections.len(), 2);
        assert_eq!(parsed.sections["Dimensions"], "H 40cm\nL 20cm");
        assert_eq!(parsed.sections["État"], "Très bon état.");
    }

    #[test]
    fn h3_stays_inside_section() {
        let body = "## Notes perso\nTrouvée à Lyon.\n### Détail\nUn vide-grenier.";
        let parsed = parse_body(body);
        assert_eq!(parsed.sections.len(), 1);
        assert_eq!(
            parsed.sections["Notes perso"],
            "Trouvée à Lyon.\n### Détail\nUn vide-grenier."
        );
    }

    #[test]
    fn duplicate_section_last_wins() {
        let parsed = parse_body("## État\nabîmé\n## État\nrestauré");
        assert_eq!(parsed.sections["État"], "restauré");
    }

    #[test]
    fn section_keys_are_exact() {
        let parsed = parse_body("## état\nminuscule");
        assert!(!parsed.sections.contains_key("État"));
        assert!(parsed.sections.contains_key("état"));
    }

    #[test]
    fn empty_section_is_present_and_empty() {
        let parsed = parse_body("## Dimensions\n\n## État\nbon");
        assert_eq!(parsed.sections["Dimensions"], "");
    }

    #[test]
    fn images_in_document_order() {
        let parsed = parse_body("![[a.jpg]]\ntexte\n![[b.jpg]]");
        assert_eq!(parsed.images, vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn duplicate_images_preserved() {
        let parsed = parse_body("![[a.jpg]] ![[a.jpg]]");
        assert_eq!(parsed.images, vec!["a.jpg", "a.jpg"]);
    }

    #[test]
    fn images_found_inside_sections() {
        let parsed = parse_body("# T\n![[face.jpg]]\n## État\n![[dos.jpg]]");
        assert_eq!(parsed.images, vec!["face.jpg", "dos.jpg"]);
    }

    #[test]
    fn plain_markdown_images_ignored() {
        let parsed = parse_body("![alt](photo.jpg) ![[]]");
        assert!(parsed.images.is_empty());
    }

    #[test]
    fn empty_body_defaults() {
        let parsed = parse_body("");
        assert_eq!(parsed.title, DEFAULT_TITLE);
        assert!(parsed.sections.is_empty());
        assert!(parsed.images.is_empty());
    }
}
