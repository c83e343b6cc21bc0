//! Author list parsing

use crate::clean::clean;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    /// `and` with one whitespace character on each side
    static ref AUTHOR_SEPARATOR: Regex = Regex::new(r"\sand\s").unwrap();
}

/// Marks the corresponding author
const CORRESPONDING_MARKER: char = '*';
/// Marks an equal-contribution co-author
const CO_AUTHOR_MARKER: char = '#';

/// One author of a publication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Cleaned display name, "First Last"
    pub name: String,
    /// Whether this is the configured site owner
    pub is_highlighted: bool,
    /// Whether the source name carried a `*`
    pub is_corresponding: bool,
    /// Whether the source name carried a `#`
    pub is_co_author: bool,
}

/// Split a BibTeX author field into authors
///
/// Markers (`*`, `#`) may appear anywhere in a name and are removed.
/// "Last, First" names are turned around using their first two parts.
/// Authors whose name cleans to nothing are dropped.
///
/// ```
/// use bibtex_normalizer::parse_authors;
///
/// let authors = parse_authors("Smith, John* and Doe, Jane#", Some("John Smith"));
/// assert_eq!(authors[0].name, "John Smith");
/// assert!(authors[0].is_highlighted && authors[0].is_corresponding);
/// assert!(authors[1].is_co_author && !authors[1].is_highlighted);
/// ```
#[must_use]
pub fn parse_authors(field: &str, highlight_name: Option<&str>) -> Vec<Author> {
    let matcher = highlight_name.and_then(HighlightMatcher::new);

    AUTHOR_SEPARATOR
        .split(field)
        .filter_map(|token| parse_author(token, matcher.as_ref()))
        .collect()
}

fn parse_author(token: &str, matcher: Option<&HighlightMatcher>) -> Option<Author> {
    let token = token.trim();
    let is_corresponding = token.contains(CORRESPONDING_MARKER);
    let is_co_author = token.contains(CO_AUTHOR_MARKER);
    let unmarked: String = token
        .chars()
        .filter(|&c| c != CORRESPONDING_MARKER && c != CO_AUTHOR_MARKER)
        .collect();

    let name = clean(&reorder_last_first(&unmarked));
    if name.is_empty() {
        return None;
    }

    Some(Author {
        is_highlighted: matcher.is_some_and(|m| m.matches(&name)),
        name,
        is_corresponding,
        is_co_author,
    })
}

/// "Last, First" to "First Last"; anything after a second comma is ignored
fn reorder_last_first(name: &str) -> String {
    let mut parts = name.split(',').map(str::trim);
    match (parts.next(), parts.next()) {
        (Some(last), Some(first)) => format!("{first} {last}"),
        _ => name.to_string(),
    }
}

/// Case-insensitive match of an author name against the site owner's name
#[derive(Debug, Clone)]
struct HighlightMatcher {
    name: String,
    swapped: Option<String>,
}

impl HighlightMatcher {
    fn new(highlight: &str) -> Option<Self> {
        let name = fold(highlight.trim());
        if name.is_empty() {
            return None;
        }

        let parts: Vec<&str> = name.split(' ').collect();
        let swapped = match parts.as_slice() {
            [first, last] => Some(format!("{last} {first}")),
            _ => None,
        };

        Some(Self { name, swapped })
    }

    fn matches(&self, author: &str) -> bool {
        let author = fold(author);
        author.contains(&self.name)
            || self
                .swapped
                .as_ref()
                .is_some_and(|swapped| author.contains(swapped.as_str()))
    }
}

/// Lower-case and NFC-normalize for comparison
fn fold(s: &str) -> String {
    s.nfc().collect::<String>().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn author(name: &str, highlighted: bool, corresponding: bool, co_author: bool) -> Author {
        Author {
            name: name.to_string(),
            is_highlighted: highlighted,
            is_corresponding: corresponding,
            is_co_author: co_author,
        }
    }

    #[test]
    fn test_markers_and_reordering() {
        let authors = parse_authors("Smith, John* and Doe, Jane#", Some("John Smith"));
        assert_eq!(
            authors,
            vec![
                author("John Smith", true, true, false),
                author("Jane Doe", false, false, true),
            ]
        );
    }

    #[test]
    fn test_highlight_matches_swapped_order() {
        let authors = parse_authors("Smith John and Jane Doe", Some("John Smith"));
        assert!(authors[0].is_highlighted);
        assert!(!authors[1].is_highlighted);
    }

    #[test]
    fn test_highlight_is_case_insensitive_substring() {
        let authors = parse_authors("Dr. JOHN SMITH Jr.", Some("john smith"));
        assert!(authors[0].is_highlighted);
    }

    #[test]
    fn test_highlight_swap_needs_exactly_two_parts() {
        let authors = parse_authors("Smith John Paul", Some("John Paul Smith"));
        assert!(!authors[0].is_highlighted);
    }

    #[test]
    fn test_highlight_ignores_accent_composition() {
        // "é" precomposed in the field, decomposed in the configuration
        let authors = parse_authors("Ren\u{e9} Dupont", Some("Rene\u{301} Dupont"));
        assert!(authors[0].is_highlighted);
    }

    #[test]
    fn test_no_highlight_name() {
        let authors = parse_authors("John Smith", None);
        assert!(!authors[0].is_highlighted);

        let authors = parse_authors("John Smith", Some("   "));
        assert!(!authors[0].is_highlighted);
    }

    #[test]
    fn test_extra_comma_parts_are_ignored() {
        let authors = parse_authors("King, Martin Luther, Jr.", None);
        assert_eq!(authors[0].name, "Martin Luther King");
    }

    #[test]
    fn test_empty_names_are_dropped() {
        let authors = parse_authors("* and {} and Jane Doe", None);
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].name, "Jane Doe");

        assert!(parse_authors("", Some("John Smith")).is_empty());
    }

    #[test]
    fn test_braced_names_are_cleaned() {
        let authors = parse_authors("van {Der} Berg, Anna and {{Lab Consortium}}", None);
        assert_eq!(authors[0].name, "Anna van Der Berg");
        assert_eq!(authors[1].name, "Lab Consortium");
    }

    #[test]
    fn test_line_wrapped_author_list() {
        let authors = parse_authors("Smith, John and\n    Doe, Jane", None);
        assert_eq!(authors.len(), 2);
        assert_eq!(authors[1].name, "Jane Doe");
    }
}
