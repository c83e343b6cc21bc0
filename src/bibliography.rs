//! Parsed BibTeX document with `@string` macros expanded

use crate::parser::{self, ParsedItem};
use crate::{Entry, Error, Result, Value};
use ahash::AHashMap;
use std::borrow::Cow;

/// A parsed BibTeX document
///
/// Entries keep source order. Every field value is either a literal or a
/// number once parsing finishes: macros and `#` concatenations are expanded,
/// and a macro with no `@string` definition expands to its own name.
#[derive(Debug, Clone, Default)]
pub struct Bibliography<'a> {
    /// Bibliography entries
    entries: Vec<Entry<'a>>,
    /// String definitions
    strings: AHashMap<Cow<'a, str>, Value<'a>>,
    /// Preambles
    preambles: Vec<Value<'a>>,
    /// Comments and free text between entries
    comments: Vec<&'a str>,
}

impl<'a> Bibliography<'a> {
    /// Create a new empty bibliography
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a BibTeX document
    pub fn parse(input: &'a str) -> Result<Self> {
        let items = parser::parse_bibtex(input)?;
        let mut bib = Self::new();

        // First pass: collect string definitions
        for item in &items {
            if let ParsedItem::String(name, value) = item {
                bib.strings.insert(Cow::Borrowed(*name), value.clone());
            }
        }

        // Second pass: expand and keep everything else
        for item in items {
            match item {
                ParsedItem::Entry(mut entry) => {
                    for field in &mut entry.fields {
                        let raw = std::mem::take(&mut field.value);
                        field.value = bib.expand(raw, &field.name)?;
                    }
                    bib.entries.push(entry);
                }
                ParsedItem::Preamble(value) => {
                    let expanded = bib.expand(value, "@preamble")?;
                    bib.preambles.push(expanded);
                }
                ParsedItem::Comment(text) => bib.comments.push(text),
                ParsedItem::String(..) => {}
            }
        }

        tracing::debug!(
            entries = bib.entries.len(),
            strings = bib.strings.len(),
            comments = bib.comments.len(),
            "parsed bibliography"
        );

        Ok(bib)
    }

    /// Get all entries, in source order
    #[must_use]
    pub fn entries(&self) -> &[Entry<'a>] {
        &self.entries
    }

    /// Get all string definitions
    #[must_use]
    pub const fn strings(&self) -> &AHashMap<Cow<'a, str>, Value<'a>> {
        &self.strings
    }

    /// Get all preambles
    #[must_use]
    pub fn preambles(&self) -> &[Value<'a>] {
        &self.preambles
    }

    /// Get all comments
    #[must_use]
    pub fn comments(&self) -> &[&'a str] {
        &self.comments
    }

    /// Find the first entry with the given key
    #[must_use]
    pub fn find_by_key(&self, key: &str) -> Option<&Entry<'a>> {
        self.entries.iter().find(|e| e.key == key)
    }

    fn expand(&self, value: Value<'a>, context: &str) -> Result<Value<'a>> {
        value
            .expand(&self.strings, 0)
            .ok_or_else(|| Error::CircularReference(context.to_string()))
    }
}
