//! Normalized publication records and the normalizer that builds them

use crate::author::{parse_authors, Author};
use crate::classify::{PublicationType, ResearchArea};
use crate::clean::clean_optional;
use crate::config::NormalizerConfig;
use crate::date::{parse_year, Month};
use crate::writer::reconstruct;
use crate::{Bibliography, Entry, Result};
use serde::Serialize;
use std::path::Path;

/// Title used when an entry has none
pub const UNTITLED: &str = "Untitled";

/// Publication status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Every normalized entry is currently considered published
    #[default]
    Published,
}

/// A normalized publication
///
/// Optional attributes are `None` when the source has nothing for them and
/// are left out of serialized output entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    /// Citation key, the entry's `id` field, or a generated id
    pub id: String,
    /// Cleaned title
    pub title: String,
    /// Authors in field order
    pub authors: Vec<Author>,
    /// Numeric year, `0` when the entry only has a status label
    pub year: u64,
    /// Year for display, or a status such as "In review"
    pub year_label: String,
    /// Publication month
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<Month>,
    /// Publication kind
    #[serde(rename = "type")]
    pub publication_type: PublicationType,
    /// Publication status
    pub status: Status,
    /// Same as `keywords`
    pub tags: Vec<String>,
    /// Comma-separated `keywords` field, trimmed, empty segments dropped
    pub keywords: Vec<String>,
    /// Inferred research area
    pub research_area: ResearchArea,
    /// Cleaned journal name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    /// Cleaned `booktitle`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conference: Option<String>,
    /// Journal volume
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    /// The `number` field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    /// Page range as written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
    /// Digital object identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    /// Link to the publication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Link to source code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Cleaned abstract
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    /// Cleaned `description`, falling back to `note`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the entry is featured (`selected` is `true` or `yes`, any case)
    pub selected: bool,
    /// Preview image path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    /// Citation-ready BibTeX block
    pub bibtex: String,
}

impl Publication {
    /// Journal, else conference
    #[must_use]
    pub fn venue(&self) -> Option<&str> {
        self.journal.as_deref().or(self.conference.as_deref())
    }

    /// Author names joined with ", "
    #[must_use]
    pub fn author_line(&self) -> String {
        self.authors
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Turns BibTeX into [`Publication`] records
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    /// Create a normalizer
    #[must_use]
    pub const fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    #[must_use]
    pub const fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Parse BibTeX text into publications, in source order
    pub fn parse(&self, input: &str) -> Result<Vec<Publication>> {
        let bib = Bibliography::parse(input)?;
        Ok(self.normalize_entries(bib.entries()))
    }

    /// Read and parse a BibTeX file
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Vec<Publication>> {
        let content = std::fs::read_to_string(path)?;
        self.parse(&content)
    }

    /// Normalize already-parsed entries, in order
    ///
    /// Generated ids share one timestamp and differ by position, so they are
    /// unique within a call.
    #[must_use]
    pub fn normalize_entries(&self, entries: &[Entry<'_>]) -> Vec<Publication> {
        let ids = FallbackIds {
            prefix: self.config.fallback_id_prefix(),
            stamp: chrono::Utc::now().timestamp_millis(),
        };

        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| self.normalize_entry(entry, &ids, index))
            .collect()
    }

    fn normalize_entry(&self, entry: &Entry<'_>, ids: &FallbackIds<'_>, index: usize) -> Publication {
        let text = |name: &str| entry.get_as_string(name);
        let raw = |name: &str| {
            text(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let cleaned = |name: &str| clean_optional(text(name).as_deref());

        let id = Some(entry.key().trim())
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .or_else(|| raw("id"))
            .unwrap_or_else(|| ids.generate(index));

        let title = cleaned("title");
        let authors = text("author")
            .map(|field| parse_authors(&field, self.config.highlight()))
            .unwrap_or_default();
        let (year, year_label) = parse_year(entry).into_parts();
        let month = raw("month").map(|m| Month::resolve(&m));
        let publication_type = PublicationType::from_entry_type(entry.entry_type());
        let keywords = text("keywords").map(|k| split_keywords(&k)).unwrap_or_default();
        let research_area = ResearchArea::detect(title.as_deref().unwrap_or_default(), &keywords);
        let selected = text("selected").is_some_and(|s| is_truthy(&s));
        let preview = raw("preview")
            .map(|p| p.replace(['{', '}'], ""))
            .filter(|p| !p.is_empty());

        tracing::debug!(
            id = %id,
            kind = %publication_type,
            authors = authors.len(),
            year,
            "normalized entry"
        );

        Publication {
            id,
            title: title.unwrap_or_else(|| UNTITLED.to_string()),
            authors,
            year,
            year_label,
            month,
            publication_type,
            status: Status::Published,
            tags: keywords.clone(),
            keywords,
            research_area,
            journal: cleaned("journal"),
            conference: cleaned("booktitle"),
            volume: raw("volume"),
            issue: raw("number"),
            pages: raw("pages"),
            doi: raw("doi"),
            url: raw("url"),
            code: raw("code"),
            abstract_text: cleaned("abstract"),
            description: cleaned("description").or_else(|| cleaned("note")),
            selected,
            preview,
            bibtex: reconstruct(entry, self.config.excluded_fields()),
        }
    }
}

/// Ids for entries that have neither a citation key nor an `id` field
#[derive(Debug)]
struct FallbackIds<'c> {
    prefix: &'c str,
    stamp: i64,
}

impl FallbackIds<'_> {
    fn generate(&self, index: usize) -> String {
        let id = format!("{}-{}-{index}", self.prefix, self.stamp);
        tracing::trace!(id = %id, index, "generated fallback id");
        id
    }
}

fn split_keywords(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes")
}

/// Parse BibTeX text into publications with the given configuration
pub fn parse_publications(input: &str, config: &NormalizerConfig) -> Result<Vec<Publication>> {
    Normalizer::new(config.clone()).parse(input)
}

/// Read a BibTeX file into publications with the given configuration
pub fn parse_publications_file(
    path: impl AsRef<Path>,
    config: &NormalizerConfig,
) -> Result<Vec<Publication>> {
    Normalizer::new(config.clone()).parse_file(path)
}
