//! Filtering and facets over normalized publications

use crate::classify::PublicationType;
use crate::date::DEFAULT_YEAR_LABEL;
use crate::Publication;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Year criterion of a [`PublicationQuery`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum YearFilter {
    /// Any year
    #[default]
    All,
    /// Exactly this numeric year
    Numeric(u64),
    /// This status label, compared case-insensitively
    Label(String),
}

impl FromStr for YearFilter {
    type Err = std::convert::Infallible;

    /// `"all"` (or blank) is [`YearFilter::All`], a number is a year,
    /// anything else is a label
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        Ok(s.parse::<u64>()
            .map_or_else(|_| Self::Label(s.to_string()), Self::Numeric))
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Numeric(year) => write!(f, "{year}"),
            Self::Label(label) => f.write_str(label),
        }
    }
}

/// Search and filter criteria for a publication list
///
/// ```
/// use bibtex_normalizer::{parse_publications, NormalizerConfig, PublicationQuery, YearFilter};
///
/// let pubs = parse_publications(
///     "@article{a, title = {Quantum Walks}, year = 2021}\n@misc{b, title = {Notes}}",
///     &NormalizerConfig::default(),
/// )?;
/// let hits = PublicationQuery::new()
///     .search("quantum")
///     .year(YearFilter::Numeric(2021))
///     .filter(&pubs);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, "a");
/// # Ok::<(), bibtex_normalizer::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PublicationQuery {
    search: String,
    year: YearFilter,
    publication_type: Option<PublicationType>,
}

impl PublicationQuery {
    /// A query that matches everything
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Free-text search over title, authors and venue
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into().trim().to_lowercase();
        self
    }

    /// Restrict to a year or status label
    #[must_use]
    pub fn year(mut self, year: YearFilter) -> Self {
        self.year = year;
        self
    }

    /// Restrict to one publication type
    #[must_use]
    pub const fn publication_type(mut self, ty: PublicationType) -> Self {
        self.publication_type = Some(ty);
        self
    }

    /// Whether a publication meets every criterion
    #[must_use]
    pub fn matches(&self, publication: &Publication) -> bool {
        self.matches_search(publication) && self.matches_year(publication) && self.matches_type(publication)
    }

    /// Matching publications, in input order
    #[must_use]
    pub fn filter<'p>(&self, publications: &'p [Publication]) -> Vec<&'p Publication> {
        publications.iter().filter(|p| self.matches(p)).collect()
    }

    fn matches_search(&self, publication: &Publication) -> bool {
        if self.search.is_empty() {
            return true;
        }

        let needle = self.search.as_str();
        let contains = |text: &str| text.to_lowercase().contains(needle);

        contains(&publication.title)
            || publication.authors.iter().any(|a| contains(&a.name))
            || publication.journal.as_deref().is_some_and(contains)
            || publication.conference.as_deref().is_some_and(contains)
    }

    fn matches_year(&self, publication: &Publication) -> bool {
        match &self.year {
            YearFilter::All => true,
            YearFilter::Numeric(year) => publication.year == *year,
            YearFilter::Label(label) => publication.year_label.eq_ignore_ascii_case(label.trim()),
        }
    }

    fn matches_type(&self, publication: &Publication) -> bool {
        self.publication_type
            .map_or(true, |ty| publication.publication_type == ty)
    }
}

/// Distinct years present in a publication list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct YearFacets {
    /// Numeric years, newest first
    pub numeric: Vec<u64>,
    /// Status labels, alphabetical with "In review" last
    pub labels: Vec<String>,
}

/// Collect the year facets of a publication list
#[must_use]
pub fn year_facets(publications: &[Publication]) -> YearFacets {
    let numeric: BTreeSet<u64> = publications
        .iter()
        .map(|p| p.year)
        .filter(|&year| year > 0)
        .collect();

    let mut labels: Vec<String> = Vec::new();
    for p in publications.iter().filter(|p| p.year == 0) {
        if !labels.iter().any(|l| l.eq_ignore_ascii_case(&p.year_label)) {
            labels.push(p.year_label.clone());
        }
    }
    labels.sort_by_cached_key(|label| {
        (
            label.eq_ignore_ascii_case(DEFAULT_YEAR_LABEL),
            label.to_lowercase(),
        )
    });

    YearFacets {
        numeric: numeric.into_iter().rev().collect(),
        labels,
    }
}

/// Distinct publication types present, sorted by name
#[must_use]
pub fn type_facets(publications: &[Publication]) -> Vec<PublicationType> {
    let mut types: Vec<PublicationType> = publications
        .iter()
        .map(|p| p.publication_type)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    types.sort_by_key(|ty| ty.as_str());
    types
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Normalizer, NormalizerConfig};
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r"
        @article{a, author = {Lovelace, Ada}, title = {Quantum Engines}, journal = {Nature}, year = 2021}
        @inproceedings{b, author = {Babbage, Charles}, title = {Difference Engines}, booktitle = {ICML}, year = 2023}
        @misc{c, title = {Working Notes}, year = {in review}}
        @techreport{d, title = {Memo}, year = {Accepted}}
        @article{e, title = {Later Memo}, year = 2023}
    ";

    fn sample() -> Vec<Publication> {
        Normalizer::new(NormalizerConfig::default()).parse(SAMPLE).unwrap()
    }

    fn ids(hits: &[&Publication]) -> Vec<String> {
        hits.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_empty_query_matches_all() {
        let pubs = sample();
        assert_eq!(PublicationQuery::new().filter(&pubs).len(), pubs.len());
        assert_eq!(PublicationQuery::new().search("   ").filter(&pubs).len(), pubs.len());
    }

    #[test]
    fn test_search_fields() {
        let pubs = sample();
        assert_eq!(ids(&PublicationQuery::new().search("ENGINES").filter(&pubs)), ["a", "b"]);
        assert_eq!(ids(&PublicationQuery::new().search("babbage").filter(&pubs)), ["b"]);
        assert_eq!(ids(&PublicationQuery::new().search("nature").filter(&pubs)), ["a"]);
        assert_eq!(ids(&PublicationQuery::new().search("icml").filter(&pubs)), ["b"]);
        assert!(PublicationQuery::new().search("absent").filter(&pubs).is_empty());
    }

    #[test]
    fn test_year_and_type_filters() {
        let pubs = sample();
        let q = PublicationQuery::new().year(YearFilter::Numeric(2023));
        assert_eq!(ids(&q.filter(&pubs)), ["b", "e"]);

        let q = q.publication_type(PublicationType::Journal);
        assert_eq!(ids(&q.filter(&pubs)), ["e"]);

        let q = PublicationQuery::new().year(YearFilter::Label("IN REVIEW".into()));
        assert_eq!(ids(&q.filter(&pubs)), ["c"]);
    }

    #[test]
    fn test_year_filter_from_str() {
        assert_eq!("all".parse::<YearFilter>(), Ok(YearFilter::All));
        assert_eq!("2020".parse::<YearFilter>(), Ok(YearFilter::Numeric(2020)));
        assert_eq!("Accepted".parse::<YearFilter>(), Ok(YearFilter::Label("Accepted".into())));
    }

    #[test]
    fn test_year_facets() {
        let facets = year_facets(&sample());
        assert_eq!(facets.numeric, [2023, 2021]);
        assert_eq!(facets.labels, ["Accepted", "In review"]);
    }

    #[test]
    fn test_type_facets() {
        assert_eq!(
            type_facets(&sample()),
            [
                PublicationType::Conference,
                PublicationType::Journal,
                PublicationType::Preprint,
                PublicationType::TechnicalReport
            ]
        );
        assert!(type_facets(&[]).is_empty());
    }
}
