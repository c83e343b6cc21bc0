//! Publication type and research-area classification

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of publication shown on the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PublicationType {
    /// Journal article
    Journal,
    /// Conference or workshop paper
    Conference,
    /// Chapter in an edited book
    BookChapter,
    /// Book
    Book,
    /// `PhD` or master's thesis
    Thesis,
    /// Technical report
    TechnicalReport,
    /// Preprint or otherwise unpublished work
    Preprint,
}

impl PublicationType {
    /// All types, in declaration order
    pub const ALL: [Self; 7] = [
        Self::Journal,
        Self::Conference,
        Self::BookChapter,
        Self::Book,
        Self::Thesis,
        Self::TechnicalReport,
        Self::Preprint,
    ];

    /// Map a BibTeX entry type (any casing) to a publication type
    ///
    /// Unrecognized entry types are journals.
    #[must_use]
    pub fn from_entry_type(entry_type: &str) -> Self {
        match entry_type.to_ascii_lowercase().as_str() {
            "inproceedings" | "conference" => Self::Conference,
            "incollection" => Self::BookChapter,
            "book" => Self::Book,
            "phdthesis" | "mastersthesis" => Self::Thesis,
            "techreport" => Self::TechnicalReport,
            "unpublished" | "misc" => Self::Preprint,
            _ => Self::Journal,
        }
    }

    /// The kebab-case name used in serialized output
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Journal => "journal",
            Self::Conference => "conference",
            Self::BookChapter => "book-chapter",
            Self::Book => "book",
            Self::Thesis => "thesis",
            Self::TechnicalReport => "technical-report",
            Self::Preprint => "preprint",
        }
    }
}

impl fmt::Display for PublicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublicationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown publication type '{s}'"))
    }
}

/// Topical tag inferred from a publication's title and keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResearchArea {
    /// Healthcare applications of AI
    AiHealthcare,
    /// Signal processing
    SignalProcessing,
    /// Reliability engineering and fault diagnosis
    ReliabilityEngineering,
    /// Quantum computing
    QuantumComputing,
    /// Neural networks, including spiking networks
    NeuralNetworks,
    /// Transformer architectures and attention
    TransformerArchitectures,
    /// Everything else
    MachineLearning,
}

/// Keyword rules in priority order; the first rule with a matching keyword wins
const AREA_RULES: &[(&[&str], ResearchArea)] = &[
    (&["healthcare", "medical", "health"], ResearchArea::AiHealthcare),
    (&["signal", "processing"], ResearchArea::SignalProcessing),
    (&["reliability", "fault", "diagnosis"], ResearchArea::ReliabilityEngineering),
    (&["quantum"], ResearchArea::QuantumComputing),
    (&["neural", "spiking"], ResearchArea::NeuralNetworks),
    (&["transformer", "attention"], ResearchArea::TransformerArchitectures),
];

impl ResearchArea {
    /// Infer the area from a title and keyword list
    ///
    /// Matching is case-insensitive substring search over the title and the
    /// keywords joined by spaces. Falls back to [`ResearchArea::MachineLearning`].
    #[must_use]
    pub fn detect<S: AsRef<str>>(title: &str, keywords: &[S]) -> Self {
        let mut text = title.to_lowercase();
        for keyword in keywords {
            text.push(' ');
            text.push_str(&keyword.as_ref().to_lowercase());
        }

        AREA_RULES
            .iter()
            .find(|(needles, _)| needles.iter().any(|needle| text.contains(needle)))
            .map_or(Self::MachineLearning, |&(_, area)| area)
    }

    /// The kebab-case name used in serialized output
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AiHealthcare => "ai-healthcare",
            Self::SignalProcessing => "signal-processing",
            Self::ReliabilityEngineering => "reliability-engineering",
            Self::QuantumComputing => "quantum-computing",
            Self::NeuralNetworks => "neural-networks",
            Self::TransformerArchitectures => "transformer-architectures",
            Self::MachineLearning => "machine-learning",
        }
    }
}

impl fmt::Display for ResearchArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mapping() {
        assert_eq!(PublicationType::from_entry_type("article"), PublicationType::Journal);
        assert_eq!(
            PublicationType::from_entry_type("InProceedings"),
            PublicationType::Conference
        );
        assert_eq!(PublicationType::from_entry_type("conference"), PublicationType::Conference);
        assert_eq!(
            PublicationType::from_entry_type("incollection"),
            PublicationType::BookChapter
        );
        assert_eq!(PublicationType::from_entry_type("book"), PublicationType::Book);
        assert_eq!(PublicationType::from_entry_type("mastersthesis"), PublicationType::Thesis);
        assert_eq!(PublicationType::from_entry_type("phdthesis"), PublicationType::Thesis);
        assert_eq!(
            PublicationType::from_entry_type("techreport"),
            PublicationType::TechnicalReport
        );
        assert_eq!(PublicationType::from_entry_type("misc"), PublicationType::Preprint);
        assert_eq!(PublicationType::from_entry_type("unpublished"), PublicationType::Preprint);
    }

    #[test]
    fn test_unknown_type_is_journal() {
        assert_eq!(PublicationType::from_entry_type("foobar"), PublicationType::Journal);
        assert_eq!(PublicationType::from_entry_type(""), PublicationType::Journal);
    }

    #[test]
    fn test_type_names_round_trip_through_from_str() {
        for ty in PublicationType::ALL {
            assert_eq!(ty.as_str().parse::<PublicationType>(), Ok(ty));
        }
        assert!("poster".parse::<PublicationType>().is_err());
    }

    #[test]
    fn test_area_priority() {
        let none: [&str; 0] = [];
        assert_eq!(
            ResearchArea::detect("A Quantum Neural Network", &none),
            ResearchArea::QuantumComputing
        );
        assert_eq!(
            ResearchArea::detect("Attention for Medical Imaging", &none),
            ResearchArea::AiHealthcare
        );
        assert_eq!(
            ResearchArea::detect("Spiking Transformers", &none),
            ResearchArea::NeuralNetworks
        );
    }

    #[test]
    fn test_area_uses_keywords() {
        assert_eq!(
            ResearchArea::detect("Untitled", &["Fault Tolerance"]),
            ResearchArea::ReliabilityEngineering
        );
        assert_eq!(
            ResearchArea::detect("Sparse Codes", &["self-attention".to_string()]),
            ResearchArea::TransformerArchitectures
        );
    }

    #[test]
    fn test_area_default() {
        assert_eq!(
            ResearchArea::detect("Gradient Boosting Revisited", &["trees"]),
            ResearchArea::MachineLearning
        );
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(
            serde_json::to_string(&PublicationType::TechnicalReport).unwrap(),
            "\"technical-report\""
        );
        assert_eq!(
            serde_json::to_string(&ResearchArea::AiHealthcare).unwrap(),
            "\"ai-healthcare\""
        );
    }
}
