//! Publication year/status and month resolution

use crate::clean::clean;
use crate::Entry;
use ahash::AHashMap;
use lazy_static::lazy_static;
use serde::{Serialize, Serializer};
use std::fmt;

/// Label used when an entry has no year at all
pub const DEFAULT_YEAR_LABEL: &str = "In review";

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

lazy_static! {
    static ref MONTHS: AHashMap<&'static str, u8> = {
        let mut m = AHashMap::new();
        for (name, number) in [
            ("jan", 1), ("january", 1),
            ("feb", 2), ("february", 2),
            ("mar", 3), ("march", 3),
            ("apr", 4), ("april", 4),
            ("may", 5),
            ("jun", 6), ("june", 6),
            ("jul", 7), ("july", 7),
            ("aug", 8), ("august", 8),
            ("sep", 9), ("sept", 9), ("september", 9),
            ("oct", 10), ("october", 10),
            ("nov", 11), ("november", 11),
            ("dec", 12), ("december", 12),
        ] {
            m.insert(name, number);
        }
        m
    };
}

/// A publication year, or a status label standing in for one
///
/// Flattened at the output boundary into a numeric `year` (`0` for labels)
/// and a display `year_label`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearStatus {
    /// A positive calendar year
    Numeric(u64),
    /// A status such as "In review" or "Accepted"
    Label(String),
}

impl YearStatus {
    /// Interpret a raw `year` field value
    ///
    /// A value starting with a positive integer is a year (`"2020a"` is
    /// 2020). Anything else becomes a label with its first character
    /// upper-cased and the rest lower-cased. A missing or empty value is
    /// [`DEFAULT_YEAR_LABEL`].
    #[must_use]
    pub fn from_field(raw: Option<&str>) -> Self {
        let cleaned = raw.map(clean).unwrap_or_default();
        let cleaned = cleaned.trim();

        if let Some(year) = leading_year(cleaned) {
            Self::Numeric(year)
        } else if cleaned.is_empty() {
            Self::Label(DEFAULT_YEAR_LABEL.to_string())
        } else {
            Self::Label(capitalize(cleaned))
        }
    }

    /// The numeric year, `0` when this is a label
    #[must_use]
    pub const fn year(&self) -> u64 {
        match self {
            Self::Numeric(year) => *year,
            Self::Label(_) => 0,
        }
    }

    /// The display label
    #[must_use]
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Split into the flattened `(year, year_label)` pair
    #[must_use]
    pub fn into_parts(self) -> (u64, String) {
        match self {
            Self::Numeric(year) => (year, year.to_string()),
            Self::Label(label) => (0, label),
        }
    }
}

impl fmt::Display for YearStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(year) => write!(f, "{year}"),
            Self::Label(label) => f.write_str(label),
        }
    }
}

/// Year/status of an entry, from its `year` field
#[must_use]
pub fn parse_year(entry: &Entry<'_>) -> YearStatus {
    YearStatus::from_field(entry.get_as_string("year").as_deref())
}

fn leading_year(s: &str) -> Option<u64> {
    let digits = s.strip_prefix('+').unwrap_or(s);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<u64>().ok().filter(|&year| year > 0)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// A publication month
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Month {
    /// Month number, 1–12
    Resolved(u8),
    /// Text that is neither a month name nor a month number, kept as written
    Raw(String),
}

impl Month {
    /// Resolve a raw `month` field value
    ///
    /// English names, three-letter abbreviations and `sept` resolve
    /// case-insensitively, then numbers 1–12. Anything else is kept raw.
    #[must_use]
    pub fn resolve(raw: &str) -> Self {
        let key = raw.trim().to_lowercase();

        if let Some(&number) = MONTHS.get(key.as_str()) {
            return Self::Resolved(number);
        }

        match key.parse::<u8>() {
            Ok(number @ 1..=12) => Self::Resolved(number),
            _ => {
                tracing::trace!(month = raw, "month left unresolved");
                Self::Raw(raw.to_string())
            }
        }
    }

    /// The month number, when resolved
    #[must_use]
    pub const fn number(&self) -> Option<u8> {
        match self {
            Self::Resolved(number) => Some(*number),
            Self::Raw(_) => None,
        }
    }

    /// The English month name, when resolved
    #[must_use]
    pub fn name(&self) -> Option<&'static str> {
        self.number()
            .and_then(|n| MONTH_NAMES.get(usize::from(n) - 1).copied())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved(number) => write!(f, "{number}"),
            Self::Raw(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
