//! Error types for the bibtex-normalizer crate
//!
//! Field content never produces an error: malformed years, unknown entry
//! types, unresolved months and the like all have defaults. Errors are
//! reserved for documents the grammar cannot read, I/O, and configuration.

use std::fmt;
use thiserror::Error;

/// Result type for bibtex-normalizer operations
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for bibtex-normalizer
#[derive(Error, Debug)]
pub enum Error {
    /// The BibTeX document is structurally invalid
    #[error("Parse error at line {line}, column {column}: {message}")]
    ParseError {
        /// Line number (1-indexed)
        line: usize,
        /// Column number (1-indexed)
        column: usize,
        /// Error message
        message: String,
        /// Optional source snippet
        snippet: Option<String>,
    },

    /// `@string` definitions that refer to each other in a cycle
    #[error("Circular reference detected in string variables: {0}")]
    CircularReference(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Site configuration could not be decoded
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Site configuration decoded but is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Build a parse error pointing at byte `offset` of `input`
    pub(crate) fn parse_at(input: &str, offset: usize, message: impl Into<String>) -> Self {
        let location = Location::from_offset(input, offset);
        let rest = input.get(offset..).unwrap_or_default();

        Self::ParseError {
            line: location.line,
            column: location.column,
            message: message.into(),
            snippet: Some(snippet(rest, 40)),
        }
    }

    /// The source location, when the error carries one
    #[must_use]
    pub const fn location(&self) -> Option<Location> {
        match self {
            Self::ParseError { line, column, .. } => Some(Location {
                line: *line,
                column: *column,
            }),
            _ => None,
        }
    }
}

/// Location information for errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl Location {
    /// Compute the line and column of byte `offset` in `input`
    #[must_use]
    pub fn from_offset(input: &str, offset: usize) -> Self {
        let mut line = 1;
        let mut column = 1;

        for (i, ch) in input.char_indices() {
            if i >= offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }

        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// First `max_chars` characters of `input`, with an ellipsis when cut
fn snippet(input: &str, max_chars: usize) -> String {
    let mut chars = input.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
