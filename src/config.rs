//! Normalizer configuration

use crate::writer::DEFAULT_EXCLUDED_FIELDS;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Normalizer configuration with builder pattern
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    highlight_name: Option<String>,
    exclude_fields: Vec<String>,
    id_prefix: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            highlight_name: None,
            exclude_fields: DEFAULT_EXCLUDED_FIELDS.iter().map(|s| (*s).to_string()).collect(),
            id_prefix: "pub".to_string(),
        }
    }
}

impl NormalizerConfig {
    /// Create a configuration with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the site owner's name, highlighted in author lists
    ///
    /// A blank name disables highlighting.
    #[must_use]
    pub fn highlight_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.highlight_name = if name.trim().is_empty() { None } else { Some(name) };
        self
    }

    /// Set the fields left out of reconstructed citations
    #[must_use]
    pub fn exclude_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the prefix of ids generated for entries without a key
    #[must_use]
    pub fn id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// The configured highlight name
    #[must_use]
    pub fn highlight(&self) -> Option<&str> {
        self.highlight_name.as_deref()
    }

    /// Fields left out of reconstructed citations
    #[must_use]
    pub fn excluded_fields(&self) -> &[String] {
        &self.exclude_fields
    }

    /// Prefix of generated ids
    #[must_use]
    pub fn fallback_id_prefix(&self) -> &str {
        &self.id_prefix
    }

    /// Read the highlight name from the site's JSON configuration
    ///
    /// Only `author.name` is used; everything else in the document is
    /// ignored.
    pub fn from_site_json(json: &str) -> Result<Self> {
        let site: SiteConfig = serde_json::from_str(json)?;
        let name = site.author.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidConfig("author.name is empty".to_string()));
        }
        Ok(Self::default().highlight_name(name))
    }

    /// Read the site's JSON configuration from a file
    pub fn from_site_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_site_json(&content)
    }
}

#[derive(Debug, Deserialize)]
struct SiteConfig {
    author: SiteAuthor,
}

#[derive(Debug, Deserialize)]
struct SiteAuthor {
    name: String,
}
