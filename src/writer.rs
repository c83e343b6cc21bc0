//! Re-serialization of raw entries for "view citation" display

use crate::Entry;
use std::fmt::{self, Write};

/// Fields that only drive the website and never appear in a citation
pub const DEFAULT_EXCLUDED_FIELDS: [&str; 5] = ["selected", "preview", "description", "keywords", "code"];

/// Configuration for writing BibTeX
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Indentation string (default: "  ")
    pub indent: String,
    /// Field names to leave out, compared case-insensitively
    pub exclude: Vec<String>,
    /// Whether to drop `*` and `#` author markers (default: true)
    pub strip_author_markers: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            exclude: DEFAULT_EXCLUDED_FIELDS.iter().map(|s| (*s).to_string()).collect(),
            strip_author_markers: true,
        }
    }
}

/// BibTeX writer
#[derive(Debug)]
pub struct Writer<W: Write> {
    writer: W,
    config: WriterConfig,
}

impl<W: Write> Writer<W> {
    /// Create a new writer with custom configuration
    pub const fn with_config(writer: W, config: WriterConfig) -> Self {
        Self { writer, config }
    }

    /// Write a single entry
    ///
    /// Fields keep source order and every value is written in braces as
    /// its raw text. No trailing newline follows the closing brace.
    pub fn write_entry(&mut self, entry: &Entry) -> fmt::Result {
        write!(self.writer, "@{}{{{}", entry.ty, entry.key)?;

        for field in entry.fields() {
            if self.is_excluded(&field.name) {
                continue;
            }

            let mut value = field.value.to_text();
            if self.config.strip_author_markers && field.name.eq_ignore_ascii_case("author") {
                value.retain(|c| c != '*' && c != '#');
            }

            write!(
                self.writer,
                ",\n{}{} = {{{}}}",
                self.config.indent, field.name, value
            )?;
        }

        write!(self.writer, "\n}}")
    }

    /// Recover the underlying sink
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.config
            .exclude
            .iter()
            .any(|excluded| excluded.eq_ignore_ascii_case(name))
    }
}

/// Reconstruct a citation-ready BibTeX block, leaving out `exclude` fields
///
/// ```
/// use bibtex_normalizer::{reconstruct, Bibliography};
///
/// let bib = Bibliography::parse("@article{k, author = {Doe, J.*}, code = {x}}")?;
/// let text = reconstruct(&bib.entries()[0], &["code"]);
/// assert_eq!(text, "@article{k,\n  author = {Doe, J.}\n}");
/// # Ok::<(), bibtex_normalizer::Error>(())
/// ```
#[must_use]
pub fn reconstruct<S: AsRef<str>>(entry: &Entry, exclude: &[S]) -> String {
    let config = WriterConfig {
        exclude: exclude.iter().map(|s| s.as_ref().to_string()).collect(),
        ..WriterConfig::default()
    };
    to_string_with(entry, config)
}

/// Convenience function to write an entry to a string
#[must_use]
pub fn to_string(entry: &Entry) -> String {
    to_string_with(entry, WriterConfig::default())
}

fn to_string_with(entry: &Entry, config: WriterConfig) -> String {
    let mut writer = Writer::with_config(String::new(), config);
    // Writing into a String cannot fail
    let _ = writer.write_entry(entry);
    writer.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Field, Value};
    use std::borrow::Cow;

    fn sample_entry() -> Entry<'static> {
        let mut entry = Entry::new("article", "test2023");
        for (name, value) in [
            ("author", Value::Literal(Cow::Borrowed("Doe, John* and Roe, Jane#"))),
            ("title", Value::Literal(Cow::Borrowed("{Test} Article"))),
            ("selected", Value::Literal(Cow::Borrowed("true"))),
            ("year", Value::Number(2023)),
            ("Keywords", Value::Literal(Cow::Borrowed("ml, nlp"))),
        ] {
            entry.add_field(Field::new(name, value));
        }
        entry
    }

    #[test]
    fn test_reconstruct_excludes_and_strips_markers() {
        let result = reconstruct(&sample_entry(), &["SELECTED", "keywords"]);
        insta::assert_snapshot!(result, @r"
        @article{test2023,
          author = {Doe, John and Roe, Jane},
          title = {{Test} Article},
          year = {2023}
        }
        ");
    }

    #[test]
    fn test_default_exclusions() {
        let result = to_string(&sample_entry());
        assert!(!result.contains("selected"));
        assert!(!result.contains("keywords"));
        assert!(result.contains("year = {2023}"));
        assert!(result.ends_with('}'));
    }

    #[test]
    fn test_entry_without_fields() {
        let entry = Entry::new("misc", "lonely");
        assert_eq!(reconstruct::<&str>(&entry, &[]), "@misc{lonely\n}");
    }

    #[test]
    fn test_markers_kept_outside_author() {
        let mut entry = Entry::new("misc", "k");
        entry.add_field(Field::new("note", Value::Literal(Cow::Borrowed("Issue #3*"))));
        assert_eq!(
            reconstruct::<&str>(&entry, &[]),
            "@misc{k,\n  note = {Issue #3*}\n}"
        );
    }

    #[test]
    fn test_quoted_values_reconstruct_with_balanced_braces() {
        let bib = crate::Bibliography::parse(r#"@article{k, title = "A {B} c"}"#).unwrap();
        assert_eq!(
            reconstruct::<&str>(&bib.entries()[0], &[]),
            "@article{k,\n  title = {A {B} c}\n}"
        );
    }

    #[test]
    fn test_custom_indent() {
        let config = WriterConfig {
            indent: "\t".to_string(),
            ..WriterConfig::default()
        };
        let mut writer = Writer::with_config(String::new(), config);
        let mut entry = Entry::new("book", "b");
        entry.add_field(Field::new("title", Value::Literal(Cow::Borrowed("T"))));
        writer.write_entry(&entry).unwrap();
        assert_eq!(writer.into_inner(), "@book{b,\n\ttitle = {T}\n}");
    }
}
