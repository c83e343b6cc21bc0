//! Raw BibTeX entries as produced by the grammar parser

use ahash::AHashMap;
use std::borrow::Cow;

/// A raw BibTeX entry (article, book, etc.) before normalization
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<'a> {
    /// Entry type exactly as written in the source (`article`, `InProceedings`, ...)
    pub ty: Cow<'a, str>,
    /// Citation key, possibly empty
    pub key: Cow<'a, str>,
    /// Fields in source order, names lower-cased
    pub fields: Vec<Field<'a>>,
}

impl<'a> Entry<'a> {
    /// Create a new entry
    #[must_use]
    pub const fn new(ty: &'a str, key: &'a str) -> Self {
        Self {
            ty: Cow::Borrowed(ty),
            key: Cow::Borrowed(key),
            fields: Vec::new(),
        }
    }

    /// Get the entry type as written
    #[must_use]
    pub fn entry_type(&self) -> &str {
        &self.ty
    }

    /// Get the citation key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get a literal field value by name (case-insensitive)
    /// Note: This only returns string literals, not numbers
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(|f| f.value.as_str())
    }

    /// Get a field value as text, converting numbers if necessary
    #[must_use]
    pub fn get_as_string(&self, name: &str) -> Option<String> {
        self.field(name).map(|f| f.value.to_text())
    }

    /// Get all fields
    #[must_use]
    pub fn fields(&self) -> &[Field<'a>] {
        &self.fields
    }

    /// Add a field, replacing the value of an earlier field with the same name
    ///
    /// A replaced field keeps its original position.
    pub fn add_field(&mut self, mut field: Field<'a>) {
        if field.name.bytes().any(|b| b.is_ascii_uppercase()) {
            field.name = Cow::Owned(field.name.to_ascii_lowercase());
        }

        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => existing.value = field.value,
            None => self.fields.push(field),
        }
    }

    fn field(&self, name: &str) -> Option<&Field<'a>> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }
}

/// A field in a BibTeX entry
#[derive(Debug, Clone, PartialEq)]
pub struct Field<'a> {
    /// Field name
    pub name: Cow<'a, str>,
    /// Field value
    pub value: Value<'a>,
}

impl<'a> Field<'a> {
    /// Create a new field
    #[must_use]
    pub const fn new(name: &'a str, value: Value<'a>) -> Self {
        Self {
            name: Cow::Borrowed(name),
            value,
        }
    }
}

/// A value in a BibTeX field
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// Raw text between braces or quotes
    Literal(Cow<'a, str>),
    /// Bare number literal
    Number(i64),
    /// Concatenated values (boxed to keep the enum small)
    Concat(Box<Vec<Value<'a>>>),
    /// `@string` macro reference
    Variable(Cow<'a, str>),
}

impl Default for Value<'_> {
    fn default() -> Self {
        Self::Number(0)
    }
}

impl<'a> Value<'a> {
    /// Get the value as a string (if it's a simple literal)
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Literal(s) => Some(s),
            _ => None,
        }
    }

    /// Flatten to text; unresolved macros contribute their own name
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Literal(s) | Self::Variable(s) => s.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Concat(parts) => parts.iter().map(Value::to_text).collect(),
        }
    }

    /// Expand macros and concatenations against a `@string` table
    ///
    /// Undefined macros expand to their own name, the way month macros
    /// such as `jan` are conventionally left to the consumer. `depth`
    /// bounds chains of macros referring to macros.
    pub(crate) fn expand(
        self,
        strings: &AHashMap<Cow<'a, str>, Value<'a>>,
        depth: usize,
    ) -> Option<Value<'a>> {
        if depth > strings.len() + 1 {
            return None;
        }

        match self {
            Self::Literal(_) | Self::Number(_) => Some(self),
            Self::Variable(name) => match strings.get(name.as_ref()) {
                Some(v) => v.clone().expand(strings, depth + 1),
                None => Some(Self::Literal(name)),
            },
            Self::Concat(parts) => {
                let mut text = String::new();
                for part in *parts {
                    text.push_str(&part.expand(strings, depth + 1)?.to_text());
                }
                Some(Self::Literal(Cow::Owned(text)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Value<'_> {
        Value::Literal(Cow::Borrowed(s))
    }

    #[test]
    fn test_add_field_lowercases_and_replaces() {
        let mut entry = Entry::new("Article", "k");
        entry.add_field(Field::new("Title", lit("First")));
        entry.add_field(Field::new("year", Value::Number(2020)));
        entry.add_field(Field::new("TITLE", lit("Second")));

        assert_eq!(entry.fields().len(), 2);
        assert_eq!(entry.fields()[0].name, "title");
        assert_eq!(entry.get("title"), Some("Second"));
        assert_eq!(entry.get_as_string("YEAR"), Some("2020".to_string()));
        assert_eq!(entry.get("year"), None);
    }

    #[test]
    fn test_expand_undefined_macro_keeps_name() {
        let strings = AHashMap::new();
        let value = Value::Variable(Cow::Borrowed("jan"));
        assert_eq!(value.expand(&strings, 0), Some(lit("jan")));
    }

    #[test]
    fn test_expand_concatenation() {
        let mut strings = AHashMap::new();
        strings.insert(Cow::Borrowed("ieee"), lit("IEEE"));
        let value = Value::Concat(Box::new(vec![
            Value::Variable(Cow::Borrowed("ieee")),
            lit(" Transactions "),
            Value::Number(7),
        ]));
        assert_eq!(
            value.expand(&strings, 0),
            Some(Value::Literal(Cow::Owned("IEEE Transactions 7".to_string())))
        );
    }

    #[test]
    fn test_expand_detects_cycles() {
        let mut strings = AHashMap::new();
        strings.insert(Cow::Borrowed("a"), Value::Variable(Cow::Borrowed("b")));
        strings.insert(Cow::Borrowed("b"), Value::Variable(Cow::Borrowed("a")));
        assert_eq!(Value::Variable(Cow::Borrowed("a")).expand(&strings, 0), None);
    }
}
