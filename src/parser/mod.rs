//! BibTeX grammar parser implementation using winnow
//!
//! The grammar layer only splits the document into items and keeps field
//! text exactly as written. Cleaning and interpretation happen later.

pub mod entry;
pub mod lexer;
pub mod utils;
pub mod value;

use crate::{Error, Result};
use winnow::ascii::multispace0;
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;

pub use entry::parse_entry;

/// Internal parser result type
pub type PResult<O> = winnow::PResult<O, ContextError>;

/// Recoverable failure, letting `alt` try the next branch
pub(crate) fn backtrack<O>() -> PResult<O> {
    Err(ErrMode::Backtrack(ContextError::new()))
}

/// Parse a complete BibTeX document into its items, in source order
pub fn parse_bibtex(input: &str) -> Result<Vec<ParsedItem<'_>>> {
    let mut items = Vec::new();
    let mut remaining = input;

    loop {
        lexer::skip_whitespace(&mut remaining);
        if remaining.is_empty() {
            break;
        }

        let start = remaining;
        match parse_item(&mut remaining) {
            Ok(item) => items.push(item),
            Err(_) => {
                let offset = input.len() - start.len();
                let message = if start.starts_with('@') {
                    "malformed or unterminated entry"
                } else {
                    "unexpected input"
                };
                return Err(Error::parse_at(input, offset, message));
            }
        }
    }

    Ok(items)
}

/// A parsed item from the BibTeX file
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedItem<'a> {
    /// A bibliography entry
    Entry(crate::Entry<'a>),
    /// A `@string` macro definition
    String(&'a str, crate::Value<'a>),
    /// A preamble
    Preamble(crate::Value<'a>),
    /// A comment, `%` line, or free text between entries
    Comment(&'a str),
}

/// Parse a single item (entry, string, preamble, or comment)
fn parse_item<'a>(input: &mut &'a str) -> PResult<ParsedItem<'a>> {
    winnow::combinator::alt((
        entry::parse_entry.map(ParsedItem::Entry),
        parse_string.map(|(k, v)| ParsedItem::String(k, v)),
        parse_preamble.map(ParsedItem::Preamble),
        parse_comment.map(ParsedItem::Comment),
    ))
    .parse_next(input)
}

/// Parse a `@string` definition
fn parse_string<'a>(input: &mut &'a str) -> PResult<(&'a str, crate::Value<'a>)> {
    use winnow::combinator::{alt, delimited, preceded};

    preceded(
        (multispace0, '@', utils::tag_no_case("string"), multispace0),
        alt((
            delimited('{', parse_string_content, '}'),
            delimited('(', parse_string_content, ')'),
        )),
    )
    .parse_next(input)
}

/// Parse `name = value` inside a `@string` definition
fn parse_string_content<'a>(input: &mut &'a str) -> PResult<(&'a str, crate::Value<'a>)> {
    use winnow::combinator::separated_pair;

    separated_pair(
        utils::ws(lexer::identifier),
        utils::ws('='),
        utils::ws(value::parse_value),
    )
    .parse_next(input)
}

/// Parse a `@preamble`
fn parse_preamble<'a>(input: &mut &'a str) -> PResult<crate::Value<'a>> {
    use winnow::combinator::{alt, delimited, preceded};

    preceded(
        (multispace0, '@', utils::tag_no_case("preamble"), multispace0),
        alt((
            delimited('{', utils::ws(value::parse_value), '}'),
            delimited('(', utils::ws(value::parse_value), ')'),
        )),
    )
    .parse_next(input)
}

/// Parse a comment in any of its forms
fn parse_comment<'a>(input: &mut &'a str) -> PResult<&'a str> {
    use winnow::combinator::{delimited, preceded};

    let s: &'a str = *input;

    if s.starts_with('@') {
        return preceded(
            ('@', utils::tag_no_case("comment"), multispace0),
            delimited('{', lexer::balanced_braces, '}'),
        )
        .parse_next(input);
    }

    // `%` line comment
    if let Some(line) = s.strip_prefix('%') {
        let end = memchr::memchr(b'\n', line.as_bytes()).unwrap_or(line.len());
        *input = &line[end..];
        return Ok(&line[..end]);
    }

    // Free text up to the next `@`, or to the end of the document
    let end = memchr::memchr(b'@', s.as_bytes()).unwrap_or(s.len());
    if end == 0 {
        return backtrack();
    }
    *input = &s[end..];
    Ok(&s[..end])
}
