//! Entry parsing for BibTeX

use super::{backtrack, lexer, utils, value, PResult};
use crate::model::{Entry, Field};
use winnow::prelude::*;
use winnow::{ascii::multispace0, combinator::preceded};

/// Parse a bibliography entry
///
/// `@string`, `@preamble` and `@comment` are not entries and backtrack.
pub fn parse_entry<'a>(input: &mut &'a str) -> PResult<Entry<'a>> {
    preceded((multispace0, '@'), parse_entry_content).parse_next(input)
}

/// Parse the content of an entry after the @
fn parse_entry_content<'a>(input: &mut &'a str) -> PResult<Entry<'a>> {
    let ty = lexer::identifier.parse_next(input)?;
    if utils::is_command(ty) {
        return backtrack();
    }

    lexer::skip_whitespace(input);

    let s: &'a str = *input;
    let close = match s.as_bytes().first() {
        Some(b'{') => '}',
        Some(b'(') => ')',
        _ => return backtrack(),
    };
    *input = &s[1..];

    let entry = parse_entry_body(input, ty, close)?;
    utils::ws(close).parse_next(input)?;
    Ok(entry)
}

/// Parse the body of an entry (key and fields)
fn parse_entry_body<'a>(input: &mut &'a str, ty: &'a str, close: char) -> PResult<Entry<'a>> {
    let key = utils::ws(lexer::citation_key).parse_next(input)?;
    let mut entry = Entry::new(ty, key);

    // `@misc{key}` carries no fields at all
    let s: &'a str = *input;
    let Some(rest) = s.strip_prefix(',') else {
        return if s.starts_with(close) {
            Ok(entry)
        } else {
            backtrack()
        };
    };
    *input = rest;

    loop {
        lexer::skip_whitespace(input);
        if input.is_empty() || input.starts_with(close) {
            break;
        }

        entry.add_field(parse_field(input)?);

        lexer::skip_whitespace(input);
        let s: &'a str = *input;
        match s.strip_prefix(',') {
            Some(rest) => *input = rest,
            None if s.starts_with(close) => break,
            None => return backtrack(),
        }
    }

    Ok(entry)
}

/// Parse a single field (name = value)
fn parse_field<'a>(input: &mut &'a str) -> PResult<Field<'a>> {
    let name = utils::ws(lexer::identifier).parse_next(input)?;
    utils::ws('=').parse_next(input)?;
    let value = utils::ws(value::parse_value).parse_next(input)?;

    Ok(Field::new(name, value))
}
