//! Value parsing for BibTeX fields

use super::{backtrack, lexer, PResult};
use crate::model::Value;
use std::borrow::Cow;
use winnow::combinator::alt;
use winnow::prelude::*;

/// Parse a BibTeX value (string, number, variable, or `#` concatenation)
pub fn parse_value<'a>(input: &mut &'a str) -> PResult<Value<'a>> {
    let first = parse_single_value(input)?;
    let mut rest = Vec::new();

    loop {
        let checkpoint: &'a str = *input;
        lexer::skip_whitespace(input);
        let s: &'a str = *input;
        let Some(after_hash) = s.strip_prefix('#') else {
            *input = checkpoint;
            break;
        };
        *input = after_hash;
        lexer::skip_whitespace(input);
        rest.push(parse_single_value(input)?);
    }

    if rest.is_empty() {
        Ok(first)
    } else {
        rest.insert(0, first);
        Ok(Value::Concat(Box::new(rest)))
    }
}

/// Parse a single value component
fn parse_single_value<'a>(input: &mut &'a str) -> PResult<Value<'a>> {
    alt((
        parse_quoted_value,
        parse_braced_value,
        parse_number_value,
        parse_variable_value,
    ))
    .parse_next(input)
}

/// Parse a quoted string value
fn parse_quoted_value<'a>(input: &mut &'a str) -> PResult<Value<'a>> {
    lexer::quoted_string
        .map(|s| Value::Literal(Cow::Borrowed(s)))
        .parse_next(input)
}

/// Parse a braced string value
fn parse_braced_value<'a>(input: &mut &'a str) -> PResult<Value<'a>> {
    let s: &'a str = *input;
    let Some(mut rest) = s.strip_prefix('{') else {
        return backtrack();
    };

    let content = lexer::balanced_braces(&mut rest)?;
    let Some(rest) = rest.strip_prefix('}') else {
        return backtrack();
    };

    *input = rest;
    Ok(Value::Literal(Cow::Borrowed(content)))
}

/// Parse a number value
fn parse_number_value<'a>(input: &mut &'a str) -> PResult<Value<'a>> {
    lexer::number.map(Value::Number).parse_next(input)
}

/// Parse a macro reference
fn parse_variable_value<'a>(input: &mut &'a str) -> PResult<Value<'a>> {
    if input.chars().next().map_or(true, char::is_numeric) {
        return backtrack();
    }

    lexer::identifier
        .map(|name| Value::Variable(Cow::Borrowed(name)))
        .parse_next(input)
}
