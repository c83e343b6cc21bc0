//! Parser utilities

use super::backtrack;
use winnow::ascii::multispace0;
use winnow::error::ContextError;
use winnow::prelude::*;

/// Make a parser whitespace-insensitive
pub fn ws<'a, F, O>(mut parser: F) -> impl Parser<&'a str, O, ContextError>
where
    F: Parser<&'a str, O, ContextError>,
{
    move |input: &mut &'a str| {
        let _ = multispace0.parse_next(input)?;
        let output = parser.parse_next(input)?;
        let _ = multispace0.parse_next(input)?;
        Ok(output)
    }
}

/// Case-insensitive ASCII tag parser
#[must_use]
pub fn tag_no_case<'a>(tag: &'static str) -> impl Parser<&'a str, &'a str, ContextError> {
    move |input: &mut &'a str| {
        let s: &'a str = *input;
        match s.get(..tag.len()) {
            Some(head) if head.eq_ignore_ascii_case(tag) => {
                *input = &s[tag.len()..];
                Ok(head)
            }
            _ => backtrack(),
        }
    }
}

/// Whether an entry type names a BibTeX command rather than a reference
#[must_use]
pub fn is_command(ty: &str) -> bool {
    ["string", "preamble", "comment"]
        .iter()
        .any(|command| ty.eq_ignore_ascii_case(command))
}
