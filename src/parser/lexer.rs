//! Lexical analysis for BibTeX

use super::{backtrack, PResult};
use winnow::prelude::*;
use winnow::{
    ascii::digit1,
    combinator::{alt, opt},
    token::take_while,
};

/// Parse an identifier (letters, numbers, underscores, hyphens, colons, dots)
pub fn identifier<'a>(input: &mut &'a str) -> PResult<&'a str> {
    take_while(1.., |c: char| {
        c.is_alphanumeric() || c == '_' || c == '-' || c == ':' || c == '.'
    })
    .parse_next(input)
}

/// Parse a citation key, which may be empty
///
/// Keys run until whitespace or a character that ends the key or the entry.
pub fn citation_key<'a>(input: &mut &'a str) -> PResult<&'a str> {
    take_while(0.., |c: char| {
        !c.is_whitespace() && !matches!(c, ',' | '{' | '}' | ')' | '"' | '=' | '#' | '%')
    })
    .parse_next(input)
}

/// Parse the content of a braced group, stopping before the closing `}`
///
/// A backslash hides the byte after it from the depth count.
pub fn balanced_braces<'a>(input: &mut &'a str) -> PResult<&'a str> {
    let s: &'a str = *input;
    let bytes = s.as_bytes();
    let mut depth = 0usize;
    let mut pos = 0;

    while pos < bytes.len() {
        let Some(offset) = memchr::memchr3(b'{', b'}', b'\\', &bytes[pos..]) else {
            break;
        };
        pos += offset;

        match bytes[pos] {
            b'{' => depth += 1,
            b'}' if depth == 0 => {
                *input = &s[pos..];
                return Ok(&s[..pos]);
            }
            b'}' => depth -= 1,
            _ => pos += 1,
        }
        pos += 1;
    }

    backtrack()
}

/// Parse a quoted string "...", returning the text between the quotes
///
/// Quotes inside a braced group do not terminate the string. Braces must
/// balance, as they would inside a braced value.
pub fn quoted_string<'a>(input: &mut &'a str) -> PResult<&'a str> {
    let s: &'a str = *input;
    let bytes = s.as_bytes();

    if bytes.first() != Some(&b'"') {
        return backtrack();
    }

    let mut pos = 1;
    let mut brace_depth = 0usize;

    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'"' if brace_depth == 0 => {
                *input = &s[pos + 1..];
                return Ok(&s[1..pos]);
            }
            b'{' => {
                brace_depth += 1;
                pos += 1;
            }
            b'}' => {
                let Some(depth) = brace_depth.checked_sub(1) else {
                    return backtrack();
                };
                brace_depth = depth;
                pos += 1;
            }
            _ => pos += 1,
        }
    }

    backtrack()
}

/// Parse a number (integer)
pub fn number(input: &mut &str) -> PResult<i64> {
    let sign = opt(alt(('+', '-'))).parse_next(input)?;
    let digits = digit1.parse_next(input)?;

    let Ok(num) = digits.parse::<i64>() else {
        return backtrack();
    };

    Ok(if sign == Some('-') { -num } else { num })
}

/// Skip ASCII whitespace
pub fn skip_whitespace(input: &mut &str) {
    *input = input.trim_start_matches([' ', '\t', '\n', '\r']);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier() {
        let mut input = "hello-world_123:test.com xxx";
        let result = identifier(&mut input).unwrap();
        assert_eq!(result, "hello-world_123:test.com");
        assert_eq!(input, " xxx");
    }

    #[test]
    fn test_citation_key() {
        let mut input = "smith/2024+ml, title";
        assert_eq!(citation_key(&mut input).unwrap(), "smith/2024+ml");
        assert_eq!(input, ", title");

        let mut input = ", title";
        assert_eq!(citation_key(&mut input).unwrap(), "");
    }

    #[test]
    fn test_balanced_braces() {
        let mut input = "hello {nested {braces}} world} xxx";
        let result = balanced_braces(&mut input).unwrap();
        assert_eq!(result, "hello {nested {braces}} world");
        assert_eq!(input, "} xxx");
    }

    #[test]
    fn test_balanced_braces_escaped_and_unterminated() {
        let mut input = r"a \} b} rest";
        assert_eq!(balanced_braces(&mut input).unwrap(), r"a \} b");

        let mut input = "never {closed";
        assert!(balanced_braces(&mut input).is_err());

        let mut input = "trailing backslash \\";
        assert!(balanced_braces(&mut input).is_err());
    }

    #[test]
    fn test_quoted_string() {
        let mut input = r#""hello \"world\"" xxx"#;
        let result = quoted_string(&mut input).unwrap();
        assert_eq!(result, r#"hello \"world\""#);
        assert_eq!(input, " xxx");

        let mut input = r#""say {"hi"} there" xxx"#;
        let result = quoted_string(&mut input).unwrap();
        assert_eq!(result, r#"say {"hi"} there"#);
    }

    #[test]
    fn test_quoted_string_unbalanced_braces() {
        let mut input = r#""a } b" xxx"#;
        assert!(quoted_string(&mut input).is_err());

        let mut input = r#""a { b" xxx"#;
        assert!(quoted_string(&mut input).is_err());

        let mut input = r#""a \} b" xxx"#;
        assert_eq!(quoted_string(&mut input).unwrap(), r"a \} b");
    }

    #[test]
    fn test_number() {
        let mut input = "42 xxx";
        assert_eq!(number(&mut input).unwrap(), 42);

        let mut input = "-42 xxx";
        assert_eq!(number(&mut input).unwrap(), -42);

        let mut input = "+42 xxx";
        assert_eq!(number(&mut input).unwrap(), 42);
    }
}
