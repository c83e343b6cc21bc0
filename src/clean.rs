//! Removal of BibTeX escaping, braces and LaTeX markup from free text
//!
//! A single cleaning pass runs these steps in order:
//!
//! 1. strip one quote character from each end;
//! 2. collapse a `{{X}}` wrapper to `X`, or to `{X}` after a command name;
//! 3. reduce innermost brace groups `{X}` to `X` until nothing changes,
//!    resolving `\textbf{X}`, `\emph{X}` (to `X`) and `\cite{X}` (to
//!    nothing) as soon as their argument is an innermost group;
//! 4. drop stray braces;
//! 5. turn `~` into a space;
//! 6. drop backslashes;
//! 7. collapse whitespace runs and trim.
//!
//! [`clean`] repeats the pass until the text stops changing, so cleaning
//! clean text is a no-op.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::borrow::Cow;

lazy_static! {
    static ref EDGE_QUOTES: Regex = Regex::new(r#"^["']|["']$"#).unwrap();
    static ref DOUBLE_BRACED: Regex = Regex::new(r"(\\[a-zA-Z]+)?\{\{([^}]*)\}\}").unwrap();
    static ref INNERMOST_GROUP: Regex = Regex::new(r"\{([^{}]*)\}").unwrap();
    static ref FORMAT_COMMAND: Regex = Regex::new(r"\\(?:textbf|emph)\{([^{}]*)\}").unwrap();
    static ref CITE_COMMAND: Regex = Regex::new(r"\\cite\{[^{}]*\}").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Clean a raw BibTeX field value for display
///
/// Never fails; empty input gives an empty string.
///
/// ```
/// use bibtex_normalizer::clean;
///
/// assert_eq!(clean("{{Deep Learning}}"), "Deep Learning");
/// assert_eq!(clean(r"\textbf{Bold} text"), "Bold text");
/// assert_eq!(clean("A~B"), "A B");
/// ```
#[must_use]
pub fn clean(raw: &str) -> String {
    let mut current = clean_pass(raw);

    // A pass over already-cleaned text can only remove edge quotes.
    for _ in 0..=current.len() {
        let next = clean_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }

    current
}

/// Clean an optional value, treating an empty result as absent
pub(crate) fn clean_optional(raw: Option<&str>) -> Option<String> {
    raw.map(clean).filter(|s| !s.is_empty())
}

fn clean_pass(input: &str) -> String {
    let unquoted = EDGE_QUOTES.replace_all(input, "");
    let unwrapped = DOUBLE_BRACED.replace_all(&unquoted, |caps: &Captures<'_>| match caps.get(1) {
        // `\cmd{{X}}` becomes `\cmd{X}`
        Some(command) => format!("{}{{{}}}", command.as_str(), &caps[2]),
        None => caps[2].to_string(),
    });
    let mut text = reduce_braces(unwrapped.into_owned());

    text.retain(|c| c != '{' && c != '}');
    let text = text.replace('~', " ");
    let text: String = text.chars().filter(|&c| c != '\\').collect();

    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Strip innermost brace groups until none are left or nothing changes
fn reduce_braces(mut text: String) -> String {
    // Every productive round removes at least two characters.
    let max_rounds = text.len() / 2 + 1;

    for _ in 0..max_rounds {
        if !(text.contains('{') && text.contains('}')) {
            break;
        }

        if let Cow::Owned(resolved) = resolve_commands(&text) {
            text = resolved;
            continue;
        }

        let reduced = INNERMOST_GROUP.replace_all(&text, "$1");
        if reduced.len() == text.len() {
            break;
        }
        text = reduced.into_owned();
    }

    text
}

/// Resolve formatting and citation commands whose argument has no braces
fn resolve_commands(text: &str) -> Cow<'_, str> {
    match FORMAT_COMMAND.replace_all(text, "$1") {
        Cow::Borrowed(_) => CITE_COMMAND.replace_all(text, ""),
        Cow::Owned(formatted) => Cow::Owned(CITE_COMMAND.replace_all(&formatted, "").into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_examples() {
        assert_eq!(clean("{{Deep Learning}}"), "Deep Learning");
        assert_eq!(clean(r"\textbf{Bold} text"), "Bold text");
        assert_eq!(clean("A~B"), "A B");
    }

    #[test]
    fn test_clean_empty() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("   "), "");
        assert_eq!(clean("{}"), "");
    }

    #[test]
    fn test_clean_nested_groups() {
        assert_eq!(clean("A {Study} of {{B}ERT {M}odels}"), "A Study of BERT Models");
        assert_eq!(clean(r"\emph{a \textbf{b}} c"), "a b c");
    }

    #[test]
    fn test_clean_double_braced_command_arguments() {
        assert_eq!(clean(r"\emph{{BERT}} models"), "BERT models");
        assert_eq!(clean(r"\textbf{{Deep}} Learning"), "Deep Learning");
        assert_eq!(clean(r"See \cite{{k}} here"), "See here");
        assert_eq!(clean(r"\unknown{{X}}"), "unknownX");
    }

    #[test]
    fn test_clean_removes_citations() {
        assert_eq!(clean(r"As shown in \cite{smith2020}, results hold"), "As shown in , results hold");
        assert_eq!(clean(r"Follow-up~\cite{a, b}"), "Follow-up");
    }

    #[test]
    fn test_clean_quotes_and_escapes() {
        assert_eq!(clean(r#""Quoted title""#), "Quoted title");
        assert_eq!(clean(r"Fish \& Chips"), "Fish & Chips");
        assert_eq!(clean("line\n  broken\ttitle"), "line broken title");
    }

    #[test]
    fn test_clean_unbalanced_braces_terminates() {
        assert_eq!(clean("{{{unclosed"), "unclosed");
        assert_eq!(clean("closed}}}"), "closed");
        assert_eq!(clean("}{ odd }{"), "odd");
    }

    #[test]
    fn test_clean_is_idempotent_on_examples() {
        for raw in [
            "''double quoted''",
            "{'}inner quote",
            r"\textbf{Bold} text",
            "plain",
        ] {
            let once = clean(raw);
            assert_eq!(clean(&once), once, "input: {raw}");
        }
    }

    #[test]
    fn test_clean_optional() {
        assert_eq!(clean_optional(None), None);
        assert_eq!(clean_optional(Some("{}")), None);
        assert_eq!(clean_optional(Some("{Nature}")), Some("Nature".to_string()));
    }
}
