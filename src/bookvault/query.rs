//! # Query Compiler
//!
//! Turns raw search text into a [`Matcher`]. Two interpretations exist:
//!
//! - **Literal**: every pattern metacharacter is escaped, so the query finds
//!   itself anywhere in the text.
//! - **Advanced**: the query is used as a regular expression.
//!
//! With [`SearchMode::Auto`] the choice is made by sniffing for `* ? [ (`.
//! Advanced patterns that fail to compile fall back to literal compilation of
//! the same text. Every matcher is case-insensitive and finds all
//! non-overlapping matches.
//!
//! A pattern that matches the empty string is treated as no filter: it would
//! otherwise select every record while highlighting nothing.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use thiserror::Error;

/// Characters that switch [`SearchMode::Auto`] into advanced interpretation.
pub const ADVANCED_MARKERS: [char; 4] = ['*', '?', '[', '('];

/// How a query should be interpreted, as chosen by the user or config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Auto,
    Literal,
    Advanced,
}

impl SearchMode {
    pub fn resolve(self, query: &str) -> QueryMode {
        match self {
            SearchMode::Auto => QueryMode::detect(query),
            SearchMode::Literal => QueryMode::Literal,
            SearchMode::Advanced => QueryMode::Advanced,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Auto => "auto",
            SearchMode::Literal => "literal",
            SearchMode::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(SearchMode::Auto),
            "literal" => Ok(SearchMode::Literal),
            "advanced" | "regex" => Ok(SearchMode::Advanced),
            _ => Err(format!(
                "Invalid search mode '{}' (expected auto, literal or advanced)",
                s
            )),
        }
    }
}

/// The interpretation actually applied to a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryMode {
    Literal,
    Advanced,
}

impl QueryMode {
    pub fn detect(query: &str) -> Self {
        if query.contains(&ADVANCED_MARKERS[..]) {
            QueryMode::Advanced
        } else {
            QueryMode::Literal
        }
    }
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("invalid search pattern {query:?}: {source}")]
    InvalidPattern {
        query: String,
        #[source]
        source: regex::Error,
    },
}

/// A compiled, reusable, case-insensitive matcher.
///
/// Every scan starts from the beginning of the text it is given, so one
/// matcher can be applied to any number of fields.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
    mode: QueryMode,
}

impl Matcher {
    /// The interpretation that produced this matcher (literal after a fallback).
    pub fn mode(&self) -> QueryMode {
        self.mode
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Byte ranges of every non-empty, non-overlapping match in `text`.
    pub fn find_spans(&self, text: &str) -> Vec<Range<usize>> {
        self.regex
            .find_iter(text)
            .filter(|m| !m.is_empty())
            .map(|m| m.range())
            .collect()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.find_iter(text).any(|m| !m.is_empty())
    }

    pub fn count(&self, text: &str) -> usize {
        self.regex.find_iter(text).filter(|m| !m.is_empty()).count()
    }
}

fn build(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Compiles `query` under the given interpretation.
///
/// Returns `Ok(None)` for blank queries and for patterns that match the empty
/// string, and `Err` only when even the literal form cannot be compiled.
pub fn compile(query: &str, mode: QueryMode) -> Result<Option<Matcher>, QueryError> {
    if query.trim().is_empty() {
        return Ok(None);
    }

    let compiled = match mode {
        QueryMode::Literal => compile_literal(query)?,
        QueryMode::Advanced => match build(query) {
            Ok(regex) => Matcher {
                regex,
                mode: QueryMode::Advanced,
            },
            Err(err) => {
                log::warn!(
                    "advanced pattern {:?} failed to compile ({}), falling back to literal search",
                    query,
                    err
                );
                compile_literal(query)?
            }
        },
    };

    if compiled.regex.is_match("") {
        log::debug!("pattern {:?} matches empty text, treating as no filter", query);
        return Ok(None);
    }

    Ok(Some(compiled))
}

fn compile_literal(query: &str) -> Result<Matcher, QueryError> {
    build(&regex::escape(query))
        .map(|regex| Matcher {
            regex,
            mode: QueryMode::Literal,
        })
        .map_err(|source| QueryError::InvalidPattern {
            query: query.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(query: &str, mode: QueryMode) -> Matcher {
        compile(query, mode).unwrap().expect("expected a matcher")
    }

    #[test]
    fn blank_queries_compile_to_no_filter() {
        assert!(compile("", QueryMode::Literal).unwrap().is_none());
        assert!(compile("   ", QueryMode::Advanced).unwrap().is_none());
    }

    #[test]
    fn detects_advanced_markers() {
        assert_eq!(QueryMode::detect("gatsby"), QueryMode::Literal);
        assert_eq!(QueryMode::detect("gat.by"), QueryMode::Literal);
        assert_eq!(QueryMode::detect("gat*"), QueryMode::Advanced);
        assert_eq!(QueryMode::detect("colou?r"), QueryMode::Advanced);
        assert_eq!(QueryMode::detect("[a-z]"), QueryMode::Advanced);
        assert_eq!(QueryMode::detect("Book (Revised)"), QueryMode::Advanced);
    }

    #[test]
    fn literal_mode_escapes_metacharacters() {
        let m = matcher("J.R.R.", QueryMode::Literal);
        assert!(m.is_match("J.R.R. Tolkien"));
        assert!(!m.is_match("JxRxRx Tolkien"));
    }

    #[test]
    fn matching_is_case_insensitive_and_global() {
        let m = matcher("the", QueryMode::Literal);
        assert_eq!(m.count("The Theory of the Leisure Class"), 3);
    }

    #[test]
    fn advanced_mode_uses_pattern_semantics() {
        let m = matcher("colou?r", QueryMode::Advanced);
        assert_eq!(m.mode(), QueryMode::Advanced);
        assert!(m.is_match("Color"));
        assert!(m.is_match("COLOUR"));
    }

    #[test]
    fn invalid_advanced_pattern_falls_back_to_literal() {
        let m = matcher("Book (Revised", QueryMode::Advanced);
        assert_eq!(m.mode(), QueryMode::Literal);
        assert!(m.is_match("The Book (Revised edition)"));
        assert!(!m.is_match("The Book Revised"));
    }

    #[test]
    fn lone_star_falls_back_to_literal_star() {
        let m = matcher("*", QueryMode::Advanced);
        assert_eq!(m.count("5 * 3 * 2"), 2);
    }

    #[test]
    fn empty_matching_patterns_are_no_filter() {
        assert!(compile("()", QueryMode::Advanced).unwrap().is_none());
        assert!(compile("a*", QueryMode::Advanced).unwrap().is_none());
        assert!(compile("x?", QueryMode::Advanced).unwrap().is_none());
    }

    #[test]
    fn spans_reset_between_texts() {
        let m = matcher("an", QueryMode::Literal);
        assert_eq!(m.find_spans("Jane Austen"), vec![1..3]);
        assert_eq!(m.find_spans("Anna"), vec![0..2]);
        assert_eq!(m.find_spans("Jane Austen"), vec![1..3]);
    }

    #[test]
    fn search_mode_parses_and_resolves() {
        assert_eq!("Literal".parse::<SearchMode>(), Ok(SearchMode::Literal));
        assert_eq!("regex".parse::<SearchMode>(), Ok(SearchMode::Advanced));
        assert!("fuzzy".parse::<SearchMode>().is_err());
        assert_eq!(SearchMode::Literal.resolve("(x)"), QueryMode::Literal);
        assert_eq!(SearchMode::Auto.resolve("(x)"), QueryMode::Advanced);
    }
}
