//! # Highlighter
//!
//! Renders text with search matches marked, safe for embedding in HTML.
//!
//! Matches are located on the raw text, then every piece (plain runs and
//! matched runs alike) is escaped on its own. A match therefore can never
//! split an entity such as `&amp;`, and no user text is ever interpreted as
//! markup. The only tags in the output are the highlight markers themselves,
//! which is what makes [`strip_highlights`] an exact inverse.

use crate::query::Matcher;
use serde::Serialize;

pub const HIGHLIGHT_OPEN: &str = r#"<mark class="search-highlight" aria-label="Search match">"#;
pub const HIGHLIGHT_CLOSE: &str = "</mark>";

/// A piece of highlighted text, either plain or part of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum MatchSegment {
    Plain(String),
    Match(String),
}

impl MatchSegment {
    pub fn text(&self) -> &str {
        match self {
            MatchSegment::Plain(t) | MatchSegment::Match(t) => t,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, MatchSegment::Match(_))
    }
}

/// Escapes `& < > " '`, ampersand first.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Splits raw `text` into plain and matched segments. Nothing is escaped.
pub fn highlight_segments(text: &str, matcher: Option<&Matcher>) -> Vec<MatchSegment> {
    let Some(matcher) = matcher else {
        return vec![MatchSegment::Plain(text.to_string())];
    };

    let mut segments = Vec::new();
    let mut cursor = 0;
    for span in matcher.find_spans(text) {
        if span.start > cursor {
            segments.push(MatchSegment::Plain(text[cursor..span.start].to_string()));
        }
        segments.push(MatchSegment::Match(text[span.clone()].to_string()));
        cursor = span.end;
    }
    if cursor < text.len() || segments.is_empty() {
        segments.push(MatchSegment::Plain(text[cursor..].to_string()));
    }
    segments
}

/// Escapes `text` and wraps each match in a highlight marker.
pub fn highlight(text: &str, matcher: Option<&Matcher>) -> String {
    if text.is_empty() || matcher.is_none() {
        return escape_html(text);
    }

    highlight_segments(text, matcher)
        .iter()
        .map(|segment| match segment {
            MatchSegment::Plain(t) => escape_html(t),
            MatchSegment::Match(t) => {
                format!("{}{}{}", HIGHLIGHT_OPEN, escape_html(t), HIGHLIGHT_CLOSE)
            }
        })
        .collect()
}

/// Removes every highlight marker, leaving the escaped text underneath.
pub fn strip_highlights(markup: &str) -> String {
    markup.replace(HIGHLIGHT_OPEN, "").replace(HIGHLIGHT_CLOSE, "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{compile, QueryMode};

    fn literal(query: &str) -> Matcher {
        compile(query, QueryMode::Literal).unwrap().unwrap()
    }

    #[test]
    fn escapes_all_five_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn escape_does_not_double_escape_inserted_entities() {
        assert_eq!(escape_html("<&>"), "&lt;&amp;&gt;");
    }

    #[test]
    fn no_matcher_only_escapes() {
        let text = "Pride & <Prejudice>";
        assert_eq!(highlight(text, None), escape_html(text));
        assert_eq!(highlight("", Some(&literal("x"))), "");
    }

    #[test]
    fn wraps_single_match() {
        let m = literal("gatsby");
        let out = highlight("The Great Gatsby", Some(&m));
        assert_eq!(
            out,
            format!("The Great {}Gatsby{}", HIGHLIGHT_OPEN, HIGHLIGHT_CLOSE)
        );
        assert_eq!(out.matches(HIGHLIGHT_OPEN).count(), 1);
    }

    #[test]
    fn wraps_every_match() {
        let m = literal("o");
        let out = highlight("Orwell, George", Some(&m));
        assert_eq!(out.matches(HIGHLIGHT_OPEN).count(), 2);
    }

    #[test]
    fn matched_text_is_escaped_inside_marker() {
        let m = literal("&");
        let out = highlight("Tom & Jerry", Some(&m));
        assert_eq!(
            out,
            format!("Tom {}&amp;{} Jerry", HIGHLIGHT_OPEN, HIGHLIGHT_CLOSE)
        );
    }

    #[test]
    fn matches_never_split_entities() {
        let m = literal("amp");
        let out = highlight("A & B", Some(&m));
        assert_eq!(out, "A &amp; B");
    }

    #[test]
    fn markup_in_text_stays_inert() {
        let m = literal("script");
        let out = highlight("<script>alert(1)</script>", Some(&m));
        assert!(!out.contains("<script>"));
        assert_eq!(out.matches(HIGHLIGHT_OPEN).count(), 2);
    }

    #[test]
    fn reusing_matcher_across_fields_finds_every_match() {
        let m = literal("an");
        let fields = ["Jane Austen", "Romance", "Jane Austen"];
        let counts: Vec<usize> = fields
            .iter()
            .map(|f| highlight(f, Some(&m)).matches(HIGHLIGHT_OPEN).count())
            .collect();
        assert_eq!(counts, vec![1, 1, 1]);
    }

    #[test]
    fn stripping_restores_escaped_text() {
        let m = literal("e");
        for text in ["The Hobbit", "Pride & Prejudice", "\"Quoted\" <tag>", "xyz"] {
            let marked = highlight(text, Some(&m));
            assert_eq!(strip_highlights(&marked), escape_html(text));
        }
    }

    #[test]
    fn segments_cover_the_whole_text() {
        let m = literal("bit");
        let segments = highlight_segments("The Hobbit bits", Some(&m));
        assert_eq!(
            segments,
            vec![
                MatchSegment::Plain("The Hob".into()),
                MatchSegment::Match("bit".into()),
                MatchSegment::Plain(" ".into()),
                MatchSegment::Match("bit".into()),
                MatchSegment::Plain("s".into()),
            ]
        );
        let joined: String = segments.iter().map(MatchSegment::text).collect();
        assert_eq!(joined, "The Hobbit bits");
    }

    #[test]
    fn segments_without_match_are_one_plain_run() {
        let m = literal("zzz");
        assert_eq!(
            highlight_segments("Dune", Some(&m)),
            vec![MatchSegment::Plain("Dune".into())]
        );
        assert_eq!(
            highlight_segments("", None),
            vec![MatchSegment::Plain(String::new())]
        );
    }
}
