//! # Search/Filter Engine
//!
//! Combines a free-text query and an optional category filter over a snapshot
//! of records. Every call is a full recomputation; the engine only remembers
//! the last visible set so that an unusable pattern leaves the view as it was.
//!
//! Records are never modified here. Highlighting is a presentation step done
//! per cell with [`MatchResult::matcher`] (see [`crate::highlight`]).

use crate::model::{Field, Record};
use crate::query::{compile, Matcher, SearchMode};
use serde::Serialize;

pub const STATUS_ALL: &str = "Showing all records";
pub const STATUS_INVALID: &str = "Invalid search pattern";

/// Outcome of one search/filter pass.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    /// Matches across every displayed cell of the visible rows.
    /// `None` when no text query is in effect.
    pub match_count: Option<usize>,
    pub status_message: String,
    pub visible_records: Vec<Record>,
    /// The matcher used for filtering, kept for per-cell highlighting.
    #[serde(skip)]
    pub matcher: Option<Matcher>,
}

impl MatchResult {
    fn unfiltered(records: &[Record]) -> Self {
        Self {
            match_count: None,
            status_message: STATUS_ALL.to_string(),
            visible_records: records.to_vec(),
            matcher: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct SearchEngine {
    mode: SearchMode,
    previous: Option<Vec<Record>>,
}

impl SearchEngine {
    pub fn new(mode: SearchMode) -> Self {
        Self {
            mode,
            previous: None,
        }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
    }

    pub fn search(&mut self, query: &str, category: Option<&str>, records: &[Record]) -> MatchResult {
        let result = self.evaluate(query, category, records);
        self.previous = Some(result.visible_records.clone());
        result
    }

    fn evaluate(&self, query: &str, category: Option<&str>, records: &[Record]) -> MatchResult {
        let query = query.trim();
        let category = category.map(str::trim).filter(|c| !c.is_empty());
        let query_active = !query.is_empty();

        if !query_active && category.is_none() {
            return MatchResult::unfiltered(records);
        }

        let matcher = if query_active {
            match compile(query, self.mode.resolve(query)) {
                Ok(matcher) => matcher,
                Err(err) => {
                    log::warn!("{}", err);
                    return MatchResult {
                        match_count: None,
                        status_message: STATUS_INVALID.to_string(),
                        visible_records: self
                            .previous
                            .clone()
                            .unwrap_or_else(|| records.to_vec()),
                        matcher: None,
                    };
                }
            }
        } else {
            None
        };

        if matcher.is_none() && category.is_none() {
            return MatchResult::unfiltered(records);
        }

        let visible_records: Vec<Record> = records
            .iter()
            .filter(|record| category.map_or(true, |c| record.tag == c))
            .filter(|record| matcher.as_ref().map_or(true, |m| matches_record(m, record)))
            .cloned()
            .collect();

        match matcher {
            Some(matcher) => {
                let count = count_matches(&matcher, &visible_records);
                MatchResult {
                    match_count: Some(count),
                    status_message: format!("Found {} matches for \"{}\"", count, query),
                    visible_records,
                    matcher: Some(matcher),
                }
            }
            None => MatchResult {
                match_count: None,
                status_message: format!(
                    "Showing {} of {} books",
                    visible_records.len(),
                    records.len()
                ),
                visible_records,
                matcher: None,
            },
        }
    }
}

fn matches_record(matcher: &Matcher, record: &Record) -> bool {
    Field::searchable()
        .iter()
        .any(|field| matcher.is_match(&record.field_text(*field)))
}

/// Total non-overlapping matches over every displayed cell of `records`.
pub fn count_matches(matcher: &Matcher, records: &[Record]) -> usize {
    records
        .iter()
        .flat_map(|record| Field::all().iter().map(|f| record.field_text(*f)))
        .map(|text| matcher.count(&text))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{escape_html, highlight, strip_highlights, HIGHLIGHT_OPEN};

    fn record(id: &str, title: &str, author: &str, pages: u32, tag: &str, date: &str) -> Record {
        Record {
            id: id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            pages,
            tag: tag.to_string(),
            date_added: date.to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    fn catalog() -> Vec<Record> {
        vec![
            record("book_0001", "The Great Gatsby", "F. Scott Fitzgerald", 180, "Classic", "2024-12-01"),
            record("book_0002", "To Kill a Mockingbird", "Harper Lee", 324, "Classic", "2024-12-02"),
            record("book_0003", "1984", "George Orwell", 328, "Dystopian", "2024-12-03"),
            record("book_0004", "The Hobbit", "J.R.R. Tolkien", 310, "Fantasy", "2024-12-04"),
            record("book_0005", "Book (Revised)", "Anon", 100, "Reference", "2024-12-05"),
        ]
    }

    #[test]
    fn empty_query_and_category_show_everything() {
        let mut engine = SearchEngine::default();
        let result = engine.search("", None, &catalog());
        assert_eq!(result.visible_records.len(), 5);
        assert_eq!(result.match_count, None);
        assert_eq!(result.status_message, STATUS_ALL);
    }

    #[test]
    fn gatsby_yields_one_record_one_match() {
        let mut engine = SearchEngine::default();
        let result = engine.search("gatsby", None, &catalog());
        assert_eq!(result.visible_records.len(), 1);
        assert_eq!(result.visible_records[0].id, "book_0001");
        assert_eq!(result.match_count, Some(1));
        assert_eq!(result.status_message, "Found 1 matches for \"gatsby\"");

        let title = highlight(&result.visible_records[0].title, result.matcher.as_ref());
        assert_eq!(title.matches(HIGHLIGHT_OPEN).count(), 1);
    }

    #[test]
    fn match_count_spans_every_displayed_cell() {
        let mut engine = SearchEngine::default();
        // pages and dates are counted but never decide visibility
        let result = engine.search("3", None, &catalog());
        assert!(result.visible_records.is_empty());
        assert_eq!(result.match_count, Some(0));

        let result = engine.search("classic", None, &catalog());
        assert_eq!(result.visible_records.len(), 2);
        assert_eq!(result.match_count, Some(2));

        // "e" is counted in all five cells of each visible row.
        let result = engine.search("e", None, &catalog());
        let expected: usize = result
            .visible_records
            .iter()
            .map(|r| {
                Field::all()
                    .iter()
                    .map(|f| r.field_text(*f).to_lowercase().matches('e').count())
                    .sum::<usize>()
            })
            .sum();
        assert_eq!(result.match_count, Some(expected));
    }

    #[test]
    fn category_only_filter_reports_counts() {
        let mut engine = SearchEngine::default();
        let result = engine.search("", Some("Classic"), &catalog());
        assert_eq!(result.visible_records.len(), 2);
        assert_eq!(result.match_count, None);
        assert_eq!(result.status_message, "Showing 2 of 5 books");
    }

    #[test]
    fn category_filter_is_exact() {
        let mut engine = SearchEngine::default();
        let result = engine.search("", Some("classic"), &catalog());
        assert!(result.visible_records.is_empty());
        assert_eq!(result.status_message, "Showing 0 of 5 books");
    }

    #[test]
    fn query_and_category_intersect() {
        let mut engine = SearchEngine::default();
        let result = engine.search("the", Some("Fantasy"), &catalog());
        assert_eq!(result.visible_records.len(), 1);
        assert_eq!(result.visible_records[0].title, "The Hobbit");
    }

    #[test]
    fn unbalanced_parens_fall_back_to_literal() {
        let mut engine = SearchEngine::default();
        let result = engine.search("Book (Revised", None, &catalog());
        assert_eq!(result.visible_records.len(), 1);
        assert_eq!(result.visible_records[0].id, "book_0005");
        assert_eq!(result.match_count, Some(1));
    }

    #[test]
    fn literal_mode_finds_parenthesised_titles() {
        let mut engine = SearchEngine::new(SearchMode::Literal);
        let result = engine.search("(Revised)", None, &catalog());
        assert_eq!(result.visible_records.len(), 1);
    }

    #[test]
    fn advanced_mode_uses_patterns() {
        let mut engine = SearchEngine::default();
        let result = engine.search("h[ao]", None, &catalog());
        let titles: Vec<&str> = result
            .visible_records
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, vec!["To Kill a Mockingbird", "The Hobbit"]);
    }

    #[test]
    fn empty_matching_pattern_is_no_filter() {
        let mut engine = SearchEngine::default();
        let result = engine.search("()", None, &catalog());
        assert_eq!(result.visible_records.len(), 5);
        assert_eq!(result.status_message, STATUS_ALL);

        let result = engine.search("x*", Some("Classic"), &catalog());
        assert_eq!(result.visible_records.len(), 2);
        assert_eq!(result.status_message, "Showing 2 of 5 books");
    }

    #[test]
    fn clearing_the_query_restores_plain_cells() {
        let mut engine = SearchEngine::default();
        let records = catalog();
        let searched = engine.search("o", None, &records);
        let marked: Vec<String> = searched
            .visible_records
            .iter()
            .map(|r| highlight(&r.author, searched.matcher.as_ref()))
            .collect();

        let cleared = engine.search("", None, &records);
        assert!(cleared.matcher.is_none());
        for (record, cell) in searched.visible_records.iter().zip(&marked) {
            assert_eq!(highlight(&record.author, cleared.matcher.as_ref()), escape_html(&record.author));
            assert_eq!(strip_highlights(cell), escape_html(&record.author));
        }
        assert_eq!(cleared.visible_records, records);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let mut engine = SearchEngine::default();
        let result = engine.search("  gatsby ", None, &catalog());
        assert_eq!(result.visible_records.len(), 1);
        assert_eq!(result.match_count, Some(1));
        assert_eq!(result.status_message, "Found 1 matches for \"gatsby\"");
    }

    #[test]
    fn uncompilable_query_keeps_previous_view() {
        let mut engine = SearchEngine::default();
        let records = catalog();
        let before = engine.search("gatsby", None, &records);

        // too large for the regex size limit, even escaped
        let huge = "ab".repeat(2_000_000);
        let result = engine.search(&huge, None, &records);
        assert_eq!(result.status_message, STATUS_INVALID);
        assert_eq!(result.match_count, None);
        assert!(result.matcher.is_none());
        assert_eq!(result.visible_records, before.visible_records);
    }

    #[test]
    fn uncompilable_first_query_shows_everything() {
        let mut engine = SearchEngine::default();
        let result = engine.search(&"ab".repeat(2_000_000), None, &catalog());
        assert_eq!(result.status_message, STATUS_INVALID);
        assert_eq!(result.visible_records.len(), 5);
    }

    #[test]
    fn search_never_mutates_records() {
        let mut engine = SearchEngine::default();
        let records = catalog();
        let before = records.clone();
        engine.search("the", Some("Classic"), &records);
        assert_eq!(records, before);
    }
}
