use crate::commands::list::{sort_records, SortOrder};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::search::{SearchEngine, STATUS_INVALID};
use crate::store::DataStore;

use super::helpers::indexed_records;

/// Runs the engine over the current catalog. Listed rows keep their stored
/// display index so they can be fed straight to `view`/`edit`/`delete`.
/// `sort` reorders the visible rows only.
pub fn run<S: DataStore>(
    store: &S,
    engine: &mut SearchEngine,
    query: &str,
    category: Option<&str>,
    sort: Option<SortOrder>,
) -> Result<CmdResult> {
    let indexed = indexed_records(store)?;
    let records: Vec<_> = indexed.iter().map(|dr| dr.record.clone()).collect();
    let outcome = engine.search(query, category, &records);

    let mut listed: Vec<_> = outcome
        .visible_records
        .iter()
        .filter_map(|visible| indexed.iter().find(|dr| dr.record.id == visible.id))
        .cloned()
        .collect();
    if let Some(order) = sort {
        sort_records(&mut listed, order);
    }

    let mut result = CmdResult::default().with_listed_records(listed);
    let message = if outcome.status_message == STATUS_INVALID {
        CmdMessage::warning(outcome.status_message.clone())
    } else {
        CmdMessage::info(outcome.status_message.clone())
    };
    result.add_message(message);
    Ok(result.with_match_result(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::index::DisplayIndex;
    use crate::query::SearchMode;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn lists_matches_with_stored_indexes() {
        let store = StoreFixture::new().with_sample_catalog().store;
        let mut engine = SearchEngine::default();
        let result = run(&store, &mut engine, "tolkien", None, None).unwrap();

        assert_eq!(result.listed_records.len(), 1);
        assert_eq!(result.listed_records[0].index, DisplayIndex(3));
        let outcome = result.match_result.unwrap();
        assert_eq!(outcome.match_count, Some(1));
        assert_eq!(result.messages[0].content, "Found 1 matches for \"tolkien\"");
    }

    #[test]
    fn category_only_lists_that_tag() {
        let store = StoreFixture::new().with_sample_catalog().store;
        let mut engine = SearchEngine::new(SearchMode::Literal);
        let result = run(&store, &mut engine, "", Some("Fantasy"), None).unwrap();
        assert_eq!(result.listed_records.len(), 1);
        assert_eq!(result.messages[0].content, "Showing 1 of 5 books");
    }

    #[test]
    fn sorts_only_the_visible_rows() {
        let store = StoreFixture::new().with_sample_catalog().store;
        let mut engine = SearchEngine::default();
        let order = "pages-desc".parse().unwrap();
        let result = run(&store, &mut engine, "the", None, Some(order)).unwrap();

        let rows: Vec<(usize, &str)> = result
            .listed_records
            .iter()
            .map(|dr| (dr.index.0, dr.record.title.as_str()))
            .collect();
        assert_eq!(rows, vec![(3, "The Hobbit"), (1, "The Great Gatsby")]);
    }

    #[test]
    fn invalid_pattern_is_a_warning_and_keeps_rows() {
        let store = StoreFixture::new().with_sample_catalog().store;
        let mut engine = SearchEngine::default();
        let first = run(&store, &mut engine, "gatsby", None, None).unwrap();

        let result = run(&store, &mut engine, &"ab".repeat(2_000_000), None, None).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(result.messages[0].content, STATUS_INVALID);
        assert_eq!(result.match_result.unwrap().match_count, None);
        assert_eq!(result.listed_records.len(), first.listed_records.len());
        assert_eq!(result.listed_records[0].index, DisplayIndex(1));
    }
}
