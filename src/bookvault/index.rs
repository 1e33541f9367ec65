//! Display indexes and record selectors.
//!
//! Users refer to records by their 1-based position in the catalog (`3`), by
//! an inclusive range of positions (`2-4`), or by the stable record id
//! (`book_0001`). Positions follow store order, so they stay put across
//! searches and sorting: `view 3` always means the third record stored.

use crate::model::Record;
use serde::Serialize;
use std::str::FromStr;

/// A user-facing, 1-based position in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DisplayIndex(pub usize);

impl std::fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DisplayIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<usize>() {
            Ok(0) => Err("Invalid index: indexes start at 1".to_string()),
            Ok(n) => Ok(DisplayIndex(n)),
            Err(_) => Err(format!("Invalid index format: {}", s)),
        }
    }
}

/// How a user picked a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSelector {
    Index(DisplayIndex),
    Id(String),
}

impl std::fmt::Display for RecordSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordSelector::Index(idx) => write!(f, "{}", idx),
            RecordSelector::Id(id) => write!(f, "{}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRecord {
    pub index: DisplayIndex,
    #[serde(flatten)]
    pub record: Record,
}

/// Numbers records in store order, starting at 1.
pub fn index_records(records: Vec<Record>) -> Vec<DisplayRecord> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| DisplayRecord {
            index: DisplayIndex(i + 1),
            record,
        })
        .collect()
}

/// Parses `"3"` or an inclusive range `"3-5"`.
pub fn parse_index_or_range(s: &str) -> Result<Vec<DisplayIndex>, String> {
    if let Some((start, end)) = s.split_once('-') {
        if !start.is_empty() {
            let start = DisplayIndex::from_str(start)?;
            let end = DisplayIndex::from_str(end)?;
            if start > end {
                return Err(format!(
                    "Invalid range: start ({}) must be <= end ({})",
                    start, end
                ));
            }
            return Ok((start.0..=end.0).map(DisplayIndex).collect());
        }
    }

    DisplayIndex::from_str(s).map(|idx| vec![idx])
}

/// Turns raw user inputs into selectors. Anything that is not an index or a
/// range is taken as a record id.
pub fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Vec<RecordSelector> {
    let mut selectors = Vec::new();
    for input in inputs {
        let input = input.as_ref().trim();
        match parse_index_or_range(input) {
            Ok(indexes) => selectors.extend(indexes.into_iter().map(RecordSelector::Index)),
            Err(_) => selectors.push(RecordSelector::Id(input.to_string())),
        }
    }
    selectors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(title: &str) -> Record {
        Record::new(
            title.to_string(),
            "Someone".to_string(),
            100,
            "Fiction".to_string(),
            "2024-12-01".to_string(),
        )
    }

    #[test]
    fn test_indexing_follows_store_order() {
        let indexed = index_records(vec![make_record("A"), make_record("B"), make_record("C")]);
        let pairs: Vec<(usize, &str)> = indexed
            .iter()
            .map(|dr| (dr.index.0, dr.record.title.as_str()))
            .collect();
        assert_eq!(pairs, vec![(1, "A"), (2, "B"), (3, "C")]);
    }

    #[test]
    fn test_parsing() {
        assert_eq!(DisplayIndex::from_str("1"), Ok(DisplayIndex(1)));
        assert_eq!(DisplayIndex::from_str("42"), Ok(DisplayIndex(42)));
        assert!(DisplayIndex::from_str("0").is_err());
        assert!(DisplayIndex::from_str("").is_err());
        assert!(DisplayIndex::from_str("abc").is_err());
        assert!(DisplayIndex::from_str("12a").is_err());
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(
            parse_index_or_range("3-5"),
            Ok(vec![DisplayIndex(3), DisplayIndex(4), DisplayIndex(5)])
        );
        assert_eq!(parse_index_or_range("3-3"), Ok(vec![DisplayIndex(3)]));
        assert_eq!(parse_index_or_range("7"), Ok(vec![DisplayIndex(7)]));
    }

    #[test]
    fn test_parse_range_invalid() {
        let result = parse_index_or_range("5-3");
        assert!(result.unwrap_err().contains("must be <= end"));
        assert!(parse_index_or_range("abc-5").is_err());
        assert!(parse_index_or_range("3-xyz").is_err());
        assert!(parse_index_or_range("-5").is_err());
        assert!(parse_index_or_range("3-").is_err());
    }

    #[test]
    fn test_selectors_mix_indexes_and_ids() {
        let selectors = parse_selectors(&["1-2", "book_0004", " 5 "]);
        assert_eq!(
            selectors,
            vec![
                RecordSelector::Index(DisplayIndex(1)),
                RecordSelector::Index(DisplayIndex(2)),
                RecordSelector::Id("book_0004".to_string()),
                RecordSelector::Index(DisplayIndex(5)),
            ]
        );
    }
}
