use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::DisplayRecord;
use crate::model::{Field, Record};
use crate::store::DataStore;
use std::cmp::Ordering;
use std::str::FromStr;

use super::helpers::indexed_records;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// A `field-direction` pair such as `pages-desc` or `title-asc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: Field,
    pub direction: SortDirection,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (field, direction) = match s.rsplit_once('-') {
            Some((field, "asc")) => (field, SortDirection::Asc),
            Some((field, "desc")) => (field, SortDirection::Desc),
            _ => (s, SortDirection::Asc),
        };
        let field = Field::from_str(field)
            .map_err(|_| format!("Invalid sort order '{}' (e.g. title-asc, pages-desc)", s))?;
        Ok(SortOrder { field, direction })
    }
}

impl SortOrder {
    fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let ord = match self.field {
            Field::Pages => a.pages.cmp(&b.pages),
            Field::DateAdded => a.date_added.cmp(&b.date_added),
            field => a
                .field_text(field)
                .to_lowercase()
                .cmp(&b.field_text(field).to_lowercase()),
        };
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

/// Sorts display rows; indexes keep pointing at the stored position.
pub fn sort_records(records: &mut [DisplayRecord], order: SortOrder) {
    records.sort_by(|a, b| order.compare(&a.record, &b.record));
}

pub fn run<S: DataStore>(store: &S, sort: Option<SortOrder>) -> Result<CmdResult> {
    let mut records = indexed_records(store)?;
    if let Some(order) = sort {
        sort_records(&mut records, order);
    }
    Ok(CmdResult::default().with_listed_records(records))
}
