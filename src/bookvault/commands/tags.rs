use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Record;
use crate::store::DataStore;
use serde::Serialize;

/// A distinct category with the number of books and pages under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub books: usize,
    pub pages: u64,
}

/// Distinct tags in first-seen order.
pub fn count_tags(records: &[Record]) -> Vec<TagCount> {
    let mut counts: Vec<TagCount> = Vec::new();
    for record in records {
        match counts.iter_mut().find(|c| c.tag == record.tag) {
            Some(entry) => {
                entry.books += 1;
                entry.pages += u64::from(record.pages);
            }
            None => counts.push(TagCount {
                tag: record.tag.clone(),
                books: 1,
                pages: u64::from(record.pages),
            }),
        }
    }
    counts
}

pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    let records = store.list_records()?;
    let mut tags = count_tags(&records);
    tags.sort_by(|a, b| a.tag.to_lowercase().cmp(&b.tag.to_lowercase()));
    Ok(CmdResult::default().with_tags(tags))
}
