use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::RecordSelector;
use crate::store::DataStore;

use super::helpers::records_by_selectors;

pub fn run<S: DataStore>(store: &S, selectors: &[RecordSelector]) -> Result<CmdResult> {
    let records = records_by_selectors(store, selectors)?;
    Ok(CmdResult::default().with_listed_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{DisplayIndex, RecordSelector};
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn views_by_index_and_id_without_duplicates() {
        let store = StoreFixture::new().with_sample_catalog().store;
        let selectors = vec![
            RecordSelector::Index(DisplayIndex(3)),
            RecordSelector::Id("book_0003".into()),
            RecordSelector::Id("book_0001".into()),
        ];
        let result = run(&store, &selectors).unwrap();
        let titles: Vec<&str> = result.listed_records.iter().map(|dr| dr.record.title.as_str()).collect();
        assert_eq!(titles, vec!["The Hobbit", "The Great Gatsby"]);
        assert_eq!(result.listed_records[1].index, DisplayIndex(1));
    }
}
