use super::{upsert, DataStore};
use crate::error::{Result, VaultError};
use crate::model::Record;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: Vec<Record>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataStore for InMemoryStore {
    fn list_records(&self) -> Result<Vec<Record>> {
        Ok(self.records.clone())
    }

    fn get_record(&self, id: &str) -> Result<Record> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| VaultError::RecordNotFound(id.to_string()))
    }

    fn save_record(&mut self, record: &Record) -> Result<()> {
        upsert(&mut self.records, record);
        Ok(())
    }

    fn delete_record(&mut self, id: &str) -> Result<()> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == before {
            return Err(VaultError::RecordNotFound(id.to_string()));
        }
        Ok(())
    }

    fn replace_all(&mut self, records: Vec<Record>) -> Result<()> {
        self.records = records;
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// `count` generic records dated consecutively from 2024-12-01.
        pub fn with_records(mut self, count: usize) -> Self {
            for i in 0..count {
                let record = Record::new(
                    format!("Test Book {}", i + 1),
                    format!("Author {}", i + 1),
                    100 * (i as u32 + 1),
                    "Fiction".to_string(),
                    format!("2024-12-{:02}", i % 28 + 1),
                );
                self.store.save_record(&record).unwrap();
            }
            self
        }

        pub fn with_book(mut self, title: &str, author: &str, pages: u32, tag: &str, date: &str) -> Self {
            let record = Record::new(
                title.to_string(),
                author.to_string(),
                pages,
                tag.to_string(),
                date.to_string(),
            );
            self.store.save_record(&record).unwrap();
            self
        }

        /// The five-book sample catalog shipped with the app.
        pub fn with_sample_catalog(mut self) -> Self {
            let records = crate::commands::import::sample_records().unwrap();
            self.store.replace_all(records).unwrap();
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;

    #[test]
    fn test_delete_not_found() {
        let mut store = InMemoryStore::new();
        match store.delete_record("book_missing") {
            Err(VaultError::RecordNotFound(id)) => assert_eq!(id, "book_missing"),
            _ => panic!("Expected RecordNotFound"),
        }
    }

    #[test]
    fn test_fixtures_coverage() {
        let fixture = StoreFixture::default()
            .with_records(2)
            .with_book("Dune", "Frank Herbert", 688, "Science-Fiction", "2024-12-06")
            .with_book("Emma", "Jane Austen", 474, "Classic", "2024-12-07");

        let records = fixture.store.list_records().unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].title, "Test Book 1");
        assert_eq!(records[3].title, "Emma");
    }

    #[test]
    fn test_sample_catalog_fixture() {
        let fixture = StoreFixture::new().with_sample_catalog();
        let records = fixture.store.list_records().unwrap();
        assert_eq!(records.len(), 5);
        assert_eq!(records[0].id, "book_0001");
    }

    #[test]
    fn test_replace_all_swaps_catalog() {
        let mut store = StoreFixture::new().with_records(3).store;
        store.replace_all(Vec::new()).unwrap();
        assert!(store.list_records().unwrap().is_empty());
    }
}
