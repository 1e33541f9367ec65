use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VaultError};
use crate::model::Record;
use crate::store::DataStore;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub fn default_filename(today: NaiveDate) -> String {
    format!("book-vault-{}.json", today.format("%Y-%m-%d"))
}

pub fn to_json(records: &[Record]) -> Result<String> {
    serde_json::to_string_pretty(records).map_err(VaultError::Serialization)
}

/// Writes the whole catalog as a pretty JSON array to `path`, or to
/// `book-vault-{date}.json` in the working directory.
pub fn run<S: DataStore>(store: &S, path: Option<PathBuf>, today: NaiveDate) -> Result<CmdResult> {
    let records = store.list_records()?;
    let path = path.unwrap_or_else(|| PathBuf::from(default_filename(today)));

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(VaultError::Io)?;
        }
    }
    fs::write(&path, to_json(&records)?).map_err(VaultError::Io)?;

    let mut result = CmdResult::default().with_export_path(path.clone());
    result.add_message(CmdMessage::success(format!(
        "Exported {} records to {}",
        records.len(),
        path.display()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::import;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 10).unwrap()
    }

    #[test]
    fn names_file_after_the_date() {
        assert_eq!(default_filename(today()), "book-vault-2024-12-10.json");
    }

    #[test]
    fn export_then_import_is_identical() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out").join("books.json");
        let store = StoreFixture::new()
            .with_sample_catalog()
            .with_book("Emma", "Jane Austen", 474, "Classic", "2024-12-10")
            .store;

        let result = run(&store, Some(path.clone()), today()).unwrap();
        assert_eq!(result.export_path.as_deref(), Some(path.as_path()));

        let mut fresh = InMemoryStore::new();
        import::run(&mut fresh, &path).unwrap();
        assert_eq!(fresh.list_records().unwrap(), store.list_records().unwrap());
    }
}
