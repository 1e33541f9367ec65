use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VaultError};
use crate::model::{Record, REQUIRED_FIELDS};
use crate::store::DataStore;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const SAMPLE_CATALOG: &str = include_str!("../../../data/seed.json");

/// Parses an import document. Either every element is a complete record or
/// the whole document is rejected.
pub fn parse_records(content: &str) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| VaultError::Import(format!("invalid JSON: {}", e)))?;

    let items = value
        .as_array()
        .ok_or_else(|| VaultError::Import("expected a JSON array of records".to_string()))?;

    let mut records = Vec::with_capacity(items.len());
    let mut seen = HashSet::new();
    for (position, item) in items.iter().enumerate() {
        let number = position + 1;
        let object = item
            .as_object()
            .ok_or_else(|| VaultError::Import(format!("record {} is not an object", number)))?;

        if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| !object.contains_key(**f)) {
            return Err(VaultError::Import(format!(
                "record {} is missing required field '{}'",
                number, missing
            )));
        }

        let record: Record = serde_json::from_value(item.clone())
            .map_err(|e| VaultError::Import(format!("record {}: {}", number, e)))?;
        if !seen.insert(record.id.clone()) {
            return Err(VaultError::Import(format!(
                "record {} repeats id '{}'",
                number, record.id
            )));
        }
        records.push(record);
    }

    Ok(records)
}

/// The bundled five-book catalog.
pub fn sample_records() -> Result<Vec<Record>> {
    parse_records(SAMPLE_CATALOG)
}

/// Replaces the catalog with the records in `path`.
pub fn run<S: DataStore>(store: &mut S, path: &Path) -> Result<CmdResult> {
    let content = fs::read_to_string(path).map_err(VaultError::Io)?;
    let records = parse_records(&content)?;
    replace(store, records, &path.display().to_string())
}

/// Loads sample data, from `path` when given or from the bundled catalog.
pub fn seed<S: DataStore>(store: &mut S, path: Option<&Path>) -> Result<CmdResult> {
    match path {
        Some(path) => run(store, path),
        None => replace(store, sample_records()?, "sample catalog"),
    }
}

fn replace<S: DataStore>(store: &mut S, records: Vec<Record>, source: &str) -> Result<CmdResult> {
    let count = records.len();
    store.replace_all(records.clone())?;
    let mut result = CmdResult::default().with_affected_records(records);
    result.add_message(CmdMessage::success(format!(
        "Imported {} records from {}",
        count, source
    )));
    Ok(result)
}
