use crate::error::{Result, VaultError};
use crate::index::{index_records, DisplayRecord, RecordSelector};
use crate::store::DataStore;
use crate::validation::ValidationReport;

pub fn indexed_records<S: DataStore>(store: &S) -> Result<Vec<DisplayRecord>> {
    let records = store.list_records()?;
    Ok(index_records(records))
}

/// Resolves selectors to records, in selector order, without duplicates.
pub fn records_by_selectors<S: DataStore>(
    store: &S,
    selectors: &[RecordSelector],
) -> Result<Vec<DisplayRecord>> {
    let indexed = indexed_records(store)?;
    let mut resolved: Vec<DisplayRecord> = Vec::with_capacity(selectors.len());

    for selector in selectors {
        let found = indexed
            .iter()
            .find(|dr| match selector {
                RecordSelector::Index(idx) => &dr.index == idx,
                RecordSelector::Id(id) => &dr.record.id == id,
            })
            .ok_or_else(|| match selector {
                RecordSelector::Index(idx) => {
                    VaultError::Api(format!("Index {} not found", idx))
                }
                RecordSelector::Id(id) => VaultError::RecordNotFound(id.clone()),
            })?;

        if !resolved.iter().any(|dr| dr.record.id == found.record.id) {
            resolved.push(found.clone());
        }
    }

    Ok(resolved)
}

/// Turns a failed report into a `Validation` error listing every field.
pub fn ensure_valid(report: &ValidationReport) -> Result<()> {
    if report.is_ok() {
        return Ok(());
    }
    let details = report
        .errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    Err(VaultError::Validation(details))
}
