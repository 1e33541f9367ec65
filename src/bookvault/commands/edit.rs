use crate::commands::helpers::{ensure_valid, records_by_selectors};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VaultError};
use crate::index::RecordSelector;
use crate::model::RecordPatch;
use crate::store::DataStore;
use crate::validation::{parse_pages, validate_patch};

pub fn run<S: DataStore>(
    store: &mut S,
    selector: &RecordSelector,
    patch: &RecordPatch,
) -> Result<CmdResult> {
    if patch.is_empty() {
        return Err(VaultError::Api("Nothing to change".to_string()));
    }

    let report = validate_patch(patch);
    ensure_valid(&report)?;
    let pages = patch.pages.as_deref().and_then(parse_pages);

    let target = records_by_selectors(store, std::slice::from_ref(selector))?
        .into_iter()
        .next()
        .ok_or_else(|| VaultError::Api(format!("Nothing matches {}", selector)))?;

    let mut record = target.record;
    record.apply(patch, pages);
    store.save_record(&record)?;

    let mut result = CmdResult::default();
    for warning in &report.warnings {
        result.add_message(CmdMessage::warning(warning.to_string()));
    }
    result.add_message(CmdMessage::success(format!(
        "Book updated ({}): {}",
        target.index, record.title
    )));
    Ok(result.with_affected_records(vec![record]))
}
