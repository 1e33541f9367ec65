use crate::commands::helpers::ensure_valid;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VaultError};
use crate::model::{today_string, Record, RecordDraft};
use crate::store::DataStore;
use crate::validation::{parse_pages, validate_draft};

pub fn run<S: DataStore>(store: &mut S, draft: RecordDraft) -> Result<CmdResult> {
    let report = validate_draft(&draft);
    ensure_valid(&report)?;

    let pages = parse_pages(&draft.pages)
        .ok_or_else(|| VaultError::Validation(format!("pages: {}", draft.pages)))?;
    let date_added = draft.date_added.unwrap_or_else(today_string);
    let record = Record::new(draft.title, draft.author, pages, draft.tag, date_added);
    store.save_record(&record)?;

    let mut result = CmdResult::default();
    for warning in &report.warnings {
        result.add_message(CmdMessage::warning(warning.to_string()));
    }
    result.add_message(CmdMessage::success(format!(
        "Book \"{}\" saved successfully!",
        record.title
    )));
    Ok(result.with_affected_records(vec![record]))
}
