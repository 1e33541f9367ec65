use crate::commands::helpers::records_by_selectors;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::RecordSelector;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &mut S, selectors: &[RecordSelector]) -> Result<CmdResult> {
    // resolve everything first so a bad selector deletes nothing
    let targets = records_by_selectors(store, selectors)?;
    let mut result = CmdResult::default();

    for target in targets {
        store.delete_record(&target.record.id)?;
        result.add_message(CmdMessage::success(format!(
            "Book deleted ({}): {}",
            target.index, target.record.title
        )));
        result.affected_records.push(target.record);
    }

    Ok(result)
}
