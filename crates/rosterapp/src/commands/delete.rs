use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &mut S, id: &str) -> Result<CmdResult> {
    let removed = store.remove(id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Student deleted: {}",
        removed.full_name
    )));
    Ok(result.with_affected_students(vec![removed]))
}
