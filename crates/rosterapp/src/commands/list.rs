use crate::commands::{CmdMessage, CmdResult};
use crate::filter::{apply, Criteria};
use crate::stats::filter_status;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S, criteria: &Criteria) -> CmdResult {
    let all = store.list();
    let shown = apply(all, criteria);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(filter_status(shown.len(), all.len())));
    result.with_listed_students(shown)
}
