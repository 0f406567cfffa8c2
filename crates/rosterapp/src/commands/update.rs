use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::StudentForm;
use crate::store::DataStore;
use crate::validation::validate;

/// Replaces every attribute of the student `id` (except `date_added`) with the form's.
pub fn run<S: DataStore>(store: &mut S, id: &str, form: &StudentForm) -> Result<CmdResult> {
    let attrs = validate(form)?;
    let new_id = attrs.id.clone();
    store.replace(id, attrs)?;

    let updated = store.get(&new_id)?.clone();
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Student updated successfully!"));
    Ok(result.with_affected_students(vec![updated]))
}
