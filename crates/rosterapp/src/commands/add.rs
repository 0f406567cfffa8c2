use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, RosterError};
use crate::model::{format_timestamp, Student, StudentForm};
use crate::store::DataStore;
use crate::validation::validate;
use chrono::NaiveDateTime;

pub fn run<S: DataStore>(
    store: &mut S,
    form: &StudentForm,
    now: NaiveDateTime,
) -> Result<CmdResult> {
    let attrs = validate(form)?;
    if store.contains_id(&attrs.id) {
        return Err(RosterError::DuplicateId(attrs.id));
    }

    let student = Student::new(attrs, format_timestamp(now));
    store.insert(student.clone())?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Student added successfully!"));
    Ok(result.with_affected_students(vec![student]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use crate::store::registry::fixtures::RegistryFixture;
    use crate::store::registry::Registry;
    use crate::validation::ValidationError;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap()
    }

    fn form(id: &str) -> StudentForm {
        StudentForm {
            id: id.into(),
            full_name: " Grace Hopper ".into(),
            programme: "Computer Science".into(),
            level: "400".into(),
            gpa: "3.9".into(),
            email: "grace@navy.mil".into(),
            phone: "".into(),
            status: Status::Active,
        }
    }

    #[test]
    fn adds_and_stamps_date() {
        let mut store = Registry::new();
        let result = run(&mut store, &form("S100"), now()).unwrap();

        assert_eq!(store.len(), 1);
        let stored = store.get("S100").unwrap();
        assert_eq!(stored.full_name, "Grace Hopper");
        assert_eq!(stored.date_added, "2024-04-01 08:30:00");
        assert_eq!(result.affected_students, vec![stored.clone()]);
    }

    #[test]
    fn duplicate_id_rejected_in_any_case() {
        let mut store = RegistryFixture::sample().registry;
        let before = store.list().to_vec();

        let err = run(&mut store, &form("s001"), now()).unwrap_err();
        assert!(matches!(err, RosterError::DuplicateId(id) if id == "s001"));
        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn invalid_form_never_reaches_store() {
        let mut store = Registry::new();
        let mut bad = form("S100");
        bad.gpa = "5".into();
        let err = run(&mut store, &bad, now()).unwrap_err();
        assert!(matches!(
            err,
            RosterError::Validation(ValidationError::GpaOutOfRange)
        ));
        assert!(store.is_empty());
    }
}
