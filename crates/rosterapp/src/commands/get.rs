use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S, id: &str) -> Result<CmdResult> {
    let student = store.get(id)?.clone();
    Ok(CmdResult::default().with_listed_students(vec![student]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;
    use crate::store::registry::fixtures::RegistryFixture;

    #[test]
    fn finds_by_id_ignoring_case() {
        let store = RegistryFixture::sample().registry;
        let result = run(&store, "s009").unwrap();
        assert_eq!(result.listed_students[0].full_name, "Peter Parker");
    }

    #[test]
    fn missing() {
        let store = RegistryFixture::sample().registry;
        assert!(matches!(run(&store, "nope"), Err(RosterError::NotFound(_))));
    }
}
