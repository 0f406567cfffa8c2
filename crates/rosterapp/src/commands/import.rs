use crate::codec::{self, DecodedLine};
use crate::commands::CmdMessage;
use crate::error::{Result, RosterError};
use crate::store::DataStore;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Default, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    /// Lines that failed to parse plus records whose id was already taken.
    pub skipped: usize,
    pub messages: Vec<CmdMessage>,
}

impl ImportSummary {
    pub fn headline(&self) -> String {
        let mut message = format!("{} students imported successfully.", self.imported);
        if self.skipped > 0 {
            message.push_str(&format!(
                " {} entries skipped (duplicates or errors).",
                self.skipped
            ));
        }
        message
    }
}

/// Imports students from CSV text, committing each good line as it is read.
///
/// A line is skipped (and counted) when it does not decode or when its id already
/// exists. Skips never abort the batch; an I/O error does, keeping whatever was
/// imported before it.
pub fn run<S: DataStore, R: Read>(
    store: &mut S,
    reader: R,
    now: NaiveDateTime,
) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    codec::for_each_line(reader, now, |DecodedLine { line, result }| {
        match result.and_then(|student| store.insert(student)) {
            Ok(_) => summary.imported += 1,
            Err(err) => {
                summary.skipped += 1;
                let reason = match err {
                    RosterError::Parse { reason, .. } => reason,
                    other => other.to_string(),
                };
                warn!(line, %reason, "import line skipped");
                summary
                    .messages
                    .push(CmdMessage::warning(format!("Line {}: {}", line, reason)));
            }
        }
    })?;

    info!(
        imported = summary.imported,
        skipped = summary.skipped,
        "import finished"
    );
    let headline = summary.headline();
    summary.messages.push(CmdMessage::success(headline));
    Ok(summary)
}

pub fn run_file<S: DataStore>(
    store: &mut S,
    path: &Path,
    now: NaiveDateTime,
) -> Result<ImportSummary> {
    let file = File::open(path)?;
    run(store, BufReader::new(file), now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::registry::fixtures::RegistryFixture;
    use crate::store::registry::Registry;
    use chrono::NaiveDate;
    use std::io;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn duplicate_id_is_skipped_and_original_kept() {
        let mut store = RegistryFixture::sample().registry;
        let original = store.get("S001").unwrap().clone();

        let csv = "S001,Dup Name,CS,100,3.0,a@b.com,555,2024-01-01 00:00:00,Active\n";
        let summary = run(&mut store, csv.as_bytes(), now()).unwrap();

        assert_eq!(summary.imported, 0);
        assert_eq!(summary.skipped, 1);
        assert_eq!(store.len(), 10);
        assert_eq!(store.get("S001").unwrap(), &original);
    }

    #[test]
    fn counts_imported_and_skipped() {
        let mut store = Registry::new();
        let csv = "ID,Name,Programme,Level,GPA,Email,Phone,Date Added,Status\n\
                   S1,A,Law,100,2.0,a@b.c,1,2024-01-01 00:00:00,Active\n\
                   \n\
                   S2,B,Law,100,oops,b@b.c,2,2024-01-01 00:00:00,Active\n\
                   s1,C,Law,100,2.0,c@b.c,3,2024-01-01 00:00:00,Active\n\
                   S3,D,Arts,200,3.5,d@b.c,4,2024-01-02 00:00:00\n\
                   too,short\n";
        let summary = run(&mut store, csv.as_bytes(), now()).unwrap();

        assert_eq!(summary.imported, 2);
        assert_eq!(summary.skipped, 4);
        assert_eq!(
            summary.headline(),
            "2 students imported successfully. 4 entries skipped (duplicates or errors)."
        );
        let ids: Vec<&str> = store.list().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["S1", "S3"]);
        assert!(summary
            .messages
            .iter()
            .any(|m| m.content.starts_with("Line 4:")));
    }

    #[test]
    fn headline_without_skips() {
        let summary = ImportSummary {
            imported: 3,
            ..Default::default()
        };
        assert_eq!(summary.headline(), "3 students imported successfully.");
    }

    struct FailAfterFirstChunk {
        chunk: Option<Vec<u8>>,
    }

    impl Read for FailAfterFirstChunk {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.chunk.take() {
                Some(data) => {
                    buf[..data.len()].copy_from_slice(&data);
                    Ok(data.len())
                }
                None => Err(io::Error::new(io::ErrorKind::Other, "disk on fire")),
            }
        }
    }

    #[test]
    fn io_error_aborts_but_keeps_committed_lines() {
        let mut store = Registry::new();
        let reader = FailAfterFirstChunk {
            chunk: Some(b"S1,A,Law,100,2.0,a@b.c,1,2024-01-01 00:00:00,Active\n".to_vec()),
        };
        let err = run(&mut store, reader, now()).unwrap_err();
        assert!(matches!(err, RosterError::Io(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let mut store = Registry::new();
        let dir = tempfile::tempdir().unwrap();
        let err = run_file(&mut store, &dir.path().join("nope.csv"), now()).unwrap_err();
        assert!(matches!(err, RosterError::Io(_)));
    }

    #[test]
    fn imports_from_file() {
        let mut store = Registry::new();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.csv");
        std::fs::write(
            &path,
            "S1,A,Law,100,2.0,a@b.c,1,2024-01-01 00:00:00,Inactive\n",
        )
        .unwrap();
        let summary = run_file(&mut store, &path, now()).unwrap();
        assert_eq!(summary.imported, 1);
        assert_eq!(store.list()[0].status, crate::model::Status::Inactive);
    }
}
