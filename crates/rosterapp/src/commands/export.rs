use crate::codec;
use crate::commands::CmdMessage;
use crate::error::Result;
use crate::store::DataStore;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Writes the header and every student, in registry order. Returns the record count.
pub fn run<S: DataStore, W: Write>(store: &S, writer: W) -> Result<usize> {
    let students = store.list();
    codec::encode(writer, students)?;
    info!(exported = students.len(), "export finished");
    Ok(students.len())
}

/// Exports to `path`, replacing any existing file.
pub fn run_file<S: DataStore>(store: &S, path: &Path) -> Result<CmdMessage> {
    let file = File::create(path)?;
    let count = run(store, BufWriter::new(file))?;
    Ok(CmdMessage::success(format!(
        "{} students exported to {}",
        count,
        path.display()
    )))
}
