use crate::codec;
use crate::commands::CmdMessage;
use crate::error::Result;
use crate::reports::{self, Report, ReportKind, ReportParams};
use crate::store::DataStore;
use chrono::NaiveDateTime;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Generates `kind` over the current roster. `now` stamps the report and anchors
/// the default date window.
pub fn run<S: DataStore>(
    store: &S,
    kind: ReportKind,
    params: &ReportParams,
    now: NaiveDateTime,
    lookback_months: u32,
) -> Report {
    let rows = reports::generate(kind, store.list(), params, now.date(), lookback_months);
    Report {
        kind,
        rows,
        generated_at: now,
    }
}

pub fn export<W: Write>(report: &Report, writer: W) -> Result<()> {
    codec::write_report(writer, report)?;
    info!(report = report.kind.slug(), rows = report.rows.len(), "report exported");
    Ok(())
}

pub fn export_file(report: &Report, path: &Path) -> Result<CmdMessage> {
    let file = File::create(path)?;
    export(report, BufWriter::new(file))?;
    Ok(CmdMessage::success(format!(
        "Report exported to {}",
        path.display()
    )))
}
