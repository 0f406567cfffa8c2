//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It serves as the single
//! entry point for all roster operations, regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Reads the clock**: commands take `now` as an argument, the facade supplies it
//! - **Applies configuration** (e.g. the default date-range look-back)
//! - **Returns structured types** (`CmdResult`, `ImportSummary`, `Report`, `Dashboard`)
//!
//! ## What the API Does NOT Do
//!
//! The API explicitly avoids:
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **Terminal I/O**: No stdout, stderr, or prompts
//! - **Presentation concerns**: Returns data structures, not strings
//!
//! ## Generic Over DataStore
//!
//! `RosterApi<S: DataStore>` is generic over the storage backend. The only backend
//! today is the in-memory [`Registry`](crate::store::registry::Registry); tests and
//! clients construct it either empty or seeded with the sample roster.
//!
//! ## Change Notification
//!
//! Clients that keep derived views (a filtered table, dashboard counters) register an
//! observer with [`RosterApi::subscribe`]. It fires after every successful mutation,
//! including each record committed by an import.
//!
//! ## Testing Strategy
//!
//! API tests should verify:
//! - Correct command is called for each method
//! - Arguments are passed/transformed correctly
//!
//! API tests should **not** verify:
//! - Command logic (tested in command modules)
//! - Storage behavior (tested in store modules)

use crate::commands::{self, import::ImportSummary, CmdMessage, CmdResult};
use crate::config::RosterConfig;
use crate::error::Result;
use crate::filter::Criteria;
use crate::model::{Student, StudentForm};
use crate::reports::{Report, ReportKind, ReportParams};
use crate::stats::Dashboard;
use crate::store::registry::Registry;
use crate::store::{DataStore, Observer};
use chrono::{Local, NaiveDateTime};
use std::io::{Read, Write};
use std::path::Path;

/// The main API facade for roster operations.
///
/// All UI clients (CLI, tests, a future GUI) should interact through this API.
pub struct RosterApi<S: DataStore> {
    store: S,
    config: RosterConfig,
}

impl RosterApi<Registry> {
    /// Builds an in-memory roster, seeded with sample data when the config asks for it.
    pub fn in_memory(config: RosterConfig) -> Self {
        let store = if config.load_sample_data {
            Registry::with_sample_data()
        } else {
            Registry::new()
        };
        Self::new(store, config)
    }
}

impl<S: DataStore> RosterApi<S> {
    pub fn new(store: S, config: RosterConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    /// All students, in insertion order.
    pub fn students(&self) -> &[Student] {
        self.store.list()
    }

    pub fn subscribe(&mut self, observer: Observer) {
        self.store.subscribe(observer);
    }

    pub fn add_student(&mut self, form: &StudentForm) -> Result<CmdResult> {
        commands::add::run(&mut self.store, form, now())
    }

    pub fn update_student(&mut self, id: &str, form: &StudentForm) -> Result<CmdResult> {
        commands::update::run(&mut self.store, id, form)
    }

    pub fn delete_student(&mut self, id: &str) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, id)
    }

    pub fn get_student(&self, id: &str) -> Result<CmdResult> {
        commands::get::run(&self.store, id)
    }

    pub fn list_students(&self, criteria: &Criteria) -> CmdResult {
        commands::list::run(&self.store, criteria)
    }

    pub fn import_from<R: Read>(&mut self, reader: R) -> Result<ImportSummary> {
        commands::import::run(&mut self.store, reader, now())
    }

    pub fn import_csv(&mut self, path: &Path) -> Result<ImportSummary> {
        commands::import::run_file(&mut self.store, path, now())
    }

    pub fn export_to<W: Write>(&self, writer: W) -> Result<usize> {
        commands::export::run(&self.store, writer)
    }

    pub fn export_csv(&self, path: &Path) -> Result<CmdMessage> {
        commands::export::run_file(&self.store, path)
    }

    pub fn generate_report(&self, kind: ReportKind, params: &ReportParams) -> Report {
        self.generate_report_at(kind, params, now())
    }

    /// Same as [`generate_report`](Self::generate_report) with an explicit clock.
    pub fn generate_report_at(
        &self,
        kind: ReportKind,
        params: &ReportParams,
        at: NaiveDateTime,
    ) -> Report {
        commands::report::run(&self.store, kind, params, at, self.config.date_range_months)
    }

    pub fn export_report(&self, report: &Report, path: &Path) -> Result<CmdMessage> {
        commands::report::export_file(report, path)
    }

    pub fn dashboard(&self) -> Dashboard {
        commands::stats::run(&self.store)
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;
    use crate::model::Status;
    use std::cell::Cell;
    use std::rc::Rc;

    fn api() -> RosterApi<Registry> {
        RosterApi::in_memory(RosterConfig::default())
    }

    fn form(id: &str) -> StudentForm {
        StudentForm {
            id: id.into(),
            full_name: "Ada Lovelace".into(),
            programme: "Computer Science".into(),
            level: "200".into(),
            gpa: "3.95".into(),
            email: "ada@x.org".into(),
            phone: String::new(),
            status: Status::Active,
        }
    }

    #[test]
    fn in_memory_respects_sample_flag() {
        assert_eq!(api().students().len(), 10);

        let empty = RosterApi::in_memory(RosterConfig {
            load_sample_data: false,
            ..Default::default()
        });
        assert!(empty.students().is_empty());
    }

    #[test]
    fn add_stamps_current_time() {
        let mut api = api();
        let result = api.add_student(&form("S100")).unwrap();
        let stamped = &result.affected_students[0].date_added;
        assert_eq!(stamped.len(), 19);
        assert!(stamped.starts_with(&Local::now().format("%Y-%m-%d").to_string()));
    }

    #[test]
    fn observer_fires_for_api_mutations() {
        let mut api = api();
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        api.subscribe(Box::new(move |_| seen.set(seen.get() + 1)));

        api.add_student(&form("S100")).unwrap();
        api.update_student("S100", &form("S100")).unwrap();
        api.delete_student("S100").unwrap();
        assert!(api.delete_student("S100").is_err());

        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn report_uses_configured_lookback() {
        let api = RosterApi::in_memory(RosterConfig {
            date_range_months: 2,
            ..Default::default()
        });
        let at = chrono::NaiveDate::from_ymd_opt(2024, 3, 16)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let report = api.generate_report_at(ReportKind::DateRange, &ReportParams::default(), at);
        // 2024-01-16 ..= 2024-03-16: everyone but S001
        assert_eq!(
            report.rows.last().unwrap().category,
            "TOTAL (2024-01-16 to 2024-03-16)"
        );
        assert_eq!(report.rows.last().unwrap().value, "9");
    }

    #[test]
    fn get_missing_is_not_found() {
        assert!(matches!(
            api().get_student("S404"),
            Err(RosterError::NotFound(_))
        ));
    }
}
