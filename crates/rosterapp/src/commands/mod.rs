//! # Command Layer
//!
//! This module contains the **core business logic** of rosterapp. Each command lives in
//! its own submodule and implements pure Rust functions that operate on data types.
//!
//! ## Role and Responsibilities
//!
//! Commands are where the real work happens:
//! - Validate input before anything reaches the store
//! - Enforce the registry invariants (unique ids, all-or-nothing mutation)
//! - Return structured results (`CmdResult`, `ImportSummary`, `Report`, `Dashboard`)
//! - Are completely UI-agnostic
//!
//! ## What Commands Do NOT Do
//!
//! Commands explicitly avoid:
//! - **Terminal I/O**: No stdout, stderr or formatting for humans
//! - **Argument parsing**: That's the CLI layer's job
//! - **User interaction**: No prompts or confirmations. A delete is a delete; asking
//!   "are you sure?" first is up to the client
//! - **Reading the clock**: Anything that stamps a time takes `now` as an argument
//!
//! ## Testing Strategy
//!
//! Command tests use the in-memory [`Registry`](crate::store::registry::Registry) and
//! its fixtures, and cover every branch including the error paths.
//!
//! ## Command Modules
//!
//! - [`add`]: Validate and insert a new student
//! - [`update`]: Validate and replace a student's attributes
//! - [`delete`]: Remove a student
//! - [`get`]: Look up one student
//! - [`list`]: Filtered view of the roster
//! - [`import`]: Load students from CSV
//! - [`export`]: Write the roster as CSV
//! - [`report`]: Generate and export reports
//! - [`stats`]: Dashboard numbers and chart series

use crate::model::Student;
use serde::Serialize;

pub mod add;
pub mod delete;
pub mod export;
pub mod get;
pub mod import;
pub mod list;
pub mod report;
pub mod stats;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    /// Students created, changed or removed by the command (post-operation state).
    pub affected_students: Vec<Student>,
    /// Students to display.
    pub listed_students: Vec<Student>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_students(mut self, students: Vec<Student>) -> Self {
        self.affected_students = students;
        self
    }

    pub fn with_listed_students(mut self, students: Vec<Student>) -> Self {
        self.listed_students = students;
        self
    }
}
