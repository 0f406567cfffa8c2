//! # Domain Model: Students
//!
//! This module defines the core data structures for rosterapp: [`Student`], [`Status`],
//! [`StudentAttrs`] and [`StudentForm`].
//!
//! ## Identity
//!
//! A student is identified by `id`. Identifiers are compared **case-insensitively**
//! everywhere (`S001` and `s001` are the same student), see [`same_id`].
//!
//! ## Three Shapes of a Student
//!
//! ```text
//! StudentForm   raw text as typed by a user (gpa is still a string)
//!      │  validation::validate
//!      ▼
//! StudentAttrs  every mutable attribute, checked and typed
//!      │  Student::new(attrs, date_added)
//!      ▼
//! Student       attrs + the `date_added` stamp, owned by the registry
//! ```
//!
//! `date_added` is set once, when the record is created (or imported), and is never
//! touched by updates.
//!
//! ## Timestamps
//!
//! Timestamps are kept as text in [`TIMESTAMP_FORMAT`] (`yyyy-MM-dd HH:mm:ss`).
//! Imported files may carry anything in that column, so the text is stored as-is and
//! only parsed on demand by [`Student::added_on`].
//!
//! ## Renderings
//!
//! - `Display`: the one-line human summary used in lists.
//! - [`Student::to_file_string`]: the comma-joined line written by CSV export.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `yyyy-MM-dd HH:mm:ss`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Case-insensitive identifier comparison.
pub fn same_id(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    Active,
    Inactive,
}

impl Status {
    pub const ALL: [Status; 2] = [Status::Active, Status::Inactive];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    /// Exact, case-sensitive match on `Active` / `Inactive`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Status::Active),
            "Inactive" => Ok(Status::Inactive),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

/// Every attribute of a student except `date_added`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentAttrs {
    pub id: String,
    pub full_name: String,
    pub programme: String,
    pub level: String,
    pub gpa: f64,
    pub email: String,
    pub phone: String,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub full_name: String,
    pub programme: String,
    pub level: String,
    pub gpa: f64,
    pub email: String,
    pub phone: String,
    pub date_added: String,
    pub status: Status,
}

impl Student {
    pub fn new(attrs: StudentAttrs, date_added: impl Into<String>) -> Self {
        let StudentAttrs {
            id,
            full_name,
            programme,
            level,
            gpa,
            email,
            phone,
            status,
        } = attrs;
        Self {
            id,
            full_name,
            programme,
            level,
            gpa,
            email,
            phone,
            date_added: date_added.into(),
            status,
        }
    }

    /// Replaces every mutable attribute, leaving `date_added` alone.
    pub fn apply(&mut self, attrs: StudentAttrs) {
        let date_added = std::mem::take(&mut self.date_added);
        *self = Student::new(attrs, date_added);
    }

    pub fn attrs(&self) -> StudentAttrs {
        StudentAttrs {
            id: self.id.clone(),
            full_name: self.full_name.clone(),
            programme: self.programme.clone(),
            level: self.level.clone(),
            gpa: self.gpa,
            email: self.email.clone(),
            phone: self.phone.clone(),
            status: self.status,
        }
    }

    pub fn has_id(&self, id: &str) -> bool {
        same_id(&self.id, id)
    }

    /// The calendar date portion of `date_added`, if it parses.
    pub fn added_on(&self) -> Option<NaiveDate> {
        let date = self.date_added.get(..10)?;
        NaiveDate::parse_from_str(date, DATE_FORMAT).ok()
    }

    /// The nine exported fields, in file order.
    pub fn file_fields(&self) -> [String; 9] {
        [
            self.id.clone(),
            self.full_name.clone(),
            self.programme.clone(),
            self.level.clone(),
            format_gpa(self.gpa),
            self.email.clone(),
            self.phone.clone(),
            self.date_added.clone(),
            self.status.to_string(),
        ]
    }

    /// Comma-joined file line. Fields are not quoted: a comma inside a field
    /// shifts every column after it.
    pub fn to_file_string(&self) -> String {
        self.file_fields().join(",")
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {} | Name: {} | Programme: {} | Level: {} | GPA: {:.2} | Email: {} | Status: {}",
            self.id, self.full_name, self.programme, self.level, self.gpa, self.email, self.status
        )
    }
}

/// Shortest round-trip rendering that always keeps a decimal point (`3.0`, `3.85`).
pub fn format_gpa(gpa: f64) -> String {
    format!("{:?}", gpa)
}

/// Raw, unvalidated input for creating or editing a student.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentForm {
    pub id: String,
    pub full_name: String,
    pub programme: String,
    pub level: String,
    pub gpa: String,
    pub email: String,
    pub phone: String,
    pub status: Status,
}

impl From<&Student> for StudentForm {
    /// Loads a record into form fields for editing.
    fn from(student: &Student) -> Self {
        Self {
            id: student.id.clone(),
            full_name: student.full_name.clone(),
            programme: student.programme.clone(),
            level: student.level.clone(),
            gpa: student.gpa.to_string(),
            email: student.email.clone(),
            phone: student.phone.clone(),
            status: student.status,
        }
    }
}
