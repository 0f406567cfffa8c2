//! # Configuration
//!
//! Roster configuration is declared with [`confique`], which handles layered loading
//! from a TOML file, environment variables, and compiled defaults.
//!
//! ## Resolution Order
//!
//! Values are resolved in priority order:
//! 1. **Environment variables**: `ROSTER_LOAD_SAMPLE_DATA`, `ROSTER_DATE_RANGE_MONTHS`,
//!    `ROSTER_PROGRAMMES`, `ROSTER_LEVELS` (lists are comma separated).
//! 2. **Config file**: the path given to [`RosterConfig::load`], or `roster.toml` in the
//!    working directory when none is given.
//! 3. **Compiled defaults**: the `#[config(default = ...)]` values below.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `load_sample_data` | `true` | Seed the registry with the sample roster |
//! | `date_range_months` | `1` | Calendar months the date-range report looks back when no start is given |
//! | `programmes` | six programmes | Values accepted by programme filters |
//! | `levels` | `100`..`500` | Values accepted by level filters |
//!
//! ## Filter Choices
//!
//! `programmes` and `levels` are the closed lists a client offers when filtering the
//! roster or a report. [`RosterConfig::programme_filter`] and
//! [`RosterConfig::level_filter`] turn a user's pick into a [`Choice`], rejecting
//! anything outside the list with [`RosterError::UnknownChoice`]. Records themselves
//! may carry any programme or level.

use crate::error::{Result, RosterError};
use crate::filter::Choice;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE: &str = "roster.toml";

/// Configuration for the roster, stored in `roster.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    /// Seed a fresh registry with the bundled sample students.
    #[config(env = "ROSTER_LOAD_SAMPLE_DATA", default = true)]
    pub load_sample_data: bool,

    /// Calendar months before today where the date-range report starts by default.
    #[config(env = "ROSTER_DATE_RANGE_MONTHS", default = 1)]
    pub date_range_months: u32,

    #[config(
        env = "ROSTER_PROGRAMMES",
        parse_env = confique::env::parse::list_by_comma,
        default = ["Computer Science", "Engineering", "Business", "Medicine", "Arts", "Law"]
    )]
    pub programmes: Vec<String>,

    #[config(
        env = "ROSTER_LEVELS",
        parse_env = confique::env::parse::list_by_comma,
        default = ["100", "200", "300", "400", "500"]
    )]
    pub levels: Vec<String>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            load_sample_data: true,
            date_range_months: 1,
            programmes: [
                "Computer Science",
                "Engineering",
                "Business",
                "Medicine",
                "Arts",
                "Law",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            levels: ["100", "200", "300", "400", "500"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl RosterConfig {
    /// Loads the layered configuration.
    ///
    /// An explicit `path` must exist; the implicit `roster.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) if !p.exists() => {
                return Err(RosterError::Config(format!(
                    "config file not found: {}",
                    p.display()
                )))
            }
            Some(p) => p.to_path_buf(),
            None => PathBuf::from(DEFAULT_FILE),
        };

        Self::builder()
            .env()
            .file(file)
            .load()
            .map_err(|e| RosterError::Config(e.to_string()))
    }

    /// `None` means all programmes.
    pub fn programme_filter(&self, programme: Option<&str>) -> Result<Choice<String>> {
        offered("programme", programme, &self.programmes)
    }

    /// `None` means all levels.
    pub fn level_filter(&self, level: Option<&str>) -> Result<Choice<String>> {
        offered("level", level, &self.levels)
    }
}

fn offered(
    field: &'static str,
    pick: Option<&str>,
    choices: &[String],
) -> Result<Choice<String>> {
    match pick {
        None => Ok(Choice::All),
        Some(value) if choices.iter().any(|c| c == value) => Ok(Choice::Only(value.to_string())),
        Some(value) => Err(RosterError::UnknownChoice {
            field,
            value: value.to_string(),
            offered: choices.to_vec(),
        }),
    }
}
