//! # Reports
//!
//! Eight independent aggregate computations over a snapshot of the roster. Each one
//! produces an ordered list of [`ReportRow`]s (category, value, percentage), which is
//! purely a display projection: nothing here is cached or mutated.
//!
//! | Kind                  | Grouping                          | Order                | TOTAL row |
//! |-----------------------|-----------------------------------|----------------------|-----------|
//! | `ByProgramme`         | programme (optionally one)        | count, descending    | if > 0    |
//! | `ByLevel`             | level (optionally one)            | numeric level        | if > 0    |
//! | `GpaDistribution`     | five fixed GPA bands              | fixed                | if > 0    |
//! | `Status`              | Active / Inactive (optionally one)| fixed                | if > 0    |
//! | `DateRange`           | calendar date within `[start,end]`| date, ascending      | if > 0    |
//! | `ProgrammeStatistics` | programme, four rows each         | programme name       | never     |
//! | `LevelStatistics`     | level                             | numeric level        | never     |
//! | `GpaRangeAnalysis`    | eight half-open 0.5 bins          | highest bin first    | never     |
//!
//! Percentages are `count / total * 100` with one decimal and a trailing `%`.
//! The TOTAL row always carries `100%`.
//!
//! ## Empty Rosters
//!
//! Every computation tolerates an empty input. Most produce no rows (or a lone zero
//! row when a specific group was requested); the GPA range analysis still lists its
//! eight bins, with blank percentages.
//!
//! ## Level Ordering
//!
//! Levels are text that is expected to hold a number (`"100"`, `"300"`). They sort by
//! numeric value, so `"1000"` comes after `"500"`. Levels that are not numbers sort
//! after all numeric ones, alphabetically.

use crate::filter::Choice;
use crate::model::{Status, Student};
use chrono::{Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub const TOTAL: &str = "TOTAL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub category: String,
    pub value: String,
    pub percentage: String,
}

impl ReportRow {
    pub fn new(
        category: impl Into<String>,
        value: impl Into<String>,
        percentage: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            value: value.into(),
            percentage: percentage.into(),
        }
    }

    fn counted(category: impl Into<String>, count: usize, total: usize) -> Self {
        Self::new(category, count.to_string(), percent(count, total))
    }

    fn total(label: impl Into<String>, total: usize) -> Self {
        Self::new(label, total.to_string(), "100%")
    }

    /// The plain `TOTAL` row, or the date-range one with its window appended.
    pub fn is_total(&self) -> bool {
        self.category == TOTAL
            || self
                .category
                .strip_prefix(TOTAL)
                .is_some_and(|rest| rest.starts_with(" ("))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportKind {
    ByProgramme,
    ByLevel,
    GpaDistribution,
    Status,
    DateRange,
    ProgrammeStatistics,
    LevelStatistics,
    GpaRangeAnalysis,
}

impl ReportKind {
    pub const ALL: [ReportKind; 8] = [
        ReportKind::ByProgramme,
        ReportKind::ByLevel,
        ReportKind::GpaDistribution,
        ReportKind::Status,
        ReportKind::DateRange,
        ReportKind::ProgrammeStatistics,
        ReportKind::LevelStatistics,
        ReportKind::GpaRangeAnalysis,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::ByProgramme => "Student List by Programme",
            ReportKind::ByLevel => "Student List by Level",
            ReportKind::GpaDistribution => "GPA Distribution",
            ReportKind::Status => "Active/Inactive Students",
            ReportKind::DateRange => "Students Added This Month",
            ReportKind::ProgrammeStatistics => "Programme-wise Statistics",
            ReportKind::LevelStatistics => "Level-wise Statistics",
            ReportKind::GpaRangeAnalysis => "GPA Range Analysis",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            ReportKind::ByProgramme => "by-programme",
            ReportKind::ByLevel => "by-level",
            ReportKind::GpaDistribution => "gpa-distribution",
            ReportKind::Status => "status",
            ReportKind::DateRange => "date-range",
            ReportKind::ProgrammeStatistics => "programme-stats",
            ReportKind::LevelStatistics => "level-stats",
            ReportKind::GpaRangeAnalysis => "gpa-ranges",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportKind::ALL
            .into_iter()
            .find(|k| k.slug() == s || k.title() == s)
            .ok_or_else(|| format!("unknown report '{}'", s))
    }
}

/// Caller-supplied filters. Each report reads only the ones it understands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportParams {
    pub programme: Choice<String>,
    pub level: Choice<String>,
    pub status: Choice<Status>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl ReportParams {
    /// Resolves the date window: missing `end` is today, missing `start` is
    /// `lookback_months` calendar months before today, clamped to the end of a
    /// shorter month (31 March goes back to 29 February in a leap year). A look-back
    /// past the calendar's range starts at the earliest representable date.
    pub fn date_window(&self, today: NaiveDate, lookback_months: u32) -> (NaiveDate, NaiveDate) {
        let start = self.start.unwrap_or_else(|| {
            today
                .checked_sub_months(Months::new(lookback_months))
                .unwrap_or(NaiveDate::MIN)
        });
        let end = self.end.unwrap_or(today);
        (start, end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub kind: ReportKind,
    pub rows: Vec<ReportRow>,
    pub generated_at: NaiveDateTime,
}

/// Runs the report selected by `kind`.
pub fn generate(
    kind: ReportKind,
    students: &[Student],
    params: &ReportParams,
    today: NaiveDate,
    lookback_months: u32,
) -> Vec<ReportRow> {
    let rows = match kind {
        ReportKind::ByProgramme => by_programme(students, &params.programme),
        ReportKind::ByLevel => by_level(students, &params.level),
        ReportKind::GpaDistribution => gpa_distribution(students),
        ReportKind::Status => status_report(students, &params.status),
        ReportKind::DateRange => {
            let (start, end) = params.date_window(today, lookback_months);
            date_range(students, start, end)
        }
        ReportKind::ProgrammeStatistics => programme_statistics(students),
        ReportKind::LevelStatistics => level_statistics(students),
        ReportKind::GpaRangeAnalysis => gpa_range_analysis(students),
    };
    debug!(report = kind.slug(), rows = rows.len(), "report generated");
    rows
}

pub fn by_programme(students: &[Student], programme: &Choice<String>) -> Vec<ReportRow> {
    let mut counts: Vec<(String, usize)> = match programme {
        Choice::All => count_by(students, |s| s.programme.clone())
            .into_iter()
            .collect(),
        Choice::Only(wanted) => vec![(
            wanted.clone(),
            students.iter().filter(|s| &s.programme == wanted).count(),
        )],
    };
    // Ties broken by name so output is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let total: usize = counts.iter().map(|(_, c)| c).sum();
    let mut rows: Vec<ReportRow> = counts
        .into_iter()
        .map(|(name, count)| ReportRow::counted(name, count, total))
        .collect();
    if total > 0 {
        rows.push(ReportRow::total(TOTAL, total));
    }
    rows
}

pub fn by_level(students: &[Student], level: &Choice<String>) -> Vec<ReportRow> {
    let counts: Vec<(String, usize)> = match level {
        Choice::All => level_counts(students),
        Choice::Only(wanted) => vec![(
            wanted.clone(),
            students.iter().filter(|s| &s.level == wanted).count(),
        )],
    };

    let total: usize = counts.iter().map(|(_, c)| c).sum();
    let mut rows: Vec<ReportRow> = counts
        .into_iter()
        .map(|(lvl, count)| ReportRow::counted(format!("Level {}", lvl), count, total))
        .collect();
    if total > 0 {
        rows.push(ReportRow::total(TOTAL, total));
    }
    rows
}

const GPA_BANDS: [(&str, f64, f64); 5] = [
    ("Excellent (3.5 - 4.0)", 3.5, f64::INFINITY),
    ("Good (3.0 - 3.49)", 3.0, 3.5),
    ("Average (2.5 - 2.99)", 2.5, 3.0),
    ("Fair (2.0 - 2.49)", 2.0, 2.5),
    ("Poor (Below 2.0)", f64::NEG_INFINITY, 2.0),
];

/// Five bands, each `low <= gpa < high`; the top band is open above and the
/// bottom band open below, so every student lands in exactly one.
pub fn gpa_distribution(students: &[Student]) -> Vec<ReportRow> {
    let total = students.len();
    if total == 0 {
        return Vec::new();
    }

    let mut rows: Vec<ReportRow> = GPA_BANDS
        .iter()
        .map(|&(label, low, high)| {
            let count = students
                .iter()
                .filter(|s| s.gpa >= low && s.gpa < high)
                .count();
            ReportRow::counted(label, count, total)
        })
        .collect();
    rows.push(ReportRow::total(TOTAL, total));
    rows
}

pub fn status_report(students: &[Student], status: &Choice<Status>) -> Vec<ReportRow> {
    let total = students.len();
    let wanted: Vec<Status> = match status {
        Choice::All => Status::ALL.to_vec(),
        Choice::Only(s) => vec![*s],
    };

    let mut rows: Vec<ReportRow> = wanted
        .into_iter()
        .map(|st| {
            let count = students.iter().filter(|s| s.status == st).count();
            ReportRow::counted(format!("{} Students", st), count, total)
        })
        .collect();
    if total > 0 {
        rows.push(ReportRow::total(TOTAL, total));
    }
    rows
}

/// Counts students added on each day of `[start, end]` (inclusive).
/// Records whose `date_added` does not parse are left out.
pub fn date_range(students: &[Student], start: NaiveDate, end: NaiveDate) -> Vec<ReportRow> {
    let mut daily: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for date in students.iter().filter_map(Student::added_on) {
        if date >= start && date <= end {
            *daily.entry(date).or_insert(0) += 1;
        }
    }

    let total: usize = daily.values().sum();
    let mut rows: Vec<ReportRow> = daily
        .into_iter()
        .map(|(date, count)| ReportRow::counted(date.to_string(), count, total))
        .collect();
    if total > 0 {
        rows.push(ReportRow::total(
            format!("{} ({} to {})", TOTAL, start, end),
            total,
        ));
    }
    rows
}

#[derive(Debug, Clone, Copy)]
struct GpaSummary {
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
}

impl GpaSummary {
    fn new() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    fn accept(&mut self, gpa: f64) {
        self.count += 1;
        self.sum += gpa;
        self.min = self.min.min(gpa);
        self.max = self.max.max(gpa);
    }

    fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Count, average, maximum and minimum GPA for every programme, alphabetically.
pub fn programme_statistics(students: &[Student]) -> Vec<ReportRow> {
    let mut stats: BTreeMap<&str, GpaSummary> = BTreeMap::new();
    for s in students {
        stats
            .entry(s.programme.as_str())
            .or_insert_with(GpaSummary::new)
            .accept(s.gpa);
    }

    stats
        .into_iter()
        .flat_map(|(programme, stat)| {
            [
                ReportRow::new(
                    format!("{} - Count", programme),
                    stat.count.to_string(),
                    "",
                ),
                ReportRow::new(
                    format!("{} - Avg GPA", programme),
                    format!("{:.2}", stat.average()),
                    "",
                ),
                ReportRow::new(
                    format!("{} - Max GPA", programme),
                    format!("{:.2}", stat.max),
                    "",
                ),
                ReportRow::new(
                    format!("{} - Min GPA", programme),
                    format!("{:.2}", stat.min),
                    "",
                ),
            ]
        })
        .collect()
}

/// Like [`by_level`] over everyone, but without a TOTAL row.
pub fn level_statistics(students: &[Student]) -> Vec<ReportRow> {
    let counts = level_counts(students);
    let total: usize = counts.iter().map(|(_, c)| c).sum();
    counts
        .into_iter()
        .map(|(lvl, count)| ReportRow::counted(format!("Level {}", lvl), count, total))
        .collect()
}

const GPA_STEPS: [f64; 9] = [4.0, 3.5, 3.0, 2.5, 2.0, 1.5, 1.0, 0.5, 0.0];

/// Eight bins `low < gpa <= high`. A GPA of exactly `0.0` falls in none of them.
pub fn gpa_range_analysis(students: &[Student]) -> Vec<ReportRow> {
    let total = students.len();
    GPA_STEPS
        .windows(2)
        .map(|pair| {
            let (high, low) = (pair[0], pair[1]);
            let count = students
                .iter()
                .filter(|s| s.gpa > low && s.gpa <= high)
                .count();
            let percentage = if total > 0 {
                percent(count, total)
            } else {
                String::new()
            };
            ReportRow::new(
                format!("{:.1} - {:.1}", low, high),
                count.to_string(),
                percentage,
            )
        })
        .collect()
}

fn percent(count: usize, total: usize) -> String {
    let pct = if total > 0 {
        count as f64 * 100.0 / total as f64
    } else {
        0.0
    };
    format!("{:.1}%", pct)
}

fn count_by<F>(students: &[Student], key: F) -> HashMap<String, usize>
where
    F: Fn(&Student) -> String,
{
    let mut counts = HashMap::new();
    for s in students {
        *counts.entry(key(s)).or_insert(0) += 1;
    }
    counts
}

/// Per-level counts in numeric level order.
pub(crate) fn level_counts(students: &[Student]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = count_by(students, |s| s.level.clone())
        .into_iter()
        .collect();
    counts.sort_by(|a, b| compare_levels(&a.0, &b.0));
    counts
}

pub(crate) fn compare_levels(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
