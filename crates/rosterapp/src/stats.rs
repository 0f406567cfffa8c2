//! Dashboard aggregates and chart series.
//!
//! Everything here is recomputed from the full roster on each call.

use crate::model::{Status, Student};
use crate::reports::level_counts;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    /// 0.0 when the roster is empty.
    pub average_gpa: f64,
}

impl DashboardStats {
    pub fn compute(students: &[Student]) -> Self {
        let total = students.len();
        let active = students.iter().filter(|s| s.status == Status::Active).count();
        let inactive = students
            .iter()
            .filter(|s| s.status == Status::Inactive)
            .count();
        let average_gpa = if total == 0 {
            0.0
        } else {
            students.iter().map(|s| s.gpa).sum::<f64>() / total as f64
        };
        Self {
            total,
            active,
            inactive,
            average_gpa,
        }
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Total: {} | Active: {} | Inactive: {} | Avg GPA: {:.2}",
            self.total, self.active, self.inactive, self.average_gpa
        )
    }
}

/// (programme, count) pairs, by programme name.
pub fn programme_series(students: &[Student]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for s in students {
        *counts.entry(s.programme.clone()).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

/// (level, count) pairs, by numeric level.
pub fn level_series(students: &[Student]) -> Vec<(String, usize)> {
    level_counts(students)
}

pub fn filter_status(shown: usize, total: usize) -> String {
    format!("Showing {} of {} students", shown, total)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub programmes: Vec<(String, usize)>,
    pub levels: Vec<(String, usize)>,
}

impl Dashboard {
    pub fn compute(students: &[Student]) -> Self {
        Self {
            stats: DashboardStats::compute(students),
            programmes: programme_series(students),
            levels: level_series(students),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::registry::fixtures::RegistryFixture;

    #[test]
    fn test_sample_dashboard() {
        let fixture = RegistryFixture::sample();
        let stats = DashboardStats::compute(fixture.students());
        assert_eq!(stats.total, 10);
        assert_eq!(stats.active, 8);
        assert_eq!(stats.inactive, 2);
        assert_eq!(
            stats.summary_line(),
            "Total: 10 | Active: 8 | Inactive: 2 | Avg GPA: 3.44"
        );
    }

    #[test]
    fn test_empty_dashboard() {
        let stats = DashboardStats::compute(&[]);
        assert_eq!(stats.average_gpa, 0.0);
        assert_eq!(
            stats.summary_line(),
            "Total: 0 | Active: 0 | Inactive: 0 | Avg GPA: 0.00"
        );
        let dashboard = Dashboard::compute(&[]);
        assert!(dashboard.programmes.is_empty());
        assert!(dashboard.levels.is_empty());
    }

    #[test]
    fn test_series() {
        let fixture = RegistryFixture::new()
            .with_student("A", "Law", "300", 3.0)
            .with_student("B", "Arts", "1000", 3.0)
            .with_student("C", "Law", "90", 3.0);
        assert_eq!(
            programme_series(fixture.students()),
            vec![("Arts".to_string(), 1), ("Law".to_string(), 2)]
        );
        assert_eq!(
            level_series(fixture.students()),
            vec![
                ("90".to_string(), 1),
                ("300".to_string(), 1),
                ("1000".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_filter_status() {
        assert_eq!(filter_status(3, 10), "Showing 3 of 10 students");
    }
}
