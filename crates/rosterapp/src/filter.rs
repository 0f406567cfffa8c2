//! # Filtering
//!
//! Derives the visible subsequence of the roster from a set of [`Criteria`].
//!
//! A student passes when **all** active criteria hold:
//!
//! | Criterion     | When active          | Match rule                                              |
//! |---------------|----------------------|---------------------------------------------------------|
//! | `search_text` | non-empty            | case-insensitive substring of id, name, email or programme |
//! | `programme`   | not [`Choice::All`]  | exact, case-sensitive                                   |
//! | `level`       | not [`Choice::All`]  | exact                                                   |
//! | `status`      | not [`Choice::All`]  | exact                                                   |
//!
//! Filtering is a pure pull: callers re-run [`apply`] after every mutation instead of
//! keeping a live view attached to the registry. Original order is preserved and the
//! operation is idempotent.

use crate::model::{Status, Student};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Either no restriction, or exactly one value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Choice<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Choice<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(wanted) => wanted == value,
        }
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Choice::All => None,
            Choice::Only(v) => Some(v),
        }
    }
}

impl<T> From<Option<T>> for Choice<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Choice::Only(v),
            None => Choice::All,
        }
    }
}

impl<T: FromStr> FromStr for Choice<T> {
    type Err = T::Err;

    /// `"All"` means no restriction; anything else must parse as `T`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "All" {
            Ok(Choice::All)
        } else {
            s.parse().map(Choice::Only)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    pub search_text: String,
    pub programme: Choice<String>,
    pub level: Choice<String>,
    pub status: Choice<Status>,
}

impl Criteria {
    pub fn matches(&self, student: &Student) -> bool {
        if !self.search_text.is_empty() {
            let term = self.search_text.to_lowercase();
            let hit = [
                &student.id,
                &student.full_name,
                &student.email,
                &student.programme,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&term));
            if !hit {
                return false;
            }
        }

        self.programme.admits(&student.programme)
            && self.level.admits(&student.level)
            && self.status.admits(&student.status)
    }

    pub fn is_unrestricted(&self) -> bool {
        self.search_text.is_empty()
            && self.programme == Choice::All
            && self.level == Choice::All
            && self.status == Choice::All
    }
}

/// Returns the students passing `criteria`, in their original order.
pub fn apply(students: &[Student], criteria: &Criteria) -> Vec<Student> {
    students
        .iter()
        .filter(|s| criteria.matches(s))
        .cloned()
        .collect()
}
