//! Student form validation.
//!
//! Rules are checked in a fixed order and the first failure wins:
//!
//! 1. id, full name, programme, level, gpa and email are non-empty (after trimming),
//!    checked in that order
//! 2. gpa parses as a number
//! 3. gpa lies within `0.0..=4.0`
//! 4. email contains both `@` and `.`
//!
//! Phone is optional and never checked. The order matters to callers: the message a
//! user sees is always the one for the earliest broken rule.

use crate::model::{StudentAttrs, StudentForm};
use thiserror::Error;

pub const MIN_GPA: f64 = 0.0;
pub const MAX_GPA: f64 = 4.0;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Student ID is required!")]
    MissingId,
    #[error("Full Name is required!")]
    MissingName,
    #[error("Programme is required!")]
    MissingProgramme,
    #[error("Level is required!")]
    MissingLevel,
    #[error("GPA is required!")]
    MissingGpa,
    #[error("Email is required!")]
    MissingEmail,
    #[error("GPA must be a valid number!")]
    GpaNotANumber,
    #[error("GPA must be between 0.0 and 4.0!")]
    GpaOutOfRange,
    #[error("Please enter a valid email address!")]
    InvalidEmail,
}

impl ValidationError {
    /// Short machine-friendly reason.
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::MissingId => "id required",
            ValidationError::MissingName => "full name required",
            ValidationError::MissingProgramme => "programme required",
            ValidationError::MissingLevel => "level required",
            ValidationError::MissingGpa => "gpa required",
            ValidationError::MissingEmail => "email required",
            ValidationError::GpaNotANumber => "gpa not a number",
            ValidationError::GpaOutOfRange => "gpa out of range",
            ValidationError::InvalidEmail => "invalid email",
        }
    }
}

/// Validates a form and returns trimmed, typed attributes.
pub fn validate(form: &StudentForm) -> Result<StudentAttrs, ValidationError> {
    let id = required(&form.id, ValidationError::MissingId)?;
    let full_name = required(&form.full_name, ValidationError::MissingName)?;
    let programme = required(&form.programme, ValidationError::MissingProgramme)?;
    let level = required(&form.level, ValidationError::MissingLevel)?;
    let gpa_text = required(&form.gpa, ValidationError::MissingGpa)?;
    let email = required(&form.email, ValidationError::MissingEmail)?;

    let gpa = parse_gpa(gpa_text)?;

    if !email.contains('@') || !email.contains('.') {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(StudentAttrs {
        id: id.to_string(),
        full_name: full_name.to_string(),
        programme: programme.to_string(),
        level: level.to_string(),
        gpa,
        email: email.to_string(),
        phone: form.phone.trim().to_string(),
        status: form.status,
    })
}

fn required(value: &str, missing: ValidationError) -> Result<&str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(missing)
    } else {
        Ok(trimmed)
    }
}

fn parse_gpa(text: &str) -> Result<f64, ValidationError> {
    let gpa: f64 = text.parse().map_err(|_| ValidationError::GpaNotANumber)?;
    // NaN fails the contains check too
    if !(MIN_GPA..=MAX_GPA).contains(&gpa) {
        return Err(ValidationError::GpaOutOfRange);
    }
    Ok(gpa)
}
