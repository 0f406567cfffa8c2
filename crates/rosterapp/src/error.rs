use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Student ID already exists: {0}")]
    DuplicateId(String),

    #[error("Student not found: {0}")]
    NotFound(String),

    #[error("Line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown {field} '{value}' (choose from: {})", .offered.join(", "))]
    UnknownChoice {
        field: &'static str,
        value: String,
        offered: Vec<String>,
    },
}

impl From<csv::Error> for RosterError {
    fn from(err: csv::Error) -> Self {
        match err.into_kind() {
            csv::ErrorKind::Io(io) => RosterError::Io(io),
            kind => RosterError::Csv(format!("{:?}", kind)),
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
