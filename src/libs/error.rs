//! Error taxonomy for engagement records and CSV ingestion.
//!
//! Three families of failure exist:
//!
//! - [`ValidationError`]: a single candidate record is unusable. During an
//!   import this is recovered per row; on direct construction it is returned
//!   to the caller.
//! - [`ImportSchemaError`]: the uploaded CSV cannot be imported at all, for
//!   example because a required column is absent from the header.
//! - [`NotFoundError`]: a stored record looked up by id does not exist.

use thiserror::Error;

/// A candidate record failed a required-field or value-range check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("actions must be an integer, got '{0}'")]
    InvalidActions(String),

    #[error("actions must not be negative, got {0}")]
    NegativeActions(i64),

    #[error("actions value {0} is out of range")]
    ActionsOutOfRange(i64),

    #[error("date must use YYYY-MM-DD format, got '{0}'")]
    InvalidDate(String),
}

impl ValidationError {
    /// Name of the record field that failed.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField(field) => *field,
            ValidationError::InvalidActions(_) | ValidationError::NegativeActions(_) | ValidationError::ActionsOutOfRange(_) => "actions",
            ValidationError::InvalidDate(_) => "date",
        }
    }
}

/// The CSV document as a whole cannot be imported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportSchemaError {
    #[error("CSV must contain columns: {}; missing: {}", .required.join(", "), .missing.join(", "))]
    MissingColumns { required: Vec<String>, missing: Vec<String> },

    #[error("CSV header could not be read: {0}")]
    UnreadableHeader(String),
}

/// A stored engagement log with the given id does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("engagement log {0} not found")]
pub struct NotFoundError(pub i64);
