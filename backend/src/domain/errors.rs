//! Typed errors surfaced by the domain services.
//!
//! All of these are raised synchronously inside the owning service and
//! propagate to the caller; none are retried. Storage failures are fatal to
//! the single operation in progress — the in-memory mutation is discarded.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("a monthly challan for {month} already exists in {academic_year}")]
    DuplicateChallan { month: String, academic_year: String },

    #[error("monthly challan limit reached for {academic_year} (12 per year)")]
    ChallanLimitExceeded { academic_year: String },

    #[error("challan not found: {0}")]
    ChallanNotFound(String),

    #[error("student not found: {0}")]
    StudentNotFound(String),

    #[error("batch not found: {0}")]
    BatchNotFound(String),

    #[error("{0}")]
    StudentValidation(String),

    #[error("{0}")]
    BatchValidation(String),

    #[error("roll number {roll_number} is already taken in {class_name} ({academic_year})")]
    RollNumberConflict {
        roll_number: String,
        class_name: String,
        academic_year: String,
    },

    #[error("invalid month key '{0}', expected YYYY-MM")]
    InvalidMonthKey(String),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
