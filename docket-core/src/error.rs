//! Error types for docket.

use thiserror::Error;

/// Input problems caught before anything is sent to the backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is required")]
    EmptyTitle,

    #[error("Date is required")]
    MissingDate,

    #[error("Invalid time (e.g., 10:30 AM)")]
    InvalidTime,

    #[error("{0} does not exist in the selected time zone")]
    NonexistentLocalTime(String),

    #[error("Event time must be in the future")]
    PastTime,

    #[error("A case must be selected")]
    MissingCase,

    #[error("Invalid date format '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Errors that can occur in docket operations.
#[derive(Error, Debug)]
pub enum DocketError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response from {0}: expected a list")]
    UnexpectedShape(String),

    #[error("Hearing #{0} has no calendar event and cannot be edited")]
    NotEditable(usize),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for docket operations.
pub type DocketResult<T> = Result<T, DocketError>;
