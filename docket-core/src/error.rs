//! Error types for docket.
//!
//! Only the edges of the crate (configuration, snapshot loading, argument
//! parsing) can fail. The layout engine itself is total over its inputs.

use thiserror::Error;

/// Errors that can occur while loading inputs for the calendar engine.
#[derive(Error, Debug)]
pub enum DocketError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid time grid: {0}")]
    InvalidGrid(String),

    #[error("Unknown timezone '{0}'")]
    InvalidTimezone(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unknown view mode '{0}'. Expected 'day' or 'month'")]
    InvalidViewMode(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for docket operations.
pub type DocketResult<T> = Result<T, DocketError>;
