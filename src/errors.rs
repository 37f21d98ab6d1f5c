//! Error types for span-rank
//!
//! All fallible public operations return [`Result`]. Errors are typed so
//! callers can distinguish "nothing to rank" from configuration or data
//! problems.

use thiserror::Error;

/// Library-wide result alias
pub type Result<T> = std::result::Result<T, SpanRankError>;

/// Errors produced by span-rank operations
#[derive(Error, Debug)]
pub enum SpanRankError {
    /// The input produced no rankable units (empty text, or every span was
    /// filtered out). Surfaced instead of an opaque division error downstream.
    #[error("no rankable input: {0}")]
    EmptyInput(String),

    /// A configuration value was out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A requested dataset column does not exist
    #[error("dataset column not found: '{0}'")]
    MissingColumn(String),

    /// A dataset cell could not be parsed as a number
    #[error("dataset column '{column}' row {row}: cannot parse '{value}' as a number")]
    MalformedValue {
        column: String,
        row: usize,
        value: String,
    },

    /// CSV-level parse failure
    #[error("csv parse error: {0}")]
    Csv(#[from] csv::Error),

    /// Model fitting failed inside the linear-model solver
    #[error("model fitting failed: {0}")]
    Model(String),
}

impl SpanRankError {
    /// Create an EmptyInput error
    pub fn empty_input(msg: impl Into<String>) -> Self {
        SpanRankError::EmptyInput(msg.into())
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        SpanRankError::InvalidConfig(msg.into())
    }

    /// Create a Model error
    pub fn model(msg: impl Into<String>) -> Self {
        SpanRankError::Model(msg.into())
    }
}
