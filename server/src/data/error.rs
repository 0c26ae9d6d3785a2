//! Unified error type for data layer
//!
//! Errors raised while loading and validating the inventory snapshot that
//! backs the repository.

use thiserror::Error;

/// Unified error type for data layer operations
#[derive(Error, Debug)]
pub enum DataError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot file is not valid JSON for the expected shape
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Snapshot parsed but breaks a referential or value constraint
    #[error("Invalid snapshot: {table} row {id}: {reason}")]
    InvalidSnapshot {
        table: &'static str,
        id: i64,
        reason: String,
    },
}

impl DataError {
    /// Create an invalid snapshot error
    pub fn invalid_snapshot(table: &'static str, id: i64, reason: impl Into<String>) -> Self {
        Self::InvalidSnapshot {
            table,
            id,
            reason: reason.into(),
        }
    }

    /// Short label for the error kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Parse(_) => "parse",
            Self::InvalidSnapshot { .. } => "invalid_snapshot",
        }
    }
}
