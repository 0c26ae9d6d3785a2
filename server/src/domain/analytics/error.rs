//! Analytics engine errors

use thiserror::Error;

/// Errors raised while aggregating inventory records
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    /// An item's `created_at` is missing or cannot be read as a date
    #[error("Invalid record {item_id}: {reason}")]
    InvalidRecord { item_id: i64, reason: String },
}

impl AnalyticsError {
    pub fn invalid_record(item_id: i64, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            item_id,
            reason: reason.into(),
        }
    }

    /// Stable error code for API envelopes
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRecord { .. } => "INVALID_RECORD",
        }
    }
}
