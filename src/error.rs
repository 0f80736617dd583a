//! Error type for the harness.
//!
//! Failures raised by a benchmark thunk are not represented here: they belong
//! to the caller and are handed back unchanged by
//! [`try_run_benchmark`](crate::harness::try_run_benchmark).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    /// Writing the serialized record failed.
    #[error("failed to write benchmark result: {0}")]
    Io(#[from] std::io::Error),

    #[error("benchmark result JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record that breaks the schema invariants; never serialized.
    #[error("ill-formed benchmark result: `{field}` {reason}")]
    IllFormedRecord {
        field: &'static str,
        reason: String,
    },
}

impl HarnessError {
    pub(crate) fn ill_formed(field: &'static str, reason: impl Into<String>) -> Self {
        HarnessError::IllFormedRecord {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = HarnessError> = std::result::Result<T, E>;
