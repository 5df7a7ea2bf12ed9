// SPDX-License-Identifier: MIT

//! Application error types.
//!
//! Every adapter failure maps onto one of these variants; the sync engine
//! surfaces them to callers as the `Failed` terminal phase with the cause
//! attached. Nothing here is retried automatically.

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The user or platform declined access to the workout source.
    #[error("Authorization denied by the workout source")]
    AuthorizationDenied,

    /// The workout source cannot be queried at all (capability disabled,
    /// endpoint unreachable).
    #[error("Workout source unavailable: {0}")]
    SourceUnavailable(String),

    /// A summary, detail, trace, or heart-rate fetch failed.
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// An upload failed partway. Records counted in `written` stay
    /// written; they are excluded by the diff on the next run.
    #[error("Write failed after {written} record(s): {cause}")]
    Write { cause: String, written: usize },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Number of records confirmed written before this error, if the
    /// error occurred during an upload.
    pub fn partial_write_count(&self) -> Option<usize> {
        match self {
            AppError::Write { written, .. } => Some(*written),
            _ => None,
        }
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;
