// SPDX-License-Identifier: MIT

//! Remote record store layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreRecordStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::WorkoutRecord;

/// Collection names as constants.
pub mod collections {
    /// Synced workout records (keyed by `{user_id}_{workout_id}`)
    pub const WORKOUTS: &str = "workouts";
}

/// Durable store of previously-synced workout records.
///
/// The engine only ever appends: existing records are read for their
/// timestamps during diffing and never mutated.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Start timestamps of every workout already synced for the user.
    async fn existing_timestamps(&self, user_id: &str) -> Result<Vec<DateTime<Utc>>>;

    /// Write records one at a time, in order. Returns the number
    /// accepted. The first failure aborts the remaining writes and
    /// surfaces [`crate::error::AppError::Write`] carrying the count
    /// written so far; earlier writes are not rolled back.
    async fn write_records(&self, user_id: &str, records: &[WorkoutRecord]) -> Result<usize>;
}
