// SPDX-License-Identifier: MIT

//! New-record detection against the remote store's timestamp set.

use chrono::{DateTime, Utc};

use crate::models::WorkoutSummary;

/// Two timestamps within this window refer to the same physical workout.
/// The remote store and the source round start times differently, so an
/// exact comparison would re-upload everything with a skewed clock.
pub const DUPLICATE_WINDOW_SECS: i64 = 60;

/// Return exactly the candidates with no matching remote timestamp,
/// preserving the candidates' relative order.
///
/// A candidate matches an existing record when their start times fall
/// within [`DUPLICATE_WINDOW_SECS`] of each other.
pub fn new_records(
    candidates: &[WorkoutSummary],
    existing: &[DateTime<Utc>],
) -> Vec<WorkoutSummary> {
    candidates
        .iter()
        .filter(|candidate| !is_duplicate(candidate.start_date, existing))
        .cloned()
        .collect()
}

/// Whether `start_date` matches any previously-synced timestamp.
pub fn is_duplicate(start_date: DateTime<Utc>, existing: &[DateTime<Utc>]) -> bool {
    existing.iter().any(|&synced| {
        (start_date - synced).num_seconds().abs() <= DUPLICATE_WINDOW_SECS
    })
}
