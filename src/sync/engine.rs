// SPDX-License-Identifier: MIT

//! Sync reconciliation engine.
//!
//! Orchestrates one synchronization run:
//! 1. Request authorization from the workout source
//! 2. Fetch all basic workout summaries (cheap, identity fields only)
//! 3. Diff against the remote store's timestamp set
//! 4. Fetch detailed records only for the new subset
//! 5. Upload, then report the terminal phase
//!
//! The diff over durable store state is what makes repeated runs safe:
//! anything uploaded by an earlier (possibly failed) run is excluded the
//! next time around, so each physical workout is uploaded at most once.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::db::RecordStore;
use crate::models::WorkoutRecord;
use crate::services::WorkoutSource;
use crate::sync::diff;
use crate::time_utils::format_utc_rfc3339;

/// Observable state of a synchronization run.
///
/// Transitions are strictly forward with a single terminal phase per
/// run: `Idle -> Connecting -> Fetching -> Syncing -> Completed | Failed`
/// (`Fetching` may jump straight to `Completed { count: 0 }` when the
/// diff finds nothing new — that is success, not failure).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SyncPhase {
    /// No operation in flight
    Idle,
    /// Requesting authorization from the workout source
    Connecting,
    /// Retrieving basic summaries and the remote timestamp set
    Fetching,
    /// Fetching details for new workouts; `current` advances by one
    /// after each detail fetch completes, `total` is fixed for the run
    Syncing { current: usize, total: usize },
    /// Terminal: `count` records were accepted by the store this run
    Completed { count: usize },
    /// Terminal: the run aborted; records already written stay written
    Failed { cause: String },
}

impl SyncPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SyncPhase::Completed { .. } | SyncPhase::Failed { .. })
    }
}

/// Workout synchronization engine.
///
/// Holds no per-run state; callers must not start a second run for the
/// same user before observing the previous run's terminal phase.
#[derive(Clone)]
pub struct SyncEngine {
    source: Arc<dyn WorkoutSource>,
    store: Arc<dyn RecordStore>,
}

impl SyncEngine {
    pub fn new(source: Arc<dyn WorkoutSource>, store: Arc<dyn RecordStore>) -> Self {
        Self { source, store }
    }

    /// Run one synchronization for `user_id`, returning the phase stream.
    ///
    /// Phases are published as the pipeline enters them; the stream ends
    /// with exactly one terminal phase. Dropping the receiver cancels
    /// the run at the next phase boundary — a cancelled run never
    /// reports `Completed`, and records already uploaded stay uploaded.
    pub fn synchronize(&self, user_id: impl Into<String>) -> mpsc::UnboundedReceiver<SyncPhase> {
        let (tx, rx) = mpsc::unbounded_channel();
        let engine = self.clone();
        let user_id = user_id.into();

        tokio::spawn(async move {
            engine.run(&user_id, &tx).await;
        });

        rx
    }

    async fn run(&self, user_id: &str, tx: &mpsc::UnboundedSender<SyncPhase>) {
        if !emit(tx, user_id, SyncPhase::Idle) {
            return;
        }

        // ─── 1. Authorization ────────────────────────────────────────
        if !emit(tx, user_id, SyncPhase::Connecting) {
            return;
        }
        if let Err(e) = self.source.request_authorization(user_id).await {
            tracing::warn!(user_id, error = %e, "Source authorization failed");
            emit(tx, user_id, SyncPhase::Failed { cause: e.to_string() });
            return;
        }

        // ─── 2. Summaries + remote timestamps ────────────────────────
        if !emit(tx, user_id, SyncPhase::Fetching) {
            return;
        }
        let candidates = match self.source.fetch_basic_workouts(user_id).await {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(user_id, error = %e, "Failed to fetch workout summaries");
                emit(tx, user_id, SyncPhase::Failed { cause: e.to_string() });
                return;
            }
        };
        let existing = match self.store.existing_timestamps(user_id).await {
            Ok(t) => t,
            Err(e) => {
                tracing::error!(user_id, error = %e, "Failed to read synced timestamps");
                emit(tx, user_id, SyncPhase::Failed { cause: e.to_string() });
                return;
            }
        };

        // ─── 3. Diff ─────────────────────────────────────────────────
        let new_workouts = diff::new_records(&candidates, &existing);
        tracing::info!(
            user_id,
            observed = candidates.len(),
            synced = existing.len(),
            new = new_workouts.len(),
            "Diff complete"
        );

        if new_workouts.is_empty() {
            // Checked, nothing new: success, distinct from failure.
            emit(tx, user_id, SyncPhase::Completed { count: 0 });
            return;
        }

        // ─── 4. Detail fetch (the expensive step, new items only) ────
        let total = new_workouts.len();
        let mut records: Vec<WorkoutRecord> = Vec::with_capacity(total);
        for (i, summary) in new_workouts.iter().enumerate() {
            let detail = match self.source.fetch_workout_detail(user_id, &summary.id).await {
                Ok(d) => d,
                Err(e) => {
                    tracing::error!(
                        user_id,
                        workout_id = %summary.id,
                        error = %e,
                        "Failed to fetch workout detail"
                    );
                    emit(tx, user_id, SyncPhase::Failed { cause: e.to_string() });
                    return;
                }
            };

            let synced_at = format_utc_rfc3339(chrono::Utc::now());
            records.push(WorkoutRecord::from_parts(user_id, summary, detail, synced_at));

            // Progress advances only after the fetch completed.
            if !emit(
                tx,
                user_id,
                SyncPhase::Syncing {
                    current: i + 1,
                    total,
                },
            ) {
                return;
            }
        }

        // ─── 5. Upload ───────────────────────────────────────────────
        match self.store.write_records(user_id, &records).await {
            Ok(count) => {
                tracing::info!(user_id, count, "Synchronization complete");
                emit(tx, user_id, SyncPhase::Completed { count });
            }
            Err(e) => {
                // Partial writes stay written; the next run's diff
                // excludes them.
                tracing::error!(
                    user_id,
                    written = e.partial_write_count().unwrap_or(0),
                    error = %e,
                    "Upload failed"
                );
                emit(tx, user_id, SyncPhase::Failed { cause: e.to_string() });
            }
        }
    }
}

/// Publish a phase. Returns `false` when the receiver is gone, which is
/// the cancellation signal for the run.
fn emit(tx: &mpsc::UnboundedSender<SyncPhase>, user_id: &str, phase: SyncPhase) -> bool {
    tracing::debug!(user_id, phase = ?phase, "Sync phase");
    if tx.send(phase).is_err() {
        tracing::info!(user_id, "Phase receiver dropped, cancelling run");
        return false;
    }
    true
}
