// SPDX-License-Identifier: MIT

//! In-memory adapter fakes shared by the integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::mpsc;

use paceline::db::RecordStore;
use paceline::error::{AppError, Result};
use paceline::models::{
    HeartRateSample, RoutePoint, WorkoutDetail, WorkoutRecord, WorkoutSummary,
};
use paceline::services::WorkoutSource;
use paceline::SyncPhase;

/// Workout source fake with failure injection and call counters.
#[derive(Default)]
pub struct FakeSource {
    pub workouts: Vec<WorkoutSummary>,
    pub details: HashMap<String, WorkoutDetail>,
    pub deny_authorization: bool,
    pub source_down: bool,
    pub fail_summaries: bool,
    pub fail_details: bool,
    pub auth_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
}

#[async_trait]
impl WorkoutSource for FakeSource {
    async fn request_authorization(&self, _user_id: &str) -> Result<()> {
        self.auth_calls.fetch_add(1, Ordering::SeqCst);
        if self.deny_authorization {
            return Err(AppError::AuthorizationDenied);
        }
        if self.source_down {
            return Err(AppError::SourceUnavailable("health store disabled".into()));
        }
        Ok(())
    }

    async fn fetch_basic_workouts(&self, _user_id: &str) -> Result<Vec<WorkoutSummary>> {
        if self.fail_summaries {
            return Err(AppError::Fetch("summary fetch timed out".into()));
        }
        Ok(self.workouts.clone())
    }

    async fn fetch_workout_detail(
        &self,
        _user_id: &str,
        workout_id: &str,
    ) -> Result<WorkoutDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_details {
            return Err(AppError::Fetch("detail fetch timed out".into()));
        }
        Ok(self.details.get(workout_id).cloned().unwrap_or_default())
    }

    async fn fetch_location_trace(
        &self,
        _user_id: &str,
        _workout_id: &str,
    ) -> Result<Vec<RoutePoint>> {
        Ok(Vec::new())
    }

    async fn fetch_heart_rate_samples(
        &self,
        _user_id: &str,
        _workout_id: &str,
    ) -> Result<Vec<HeartRateSample>> {
        Ok(Vec::new())
    }
}

/// Record store fake: appends in memory, optionally failing once after a
/// configured number of successful writes.
#[derive(Default)]
pub struct FakeStore {
    pub records: Mutex<Vec<WorkoutRecord>>,
    pub fail_after: Mutex<Option<usize>>,
    pub fail_reads: bool,
}

#[async_trait]
impl RecordStore for FakeStore {
    async fn existing_timestamps(&self, _user_id: &str) -> Result<Vec<DateTime<Utc>>> {
        if self.fail_reads {
            return Err(AppError::Database("store unreachable".into()));
        }
        let records = self.records.lock().expect("store lock");
        Ok(records.iter().map(|r| r.start_date).collect())
    }

    async fn write_records(&self, _user_id: &str, records: &[WorkoutRecord]) -> Result<usize> {
        let mut written = 0usize;
        for record in records {
            let mut fail_after = self.fail_after.lock().expect("fail_after lock");
            if *fail_after == Some(written) {
                // Fail once, then let later runs through.
                *fail_after = None;
                return Err(AppError::Write {
                    cause: "write rejected".into(),
                    written,
                });
            }
            drop(fail_after);

            self.records.lock().expect("store lock").push(record.clone());
            written += 1;
        }
        Ok(written)
    }
}

/// Timestamp on 2024-05-01 at the given time of day.
#[allow(dead_code)]
pub fn at(hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, hour, min, sec).unwrap()
}

/// Basic summary builder.
#[allow(dead_code)]
pub fn summary(id: &str, start: DateTime<Utc>) -> WorkoutSummary {
    WorkoutSummary {
        id: id.to_string(),
        start_date: start,
        distance_meters: 5000.0,
        duration_seconds: 1500.0,
    }
}

/// Drain the phase stream until the engine closes it.
#[allow(dead_code)]
pub async fn collect_phases(mut rx: mpsc::UnboundedReceiver<SyncPhase>) -> Vec<SyncPhase> {
    let mut phases = Vec::new();
    while let Some(phase) = rx.recv().await {
        phases.push(phase);
    }
    phases
}
