// SPDX-License-Identifier: MIT

//! Workout models: basic summaries for diffing and detailed records for
//! the remote store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Basic workout summary as reported by the source.
///
/// Carries only the identity-bearing fields needed for diffing; detailed
/// metrics are fetched separately and only for workouts identified as new.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSummary {
    /// Opaque workout identifier assigned by the source
    pub id: String,
    /// Start date/time (UTC)
    pub start_date: DateTime<Utc>,
    /// Distance in meters
    pub distance_meters: f64,
    /// Duration in seconds
    pub duration_seconds: f64,
}

/// Detailed per-workout metrics, all independently optional.
///
/// Decoded from the source with explicit per-field presence; absent
/// fields stay `None` rather than defaulting to zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkoutDetail {
    /// Calories burned (kcal)
    pub calories: Option<f64>,
    /// Average heart rate (bpm)
    pub avg_heart_rate: Option<f64>,
    /// Maximum heart rate (bpm)
    pub max_heart_rate: Option<f64>,
    /// Minimum heart rate (bpm)
    pub min_heart_rate: Option<f64>,
    /// Cadence (steps per minute)
    pub cadence: Option<f64>,
    /// Stride length (meters)
    pub stride_length: Option<f64>,
    /// Total step count
    pub step_count: Option<u32>,
}

/// Fully-populated workout record as written to the remote store.
///
/// Built by promoting a [`WorkoutSummary`] with its [`WorkoutDetail`].
/// Written exactly once and never mutated by this engine afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Opaque workout identifier (part of the document ID)
    pub workout_id: String,
    /// Owning user
    pub user_id: String,
    /// Start date/time (UTC)
    pub start_date: DateTime<Utc>,
    /// Distance in meters
    pub distance_meters: f64,
    /// Duration in seconds
    pub duration_seconds: f64,
    pub calories: Option<f64>,
    pub avg_heart_rate: Option<f64>,
    pub max_heart_rate: Option<f64>,
    pub min_heart_rate: Option<f64>,
    pub cadence: Option<f64>,
    pub stride_length: Option<f64>,
    pub step_count: Option<u32>,
    /// When this record was synced (RFC3339)
    pub synced_at: String,
}

impl WorkoutRecord {
    /// Promote a basic summary to a detailed record ready for upload.
    pub fn from_parts(
        user_id: &str,
        summary: &WorkoutSummary,
        detail: WorkoutDetail,
        synced_at: String,
    ) -> Self {
        Self {
            workout_id: summary.id.clone(),
            user_id: user_id.to_string(),
            start_date: summary.start_date,
            distance_meters: summary.distance_meters,
            duration_seconds: summary.duration_seconds,
            calories: detail.calories,
            avg_heart_rate: detail.avg_heart_rate,
            max_heart_rate: detail.max_heart_rate,
            min_heart_rate: detail.min_heart_rate,
            cadence: detail.cadence,
            stride_length: detail.stride_length,
            step_count: detail.step_count,
            synced_at,
        }
    }

    /// Average pace in seconds per kilometer.
    ///
    /// Undefined (`None`) for zero-distance workouts; zero would be a
    /// misleading "infinitely fast" pace.
    pub fn pace_secs_per_km(&self) -> Option<f64> {
        crate::analytics::pace::pace_secs_per_km(self.duration_seconds, self.distance_meters)
    }
}
