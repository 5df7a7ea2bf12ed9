// SPDX-License-Identifier: MIT

//! Fixed-distance split models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::route::HeartRateStats;

/// Distance unit for split computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceUnit {
    Kilometers,
    Miles,
}

impl DistanceUnit {
    /// Full split interval in meters.
    pub fn interval_meters(self) -> f64 {
        match self {
            DistanceUnit::Kilometers => 1000.0,
            DistanceUnit::Miles => 1609.34,
        }
    }

    /// Minimum distance for a trailing fractional split to be kept.
    ///
    /// Shorter remainders are dropped silently, not merged into the
    /// previous split.
    pub fn min_remainder_meters(self) -> f64 {
        match self {
            DistanceUnit::Kilometers => 100.0,
            DistanceUnit::Miles => 160.0,
        }
    }
}

/// One fixed-distance-unit slice of a workout.
///
/// Derived view data; never persisted by this engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Split {
    /// 1-based sequence index, contiguous
    pub index: u32,
    /// Distance covered in this slice (meters)
    pub distance_meters: f64,
    /// Duration of this slice (seconds)
    pub duration_seconds: f64,
    /// Timestamp of the fix that opened this split's window
    pub start_time: Option<DateTime<Utc>>,
    /// Timestamp of the fix that closed it
    pub end_time: Option<DateTime<Utc>>,
    /// Heart-rate aggregate over this split's time window
    pub heart_rate: Option<HeartRateStats>,
}
