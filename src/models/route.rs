// SPDX-License-Identifier: MIT

//! Route and heart-rate stream models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One GPS fix of a workout's location trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
}

/// A fixed-distance slice of the GPS trace, tagged with its pace.
///
/// Retains the full coordinate path for gradient-colored line rendering.
/// The first point of a segment is the last point of the previous one so
/// the rendered line stays continuous. Derived, ephemeral data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSegment {
    /// Ordered fixes belonging to this segment (at least 2)
    pub points: Vec<RoutePoint>,
    /// Distance covered by this segment (meters)
    pub distance_meters: f64,
    /// Pace over this segment, always seconds per kilometer.
    /// Display-unit conversion is a presentation concern.
    pub pace_secs_per_km: f64,
}

/// One instantaneous heart-rate reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateSample {
    pub timestamp: DateTime<Utc>,
    /// Beats per minute
    pub bpm: f64,
    /// Offset from workout start (seconds), computed at creation
    pub elapsed_seconds: f64,
}

impl HeartRateSample {
    pub fn new(timestamp: DateTime<Utc>, bpm: f64, workout_start: DateTime<Utc>) -> Self {
        let elapsed_seconds = (timestamp - workout_start).num_milliseconds() as f64 / 1000.0;
        Self {
            timestamp,
            bpm,
            elapsed_seconds,
        }
    }
}

/// Aggregated heart-rate statistics over a time window.
///
/// Either all three values exist or the aggregate as a whole is absent;
/// zero is never used as a stand-in for "no data".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeartRateStats {
    pub avg: f64,
    pub max: f64,
    pub min: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sample_elapsed_offset() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 7, 0, 0).unwrap();
        let at = start + chrono::Duration::milliseconds(90_500);
        let sample = HeartRateSample::new(at, 148.0, start);
        assert_eq!(sample.elapsed_seconds, 90.5);
    }
}
