// SPDX-License-Identifier: MIT

//! Pace math and percentile-based pace classification.
//!
//! All paces are in seconds per kilometer; converting to a display unit
//! is a presentation concern.

use serde::{Deserialize, Serialize};

use crate::models::RouteSegment;

/// Pace assumed when a trace yields no segments (5:00 min/km).
pub const FALLBACK_PACE_SECS_PER_KM: f64 = 300.0;

/// Minimum number of segments before percentile smoothing kicks in.
/// Below this the raw maximum is used; a percentile over a handful of
/// samples is noise.
pub const PERCENTILE_MIN_SAMPLES: usize = 10;

/// Fast/slow pace bounds used to color a route gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaceBounds {
    /// Fastest pace across all segments (seconds per kilometer)
    pub fast: f64,
    /// Slow bound; the 90th-percentile pace once enough segments exist
    pub slow: f64,
}

/// Pace in seconds per kilometer, or `None` when distance is zero.
pub fn pace_secs_per_km(duration_seconds: f64, distance_meters: f64) -> Option<f64> {
    if distance_meters <= 0.0 {
        return None;
    }
    Some(duration_seconds / (distance_meters / 1000.0))
}

/// Compute the fast/slow pace bounds for a set of route segments.
///
/// `fast` is the minimum pace. With fewer than [`PERCENTILE_MIN_SAMPLES`]
/// segments `slow` is the plain maximum; otherwise it is the value at
/// rank `floor(0.9 * n)` of the ascending-sorted paces, which excludes
/// the slowest ~10% of segments (stoplight stops and the like) from
/// skewing the slow end of the gradient.
pub fn calculate_pace_percentiles(segments: &[RouteSegment]) -> PaceBounds {
    if segments.is_empty() {
        return PaceBounds {
            fast: FALLBACK_PACE_SECS_PER_KM,
            slow: FALLBACK_PACE_SECS_PER_KM,
        };
    }

    let mut paces: Vec<f64> = segments.iter().map(|s| s.pace_secs_per_km).collect();
    let fast = paces.iter().copied().fold(f64::INFINITY, f64::min);

    let slow = if paces.len() < PERCENTILE_MIN_SAMPLES {
        paces.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    } else {
        paces.sort_by(|a, b| a.total_cmp(b));
        let rank = (0.9 * paces.len() as f64).floor() as usize;
        paces[rank]
    };

    PaceBounds { fast, slow }
}

/// Normalize a pace into `[0, 1]` between the fast and slow bounds.
///
/// 0 maps to the fast color, 1 to the slow color, clamped at both ends.
/// Degenerate bounds (`slow <= fast`) yield a fixed neutral 0.5 so the
/// caller never divides by zero.
pub fn pace_fraction(pace: f64, bounds: PaceBounds) -> f64 {
    if bounds.slow <= bounds.fast {
        return 0.5;
    }
    ((pace - bounds.fast) / (bounds.slow - bounds.fast)).clamp(0.0, 1.0)
}
