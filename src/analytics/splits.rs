// SPDX-License-Identifier: MIT

//! Fixed-interval split computation from a raw location trace.

use crate::analytics::haversine_distance_meters;
use crate::models::{DistanceUnit, RoutePoint, Split};

/// Tolerance applied to interval comparisons so a trace of exactly
/// N full intervals closes exactly N splits. GPS fixes land millimeters
/// around the boundary after floating-point accumulation; this must stay
/// far below the remainder thresholds.
pub(crate) const BOUNDARY_EPSILON_METERS: f64 = 1e-3;

/// Slice a location trace into fixed-interval splits (km or mile).
///
/// Consecutive great-circle distances are accumulated; a split closes at
/// the first fix where the running sum reaches the unit interval. Split
/// duration is the time between the fix that opened the window and the
/// fix that closed it, and both timestamps are kept for heart-rate
/// enrichment. A trailing remainder becomes a final fractional split
/// only when it exceeds the unit's minimum-fraction threshold; shorter
/// remainders are dropped, not merged into the previous split.
///
/// Fewer than two fixes is expected ("no route data"), not an error, and
/// yields an empty result.
pub fn calculate_splits(locations: &[RoutePoint], unit: DistanceUnit) -> Vec<Split> {
    if locations.len() < 2 {
        return Vec::new();
    }

    let interval = unit.interval_meters();
    let mut splits: Vec<Split> = Vec::new();
    let mut accumulated = 0.0;
    let mut window_start = &locations[0];

    for pair in locations.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        accumulated += haversine_distance_meters(prev, curr);

        if accumulated + BOUNDARY_EPSILON_METERS >= interval {
            splits.push(close_split(
                splits.len() as u32 + 1,
                accumulated,
                window_start,
                curr,
            ));
            accumulated = 0.0;
            window_start = curr;
        }
    }

    if accumulated > unit.min_remainder_meters() {
        let last = &locations[locations.len() - 1];
        splits.push(close_split(
            splits.len() as u32 + 1,
            accumulated,
            window_start,
            last,
        ));
    }

    splits
}

fn close_split(index: u32, distance: f64, start: &RoutePoint, end: &RoutePoint) -> Split {
    let duration_seconds = (end.timestamp - start.timestamp).num_milliseconds() as f64 / 1000.0;
    Split {
        index,
        distance_meters: distance,
        duration_seconds,
        start_time: Some(start.timestamp),
        end_time: Some(end.timestamp),
        heart_rate: None,
    }
}
