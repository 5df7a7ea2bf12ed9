// SPDX-License-Identifier: MIT

//! Route and heart-rate analytics.
//!
//! Everything in this module is a pure, synchronous, re-entrant
//! computation over a single workout's raw streams; nothing here touches
//! the network or shares mutable state, so callers may run these
//! concurrently for different workouts without coordination.

pub mod heart_rate;
pub mod pace;
pub mod segments;
pub mod splits;

pub use heart_rate::{aggregate, enrich_splits_with_heart_rate};
pub use pace::{calculate_pace_percentiles, pace_fraction, PaceBounds};
pub use segments::{calculate_route_segments, DEFAULT_SEGMENT_METERS};
pub use splits::calculate_splits;

use geo::{Distance, Haversine, Point};

use crate::models::RoutePoint;

/// Great-circle distance between two GPS fixes in meters.
pub fn haversine_distance_meters(a: &RoutePoint, b: &RoutePoint) -> f64 {
    let p1 = Point::new(a.longitude, a.latitude);
    let p2 = Point::new(b.longitude, b.latitude);
    Haversine::distance(p1, p2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_haversine_known_distance() {
        let t = Utc.with_ymd_and_hms(2024, 5, 1, 7, 0, 0).unwrap();
        // One degree of latitude is ~111.19 km on the mean-radius sphere.
        let a = RoutePoint {
            latitude: 37.0,
            longitude: -122.0,
            timestamp: t,
        };
        let b = RoutePoint {
            latitude: 38.0,
            longitude: -122.0,
            timestamp: t,
        };
        let d = haversine_distance_meters(&a, &b);
        assert!((d - 111_195.0).abs() < 100.0, "got {}", d);
    }
}
