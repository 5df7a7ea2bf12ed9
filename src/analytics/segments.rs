// SPDX-License-Identifier: MIT

//! Fixed-distance route segmentation for pace-colored rendering.

use crate::analytics::haversine_distance_meters;
use crate::analytics::splits::BOUNDARY_EPSILON_METERS;
use crate::models::{RoutePoint, RouteSegment};

/// Default segment length for pace coloring.
pub const DEFAULT_SEGMENT_METERS: f64 = 100.0;

/// Slice a location trace into fixed-distance segments, each retaining
/// its full coordinate path and tagged with its pace in seconds per
/// kilometer.
///
/// Each segment's coordinate list starts from the previous segment's
/// last point so consecutive rendered polylines connect without gaps. A
/// trailing partial segment is kept only when its accumulated distance
/// exceeds half of `segment_meters`.
pub fn calculate_route_segments(
    locations: &[RoutePoint],
    segment_meters: f64,
) -> Vec<RouteSegment> {
    if locations.len() < 2 || segment_meters <= 0.0 {
        return Vec::new();
    }

    let mut segments: Vec<RouteSegment> = Vec::new();
    let mut accumulated = 0.0;
    let mut points: Vec<RoutePoint> = vec![locations[0].clone()];

    for pair in locations.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        accumulated += haversine_distance_meters(prev, curr);
        points.push(curr.clone());

        if accumulated + BOUNDARY_EPSILON_METERS >= segment_meters {
            segments.push(close_segment(points, accumulated));
            // Continuity: the next segment starts at this boundary fix.
            points = vec![curr.clone()];
            accumulated = 0.0;
        }
    }

    if accumulated > segment_meters / 2.0 && points.len() >= 2 {
        segments.push(close_segment(points, accumulated));
    }

    segments
}

fn close_segment(points: Vec<RoutePoint>, distance: f64) -> RouteSegment {
    let elapsed = match (points.first(), points.last()) {
        (Some(first), Some(last)) => {
            (last.timestamp - first.timestamp).num_milliseconds() as f64 / 1000.0
        }
        _ => 0.0,
    };
    // distance is positive here: a segment only closes past the distance
    // threshold, and the remainder path requires more than half of one.
    let pace_secs_per_km = elapsed / (distance / 1000.0);
    RouteSegment {
        points,
        distance_meters: distance,
        pace_secs_per_km,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    const METERS_PER_DEG_LAT: f64 = 6_371_008.8 * std::f64::consts::PI / 180.0;

    fn trace_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 7, 0, 0).unwrap()
    }

    fn constant_speed_trace(steps: usize, step_meters: f64, step_secs: i64) -> Vec<RoutePoint> {
        let start = trace_start();
        (0..=steps)
            .map(|i| RoutePoint {
                latitude: 37.0 + i as f64 * (step_meters / METERS_PER_DEG_LAT),
                longitude: -122.0,
                timestamp: start + chrono::Duration::seconds(i as i64 * step_secs),
            })
            .collect()
    }

    #[test]
    fn test_short_trace_yields_no_segments() {
        assert!(calculate_route_segments(&[], DEFAULT_SEGMENT_METERS).is_empty());
        let one = constant_speed_trace(0, 25.0, 5);
        assert!(calculate_route_segments(&one, DEFAULT_SEGMENT_METERS).is_empty());
    }

    #[test]
    fn test_segment_count_and_distance() {
        // 40 fixes of 25 m = 1000 m -> 10 segments of 100 m.
        let trace = constant_speed_trace(40, 25.0, 5);
        let segments = calculate_route_segments(&trace, DEFAULT_SEGMENT_METERS);
        assert_eq!(segments.len(), 10);
        for segment in &segments {
            assert!((segment.distance_meters - 100.0).abs() < 0.5);
            assert!(segment.points.len() >= 2);
        }
    }

    #[test]
    fn test_consecutive_segments_share_boundary_point() {
        let trace = constant_speed_trace(40, 25.0, 5);
        let segments = calculate_route_segments(&trace, DEFAULT_SEGMENT_METERS);
        for pair in segments.windows(2) {
            let prev_last = pair[0].points.last().expect("segment has points");
            let next_first = pair[1].points.first().expect("segment has points");
            assert_eq!(prev_last, next_first);
        }
    }

    #[test]
    fn test_pace_is_seconds_per_km() {
        // 25 m per 5 s = 5 m/s = 200 s/km.
        let trace = constant_speed_trace(40, 25.0, 5);
        let segments = calculate_route_segments(&trace, DEFAULT_SEGMENT_METERS);
        for segment in &segments {
            assert!((segment.pace_secs_per_km - 200.0).abs() < 1.0);
        }
    }

    #[test]
    fn test_trailing_remainder_over_half_kept() {
        // 1075 m: the 75 m remainder exceeds half of 100 m.
        let trace = constant_speed_trace(43, 25.0, 5);
        let segments = calculate_route_segments(&trace, DEFAULT_SEGMENT_METERS);
        assert_eq!(segments.len(), 11);
        let last = segments.last().expect("segments");
        assert!((last.distance_meters - 75.0).abs() < 0.5);
    }

    #[test]
    fn test_trailing_remainder_under_half_dropped() {
        // 1025 m: the 25 m remainder is under half of 100 m.
        let trace = constant_speed_trace(41, 25.0, 5);
        let segments = calculate_route_segments(&trace, DEFAULT_SEGMENT_METERS);
        assert_eq!(segments.len(), 10);
    }

    #[test]
    fn test_nonpositive_segment_distance_rejected() {
        let trace = constant_speed_trace(10, 25.0, 5);
        assert!(calculate_route_segments(&trace, 0.0).is_empty());
        assert!(calculate_route_segments(&trace, -10.0).is_empty());
    }
}
