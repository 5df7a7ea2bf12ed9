// SPDX-License-Identifier: MIT

//! Time-windowed heart-rate aggregation and split enrichment.

use chrono::{DateTime, Utc};

use crate::models::{HeartRateSample, HeartRateStats, Split};

/// Aggregate heart-rate samples over an inclusive time window.
///
/// Returns `None` when no sample falls inside the window. Zero is never
/// reported as a stand-in bpm value.
pub fn aggregate(
    samples: &[HeartRateSample],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Option<HeartRateStats> {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;

    for sample in samples {
        if sample.timestamp < window_start || sample.timestamp > window_end {
            continue;
        }
        count += 1;
        sum += sample.bpm;
        max = max.max(sample.bpm);
        min = min.min(sample.bpm);
    }

    if count == 0 {
        return None;
    }

    Some(HeartRateStats {
        avg: sum / count as f64,
        max,
        min,
    })
}

/// Enrich splits with heart-rate aggregates over their own time windows.
///
/// Pure transform: returns a new sequence, each split aggregated
/// independently from its start/end bounds. Splits without bounds pass
/// through unenriched. O(samples x splits), which is fine for the
/// single-workout collections this operates on.
pub fn enrich_splits_with_heart_rate(
    splits: &[Split],
    samples: &[HeartRateSample],
) -> Vec<Split> {
    splits
        .iter()
        .map(|split| {
            let mut enriched = split.clone();
            if let (Some(start), Some(end)) = (split.start_time, split.end_time) {
                enriched.heart_rate = aggregate(samples, start, end);
            }
            enriched
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 7, 0, 0).unwrap()
    }

    fn samples_every_10s(bpms: &[f64]) -> Vec<HeartRateSample> {
        let start = base_time();
        bpms.iter()
            .enumerate()
            .map(|(i, &bpm)| {
                HeartRateSample::new(start + chrono::Duration::seconds(i as i64 * 10), bpm, start)
            })
            .collect()
    }

    #[test]
    fn test_aggregate_basic() {
        let samples = samples_every_10s(&[140.0, 150.0, 160.0]);
        let stats = aggregate(&samples, base_time(), base_time() + chrono::Duration::seconds(20))
            .expect("window contains samples");
        assert_eq!(stats.avg, 150.0);
        assert_eq!(stats.max, 160.0);
        assert_eq!(stats.min, 140.0);
    }

    #[test]
    fn test_empty_window_is_none_not_zero() {
        let samples = samples_every_10s(&[140.0, 150.0]);
        let start = base_time() + chrono::Duration::seconds(3600);
        let stats = aggregate(&samples, start, start + chrono::Duration::seconds(60));
        assert!(stats.is_none());
    }

    #[test]
    fn test_window_bounds_inclusive() {
        let samples = samples_every_10s(&[140.0, 150.0, 160.0]);
        // Window exactly [t+10, t+20]: both boundary samples included.
        let stats = aggregate(
            &samples,
            base_time() + chrono::Duration::seconds(10),
            base_time() + chrono::Duration::seconds(20),
        )
        .expect("boundary samples included");
        assert_eq!(stats.min, 150.0);
        assert_eq!(stats.max, 160.0);
    }

    #[test]
    fn test_enrich_uses_each_splits_own_window() {
        let start = base_time();
        let samples = samples_every_10s(&[140.0, 150.0, 160.0, 170.0, 180.0, 190.0]);

        let split_one = Split {
            index: 1,
            distance_meters: 1000.0,
            duration_seconds: 25.0,
            start_time: Some(start),
            end_time: Some(start + chrono::Duration::seconds(25)),
            heart_rate: None,
        };
        let split_two = Split {
            index: 2,
            distance_meters: 1000.0,
            duration_seconds: 25.0,
            start_time: Some(start + chrono::Duration::seconds(25)),
            end_time: Some(start + chrono::Duration::seconds(50)),
            heart_rate: None,
        };

        let enriched = enrich_splits_with_heart_rate(&[split_one, split_two], &samples);

        let first = enriched[0].heart_rate.expect("first window has samples");
        assert_eq!(first.avg, 150.0); // 140, 150, 160
        let second = enriched[1].heart_rate.expect("second window has samples");
        assert_eq!(second.avg, 180.0); // 170, 180, 190
    }

    #[test]
    fn test_enrich_without_bounds_passes_through() {
        let samples = samples_every_10s(&[140.0]);
        let split = Split {
            index: 1,
            distance_meters: 500.0,
            duration_seconds: 120.0,
            start_time: None,
            end_time: None,
            heart_rate: None,
        };
        let enriched = enrich_splits_with_heart_rate(&[split], &samples);
        assert!(enriched[0].heart_rate.is_none());
    }
}
