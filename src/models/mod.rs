// SPDX-License-Identifier: MIT

//! Data models for the engine.

pub mod route;
pub mod split;
pub mod workout;

pub use route::{HeartRateSample, HeartRateStats, RoutePoint, RouteSegment};
pub use split::{DistanceUnit, Split};
pub use workout::{WorkoutDetail, WorkoutRecord, WorkoutSummary};
