// SPDX-License-Identifier: MIT

//! Services module - external adapter implementations.

pub mod source;

pub use source::{HttpWorkoutSource, WorkoutSource};
