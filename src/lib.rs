// SPDX-License-Identifier: MIT

//! Paceline: workout synchronization and route analytics engine.
//!
//! This crate reconciles workouts observed at a fitness source against a
//! remote record store without duplicating uploads, and derives
//! per-distance splits, pace-colored route segments, and heart-rate
//! aggregates from a workout's raw GPS and heart-rate streams.

pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod sync;
pub mod time_utils;

pub use error::{AppError, Result};
pub use sync::{SyncEngine, SyncPhase};
