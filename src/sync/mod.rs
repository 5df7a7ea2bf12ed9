// SPDX-License-Identifier: MIT

//! Workout synchronization: diffing and the reconciliation engine.

pub mod diff;
pub mod engine;

pub use diff::new_records;
pub use engine::{SyncEngine, SyncPhase};
