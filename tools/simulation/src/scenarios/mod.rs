//! Canned stress scenarios
//!
//! Each scenario builds a world, drives it through a scripted situation,
//! and reports whether the bank held its invariants. Scenarios are pure
//! functions of their config, so a failing run can be replayed exactly.

use serde::{Deserialize, Serialize};

pub mod cap_pressure;
pub mod paused_window;
pub mod volatility_spike;

/// Outcome of one scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub steps_run: u64,
    pub operations_settled: u64,
    pub operations_rejected: u64,
    pub passed: bool,
    pub details: String,
}
