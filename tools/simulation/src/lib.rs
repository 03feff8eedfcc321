//! Deposit Flow Simulation Harness
//!
//! Deterministic stress tooling for the custodial bank. Drives randomized
//! deposit and withdrawal flow against a real bank instance wired to stub
//! collaborators, drifts the oracle price between steps, and re-checks the
//! accounting invariants after every step.
//!
//! # Modules
//! - `engine`: simulation world holding the bank, stubs, clock, and price
//! - `depositors`: seeded depositor actors planning random operations
//! - `scenarios`: volatility spike, capacity saturation, paused window
//! - `metrics`: settlement and rejection counters, USD flow totals
//! - `export`: JSON run reports

pub mod depositors;
pub mod engine;
pub mod export;
pub mod metrics;
pub mod scenarios;

/// Crate version constant
pub const VERSION: &str = "1.0.0";
