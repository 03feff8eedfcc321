//! Paused window scenario
//!
//! Runs normal flow, pauses the bank for a window, then resumes. During
//! the window every deposit must bounce while withdrawals keep paying
//! out, and after the resume deposits must settle again. The cap is set
//! high so status gating is the only thing being exercised.

use types::numeric::UsdAmount;

use crate::engine::{SimConfig, SimWorld};
use crate::scenarios::ScenarioResult;

#[derive(Debug, Clone)]
pub struct PausedWindowConfig {
    pub active_steps: u64,
    pub paused_steps: u64,
    pub resumed_steps: u64,
    pub seed: u64,
}

impl Default for PausedWindowConfig {
    fn default() -> Self {
        Self {
            active_steps: 20,
            paused_steps: 20,
            resumed_steps: 20,
            seed: 42,
        }
    }
}

/// Run the scenario to completion.
pub fn run(config: PausedWindowConfig) -> ScenarioResult {
    let mut world = SimWorld::new(SimConfig {
        seed: config.seed,
        bank_cap_usd: UsdAmount::from_whole(1_000_000),
        ..SimConfig::default()
    });

    world.run(config.active_steps);
    let deposits_before = world.metrics.deposits_accepted;
    let withdrawals_before = world.metrics.withdrawals_paid;

    let admin = world.admin().clone();
    world.bank_mut().pause(&admin).unwrap();
    world.run(config.paused_steps);

    let deposits_during = world.metrics.deposits_accepted - deposits_before;
    let withdrawals_during = world.metrics.withdrawals_paid - withdrawals_before;
    let rejected_by_pause = world.metrics.paused_rejections;

    world.bank_mut().unpause(&admin).unwrap();
    world.run(config.resumed_steps);
    let deposits_after = world.metrics.deposits_accepted - deposits_before;

    let passed = deposits_during == 0
        && withdrawals_during > 0
        && rejected_by_pause > 0
        && deposits_after > 0;

    ScenarioResult {
        name: "paused_window".to_string(),
        steps_run: config.active_steps + config.paused_steps + config.resumed_steps,
        operations_settled: world.metrics.settled(),
        operations_rejected: world.metrics.rejected(),
        passed,
        details: format!(
            "Pause window rejected {} deposits while {} withdrawals settled; {} deposits after resume.",
            rejected_by_pause, withdrawals_during, deposits_after,
        ),
    }
}
