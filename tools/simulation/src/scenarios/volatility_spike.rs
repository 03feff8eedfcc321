//! Volatility spike scenario
//!
//! Forces the oracle through a steep staircase move, down for a crash or
//! up for a melt-up, while depositors keep submitting actions. The bank
//! passes when withdrawals keep settling through the move and the deposit
//! history chain still verifies afterwards.

use crate::engine::{SimConfig, SimWorld};
use crate::scenarios::ScenarioResult;

#[derive(Debug, Clone)]
pub struct VolatilitySpikeConfig {
    /// Oracle answer before the move, 8 decimals
    pub initial_price: i128,
    /// Total move size in basis points
    pub move_bps: i128,
    /// Steps the move is spread over
    pub move_steps: u64,
    /// Crash (price down) or melt-up (price up)
    pub is_crash: bool,
    pub seed: u64,
}

impl Default for VolatilitySpikeConfig {
    fn default() -> Self {
        Self {
            initial_price: 411_788_170_000,
            move_bps: 3_000, // 30% move
            move_steps: 20,
            is_crash: true,
            seed: 42,
        }
    }
}

/// Run the scenario to completion.
pub fn run(config: VolatilitySpikeConfig) -> ScenarioResult {
    let mut world = SimWorld::new(SimConfig {
        seed: config.seed,
        initial_price: config.initial_price,
        // The script owns the price during the move
        max_drift_bps: 0,
        ..SimConfig::default()
    });

    // Warm up with flow at the opening price
    world.run(10);

    let total_move = config.initial_price * config.move_bps / 10_000;
    let step_move = total_move / config.move_steps as i128;
    for step in 0..config.move_steps {
        let moved = step_move * (step as i128 + 1);
        let price = if config.is_crash {
            config.initial_price - moved
        } else {
            config.initial_price + moved
        };
        world.force_price(price);
        world.step();
    }

    let withdrawals = world.metrics.withdrawals_paid;
    let passed = withdrawals > 0 && world.bank().verify_history();
    let signed_bps = if config.is_crash {
        -config.move_bps
    } else {
        config.move_bps
    };

    ScenarioResult {
        name: "volatility_spike".to_string(),
        steps_run: 10 + config.move_steps,
        operations_settled: world.metrics.settled(),
        operations_rejected: world.metrics.rejected(),
        passed,
        details: format!(
            "Price moved {} bps over {} steps to {}. {} withdrawals settled.",
            signed_bps,
            config.move_steps,
            world.price(),
            withdrawals,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_crash_passes() {
        let result = run(VolatilitySpikeConfig::default());
        assert!(result.passed, "{}", result.details);
        assert!(result.operations_settled > 0);
    }

    #[test]
    fn test_melt_up_passes() {
        let result = run(VolatilitySpikeConfig {
            is_crash: false,
            ..VolatilitySpikeConfig::default()
        });
        assert!(result.passed, "{}", result.details);
    }

    #[test]
    fn test_extreme_crash_keeps_invariants() {
        // 90% drawdown over five steps
        let result = run(VolatilitySpikeConfig {
            move_bps: 9_000,
            move_steps: 5,
            ..VolatilitySpikeConfig::default()
        });
        assert!(result.passed, "{}", result.details);
    }
}
