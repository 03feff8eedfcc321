//! Depositor actors
//!
//! Each depositor owns a deterministic seeded RNG and plans one action at
//! a time: a deposit or withdrawal of either asset, sized at random within
//! the configured ranges. Actors never inspect bank state, so rejected
//! plans are part of normal flow and get counted by the metrics layer.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use types::ids::Address;
use types::numeric::{NativeAmount, StableAmount};

/// Sizing and mix for a depositor's action stream.
#[derive(Debug, Clone)]
pub struct DepositorConfig {
    /// Smallest native action, raw 18-decimal units
    pub min_native_wei: u128,
    /// Largest native action, raw 18-decimal units
    pub max_native_wei: u128,
    /// Smallest stable action, raw 6-decimal units
    pub min_stable_raw: u128,
    /// Largest stable action, raw 6-decimal units
    pub max_stable_raw: u128,
    /// Probability a plan deposits rather than withdraws
    pub deposit_ratio: f64,
    /// Probability a plan uses the native asset
    pub native_ratio: f64,
}

impl Default for DepositorConfig {
    fn default() -> Self {
        Self {
            min_native_wei: 1_000_000_000_000_000, // 0.001 native
            max_native_wei: 500_000_000_000_000_000, // 0.5 native
            min_stable_raw: 1_000_000, // 1 USD
            max_stable_raw: 2_000_000_000, // 2000 USD
            deposit_ratio: 0.6,
            native_ratio: 0.5,
        }
    }
}

/// One planned bank operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedAction {
    DepositNative(NativeAmount),
    DepositStable(StableAmount),
    WithdrawNative(NativeAmount),
    WithdrawStable(StableAmount),
}

impl PlannedAction {
    /// Whether the plan is a deposit.
    pub fn is_deposit(&self) -> bool {
        matches!(
            self,
            PlannedAction::DepositNative(_) | PlannedAction::DepositStable(_)
        )
    }
}

/// A single simulated account with deterministic behavior.
pub struct Depositor {
    pub address: Address,
    config: DepositorConfig,
    rng: ChaCha8Rng,
    pub actions_planned: usize,
}

impl Depositor {
    /// Create a depositor with a deterministic seed.
    pub fn new(address: Address, config: DepositorConfig, seed: u64) -> Self {
        Self {
            address,
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            actions_planned: 0,
        }
    }

    /// Plan the next action.
    pub fn plan(&mut self) -> PlannedAction {
        let deposit = self.rng.gen_bool(self.config.deposit_ratio);
        let native = self.rng.gen_bool(self.config.native_ratio);
        self.actions_planned += 1;

        if native {
            let wei = self
                .rng
                .gen_range(self.config.min_native_wei..=self.config.max_native_wei);
            let amount = NativeAmount::new(wei);
            if deposit {
                PlannedAction::DepositNative(amount)
            } else {
                PlannedAction::WithdrawNative(amount)
            }
        } else {
            let raw = self
                .rng
                .gen_range(self.config.min_stable_raw..=self.config.max_stable_raw);
            let amount = StableAmount::new(raw);
            if deposit {
                PlannedAction::DepositStable(amount)
            } else {
                PlannedAction::WithdrawStable(amount)
            }
        }
    }
}
