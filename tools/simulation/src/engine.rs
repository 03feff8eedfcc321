//! Simulation world
//!
//! Owns one bank wired to stub collaborators, a set of depositor actors,
//! a drifting price feed, and a stepped clock. Each step advances time,
//! moves the price, lets every actor submit one planned action, and then
//! checks the cheap accounting invariants. Runs with the same seed replay
//! identically.

use bank::bank::{Bank, BankConfig};
use bank::testing::{RecordingNativeGateway, StubPriceFeed, StubStableAsset};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use types::asset::AssetKind;
use types::ids::Address;
use types::numeric::UsdAmount;

use crate::depositors::{Depositor, DepositorConfig, PlannedAction};
use crate::metrics::SimMetrics;

/// Simulated epoch start, shared by the clock and the first oracle round.
const GENESIS_CLOCK: i64 = 1_700_000_000;

/// Knobs for one simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub seed: u64,
    pub depositor_count: usize,
    pub depositor: DepositorConfig,
    pub withdrawal_limit_usd: UsdAmount,
    pub bank_cap_usd: UsdAmount,
    /// Opening oracle answer, 8 decimals
    pub initial_price: i128,
    /// Largest per-step price move in basis points; 0 freezes the price
    pub max_drift_bps: u32,
    /// Probability in basis points that a step publishes a stale round
    pub stale_feed_bps: u32,
    /// Probability in basis points that a withdrawal's settlement leg fails
    pub transfer_failure_bps: u32,
    /// Seconds between steps
    pub step_secs: i64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            depositor_count: 8,
            depositor: DepositorConfig::default(),
            withdrawal_limit_usd: UsdAmount::from_whole(1_000),
            bank_cap_usd: UsdAmount::from_whole(100_000),
            initial_price: 411_788_170_000,
            max_drift_bps: 75,
            stale_feed_bps: 0,
            transfer_failure_bps: 0,
            step_secs: 30,
        }
    }
}

/// A bank plus everything needed to drive it.
pub struct SimWorld {
    bank: Bank,
    feed: StubPriceFeed,
    stable: StubStableAsset,
    gateway: RecordingNativeGateway,
    depositors: Vec<Depositor>,
    rng: ChaCha8Rng,
    clock: i64,
    price: i128,
    admin: Address,
    config: SimConfig,
    pub metrics: SimMetrics,
}

impl SimWorld {
    /// Build a world from a config. The admin account deploys the bank and
    /// holds both roles.
    pub fn new(config: SimConfig) -> Self {
        let admin = Address::new("sim_admin");
        let feed = StubPriceFeed::new(Address::new("sim_feed"), config.initial_price, GENESIS_CLOCK);
        let stable = StubStableAsset::new(Address::new("sim_usdx"), "USDX");
        let gateway = RecordingNativeGateway::new();
        let bank = Bank::new(
            admin.clone(),
            BankConfig {
                withdrawal_limit_usd: config.withdrawal_limit_usd,
                bank_cap_usd: config.bank_cap_usd,
            },
            Box::new(feed.clone()),
            Box::new(stable.clone()),
            Box::new(gateway.clone()),
        )
        .unwrap();

        let depositors = (0..config.depositor_count)
            .map(|i| {
                Depositor::new(
                    Address::new(format!("depositor_{i}")),
                    config.depositor.clone(),
                    config.seed.wrapping_add(i as u64 + 1),
                )
            })
            .collect();

        Self {
            bank,
            feed,
            stable,
            gateway,
            depositors,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            clock: GENESIS_CLOCK,
            price: config.initial_price,
            admin,
            config,
            metrics: SimMetrics::new(),
        }
    }

    /// Advance one step: move the clock and price, run every actor once,
    /// fold emitted events into the metrics, and check invariants.
    pub fn step(&mut self) {
        self.clock += self.config.step_secs;
        self.drift_price();

        for i in 0..self.depositors.len() {
            let action = self.depositors[i].plan();
            let who = self.depositors[i].address.clone();
            self.apply(&who, action);
        }

        self.metrics.observe_total(self.bank.total_bank_value());
        let drained = self.bank.drain_events();
        self.metrics.ingest_events(&drained);
        self.check_invariants();
    }

    /// Run a number of steps.
    pub fn run(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Random-walk the oracle answer within the configured drift bound,
    /// then publish a round. Most rounds carry the current clock; a stale
    /// draw backdates the round past the staleness window, so native flow
    /// bounces this step while stable flow continues.
    fn drift_price(&mut self) {
        if self.config.max_drift_bps > 0 {
            let bound = self.config.max_drift_bps as i128;
            let bps = self.rng.gen_range(-bound..=bound);
            let delta = self.price * bps / 10_000;
            self.price = (self.price + delta).max(1);
        }

        let stale = self.config.stale_feed_bps > 0
            && self
                .rng
                .gen_ratio(self.config.stale_feed_bps.min(10_000), 10_000);
        let updated_at = if stale {
            self.clock - bank::valuation::STALENESS_WINDOW_SECS - 1
        } else {
            self.clock
        };
        self.feed.set_round(self.price, updated_at);
    }

    /// Submit one planned action against the bank.
    ///
    /// Sabotage draws happen only for withdrawals, so changing the failure
    /// rate does not shift the RNG stream consumed by deposits.
    fn apply(&mut self, who: &Address, action: PlannedAction) {
        let sabotage = self.config.transfer_failure_bps > 0
            && !action.is_deposit()
            && self
                .rng
                .gen_ratio(self.config.transfer_failure_bps.min(10_000), 10_000);

        let now = self.clock;
        let result = match action {
            PlannedAction::DepositNative(amount) => {
                self.bank.deposit_native(who, amount, now).map(|_| ())
            }
            PlannedAction::DepositStable(amount) => {
                // Tokens are acquired out of band before the pull.
                self.stable.mint(who, amount);
                self.bank.deposit_stable(who, amount, now).map(|_| ())
            }
            PlannedAction::WithdrawNative(amount) => {
                self.gateway.set_fail_pushes(sabotage);
                let outcome = self.bank.withdraw_native(who, amount, now).map(|_| ());
                self.gateway.set_fail_pushes(false);
                outcome
            }
            PlannedAction::WithdrawStable(amount) => {
                self.stable.set_fail_pushes(sabotage);
                let outcome = self.bank.withdraw_stable(who, amount, now).map(|_| ());
                self.stable.set_fail_pushes(false);
                outcome
            }
        };

        if let Err(err) = result {
            self.metrics.record_rejection(&err);
        }
    }

    /// Cheap per-step accounting checks. The full history replay is
    /// expensive and runs once per test, not here.
    fn check_invariants(&self) {
        let total = self.bank.total_bank_value();
        assert!(
            total <= self.config.bank_cap_usd,
            "running total {total} breached capacity {}",
            self.config.bank_cap_usd
        );

        let audited = self
            .bank
            .audit_balance_sum(AssetKind::Native)
            .checked_add(self.bank.audit_balance_sum(AssetKind::Stable))
            .unwrap_or(UsdAmount::new(u128::MAX));
        assert_eq!(audited, total, "audit walk diverged from running totals");
    }

    // ───────────────────────── Accessors ─────────────────────────

    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut Bank {
        &mut self.bank
    }

    pub fn admin(&self) -> &Address {
        &self.admin
    }

    pub fn clock(&self) -> i64 {
        self.clock
    }

    /// Current oracle answer.
    pub fn price(&self) -> i128 {
        self.price
    }

    pub fn stable(&self) -> &StubStableAsset {
        &self.stable
    }

    pub fn gateway(&self) -> &RecordingNativeGateway {
        &self.gateway
    }

    pub fn depositor_addresses(&self) -> Vec<Address> {
        self.depositors
            .iter()
            .map(|depositor| depositor.address.clone())
            .collect()
    }

    /// Pin the oracle answer, overriding drift until the next drifted step.
    pub fn force_price(&mut self, price: i128) {
        self.price = price.max(1);
        self.feed.set_round(self.price, self.clock);
    }
}
