//! Simulation metrics
//!
//! Counts settled operations and rejections by kind, and tracks USD flow
//! totals as decimals for reporting.

use bank::errors::BankError;
use bank::events::BankEvent;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::numeric::UsdAmount;

/// Aggregated counters for one simulation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimMetrics {
    pub deposits_accepted: u64,
    pub withdrawals_paid: u64,
    pub admin_actions: u64,
    pub capacity_rejections: u64,
    pub limit_rejections: u64,
    pub balance_rejections: u64,
    pub paused_rejections: u64,
    pub oracle_rejections: u64,
    pub transfer_failures: u64,
    pub other_rejections: u64,
    pub gross_deposited_usd: Decimal,
    pub gross_withdrawn_usd: Decimal,
    pub peak_total_usd: Decimal,
    pub elapsed_ns: u64,
}

/// Render a USD amount as a decimal with 6 fractional digits.
fn usd_decimal(usd: UsdAmount) -> Decimal {
    Decimal::from_i128_with_scale(usd.raw() as i128, 6)
}

impl SimMetrics {
    /// Create empty metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a single bank event.
    pub fn record_event(&mut self, event: &BankEvent) {
        match event {
            BankEvent::DepositAccepted(deposit) => {
                self.deposits_accepted += 1;
                self.gross_deposited_usd += usd_decimal(deposit.usd_value);
            }
            BankEvent::WithdrawalPaid(withdrawal) => {
                self.withdrawals_paid += 1;
                self.gross_withdrawn_usd += usd_decimal(withdrawal.usd_value);
            }
            _ => {
                self.admin_actions += 1;
            }
        }
    }

    /// Record every event from a drained log.
    pub fn ingest_events(&mut self, events: &[BankEvent]) {
        for event in events {
            self.record_event(event);
        }
    }

    /// Record a rejected operation by kind.
    pub fn record_rejection(&mut self, err: &BankError) {
        match err {
            BankError::CapacityExceeded { .. } => self.capacity_rejections += 1,
            BankError::LimitExceeded { .. } => self.limit_rejections += 1,
            BankError::InsufficientBalance { .. } => self.balance_rejections += 1,
            BankError::BankPaused { .. } => self.paused_rejections += 1,
            BankError::Oracle(_) => self.oracle_rejections += 1,
            BankError::TransferFailed(_) => self.transfer_failures += 1,
            _ => self.other_rejections += 1,
        }
    }

    /// Track the high-water mark of the bank's running total.
    pub fn observe_total(&mut self, total: UsdAmount) {
        let total = usd_decimal(total);
        if total > self.peak_total_usd {
            self.peak_total_usd = total;
        }
    }

    /// Set elapsed time.
    pub fn set_elapsed(&mut self, ns: u64) {
        self.elapsed_ns = ns;
    }

    /// Operations that settled.
    pub fn settled(&self) -> u64 {
        self.deposits_accepted + self.withdrawals_paid
    }

    /// Operations rejected for any reason.
    pub fn rejected(&self) -> u64 {
        self.capacity_rejections
            + self.limit_rejections
            + self.balance_rejections
            + self.paused_rejections
            + self.oracle_rejections
            + self.transfer_failures
            + self.other_rejections
    }

    /// Throughput: settled operations per second.
    pub fn operations_per_second(&self) -> f64 {
        if self.elapsed_ns == 0 {
            return 0.0;
        }
        self.settled() as f64 / (self.elapsed_ns as f64 / 1_000_000_000.0)
    }

    /// Build a one-line run summary.
    pub fn summary(&self) -> String {
        format!(
            "Deposits: {} | Withdrawals: {} | Rejected: {} | Gross in: {} | Gross out: {} | Peak: {}",
            self.deposits_accepted,
            self.withdrawals_paid,
            self.rejected(),
            self.gross_deposited_usd,
            self.gross_withdrawn_usd,
            self.peak_total_usd,
        )
    }
}
