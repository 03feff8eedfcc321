//! Bank: operation sequencing and the administrative surface
//!
//! The `Bank` owns the ledger, the deposit history, the role set, and the
//! three external collaborators (price oracle, stable asset, native
//! gateway). Every state-mutating entry point runs inside the reentrancy
//! guard and follows a fixed ordering:
//!
//! - deposits validate, then pull external funds (stable path only), then
//!   mutate the ledger;
//! - withdrawals validate, mutate the ledger, and issue the outbound
//!   transfer last; a failed transfer reverts the mutation and the event,
//!   leaving no trace of the attempt.
//!
//! Oracle reads happen exactly once per operation: a sample is taken at
//! entry and shared by every conversion in that operation. Withdrawals
//! are never blocked by the bank status.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use types::asset::{AssetInfo, AssetKind};
use types::ids::Address;
use types::numeric::{NativeAmount, StableAmount, UsdAmount};

use crate::errors::BankError;
use crate::events::{
    AssetSupportChanged, BankEvent, BankStatusChanged, DepositAccepted, OperatorGranted,
    OperatorRevoked, OracleRotated, StableAssetRotated, WithdrawalPaid,
};
use crate::gateway::{NativeGateway, StableAsset};
use crate::history::{DepositHistory, DepositRecord};
use crate::ledger::Ledger;
use crate::security::{BankStatus, ReentrancyGuard, Role, RoleSet};
use crate::valuation::{self, OracleSample, PriceOracle};

/// Construction-time limits, fixed for the bank's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankConfig {
    /// Per-operation withdrawal ceiling, USD
    pub withdrawal_limit_usd: UsdAmount,
    /// Global deposit capacity across both assets, USD
    pub bank_cap_usd: UsdAmount,
}

/// Receipt for an accepted deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositReceipt {
    /// Index of the record appended to the deposit history
    pub record_index: u64,
    pub usd_credited: UsdAmount,
    pub new_balance: UsdAmount,
}

/// Receipt for a settled withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalReceipt {
    pub usd_debited: UsdAmount,
    pub new_balance: UsdAmount,
}

/// The custodial bank.
pub struct Bank {
    config: BankConfig,
    status: BankStatus,
    ledger: Ledger,
    history: DepositHistory,
    roles: RoleSet,
    guard: ReentrancyGuard,
    oracle: Box<dyn PriceOracle>,
    stable: Box<dyn StableAsset>,
    native_gateway: Box<dyn NativeGateway>,
    /// Emitted events log (drained by the host)
    events: Vec<BankEvent>,
}

impl std::fmt::Debug for Bank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bank")
            .field("config", &self.config)
            .field("status", &self.status)
            .field("ledger", &self.ledger)
            .field("history", &self.history)
            .field("roles", &self.roles)
            .field("guard", &self.guard)
            .field("oracle", &self.oracle.address())
            .field("stable", &self.stable.address())
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl Bank {
    /// Construct a bank.
    ///
    /// Both limits must be strictly positive and the deployer and
    /// collaborator addresses non-zero. The deployer is granted both the
    /// Admin and the Operator role.
    pub fn new(
        deployer: Address,
        config: BankConfig,
        oracle: Box<dyn PriceOracle>,
        stable: Box<dyn StableAsset>,
        native_gateway: Box<dyn NativeGateway>,
    ) -> Result<Self, BankError> {
        if deployer.is_zero() || oracle.address().is_zero() || stable.address().is_zero() {
            return Err(BankError::InvalidAccount);
        }
        if config.bank_cap_usd.is_zero() {
            return Err(BankError::InvalidConfiguration {
                reason: "bank capacity must be positive".to_string(),
            });
        }
        if config.withdrawal_limit_usd.is_zero() {
            return Err(BankError::InvalidConfiguration {
                reason: "withdrawal limit must be positive".to_string(),
            });
        }

        let ledger = Ledger::new(stable.address().clone(), stable.symbol());
        let roles = RoleSet::new(&deployer);
        info!(
            deployer = %deployer,
            bank_cap_usd = %config.bank_cap_usd,
            withdrawal_limit_usd = %config.withdrawal_limit_usd,
            stable_asset = %stable.address(),
            oracle = %oracle.address(),
            "Bank initialized"
        );

        Ok(Self {
            config,
            status: BankStatus::Active,
            ledger,
            history: DepositHistory::new(),
            roles,
            guard: ReentrancyGuard::new(),
            oracle,
            stable,
            native_gateway,
            events: Vec::new(),
        })
    }

    // ───────────────────────── Guard plumbing ─────────────────────────

    /// Run a mutating operation under the reentrancy guard.
    ///
    /// The guard is released on every exit path; a call arriving while it
    /// is held fails with `ReentrantCall` before touching any state.
    fn guarded<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T, BankError>,
    ) -> Result<T, BankError> {
        if !self.guard.acquire() {
            return Err(BankError::ReentrantCall);
        }
        let result = op(self);
        self.guard.release();
        result
    }

    fn require_role(&self, caller: &Address, role: Role) -> Result<(), BankError> {
        if !self.roles.has_role(caller, role) {
            return Err(BankError::Unauthorized {
                account: caller.clone(),
                required: role,
            });
        }
        Ok(())
    }

    fn ensure_deposits_open(&self, kind: AssetKind) -> Result<(), BankError> {
        if !self.status.allows_deposits() {
            return Err(BankError::BankPaused {
                status: self.status,
            });
        }
        if !self.ledger.asset(kind).supported {
            return Err(BankError::AssetNotSupported {
                asset: kind.to_string(),
            });
        }
        Ok(())
    }

    /// Force-hold the guard so tests can drive the `ReentrantCall` path.
    #[cfg(test)]
    pub(crate) fn seize_guard(&mut self) {
        assert!(self.guard.acquire());
    }

    // ───────────────────────── Deposits ─────────────────────────

    /// Deposit native asset arriving attached to the call.
    ///
    /// Samples the oracle once, converts at 18+8→6 digits with truncation,
    /// and credits the USD value against the global capacity. An amount
    /// whose USD value truncates to zero is rejected.
    pub fn deposit_native(
        &mut self,
        caller: &Address,
        amount: NativeAmount,
        now: i64,
    ) -> Result<DepositReceipt, BankError> {
        self.guarded(|bank| {
            if caller.is_zero() {
                return Err(BankError::InvalidAccount);
            }
            bank.ensure_deposits_open(AssetKind::Native)?;
            if amount.is_zero() {
                return Err(BankError::InvalidAmount);
            }

            let sample = OracleSample::take(bank.oracle.as_ref(), now)?;
            let usd = valuation::native_to_usd(amount, &sample)?;
            if usd.is_zero() {
                return Err(BankError::InvalidAmount);
            }

            let new_balance = bank
                .ledger
                .credit_deposit(caller, AssetKind::Native, usd, bank.config.bank_cap_usd)
                .map_err(|err| {
                    warn!(depositor = %caller, usd_value = %usd, error = %err, "Native deposit rejected");
                    err
                })?;
            let record_index =
                bank.history
                    .append(AssetKind::Native, amount.raw(), usd, now, caller.clone());
            bank.events.push(BankEvent::DepositAccepted(DepositAccepted {
                depositor: caller.clone(),
                asset: AssetKind::Native,
                original_amount: amount.raw(),
                usd_value: usd,
                new_balance,
                record_index,
            }));
            debug!(
                depositor = %caller,
                usd_value = %usd,
                price = sample.price(),
                "Native deposit credited"
            );
            Ok(DepositReceipt {
                record_index,
                usd_credited: usd,
                new_balance,
            })
        })
    }

    /// Deposit stable asset by pulling it from the caller.
    ///
    /// The 1:1 peg at equal scale makes the USD value the raw amount; no
    /// oracle read. Capacity is verified before the pull, so a rejected
    /// deposit never moves external funds; a failed pull fails the
    /// operation with `TransferFailed` before any ledger mutation.
    pub fn deposit_stable(
        &mut self,
        caller: &Address,
        amount: StableAmount,
        now: i64,
    ) -> Result<DepositReceipt, BankError> {
        self.guarded(|bank| {
            if caller.is_zero() {
                return Err(BankError::InvalidAccount);
            }
            bank.ensure_deposits_open(AssetKind::Stable)?;
            if amount.is_zero() {
                return Err(BankError::InvalidAmount);
            }

            let usd = amount.as_usd();
            bank.ledger
                .ensure_capacity(usd, bank.config.bank_cap_usd)
                .map_err(|err| {
                    warn!(depositor = %caller, usd_value = %usd, error = %err, "Stable deposit rejected");
                    err
                })?;

            bank.stable.pull_from(caller, amount)?;
            let new_balance = match bank.ledger.credit_deposit(
                caller,
                AssetKind::Stable,
                usd,
                bank.config.bank_cap_usd,
            ) {
                Ok(balance) => balance,
                Err(err) => {
                    // Unreachable while execution is serialized; return
                    // the pulled funds rather than strand them.
                    let _ = bank.stable.push_to(caller, amount);
                    error!(
                        depositor = %caller,
                        error = %err,
                        "Stable credit failed after pull, funds returned"
                    );
                    return Err(err);
                }
            };
            let record_index =
                bank.history
                    .append(AssetKind::Stable, amount.raw(), usd, now, caller.clone());
            bank.events.push(BankEvent::DepositAccepted(DepositAccepted {
                depositor: caller.clone(),
                asset: AssetKind::Stable,
                original_amount: amount.raw(),
                usd_value: usd,
                new_balance,
                record_index,
            }));
            debug!(depositor = %caller, usd_value = %usd, "Stable deposit credited");
            Ok(DepositReceipt {
                record_index,
                usd_credited: usd,
                new_balance,
            })
        })
    }

    // ───────────────────────── Withdrawals ─────────────────────────

    /// Withdraw a native quantity back to the caller.
    ///
    /// One oracle sample prices both the limit check and the debit. The
    /// ledger is debited before the gateway transfer; if the transfer
    /// fails, balance, running total, counter, and event are all restored
    /// and the operation fails with `TransferFailed`.
    pub fn withdraw_native(
        &mut self,
        caller: &Address,
        amount: NativeAmount,
        now: i64,
    ) -> Result<WithdrawalReceipt, BankError> {
        self.guarded(|bank| {
            if caller.is_zero() {
                return Err(BankError::InvalidAccount);
            }
            if amount.is_zero() {
                return Err(BankError::InvalidAmount);
            }

            let sample = OracleSample::take(bank.oracle.as_ref(), now)?;
            let usd = valuation::native_to_usd(amount, &sample)?;
            let new_balance = bank
                .ledger
                .debit_withdrawal(
                    caller,
                    AssetKind::Native,
                    usd,
                    bank.config.withdrawal_limit_usd,
                )
                .map_err(|err| {
                    warn!(withdrawer = %caller, usd_value = %usd, error = %err, "Native withdrawal rejected");
                    err
                })?;
            bank.events.push(BankEvent::WithdrawalPaid(WithdrawalPaid {
                withdrawer: caller.clone(),
                asset: AssetKind::Native,
                original_amount: amount.raw(),
                usd_value: usd,
                new_balance,
            }));

            if let Err(err) = bank.native_gateway.push_to(caller, amount) {
                bank.ledger
                    .revert_withdrawal(caller, AssetKind::Native, usd);
                bank.events.pop();
                error!(
                    withdrawer = %caller,
                    usd_value = %usd,
                    reason = %err,
                    "Native payout failed, ledger restored"
                );
                return Err(BankError::TransferFailed(err));
            }

            debug!(
                withdrawer = %caller,
                usd_value = %usd,
                price = sample.price(),
                "Native withdrawal settled"
            );
            Ok(WithdrawalReceipt {
                usd_debited: usd,
                new_balance,
            })
        })
    }

    /// Withdraw a stable quantity back to the caller.
    ///
    /// Same ordering as the native path with the stable contract as the
    /// settlement leg. Never blocked by the bank status.
    pub fn withdraw_stable(
        &mut self,
        caller: &Address,
        amount: StableAmount,
        now: i64,
    ) -> Result<WithdrawalReceipt, BankError> {
        self.guarded(|bank| {
            if caller.is_zero() {
                return Err(BankError::InvalidAccount);
            }
            if amount.is_zero() {
                return Err(BankError::InvalidAmount);
            }

            let usd = amount.as_usd();
            let new_balance = bank
                .ledger
                .debit_withdrawal(
                    caller,
                    AssetKind::Stable,
                    usd,
                    bank.config.withdrawal_limit_usd,
                )
                .map_err(|err| {
                    warn!(withdrawer = %caller, usd_value = %usd, error = %err, "Stable withdrawal rejected");
                    err
                })?;
            bank.events.push(BankEvent::WithdrawalPaid(WithdrawalPaid {
                withdrawer: caller.clone(),
                asset: AssetKind::Stable,
                original_amount: amount.raw(),
                usd_value: usd,
                new_balance,
            }));

            if let Err(err) = bank.stable.push_to(caller, amount) {
                bank.ledger
                    .revert_withdrawal(caller, AssetKind::Stable, usd);
                bank.events.pop();
                error!(
                    withdrawer = %caller,
                    usd_value = %usd,
                    reason = %err,
                    "Stable payout failed, ledger restored"
                );
                return Err(BankError::TransferFailed(err));
            }

            debug!(withdrawer = %caller, usd_value = %usd, "Stable withdrawal settled");
            Ok(WithdrawalReceipt {
                usd_debited: usd,
                new_balance,
            })
        })
    }

    // ───────────────────────── Admin surface ─────────────────────────

    /// Pause deposits. Admin-only; withdrawals continue.
    pub fn pause(&mut self, caller: &Address) -> Result<(), BankError> {
        self.transition_status(caller, BankStatus::Paused)
    }

    /// Resume deposits. Admin-only.
    pub fn unpause(&mut self, caller: &Address) -> Result<(), BankError> {
        self.transition_status(caller, BankStatus::Active)
    }

    /// Move to an explicit status, including `Maintenance`. Admin-only.
    pub fn set_status(&mut self, caller: &Address, status: BankStatus) -> Result<(), BankError> {
        self.transition_status(caller, status)
    }

    fn transition_status(&mut self, caller: &Address, target: BankStatus) -> Result<(), BankError> {
        self.guarded(|bank| {
            bank.require_role(caller, Role::Admin)?;
            let previous = bank.status;
            if previous == target {
                return Ok(());
            }
            bank.status = target;
            bank.events
                .push(BankEvent::BankStatusChanged(BankStatusChanged {
                    by: caller.clone(),
                    previous,
                    current: target,
                }));
            info!(by = %caller, previous = %previous, current = %target, "Bank status changed");
            Ok(())
        })
    }

    /// Grant the operator role. Admin-only; target must be non-zero.
    pub fn grant_operator(&mut self, caller: &Address, account: &Address) -> Result<(), BankError> {
        self.guarded(|bank| {
            bank.require_role(caller, Role::Admin)?;
            if account.is_zero() {
                return Err(BankError::InvalidAccount);
            }
            bank.roles.grant(account, Role::Operator);
            bank.events.push(BankEvent::OperatorGranted(OperatorGranted {
                by: caller.clone(),
                account: account.clone(),
            }));
            info!(by = %caller, account = %account, "Operator granted");
            Ok(())
        })
    }

    /// Revoke the operator role. Admin-only; target must be non-zero.
    pub fn revoke_operator(
        &mut self,
        caller: &Address,
        account: &Address,
    ) -> Result<(), BankError> {
        self.guarded(|bank| {
            bank.require_role(caller, Role::Admin)?;
            if account.is_zero() {
                return Err(BankError::InvalidAccount);
            }
            bank.roles.revoke(account, Role::Operator);
            bank.events.push(BankEvent::OperatorRevoked(OperatorRevoked {
                by: caller.clone(),
                account: account.clone(),
            }));
            info!(by = %caller, account = %account, "Operator revoked");
            Ok(())
        })
    }

    /// Rotate the price oracle. Operator-only; new feed must be non-zero.
    pub fn set_oracle(
        &mut self,
        caller: &Address,
        oracle: Box<dyn PriceOracle>,
    ) -> Result<(), BankError> {
        self.guarded(move |bank| {
            bank.require_role(caller, Role::Operator)?;
            if oracle.address().is_zero() {
                return Err(BankError::InvalidAccount);
            }
            let previous = bank.oracle.address().clone();
            let current = oracle.address().clone();
            bank.oracle = oracle;
            bank.events.push(BankEvent::OracleRotated(OracleRotated {
                by: caller.clone(),
                previous: previous.clone(),
                current: current.clone(),
            }));
            info!(by = %caller, previous = %previous, current = %current, "Price oracle rotated");
            Ok(())
        })
    }

    /// Rotate the stable asset contract. Operator-only.
    ///
    /// Balances and the stable running total persist; only the registry
    /// identity and the settlement leg change.
    pub fn set_stable_asset(
        &mut self,
        caller: &Address,
        stable: Box<dyn StableAsset>,
    ) -> Result<(), BankError> {
        self.guarded(move |bank| {
            bank.require_role(caller, Role::Operator)?;
            if stable.address().is_zero() {
                return Err(BankError::InvalidAccount);
            }
            let previous = bank.stable.address().clone();
            let current = stable.address().clone();
            let symbol = stable.symbol().to_string();
            bank.stable = stable;
            bank.ledger.rebind_stable(current.clone(), symbol);
            bank.events
                .push(BankEvent::StableAssetRotated(StableAssetRotated {
                    by: caller.clone(),
                    previous: previous.clone(),
                    current: current.clone(),
                }));
            info!(by = %caller, previous = %previous, current = %current, "Stable asset rotated");
            Ok(())
        })
    }

    /// Flip an asset's deposit-support flag. Admin-only.
    ///
    /// An unsupported asset rejects new deposits; existing balances stay
    /// withdrawable.
    pub fn set_asset_supported(
        &mut self,
        caller: &Address,
        kind: AssetKind,
        supported: bool,
    ) -> Result<(), BankError> {
        self.guarded(|bank| {
            bank.require_role(caller, Role::Admin)?;
            if bank.ledger.asset(kind).supported == supported {
                return Ok(());
            }
            bank.ledger.set_supported(kind, supported);
            bank.events
                .push(BankEvent::AssetSupportChanged(AssetSupportChanged {
                    by: caller.clone(),
                    asset: kind,
                    supported,
                }));
            info!(by = %caller, asset = %kind, supported, "Asset support changed");
            Ok(())
        })
    }

    // ───────────────────────── Queries ─────────────────────────

    /// USD balance for one owner and asset.
    pub fn balance_of(&self, owner: &Address, kind: AssetKind) -> UsdAmount {
        self.ledger.balance_of(owner, kind)
    }

    /// Total USD value held across both assets. O(1).
    pub fn total_bank_value(&self) -> UsdAmount {
        self.ledger.total_bank_value()
    }

    /// The construction-time limits.
    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    pub fn status(&self) -> BankStatus {
        self.status
    }

    /// Number of deposits accepted since construction.
    pub fn deposit_count(&self) -> u64 {
        self.history.len()
    }

    /// Number of withdrawals settled since construction.
    pub fn withdrawal_count(&self) -> u64 {
        self.ledger.withdrawal_count()
    }

    /// Deposit record at an index.
    pub fn deposit_record(&self, index: u64) -> Option<&DepositRecord> {
        self.history.record(index)
    }

    /// Page of deposit records, clamped to the valid range.
    pub fn deposit_records(&self, start: u64, limit: usize) -> &[DepositRecord] {
        self.history.page(start, limit)
    }

    /// Rolling SHA-256 digest over the deposit history.
    pub fn history_digest(&self) -> [u8; 32] {
        self.history.digest()
    }

    /// Replay the deposit history chain against its digest.
    pub fn verify_history(&self) -> bool {
        self.history.verify_chain()
    }

    /// Registry entry for an asset.
    pub fn asset(&self, kind: AssetKind) -> &AssetInfo {
        self.ledger.asset(kind)
    }

    /// Audit walk summing every owner balance for an asset. O(owners).
    pub fn audit_balance_sum(&self, kind: AssetKind) -> UsdAmount {
        self.ledger.audit_balance_sum(kind)
    }

    pub fn oracle_address(&self) -> &Address {
        self.oracle.address()
    }

    pub fn stable_asset_address(&self) -> &Address {
        self.stable.address()
    }

    pub fn has_role(&self, account: &Address, role: Role) -> bool {
        self.roles.has_role(account, role)
    }

    /// All emitted events since the last drain.
    pub fn events(&self) -> &[BankEvent] {
        &self.events
    }

    /// Drain all emitted events.
    pub fn drain_events(&mut self) -> Vec<BankEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingNativeGateway, StubPriceFeed, StubStableAsset};

    const NOW: i64 = 1_700_000_000;
    const REFERENCE_PRICE: i128 = 411_788_170_000;

    fn test_config() -> BankConfig {
        BankConfig {
            withdrawal_limit_usd: UsdAmount::new(1_000_000_000),
            bank_cap_usd: UsdAmount::new(5_000_000_000),
        }
    }

    fn setup() -> (Bank, StubPriceFeed, StubStableAsset, RecordingNativeGateway) {
        let feed = StubPriceFeed::new(Address::new("feed_v1"), REFERENCE_PRICE, NOW);
        let stable = StubStableAsset::new(Address::new("usdx_contract"), "USDX");
        let gateway = RecordingNativeGateway::new();
        let bank = Bank::new(
            Address::new("deployer"),
            test_config(),
            Box::new(feed.clone()),
            Box::new(stable.clone()),
            Box::new(gateway.clone()),
        )
        .unwrap();
        (bank, feed, stable, gateway)
    }

    // ─── constructor tests ───

    #[test]
    fn test_new_bank_is_active_and_empty() {
        let (bank, _, _, _) = setup();
        assert_eq!(bank.status(), BankStatus::Active);
        assert!(bank.total_bank_value().is_zero());
        assert_eq!(bank.deposit_count(), 0);
        assert_eq!(bank.withdrawal_count(), 0);
    }

    #[test]
    fn test_deployer_gets_both_roles() {
        let (bank, _, _, _) = setup();
        let deployer = Address::new("deployer");
        assert!(bank.has_role(&deployer, Role::Admin));
        assert!(bank.has_role(&deployer, Role::Operator));
    }

    #[test]
    fn test_zero_cap_rejected() {
        let feed = StubPriceFeed::new(Address::new("feed"), REFERENCE_PRICE, NOW);
        let stable = StubStableAsset::new(Address::new("usdx"), "USDX");
        let err = Bank::new(
            Address::new("deployer"),
            BankConfig {
                withdrawal_limit_usd: UsdAmount::new(1),
                bank_cap_usd: UsdAmount::ZERO,
            },
            Box::new(feed),
            Box::new(stable),
            Box::new(RecordingNativeGateway::new()),
        )
        .unwrap_err();
        assert!(matches!(err, BankError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let feed = StubPriceFeed::new(Address::new("feed"), REFERENCE_PRICE, NOW);
        let stable = StubStableAsset::new(Address::new("usdx"), "USDX");
        let err = Bank::new(
            Address::new("deployer"),
            BankConfig {
                withdrawal_limit_usd: UsdAmount::ZERO,
                bank_cap_usd: UsdAmount::new(1),
            },
            Box::new(feed),
            Box::new(stable),
            Box::new(RecordingNativeGateway::new()),
        )
        .unwrap_err();
        assert!(matches!(err, BankError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_zero_deployer_rejected() {
        let feed = StubPriceFeed::new(Address::new("feed"), REFERENCE_PRICE, NOW);
        let stable = StubStableAsset::new(Address::new("usdx"), "USDX");
        let err = Bank::new(
            Address::zero(),
            test_config(),
            Box::new(feed),
            Box::new(stable),
            Box::new(RecordingNativeGateway::new()),
        )
        .unwrap_err();
        assert_eq!(err, BankError::InvalidAccount);
    }

    // ─── guard tests ───

    #[test]
    fn test_mutations_rejected_while_guard_held() {
        let (mut bank, _, _, _) = setup();
        let alice = Address::new("alice");
        bank.seize_guard();

        assert_eq!(
            bank.deposit_native(&alice, NativeAmount::from_whole(1), NOW),
            Err(BankError::ReentrantCall)
        );
        assert_eq!(
            bank.withdraw_stable(&alice, StableAmount::new(1), NOW),
            Err(BankError::ReentrantCall)
        );
        assert_eq!(
            bank.pause(&Address::new("deployer")),
            Err(BankError::ReentrantCall)
        );
    }

    #[test]
    fn test_queries_work_while_guard_held() {
        let (mut bank, _, _, _) = setup();
        bank.seize_guard();
        assert!(bank.total_bank_value().is_zero());
        assert_eq!(bank.status(), BankStatus::Active);
    }

    #[test]
    fn test_guard_released_after_failed_operation() {
        let (mut bank, _, _, _) = setup();
        let alice = Address::new("alice");

        // Zero amount fails validation and must release the guard.
        assert_eq!(
            bank.deposit_native(&alice, NativeAmount::ZERO, NOW),
            Err(BankError::InvalidAmount)
        );
        assert!(bank
            .deposit_native(&alice, NativeAmount::from_whole(1), NOW)
            .is_ok());
    }

    // ─── admin surface tests ───

    #[test]
    fn test_pause_requires_admin() {
        let (mut bank, _, _, _) = setup();
        let err = bank.pause(&Address::new("mallory")).unwrap_err();
        assert_eq!(
            err,
            BankError::Unauthorized {
                account: Address::new("mallory"),
                required: Role::Admin,
            }
        );
        assert_eq!(bank.status(), BankStatus::Active);
    }

    #[test]
    fn test_pause_unpause_cycle() {
        let (mut bank, _, _, _) = setup();
        let deployer = Address::new("deployer");

        bank.pause(&deployer).unwrap();
        assert_eq!(bank.status(), BankStatus::Paused);
        bank.unpause(&deployer).unwrap();
        assert_eq!(bank.status(), BankStatus::Active);
    }

    #[test]
    fn test_repeated_pause_emits_one_event() {
        let (mut bank, _, _, _) = setup();
        let deployer = Address::new("deployer");

        bank.pause(&deployer).unwrap();
        bank.pause(&deployer).unwrap();
        let status_events = bank
            .events()
            .iter()
            .filter(|e| matches!(e, BankEvent::BankStatusChanged(_)))
            .count();
        assert_eq!(status_events, 1);
    }

    #[test]
    fn test_maintenance_reachable_via_set_status() {
        let (mut bank, _, _, _) = setup();
        bank.set_status(&Address::new("deployer"), BankStatus::Maintenance)
            .unwrap();
        assert_eq!(bank.status(), BankStatus::Maintenance);
    }

    #[test]
    fn test_grant_operator_flow() {
        let (mut bank, _, _, _) = setup();
        let deployer = Address::new("deployer");
        let ops = Address::new("ops");

        bank.grant_operator(&deployer, &ops).unwrap();
        assert!(bank.has_role(&ops, Role::Operator));
        assert!(!bank.has_role(&ops, Role::Admin));

        bank.revoke_operator(&deployer, &ops).unwrap();
        assert!(!bank.has_role(&ops, Role::Operator));
    }

    #[test]
    fn test_grant_operator_zero_target_rejected() {
        let (mut bank, _, _, _) = setup();
        let err = bank
            .grant_operator(&Address::new("deployer"), &Address::zero())
            .unwrap_err();
        assert_eq!(err, BankError::InvalidAccount);
    }

    #[test]
    fn test_operator_cannot_pause() {
        let (mut bank, _, _, _) = setup();
        let deployer = Address::new("deployer");
        let ops = Address::new("ops");
        bank.grant_operator(&deployer, &ops).unwrap();

        let err = bank.pause(&ops).unwrap_err();
        assert!(matches!(err, BankError::Unauthorized { .. }));
    }

    #[test]
    fn test_admin_without_operator_cannot_rotate_oracle() {
        let (mut bank, _, _, _) = setup();
        // "deployer" holds both roles; build an admin-only caller by
        // granting nothing: any non-deployer account lacks Operator.
        let replacement = StubPriceFeed::new(Address::new("feed_v2"), REFERENCE_PRICE, NOW);
        let err = bank
            .set_oracle(&Address::new("mallory"), Box::new(replacement))
            .unwrap_err();
        assert_eq!(
            err,
            BankError::Unauthorized {
                account: Address::new("mallory"),
                required: Role::Operator,
            }
        );
    }

    #[test]
    fn test_oracle_rotation_switches_feed() {
        let (mut bank, _, _, _) = setup();
        let deployer = Address::new("deployer");
        let replacement = StubPriceFeed::new(Address::new("feed_v2"), 500_000_000_000, NOW);

        bank.set_oracle(&deployer, Box::new(replacement)).unwrap();
        assert_eq!(bank.oracle_address(), &Address::new("feed_v2"));

        // 0.1 native at the new price of 5000.00000000.
        let receipt = bank
            .deposit_native(
                &Address::new("alice"),
                NativeAmount::new(100_000_000_000_000_000),
                NOW,
            )
            .unwrap();
        assert_eq!(receipt.usd_credited, UsdAmount::new(500_000_000));
    }

    #[test]
    fn test_stable_rotation_keeps_balances() {
        let (mut bank, _, stable, _) = setup();
        let deployer = Address::new("deployer");
        let alice = Address::new("alice");

        stable.mint(&alice, StableAmount::new(300_000_000));
        bank.deposit_stable(&alice, StableAmount::new(300_000_000), NOW)
            .unwrap();

        let replacement = StubStableAsset::new(Address::new("usdy_contract"), "USDY");
        bank.set_stable_asset(&deployer, Box::new(replacement))
            .unwrap();

        assert_eq!(bank.stable_asset_address(), &Address::new("usdy_contract"));
        assert_eq!(bank.asset(AssetKind::Stable).symbol, "USDY");
        assert_eq!(
            bank.balance_of(&alice, AssetKind::Stable),
            UsdAmount::new(300_000_000)
        );
        assert_eq!(bank.total_bank_value(), UsdAmount::new(300_000_000));
    }

    #[test]
    fn test_unsupported_asset_rejects_deposits_not_withdrawals() {
        let (mut bank, _, stable, _) = setup();
        let deployer = Address::new("deployer");
        let alice = Address::new("alice");

        stable.mint(&alice, StableAmount::new(500_000_000));
        bank.deposit_stable(&alice, StableAmount::new(500_000_000), NOW)
            .unwrap();

        bank.set_asset_supported(&deployer, AssetKind::Stable, false)
            .unwrap();
        let err = bank
            .deposit_stable(&alice, StableAmount::new(1), NOW)
            .unwrap_err();
        assert_eq!(
            err,
            BankError::AssetNotSupported {
                asset: "stable".to_string(),
            }
        );
        assert!(bank
            .withdraw_stable(&alice, StableAmount::new(100_000_000), NOW)
            .is_ok());
    }

    // ─── event log tests ───

    #[test]
    fn test_drain_events_empties_log() {
        let (mut bank, _, _, _) = setup();
        bank.pause(&Address::new("deployer")).unwrap();

        let drained = bank.drain_events();
        assert_eq!(drained.len(), 1);
        assert!(bank.events().is_empty());
    }

    #[test]
    fn test_failed_operation_emits_nothing() {
        let (mut bank, _, _, _) = setup();
        let _ = bank.deposit_native(&Address::new("alice"), NativeAmount::ZERO, NOW);
        let _ = bank.pause(&Address::new("mallory"));
        assert!(bank.events().is_empty());
    }
}
