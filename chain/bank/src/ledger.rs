//! Ledger: USD balance book, asset registry, and limit enforcement
//!
//! Every balance is denominated in the 6-digit USD accounting unit,
//! regardless of which asset was deposited. The ledger enforces the two
//! construction-time bounds at the mutation site: the global capacity on
//! credit and the per-operation ceiling on debit. Mutations follow a
//! compute-then-commit shape, so a failed check never leaves partial
//! state behind.
//!
//! Running totals are kept per asset, which makes `total_bank_value` O(1);
//! the balance book is never walked on the operation path.

use std::collections::HashMap;
use types::asset::{AssetInfo, AssetKind};
use types::ids::Address;
use types::numeric::UsdAmount;

use crate::errors::BankError;

/// USD balance book for the two custodied assets.
#[derive(Debug, Clone)]
pub struct Ledger {
    /// Balances: owner -> (asset kind -> USD value)
    balances: HashMap<Address, HashMap<AssetKind, UsdAmount>>,
    native: AssetInfo,
    stable: AssetInfo,
    withdrawal_count: u64,
}

impl Ledger {
    /// Create an empty ledger with the native entry and the given stable
    /// asset registered.
    pub fn new(stable_address: Address, stable_symbol: impl Into<String>) -> Self {
        Self {
            balances: HashMap::new(),
            native: AssetInfo::native(),
            stable: AssetInfo::stable(stable_address, stable_symbol),
            withdrawal_count: 0,
        }
    }

    // ───────────────────────── Asset Registry ─────────────────────────

    /// Registry entry for an asset kind.
    pub fn asset(&self, kind: AssetKind) -> &AssetInfo {
        match kind {
            AssetKind::Native => &self.native,
            AssetKind::Stable => &self.stable,
        }
    }

    fn asset_mut(&mut self, kind: AssetKind) -> &mut AssetInfo {
        match kind {
            AssetKind::Native => &mut self.native,
            AssetKind::Stable => &mut self.stable,
        }
    }

    /// Flip the deposit-support flag for an asset.
    pub fn set_supported(&mut self, kind: AssetKind, supported: bool) {
        self.asset_mut(kind).supported = supported;
    }

    /// Point the stable registry entry at a new contract.
    ///
    /// Balances and the running total persist across the rotation; only
    /// the identity changes.
    pub fn rebind_stable(&mut self, address: Address, symbol: impl Into<String>) {
        self.stable.address = address;
        self.stable.symbol = symbol.into();
    }

    // ───────────────────────── Balance Queries ─────────────────────────

    /// USD balance for one owner and asset. Unknown owners hold zero.
    pub fn balance_of(&self, owner: &Address, kind: AssetKind) -> UsdAmount {
        self.balances
            .get(owner)
            .and_then(|assets| assets.get(&kind))
            .copied()
            .unwrap_or(UsdAmount::ZERO)
    }

    /// Total USD value held by the bank across both assets. O(1).
    pub fn total_bank_value(&self) -> UsdAmount {
        // Each running total is bounded by the bank capacity.
        self.native
            .total_deposited
            .checked_add(self.stable.total_deposited)
            .unwrap_or(UsdAmount::new(u128::MAX))
    }

    /// Number of withdrawals settled since construction.
    pub fn withdrawal_count(&self) -> u64 {
        self.withdrawal_count
    }

    /// Audit walk: sum of every owner balance for one asset.
    ///
    /// O(owners); matches the asset's running total whenever the ledger
    /// invariants hold. Not used on the operation path.
    pub fn audit_balance_sum(&self, kind: AssetKind) -> UsdAmount {
        self.balances
            .values()
            .filter_map(|assets| assets.get(&kind))
            .fold(UsdAmount::ZERO, |acc, balance| {
                acc.checked_add(*balance)
                    .unwrap_or(UsdAmount::new(u128::MAX))
            })
    }

    // ───────────────────────── Mutations ─────────────────────────

    /// Check that crediting `usd` would keep the bank under `cap`.
    pub fn ensure_capacity(&self, usd: UsdAmount, cap: UsdAmount) -> Result<(), BankError> {
        let total = self.total_bank_value();
        let prospective = total
            .checked_add(usd)
            .ok_or(BankError::ArithmeticOverflow)?;
        if prospective > cap {
            return Err(BankError::CapacityExceeded {
                attempted: usd,
                available: cap.checked_sub(total).unwrap_or(UsdAmount::ZERO),
            });
        }
        Ok(())
    }

    /// Credit a deposit, enforcing the global capacity.
    ///
    /// Requires `usd > 0`. Increases the owner balance and the asset's
    /// running total together; returns the new balance.
    pub fn credit_deposit(
        &mut self,
        owner: &Address,
        kind: AssetKind,
        usd: UsdAmount,
        cap: UsdAmount,
    ) -> Result<UsdAmount, BankError> {
        if usd.is_zero() {
            return Err(BankError::InvalidAmount);
        }
        self.ensure_capacity(usd, cap)?;

        let new_balance = self
            .balance_of(owner, kind)
            .checked_add(usd)
            .ok_or(BankError::ArithmeticOverflow)?;
        let new_total = self
            .asset(kind)
            .total_deposited
            .checked_add(usd)
            .ok_or(BankError::ArithmeticOverflow)?;

        self.balances
            .entry(owner.clone())
            .or_default()
            .insert(kind, new_balance);
        self.asset_mut(kind).total_deposited = new_total;
        Ok(new_balance)
    }

    /// Debit a withdrawal, enforcing the per-operation ceiling.
    ///
    /// Requires `usd > 0`, `usd <= limit`, and sufficient balance, checked
    /// in that order. Decreases the owner balance and the asset's running
    /// total together, counts the withdrawal, and returns the new balance.
    pub fn debit_withdrawal(
        &mut self,
        owner: &Address,
        kind: AssetKind,
        usd: UsdAmount,
        limit: UsdAmount,
    ) -> Result<UsdAmount, BankError> {
        if usd.is_zero() {
            return Err(BankError::InvalidAmount);
        }
        if usd > limit {
            return Err(BankError::LimitExceeded {
                attempted: usd,
                limit,
            });
        }
        let available = self.balance_of(owner, kind);
        if usd > available {
            return Err(BankError::InsufficientBalance {
                available,
                requested: usd,
            });
        }

        let new_balance = available
            .checked_sub(usd)
            .ok_or(BankError::ArithmeticOverflow)?;
        let new_total = self
            .asset(kind)
            .total_deposited
            .checked_sub(usd)
            .ok_or(BankError::ArithmeticOverflow)?;

        self.balances
            .entry(owner.clone())
            .or_default()
            .insert(kind, new_balance);
        self.asset_mut(kind).total_deposited = new_total;
        self.withdrawal_count += 1;
        Ok(new_balance)
    }

    /// Undo the debit performed immediately before, after a failed
    /// outbound transfer. Restores balance, running total, and counter.
    pub fn revert_withdrawal(&mut self, owner: &Address, kind: AssetKind, usd: UsdAmount) {
        let restored = self
            .balance_of(owner, kind)
            .checked_add(usd)
            .unwrap_or(UsdAmount::new(u128::MAX));
        let total = self
            .asset(kind)
            .total_deposited
            .checked_add(usd)
            .unwrap_or(UsdAmount::new(u128::MAX));

        self.balances
            .entry(owner.clone())
            .or_default()
            .insert(kind, restored);
        self.asset_mut(kind).total_deposited = total;
        self.withdrawal_count = self.withdrawal_count.saturating_sub(1);
    }
}
