//! Stub collaborators for tests and the simulation harness
//!
//! Each stub is a cheap handle around `Rc<RefCell<_>>` shared state: hand
//! one clone to the bank and keep another to steer prices, inject transfer
//! failures, or inspect recorded calls afterwards. Production code never
//! constructs these.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use types::ids::Address;
use types::numeric::{NativeAmount, StableAmount};

use crate::errors::TransferError;
use crate::gateway::{NativeGateway, StableAsset};
use crate::valuation::{PriceOracle, PriceRound};

// ───────────────────────── Price feed ─────────────────────────

/// Settable price feed.
#[derive(Debug, Clone)]
pub struct StubPriceFeed {
    address: Address,
    round: Rc<RefCell<PriceRound>>,
}

impl StubPriceFeed {
    pub fn new(address: Address, answer: i128, updated_at: i64) -> Self {
        Self {
            address,
            round: Rc::new(RefCell::new(PriceRound { answer, updated_at })),
        }
    }

    /// Replace the reported price, keeping the round timestamp.
    pub fn set_answer(&self, answer: i128) {
        self.round.borrow_mut().answer = answer;
    }

    /// Replace the round timestamp, keeping the price.
    pub fn set_updated_at(&self, updated_at: i64) {
        self.round.borrow_mut().updated_at = updated_at;
    }

    /// Replace the whole round.
    pub fn set_round(&self, answer: i128, updated_at: i64) {
        *self.round.borrow_mut() = PriceRound { answer, updated_at };
    }
}

impl PriceOracle for StubPriceFeed {
    fn latest_round(&self) -> PriceRound {
        *self.round.borrow()
    }

    fn address(&self) -> &Address {
        &self.address
    }
}

// ───────────────────────── Stable asset ─────────────────────────

#[derive(Debug, Default)]
struct StableState {
    balances: HashMap<Address, StableAmount>,
    custody: StableAmount,
    fail_pulls: bool,
    fail_pushes: bool,
    pulls: Vec<(Address, StableAmount)>,
    pushes: Vec<(Address, StableAmount)>,
}

/// Stable asset with internal balances, failure toggles, and call recording.
#[derive(Debug, Clone)]
pub struct StubStableAsset {
    address: Address,
    symbol: String,
    state: Rc<RefCell<StableState>>,
}

impl StubStableAsset {
    pub fn new(address: Address, symbol: impl Into<String>) -> Self {
        Self {
            address,
            symbol: symbol.into(),
            state: Rc::new(RefCell::new(StableState::default())),
        }
    }

    /// Credit an owner out of thin air, so tests can fund depositors.
    pub fn mint(&self, owner: &Address, amount: StableAmount) {
        let mut state = self.state.borrow_mut();
        let balance = state.balances.entry(owner.clone()).or_default();
        *balance = balance
            .checked_add(amount)
            .unwrap_or(StableAmount::new(u128::MAX));
    }

    /// Current token balance of an owner (outside the bank).
    pub fn balance_of(&self, owner: &Address) -> StableAmount {
        self.state
            .borrow()
            .balances
            .get(owner)
            .copied()
            .unwrap_or(StableAmount::ZERO)
    }

    /// Tokens currently held by the bank through pulls minus pushes.
    pub fn custody(&self) -> StableAmount {
        self.state.borrow().custody
    }

    pub fn set_fail_pulls(&self, fail: bool) {
        self.state.borrow_mut().fail_pulls = fail;
    }

    pub fn set_fail_pushes(&self, fail: bool) {
        self.state.borrow_mut().fail_pushes = fail;
    }

    /// Recorded successful pulls, oldest first.
    pub fn pulls(&self) -> Vec<(Address, StableAmount)> {
        self.state.borrow().pulls.clone()
    }

    /// Recorded successful pushes, oldest first.
    pub fn pushes(&self) -> Vec<(Address, StableAmount)> {
        self.state.borrow().pushes.clone()
    }
}

impl StableAsset for StubStableAsset {
    fn address(&self) -> &Address {
        &self.address
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn pull_from(&mut self, owner: &Address, amount: StableAmount) -> Result<(), TransferError> {
        let mut state = self.state.borrow_mut();
        if state.fail_pulls {
            return Err(TransferError::Rejected {
                reason: "pulls disabled".to_string(),
            });
        }
        let balance = state
            .balances
            .get(owner)
            .copied()
            .unwrap_or(StableAmount::ZERO);
        let remaining = balance
            .checked_sub(amount)
            .ok_or_else(|| TransferError::Rejected {
                reason: "insufficient stable balance".to_string(),
            })?;
        state.balances.insert(owner.clone(), remaining);
        state.custody = state
            .custody
            .checked_add(amount)
            .unwrap_or(StableAmount::new(u128::MAX));
        state.pulls.push((owner.clone(), amount));
        Ok(())
    }

    fn push_to(&mut self, recipient: &Address, amount: StableAmount) -> Result<(), TransferError> {
        let mut state = self.state.borrow_mut();
        if state.fail_pushes {
            return Err(TransferError::Rejected {
                reason: "pushes disabled".to_string(),
            });
        }
        state.custody = state
            .custody
            .checked_sub(amount)
            .unwrap_or(StableAmount::ZERO);
        let balance = state.balances.entry(recipient.clone()).or_default();
        *balance = balance
            .checked_add(amount)
            .unwrap_or(StableAmount::new(u128::MAX));
        state.pushes.push((recipient.clone(), amount));
        Ok(())
    }
}

// ───────────────────────── Native gateway ─────────────────────────

#[derive(Debug, Default)]
struct NativeState {
    pushes: Vec<(Address, NativeAmount)>,
    fail_pushes: bool,
}

/// Recording native settlement gateway with a failure toggle.
#[derive(Debug, Clone, Default)]
pub struct RecordingNativeGateway {
    state: Rc<RefCell<NativeState>>,
}

impl RecordingNativeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_pushes(&self, fail: bool) {
        self.state.borrow_mut().fail_pushes = fail;
    }

    /// Recorded successful pushes, oldest first.
    pub fn pushes(&self) -> Vec<(Address, NativeAmount)> {
        self.state.borrow().pushes.clone()
    }

    /// Total native quantity pushed out.
    pub fn total_pushed(&self) -> NativeAmount {
        self.state
            .borrow()
            .pushes
            .iter()
            .fold(NativeAmount::ZERO, |acc, (_, amount)| {
                acc.checked_add(*amount)
                    .unwrap_or(NativeAmount::new(u128::MAX))
            })
    }
}

impl NativeGateway for RecordingNativeGateway {
    fn push_to(&mut self, recipient: &Address, amount: NativeAmount) -> Result<(), TransferError> {
        let mut state = self.state.borrow_mut();
        if state.fail_pushes {
            return Err(TransferError::Rejected {
                reason: "pushes disabled".to_string(),
            });
        }
        state.pushes.push((recipient.clone(), amount));
        Ok(())
    }
}
