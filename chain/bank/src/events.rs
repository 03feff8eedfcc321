//! Bank events
//!
//! Immutable records emitted by bank operations, appended to an in-memory
//! log the host drains. Every event names the acting account and the
//! values relevant to the change. A failed operation emits nothing: the
//! withdrawal path retracts its event when the outbound transfer fails.

use serde::{Deserialize, Serialize};
use types::asset::AssetKind;
use types::ids::Address;
use types::numeric::UsdAmount;

use crate::security::BankStatus;

/// A deposit was credited to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositAccepted {
    pub depositor: Address,
    pub asset: AssetKind,
    /// Raw quantity in the asset's own precision
    pub original_amount: u128,
    pub usd_value: UsdAmount,
    pub new_balance: UsdAmount,
    /// Index of the matching record in the deposit history
    pub record_index: u64,
}

/// A withdrawal was debited and the funds were paid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalPaid {
    pub withdrawer: Address,
    pub asset: AssetKind,
    /// Raw quantity paid out, in the asset's own precision
    pub original_amount: u128,
    pub usd_value: UsdAmount,
    pub new_balance: UsdAmount,
}

/// The bank status changed through an explicit admin action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankStatusChanged {
    pub by: Address,
    pub previous: BankStatus,
    pub current: BankStatus,
}

/// The price oracle was rotated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleRotated {
    pub by: Address,
    pub previous: Address,
    pub current: Address,
}

/// The stable asset contract was rotated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StableAssetRotated {
    pub by: Address,
    pub previous: Address,
    pub current: Address,
}

/// An account was granted the operator role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorGranted {
    pub by: Address,
    pub account: Address,
}

/// An account's operator role was revoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorRevoked {
    pub by: Address,
    pub account: Address,
}

/// An asset's deposit-support flag was flipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSupportChanged {
    pub by: Address,
    pub asset: AssetKind,
    pub supported: bool,
}

/// Enum wrapper for all bank events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BankEvent {
    DepositAccepted(DepositAccepted),
    WithdrawalPaid(WithdrawalPaid),
    BankStatusChanged(BankStatusChanged),
    OracleRotated(OracleRotated),
    StableAssetRotated(StableAssetRotated),
    OperatorGranted(OperatorGranted),
    OperatorRevoked(OperatorRevoked),
    AssetSupportChanged(AssetSupportChanged),
}
