//! Bank error taxonomy
//!
//! Every failure is reported synchronously as a distinct kind. Variants
//! carry both the attempted and the available/limit values so callers can
//! see exactly which bound was violated. No error here implies a partial
//! state change: validation and invariant failures leave the ledger
//! untouched, and a failed external transfer is fully compensated.

use thiserror::Error;
use types::ids::Address;
use types::numeric::UsdAmount;

use crate::security::{BankStatus, Role};

/// Price oracle failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("Oracle price is stale: sample is {age_secs}s old, window is {max_age_secs}s")]
    StalePrice { age_secs: i64, max_age_secs: i64 },

    #[error("Oracle returned a non-positive price: {answer}")]
    InvalidPrice { answer: i128 },
}

/// Synchronous failure signal from an external asset transfer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("Transfer rejected by counterparty: {reason}")]
    Rejected { reason: String },
}

/// Bank-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("Amount must be positive")]
    InvalidAmount,

    #[error("Account must not be the zero address")]
    InvalidAccount,

    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("Bank capacity exceeded: attempted {attempted}, available {available}")]
    CapacityExceeded {
        attempted: UsdAmount,
        available: UsdAmount,
    },

    #[error("Withdrawal limit exceeded: attempted {attempted}, limit {limit}")]
    LimitExceeded {
        attempted: UsdAmount,
        limit: UsdAmount,
    },

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        available: UsdAmount,
        requested: UsdAmount,
    },

    #[error("Arithmetic overflow in valuation or balance calculation")]
    ArithmeticOverflow,

    #[error("Deposits are blocked while bank status is {status}")]
    BankPaused { status: BankStatus },

    #[error("Asset not supported for deposit: {asset}")]
    AssetNotSupported { asset: String },

    #[error("Reentrant call rejected: an operation is already in progress")]
    ReentrantCall,

    #[error("Unauthorized: {account} lacks required role {required}")]
    Unauthorized { account: Address, required: Role },

    #[error("Asset transfer failed: {0}")]
    TransferFailed(#[from] TransferError),

    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),
}
