//! External asset transfer seams
//!
//! The bank's only interactions with the outside world, other than the
//! price oracle, go through these two traits. Transfers settle
//! synchronously: success means full effect, failure means no effect.
//! The sequencer always mutates the ledger before issuing an outbound
//! transfer and compensates fully when the transfer fails.

use types::ids::Address;
use types::numeric::{NativeAmount, StableAmount};

use crate::errors::TransferError;

/// The stable asset contract.
///
/// Deposits pull from the depositor, withdrawals push to the withdrawer.
/// `pull_from` presumes the owner has authorized the bank beforehand;
/// a missing authorization surfaces as a rejected transfer.
pub trait StableAsset {
    /// Contract address of the stable asset.
    fn address(&self) -> &Address;

    /// Ticker symbol of the stable asset.
    fn symbol(&self) -> &str;

    /// Move `amount` from `owner` into the bank's custody.
    fn pull_from(&mut self, owner: &Address, amount: StableAmount) -> Result<(), TransferError>;

    /// Move `amount` from the bank's custody to `recipient`.
    fn push_to(&mut self, recipient: &Address, amount: StableAmount) -> Result<(), TransferError>;
}

/// Outbound settlement path for the native asset.
///
/// Native deposits arrive attached to the call, so only the withdrawal
/// direction needs a seam.
pub trait NativeGateway {
    /// Send `amount` of the native asset to `recipient`.
    fn push_to(&mut self, recipient: &Address, amount: NativeAmount) -> Result<(), TransferError>;
}
