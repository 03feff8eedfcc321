//! Deposit history: append-only audit log
//!
//! Every accepted deposit is recorded in an arena addressed by a
//! monotonically increasing index. Records are never mutated, deleted, or
//! compacted, and indices are never reused; the module exposes no mutation
//! beyond `append`.
//!
//! Each append also folds the record into a rolling SHA-256 chain. The
//! chain tip is a cheap integrity digest for the whole log and
//! `verify_chain` replays it from genesis.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use types::asset::AssetKind;
use types::ids::Address;
use types::numeric::UsdAmount;

/// One accepted deposit.
///
/// `original_amount` is the raw quantity in the deposited asset's own
/// precision (18 digits native, 6 digits stable); `usd_value` is what the
/// ledger was credited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositRecord {
    pub index: u64,
    pub asset: AssetKind,
    pub original_amount: u128,
    pub usd_value: UsdAmount,
    /// Unix seconds at which the deposit was accepted
    pub timestamp: i64,
    pub depositor: Address,
}

/// Append-only arena of deposit records.
#[derive(Debug, Clone, Default)]
pub struct DepositHistory {
    records: Vec<DepositRecord>,
    tip: [u8; 32],
}

impl DepositHistory {
    /// Create an empty history. The genesis digest is all zeroes.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            tip: [0u8; 32],
        }
    }

    /// Append a record, assigning the next index. Returns the index.
    pub fn append(
        &mut self,
        asset: AssetKind,
        original_amount: u128,
        usd_value: UsdAmount,
        timestamp: i64,
        depositor: Address,
    ) -> u64 {
        let index = self.records.len() as u64;
        let record = DepositRecord {
            index,
            asset,
            original_amount,
            usd_value,
            timestamp,
            depositor,
        };
        self.tip = fold_record(&self.tip, &record);
        self.records.push(record);
        index
    }

    /// Number of records.
    pub fn len(&self) -> u64 {
        self.records.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at an index, if it exists.
    pub fn record(&self, index: u64) -> Option<&DepositRecord> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.records.get(i))
    }

    /// Slice of up to `limit` records starting at `start`.
    ///
    /// Out-of-range pages are clamped: a `start` past the end yields an
    /// empty slice.
    pub fn page(&self, start: u64, limit: usize) -> &[DepositRecord] {
        let len = self.records.len();
        let start = usize::try_from(start).unwrap_or(len).min(len);
        let end = start.saturating_add(limit).min(len);
        &self.records[start..end]
    }

    /// The full record slice.
    pub fn records(&self) -> &[DepositRecord] {
        &self.records
    }

    /// Rolling SHA-256 digest over every record appended so far.
    pub fn digest(&self) -> [u8; 32] {
        self.tip
    }

    /// Replay the chain from genesis and check it reaches the stored tip
    /// with strictly sequential indices.
    pub fn verify_chain(&self) -> bool {
        let mut tip = [0u8; 32];
        for (position, record) in self.records.iter().enumerate() {
            if record.index != position as u64 {
                return false;
            }
            tip = fold_record(&tip, record);
        }
        tip == self.tip
    }
}

/// Fold one record into the chain: `SHA256(tip || record fields)`.
fn fold_record(tip: &[u8; 32], record: &DepositRecord) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(tip);
    hasher.update(record.index.to_le_bytes());
    hasher.update([match record.asset {
        AssetKind::Native => 0u8,
        AssetKind::Stable => 1u8,
    }]);
    hasher.update(record.original_amount.to_le_bytes());
    hasher.update(record.usd_value.raw().to_le_bytes());
    hasher.update(record.timestamp.to_le_bytes());
    hasher.update(record.depositor.as_str().as_bytes());
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_append(history: &mut DepositHistory, amount: u128, at: i64) -> u64 {
        history.append(
            AssetKind::Native,
            amount,
            UsdAmount::new(amount / 1_000),
            at,
            Address::new("alice"),
        )
    }

    #[test]
    fn test_indices_are_sequential() {
        let mut history = DepositHistory::new();
        assert_eq!(sample_append(&mut history, 100, 1), 0);
        assert_eq!(sample_append(&mut history, 200, 2), 1);
        assert_eq!(sample_append(&mut history, 300, 3), 2);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_record_lookup() {
        let mut history = DepositHistory::new();
        sample_append(&mut history, 100, 1);
        sample_append(&mut history, 200, 2);

        let record = history.record(1).unwrap();
        assert_eq!(record.index, 1);
        assert_eq!(record.original_amount, 200);
        assert!(history.record(2).is_none());
    }

    #[test]
    fn test_page_clamps_out_of_range() {
        let mut history = DepositHistory::new();
        for i in 0..5 {
            sample_append(&mut history, i, i as i64);
        }

        assert_eq!(history.page(0, 3).len(), 3);
        assert_eq!(history.page(3, 10).len(), 2);
        assert_eq!(history.page(5, 10).len(), 0);
        assert_eq!(history.page(u64::MAX, 10).len(), 0);
        assert_eq!(history.page(1, 2)[0].index, 1);
    }

    #[test]
    fn test_empty_history_has_genesis_digest() {
        let history = DepositHistory::new();
        assert_eq!(history.digest(), [0u8; 32]);
        assert!(history.verify_chain());
    }

    #[test]
    fn test_digest_changes_with_every_append() {
        let mut history = DepositHistory::new();
        let d0 = history.digest();
        sample_append(&mut history, 100, 1);
        let d1 = history.digest();
        sample_append(&mut history, 100, 1);
        let d2 = history.digest();

        assert_ne!(d0, d1);
        assert_ne!(d1, d2);
    }

    #[test]
    fn test_digest_is_deterministic() {
        let mut a = DepositHistory::new();
        let mut b = DepositHistory::new();
        for history in [&mut a, &mut b] {
            history.append(
                AssetKind::Stable,
                705_894_085,
                UsdAmount::new(705_894_085),
                1_700_000_000,
                Address::new("treasury"),
            );
        }
        assert_eq!(a.digest(), b.digest());
    }

    #[test]
    fn test_verify_chain_on_populated_history() {
        let mut history = DepositHistory::new();
        for i in 0..20 {
            sample_append(&mut history, i * 17, i as i64);
        }
        assert!(history.verify_chain());
    }

    #[test]
    fn test_record_serialization() {
        let record = DepositRecord {
            index: 7,
            asset: AssetKind::Stable,
            original_amount: 705_894_085,
            usd_value: UsdAmount::new(705_894_085),
            timestamp: 1_700_000_000,
            depositor: Address::new("treasury"),
        };
        let json = serde_json::to_string(&record).unwrap();
        let deser: DepositRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deser);
    }
}
