//! Asset registry types
//!
//! The bank custodies exactly two asset kinds: the chain's volatile native
//! asset and one pegged stable asset. Each kind has a registry entry
//! carrying its identity, precision, support flag, and the running USD
//! total currently held against it.

use crate::ids::Address;
use crate::numeric::{NativeAmount, StableAmount, UsdAmount};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two supported asset kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// The chain's own volatile asset, 18 fractional digits
    Native,
    /// The pegged stable asset, 6 fractional digits
    Stable,
}

impl AssetKind {
    /// Fractional digits of the asset's raw quantity representation
    pub const fn decimals(&self) -> u32 {
        match self {
            AssetKind::Native => NativeAmount::DECIMALS,
            AssetKind::Stable => StableAmount::DECIMALS,
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Native => write!(f, "native"),
            AssetKind::Stable => write!(f, "stable"),
        }
    }
}

/// Registry entry for one supported asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInfo {
    pub kind: AssetKind,
    /// Contract address of the asset, or the native pseudo-address
    pub address: Address,
    pub symbol: String,
    pub decimals: u32,
    /// Whether new deposits of this asset are accepted
    pub supported: bool,
    /// Running USD total currently held against this asset
    /// (credits minus debits, 6 fractional digits)
    pub total_deposited: UsdAmount,
}

impl AssetInfo {
    /// Registry entry for the native asset
    pub fn native() -> Self {
        Self {
            kind: AssetKind::Native,
            address: Address::new("native"),
            symbol: "NATIVE".to_string(),
            decimals: NativeAmount::DECIMALS,
            supported: true,
            total_deposited: UsdAmount::ZERO,
        }
    }

    /// Registry entry for a stable asset contract
    pub fn stable(address: Address, symbol: impl Into<String>) -> Self {
        Self {
            kind: AssetKind::Stable,
            address,
            symbol: symbol.into(),
            decimals: StableAmount::DECIMALS,
            supported: true,
            total_deposited: UsdAmount::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_decimals() {
        assert_eq!(AssetKind::Native.decimals(), 18);
        assert_eq!(AssetKind::Stable.decimals(), 6);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(AssetKind::Native.to_string(), "native");
        assert_eq!(AssetKind::Stable.to_string(), "stable");
    }

    #[test]
    fn test_native_entry() {
        let info = AssetInfo::native();
        assert_eq!(info.kind, AssetKind::Native);
        assert_eq!(info.decimals, 18);
        assert!(info.supported);
        assert!(info.total_deposited.is_zero());
    }

    #[test]
    fn test_stable_entry() {
        let info = AssetInfo::stable(Address::new("usdx_contract"), "USDX");
        assert_eq!(info.kind, AssetKind::Stable);
        assert_eq!(info.symbol, "USDX");
        assert_eq!(info.decimals, 6);
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&AssetKind::Native).unwrap();
        assert_eq!(json, "\"native\"");

        let deserialized: AssetKind = serde_json::from_str("\"stable\"").unwrap();
        assert_eq!(deserialized, AssetKind::Stable);
    }
}
