//! Fixed-point amount types for custody accounting
//!
//! All balances and limits are unsigned 128-bit integers scaled to a fixed
//! number of fractional digits. Arithmetic is checked everywhere: overflow
//! is surfaced to the caller, never wrapped or saturated. Division in
//! valuation truncates toward zero; these types never round.
//!
//! - [`UsdAmount`]: the accounting unit, 6 fractional digits
//! - [`NativeAmount`]: the volatile native asset, 18 fractional digits
//! - [`StableAmount`]: the pegged stable asset, 6 fractional digits

use serde::{Deserialize, Serialize};
use std::fmt;

fn fmt_scaled(raw: u128, decimals: u32, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let scale = 10u128.pow(decimals);
    write!(
        f,
        "{}.{:0width$}",
        raw / scale,
        raw % scale,
        width = decimals as usize
    )
}

/// A USD value in the bank's accounting unit
///
/// 6 fractional digits: raw value 1_000_000 is one dollar. Every balance,
/// capacity, and ceiling in the bank is denominated in this type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct UsdAmount(u128);

impl UsdAmount {
    /// Fractional digits carried by the raw integer
    pub const DECIMALS: u32 = 6;

    /// Zero dollars
    pub const ZERO: Self = Self(0);

    /// Create from a raw scaled integer
    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Create from whole dollars
    pub const fn from_whole(dollars: u64) -> Self {
        Self(dollars as u128 * 10u128.pow(Self::DECIMALS))
    }

    /// Get the raw scaled integer
    pub const fn raw(&self) -> u128 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl fmt::Display for UsdAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_scaled(self.0, Self::DECIMALS, f)
    }
}

/// A quantity of the native asset
///
/// 18 fractional digits: raw value 10^18 is one whole native unit. Native
/// quantities are converted to [`UsdAmount`] through the oracle before they
/// touch the ledger.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct NativeAmount(u128);

impl NativeAmount {
    pub const DECIMALS: u32 = 18;

    pub const ZERO: Self = Self(0);

    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Create from whole native units
    pub const fn from_whole(units: u64) -> Self {
        Self(units as u128 * 10u128.pow(Self::DECIMALS))
    }

    pub const fn raw(&self) -> u128 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl fmt::Display for NativeAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_scaled(self.0, Self::DECIMALS, f)
    }
}

/// A quantity of the stable asset
///
/// 6 fractional digits, pegged 1:1 to the accounting unit: a raw stable
/// quantity and its USD value are the same integer, so the stable paths
/// never touch the oracle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct StableAmount(u128);

impl StableAmount {
    pub const DECIMALS: u32 = 6;

    pub const ZERO: Self = Self(0);

    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Create from whole stable units
    pub const fn from_whole(units: u64) -> Self {
        Self(units as u128 * 10u128.pow(Self::DECIMALS))
    }

    pub const fn raw(&self) -> u128 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// The USD value of this quantity under the 1:1 peg
    ///
    /// Both sides carry 6 fractional digits, so the conversion is the
    /// identity on the raw integer.
    pub const fn as_usd(&self) -> UsdAmount {
        UsdAmount::new(self.0)
    }
}

impl fmt::Display for StableAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_scaled(self.0, Self::DECIMALS, f)
    }
}
