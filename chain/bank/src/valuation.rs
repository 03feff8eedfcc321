//! Valuation: oracle sampling and native/USD conversion
//!
//! All conversion arithmetic runs on raw scaled integers:
//!
//! | Quantity       | Fractional digits |
//! |----------------|-------------------|
//! | Native amount  | 18                |
//! | Oracle price   | 8                 |
//! | USD value      | 6                 |
//!
//! So `usd_raw = native_raw * price_raw / 10^(18 + 8 - 6)` and the inverse
//! `native_raw = usd_raw * 10^20 / price_raw`. Multiplication is checked
//! and division truncates toward zero; no rounding anywhere.
//!
//! An [`OracleSample`] is taken exactly once per logical operation and
//! passed by reference into every conversion of that operation, so a limit
//! check and the final debit can never disagree on price.

use serde::{Deserialize, Serialize};
use types::ids::Address;
use types::numeric::{NativeAmount, UsdAmount};

use crate::errors::{BankError, OracleError};

/// Fractional digits of the oracle price answer
pub const ORACLE_DECIMALS: u32 = 8;

/// Maximum accepted age of an oracle round, in seconds
pub const STALENESS_WINDOW_SECS: i64 = 3600;

/// Combined scale divisor for native→USD conversion: 10^(18 + 8 - 6)
pub const CONVERSION_SCALE: u128 =
    10u128.pow(NativeAmount::DECIMALS + ORACLE_DECIMALS - UsdAmount::DECIMALS);

/// Raw answer from a price oracle
///
/// `answer` carries 8 fractional digits and is signed because feeds can
/// report sentinel or faulted values at or below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRound {
    pub answer: i128,
    /// Unix seconds at which the round was last updated
    pub updated_at: i64,
}

/// External price feed for the native asset.
pub trait PriceOracle {
    /// Latest round reported by the feed.
    fn latest_round(&self) -> PriceRound;

    /// Address identifying the feed contract.
    fn address(&self) -> &Address;
}

/// A validated price sample, taken once per operation.
///
/// Construction rejects non-positive answers and rounds older than the
/// staleness window; once built, the price is a plain unsigned integer and
/// every conversion in the operation shares it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OracleSample {
    price: u128,
    as_of: i64,
}

impl OracleSample {
    /// Read and validate the oracle's latest round at time `now`.
    ///
    /// A round aged exactly [`STALENESS_WINDOW_SECS`] is still accepted;
    /// one second older is stale.
    pub fn take(oracle: &dyn PriceOracle, now: i64) -> Result<Self, OracleError> {
        let round = oracle.latest_round();
        if round.answer <= 0 {
            return Err(OracleError::InvalidPrice {
                answer: round.answer,
            });
        }
        let age_secs = now - round.updated_at;
        if age_secs > STALENESS_WINDOW_SECS {
            return Err(OracleError::StalePrice {
                age_secs,
                max_age_secs: STALENESS_WINDOW_SECS,
            });
        }
        Ok(Self {
            price: round.answer as u128,
            as_of: round.updated_at,
        })
    }

    /// The validated price, 8 fractional digits.
    pub fn price(&self) -> u128 {
        self.price
    }

    /// Unix seconds of the underlying round.
    pub fn as_of(&self) -> i64 {
        self.as_of
    }
}

/// Convert a native quantity to its USD value under the sampled price.
///
/// Truncates toward zero; a quantity too small to register one raw USD
/// unit converts to zero (callers reject zero-value operations).
pub fn native_to_usd(amount: NativeAmount, sample: &OracleSample) -> Result<UsdAmount, BankError> {
    let scaled = amount
        .raw()
        .checked_mul(sample.price())
        .ok_or(BankError::ArithmeticOverflow)?;
    Ok(UsdAmount::new(scaled / CONVERSION_SCALE))
}

/// Convert a USD value back to a native quantity, the exact inverse scaling.
pub fn usd_to_native(usd: UsdAmount, sample: &OracleSample) -> Result<NativeAmount, BankError> {
    let scaled = usd
        .raw()
        .checked_mul(CONVERSION_SCALE)
        .ok_or(BankError::ArithmeticOverflow)?;
    Ok(NativeAmount::new(scaled / sample.price()))
}
