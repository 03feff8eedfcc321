//! Types library for the custodial bank
//!
//! This library provides the core type definitions shared across the bank
//! system, ensuring type safety and deterministic integer accounting.
//!
//! # Version
//! v1.0.0
//!
//! # Modules
//! - `ids`: Account and contract addresses
//! - `numeric`: Fixed-point scaled amounts (UsdAmount, NativeAmount, StableAmount)
//! - `asset`: Asset kinds and registry entries

// Public modules
pub mod asset;
pub mod ids;
pub mod numeric;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::asset::*;
    pub use crate::ids::*;
    pub use crate::numeric::*;
}
