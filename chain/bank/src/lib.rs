//! Custodial Bank Contract Logic
//!
//! This crate implements a multi-asset custodial ledger: deposits of a
//! volatile native asset and a pegged stable asset are valued into a
//! single USD accounting unit through an external price oracle, bounded
//! by a global capacity on the way in and a per-operation ceiling on the
//! way out.
//!
//! # Modules
//! - `errors`: Bank error taxonomy
//! - `events`: Bank events and the drainable event log types
//! - `security`: Reentrancy guard, roles, bank status
//! - `valuation`: Oracle sampling and native/USD conversion
//! - `ledger`: USD balance book, asset registry, limit enforcement
//! - `history`: Append-only deposit audit log
//! - `gateway`: External transfer seams (stable asset, native settlement)
//! - `bank`: Operation sequencing and the administrative surface
//! - `testing`: Stub collaborators for tests and simulation
//!
//! # Version
//! v0.1.0

pub mod bank;
pub mod errors;
pub mod events;
pub mod gateway;
pub mod history;
pub mod ledger;
pub mod security;
pub mod testing;
pub mod valuation;

/// Bank ABI version, frozen after release
pub const BANK_ABI_VERSION: &str = "1.0.0";
