//! Identifier types for custody entities
//!
//! Accounts and contract collaborators (oracle, stable asset) are addressed
//! by host-supplied opaque strings. The bank never fabricates identities;
//! it only validates that callers and grant targets are non-zero.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An account or contract address
///
/// Addresses are opaque strings assigned by the execution environment.
/// The zero (null) address is represented by the empty string and is
/// rejected wherever an operation requires a real account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Create an address from a host-supplied string
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    /// The zero (null) address
    pub fn zero() -> Self {
        Self(String::new())
    }

    /// True for the zero (null) address
    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the address string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_creation() {
        let addr = Address::new("cust1q8r7tslw");
        assert_eq!(addr.as_str(), "cust1q8r7tslw");
        assert!(!addr.is_zero());
    }

    #[test]
    fn test_zero_address() {
        let zero = Address::zero();
        assert!(zero.is_zero());
        assert_eq!(zero.as_str(), "");
        assert_eq!(zero, Address::new(""));
    }

    #[test]
    fn test_address_from_str() {
        let addr: Address = "alice".into();
        assert_eq!(addr, Address::new("alice"));
    }

    #[test]
    fn test_address_serialization() {
        let addr = Address::new("treasury");
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"treasury\"");

        let deserialized: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, deserialized);
    }

    #[test]
    fn test_address_as_map_key() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(Address::new("alice"), 1u64);
        map.insert(Address::new("bob"), 2u64);
        assert_eq!(map.get(&Address::new("alice")), Some(&1));
    }
}
