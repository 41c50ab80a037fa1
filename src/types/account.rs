//! Account-related types for the transfer ledger
//!
//! This module defines the account identifier and the integer quantities
//! (amounts and timestamps) that flow through the ledger.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantity of the smallest value unit (wei-like)
///
/// Amounts are never fractional. All additions go through `checked_add` so an
/// overflow is reported as an error instead of wrapping.
pub type Amount = u128;

/// Unix time in whole seconds, as assigned by the ledger clock
pub type Timestamp = u64;

/// Opaque account identifier
///
/// The ledger never interprets the identifier: an address such as
/// `0x70997970C51812dc3A010C7d01b50e0d17dc79C8` and a plain name such as
/// `alice` are equally valid. Ordering is lexicographic and is only used to
/// make reports deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Create an account identifier from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        AccountId(id.into())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        AccountId::new(id)
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        AccountId(id)
    }
}
