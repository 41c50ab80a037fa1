//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account identifier and integer quantities
//! - `transfer`: Transfer requests, records and events
//! - `error`: Error types for the transfer ledger

pub mod account;
pub mod error;
pub mod transfer;

pub use account::{AccountId, Amount, Timestamp};
pub use error::LedgerError;
pub use transfer::{LedgerRequest, RequestKind, TransferEvent, TransferRecord, TransferRequest};
