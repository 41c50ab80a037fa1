//! Transfer Ledger Library
//! # Overview
//!
//! This library records value transfers between accounts in an append-only
//! ledger. Each transfer is validated, moved through a value substrate,
//! appended as an immutable record and credited to the receiver's custodial
//! balance as one indivisible step. A CSV front end applies request files with
//! a sync or an async strategy and prints balances or history.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (AccountId, TransferRecord, LedgerError, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`](crate::core) - Ledger components:
//!   - `core::ledger` - Validation, staging and commit of transfers
//!   - `core::record_store` - Append-only transfer history
//!   - `core::balance_book` - Custodial balances
//!   - `core::substrate`, `core::events`, `core::clock` - Collaborators
//!   - `core::async` - Lock-guarded shared ledger and batch processing
//! - [`io`] - CSV readers, denominations and report writers
//! - [`strategy`] - Sync and async processing pipelines
//!
//! # Operations
//!
//! - **record_transfer**: validate and append a transfer, crediting the receiver
//! - **list_transfers**: full history in append order
//! - **count_transfers**: number of records ever appended
//! - **balance_of**: custodial balance of one account, zero if never credited
//!
//! # Validation
//!
//! Checks run in this order and the first failure wins; a failed call has no
//! effect at all:
//!
//! 1. `amount > 0` ([`LedgerError::InvalidAmount`])
//! 2. attached value equals `amount` ([`LedgerError::ValueMismatch`])
//! 3. the receiver's balance does not overflow ([`LedgerError::ArithmeticOverflow`])
//! 4. the substrate can move the value (for example [`LedgerError::InsufficientFunds`])
//!
//! ```
//! use transfer_ledger::{AccountId, TransferLedger, TransferRequest};
//! use transfer_ledger::core::FixedClock;
//!
//! let mut ledger = TransferLedger::new().with_clock(FixedClock(1_700_000_000));
//! let alice = AccountId::from("alice");
//!
//! let record = ledger
//!     .record_transfer(&alice, TransferRequest::new("bob", 100, "hello", "greeting"), 100)
//!     .unwrap();
//!
//! assert_eq!(record.timestamp, 1_700_000_000);
//! assert_eq!(ledger.count_transfers(), 1);
//! assert_eq!(ledger.balance_of(&AccountId::from("bob")), 100);
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use crate::core::{SharedLedger, TransferLedger};
pub use io::{write_balances_csv, write_history_csv, Denomination};
pub use types::{
    AccountId, Amount, LedgerError, LedgerRequest, Timestamp, TransferEvent, TransferRecord,
    TransferRequest,
};
