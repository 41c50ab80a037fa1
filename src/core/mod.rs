//! Core business logic module
//!
//! This module contains the transfer ledger and its collaborators:
//! - `traits` - Seams for the value substrate, event sink and clock
//! - `ledger` - Transfer validation, staging and commit
//! - `record_store` - Append-only transfer history
//! - `balance_book` - Custodial balances per account
//! - `substrate` - Unmetered and wallet-backed value substrates
//! - `events` - Event sinks for committed transfers
//! - `clock` - Record timestamp sources
//! - `async` - Lock-guarded shared ledger and batch processing

pub mod r#async;
pub mod balance_book;
pub mod clock;
pub mod events;
pub mod ledger;
pub mod record_store;
pub mod substrate;
pub mod traits;

pub use balance_book::BalanceBook;
pub use clock::{FixedClock, ManualClock, SystemClock};
pub use events::{BroadcastSink, NullSink, TracingSink};
pub use ledger::TransferLedger;
pub use r#async::{BatchProcessor, LedgerSnapshot, ProcessingResult, SharedLedger};
pub use record_store::RecordStore;
pub use substrate::{Unmetered, Wallets};
pub use traits::{Clock, EventSink, ValueSubstrate};
