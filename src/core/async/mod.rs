//! Concurrent access to the transfer ledger
//!
//! This module provides the shared counterparts of the core components:
//!
//! - **SharedLedger**: cloneable handle to one ledger behind a single `RwLock`
//! - **BatchProcessor**: applies batches of requests from several tokio tasks,
//!   partitioned by acting account
//!
//! # Thread Safety
//!
//! Writes are fully serialized by the ledger's write lock; reads run
//! concurrently under the read lock and never observe half of a transfer.

pub mod batch_processor;
pub mod shared_ledger;

pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use shared_ledger::{LedgerSnapshot, SharedLedger};
