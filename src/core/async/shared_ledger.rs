//! Shared transfer ledger for concurrent callers
//!
//! This module provides the `SharedLedger` struct, a cloneable handle to one
//! [`TransferLedger`] guarded by a single `tokio::sync::RwLock`.
//!
//! # Design
//!
//! Records and custodial balances must change together, so per-entity locking
//! is not enough: a reader could see a record without its credit. Every write
//! takes the one write lock, which serializes transfers completely. Reads take
//! the read lock and run concurrently with each other, and a read always sees
//! either all or none of a transfer.
//!
//! # Thread Safety
//!
//! Clones share the same ledger. Nothing inside the critical section performs
//! I/O or awaits, so every lock is held for a bounded, short time.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::core::ledger::TransferLedger;
use crate::types::{
    AccountId, Amount, LedgerError, LedgerRequest, TransferRecord, TransferRequest,
};

/// Consistent copy of the ledger state taken under one read lock
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSnapshot {
    /// Full history in append order
    pub records: Vec<TransferRecord>,

    /// Custodial balances sorted by account
    pub balances: Vec<(AccountId, Amount)>,
}

/// Cloneable handle to a lock-guarded [`TransferLedger`]
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<RwLock<TransferLedger>>,
}

impl SharedLedger {
    /// Wrap `ledger` for shared access
    pub fn new(ledger: TransferLedger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Record a transfer under the write lock
    ///
    /// Same contract as [`TransferLedger::record_transfer`].
    pub async fn record_transfer(
        &self,
        caller: &AccountId,
        request: TransferRequest,
        attached_value: Amount,
    ) -> Result<TransferRecord, LedgerError> {
        self.inner
            .write()
            .await
            .record_transfer(caller, request, attached_value)
    }

    /// Fund a substrate wallet under the write lock
    pub async fn fund_wallet(&self, account: &AccountId, value: Amount) -> Result<(), LedgerError> {
        self.inner.write().await.fund_wallet(account, value)
    }

    /// Apply one parsed input request under the write lock
    pub async fn apply(
        &self,
        request: LedgerRequest,
    ) -> Result<Option<TransferRecord>, LedgerError> {
        self.inner.write().await.apply(request)
    }

    /// Copy of the full history in append order
    pub async fn list_transfers(&self) -> Vec<TransferRecord> {
        self.inner.read().await.list_transfers().to_vec()
    }

    pub async fn count_transfers(&self) -> usize {
        self.inner.read().await.count_transfers()
    }

    pub async fn balance_of(&self, account: &AccountId) -> Amount {
        self.inner.read().await.balance_of(account)
    }

    pub async fn transfer_at(&self, index: usize) -> Option<TransferRecord> {
        self.inner.read().await.transfer_at(index).cloned()
    }

    pub async fn transfers_page(&self, start: usize, limit: usize) -> Vec<TransferRecord> {
        self.inner.read().await.transfers_page(start, limit).to_vec()
    }

    pub async fn balances(&self) -> Vec<(AccountId, Amount)> {
        self.inner.read().await.balances()
    }

    pub async fn wallet_balance(&self, account: &AccountId) -> Option<Amount> {
        self.inner.read().await.wallet_balance(account)
    }

    /// History and balances read under the same lock
    pub async fn snapshot(&self) -> LedgerSnapshot {
        let ledger = self.inner.read().await;
        LedgerSnapshot {
            records: ledger.list_transfers().to_vec(),
            balances: ledger.balances(),
        }
    }
}

impl From<TransferLedger> for SharedLedger {
    fn from(ledger: TransferLedger) -> Self {
        Self::new(ledger)
    }
}

impl Default for SharedLedger {
    fn default() -> Self {
        Self::new(TransferLedger::new())
    }
}
