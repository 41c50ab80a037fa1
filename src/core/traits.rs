//! Collaborator traits for the transfer ledger
//!
//! The ledger owns its records and custodial balances but relies on three
//! collaborators it does not control: the substrate that actually moves value
//! between wallets, the sink that receives transfer notifications, and the
//! clock that stamps records.

use crate::types::{AccountId, Amount, LedgerError, Timestamp, TransferEvent};
use std::fmt::Debug;

/// Value-transfer substrate
///
/// Holds the ambient wallets that callers pay from. Every method must be
/// all-or-nothing: when it returns an error, no wallet has changed.
pub trait ValueSubstrate: Debug + Send + Sync {
    /// Move `value` from `from`'s wallet to `to`'s wallet
    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        value: Amount,
    ) -> Result<(), LedgerError>;

    /// Credit `value` to `account`'s wallet from outside the ledger
    fn fund(&mut self, account: &AccountId, value: Amount) -> Result<(), LedgerError>;

    /// Wallet balance of `account`, or `None` if the substrate keeps no accounts
    fn wallet_balance(&self, account: &AccountId) -> Option<Amount>;
}

/// Receiver of transfer notifications
///
/// Delivery is fire-and-forget: the ledger neither waits for nor depends on
/// what the sink does with the event.
pub trait EventSink: Debug + Send + Sync {
    fn emit(&self, event: &TransferEvent);
}

/// Source of record timestamps
pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> Timestamp;
}
