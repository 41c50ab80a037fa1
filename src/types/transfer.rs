//! Transfer-related types for the transfer ledger
//!
//! This module defines the request a caller submits, the immutable record the
//! ledger appends, the event it publishes, and the request envelope used by the
//! processing pipelines.

use super::account::{AccountId, Amount, Timestamp};
use serde::{Deserialize, Serialize};

/// Kinds of request accepted by the processing pipelines
///
/// Only `Transfer` reaches the ledger history. `Fund` tops up an ambient wallet
/// in the value substrate, the way a plain value send outside the ledger would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    /// Credit value to a wallet held by the substrate
    Fund,

    /// Record a transfer and move its value from caller to receiver
    Transfer,
}

/// What a caller asks the ledger to record
///
/// The sender is not part of the request: it is the caller identity, passed
/// explicitly next to the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    /// Destination of both the record and the value
    pub receiver: AccountId,

    /// Stated amount in the smallest value unit
    pub amount: Amount,

    /// Free text, opaque to the ledger
    pub message: String,

    /// Free text used by clients for categorization, opaque to the ledger
    pub keyword: String,
}

impl TransferRequest {
    pub fn new(
        receiver: impl Into<AccountId>,
        amount: Amount,
        message: impl Into<String>,
        keyword: impl Into<String>,
    ) -> Self {
        TransferRequest {
            receiver: receiver.into(),
            amount,
            message: message.into(),
            keyword: keyword.into(),
        }
    }
}

/// One appended entry of the ledger history
///
/// Records are created only by a successful transfer and never change
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    /// The caller that initiated the transfer
    pub sender: AccountId,

    /// Destination of the record and the value
    pub receiver: AccountId,

    /// Transferred amount, always greater than zero
    pub amount: Amount,

    pub message: String,

    pub keyword: String,

    /// Assigned by the ledger at append time, never by the caller
    pub timestamp: Timestamp,
}

/// Notification published for every committed transfer
///
/// Built from the committed record, so its timestamp always equals the
/// timestamp stored in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEvent {
    pub sender: AccountId,
    pub receiver: AccountId,
    pub amount: Amount,
    pub message: String,
    pub timestamp: Timestamp,
    pub keyword: String,
}

impl From<&TransferRecord> for TransferEvent {
    fn from(record: &TransferRecord) -> Self {
        TransferEvent {
            sender: record.sender.clone(),
            receiver: record.receiver.clone(),
            amount: record.amount,
            message: record.message.clone(),
            timestamp: record.timestamp,
            keyword: record.keyword.clone(),
        }
    }
}

/// A parsed input row, ready to be applied to a ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerRequest {
    /// Top up `account`'s wallet with `value`
    Fund { account: AccountId, value: Amount },

    /// Record `request` on behalf of `caller`, with `attached_value` submitted alongside
    Transfer {
        caller: AccountId,
        request: TransferRequest,
        attached_value: Amount,
    },
}

impl LedgerRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            LedgerRequest::Fund { .. } => RequestKind::Fund,
            LedgerRequest::Transfer { .. } => RequestKind::Transfer,
        }
    }

    /// The account whose wallet this request acts on first
    ///
    /// Requests sharing an acting account must be applied in input order; the
    /// async pipeline partitions on this key.
    pub fn acting_account(&self) -> &AccountId {
        match self {
            LedgerRequest::Fund { account, .. } => account,
            LedgerRequest::Transfer { caller, .. } => caller,
        }
    }
}
