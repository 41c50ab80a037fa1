//! Transfer ledger
//!
//! This module provides the TransferLedger that records value transfers by
//! coordinating the RecordStore, the BalanceBook and the value substrate.
//!
//! The ledger enforces:
//! - Validation before mutation (amount, attached value, balance overflow)
//! - All-or-nothing transfers: the substrate moves value if and only if the
//!   record is appended and the receiver is credited
//! - Non-decreasing timestamps in append order, whatever the clock reports

use crate::core::balance_book::BalanceBook;
use crate::core::clock::SystemClock;
use crate::core::events::NullSink;
use crate::core::record_store::RecordStore;
use crate::core::substrate::Unmetered;
use crate::core::traits::{Clock, EventSink, ValueSubstrate};
use crate::types::{
    AccountId, Amount, LedgerError, LedgerRequest, TransferEvent, TransferRecord, TransferRequest,
};

/// A transfer that passed validation but has not been applied yet
///
/// Holds everything the commit needs, so the commit itself cannot fail.
#[derive(Debug)]
struct StagedTransfer {
    record: TransferRecord,
    receiver_balance: Amount,
}

/// Single-owner transfer ledger
///
/// Exclusive access (`&mut self`) serializes every write. For shared access
/// from many tasks, wrap it in a [`SharedLedger`](crate::core::SharedLedger).
#[derive(Debug)]
pub struct TransferLedger {
    records: RecordStore,
    balances: BalanceBook,
    substrate: Box<dyn ValueSubstrate>,
    sink: Box<dyn EventSink>,
    clock: Box<dyn Clock>,
}

impl TransferLedger {
    /// Create an empty ledger
    ///
    /// Defaults to an [`Unmetered`] substrate, a [`NullSink`] and the
    /// [`SystemClock`]; replace them with the `with_*` methods.
    pub fn new() -> Self {
        TransferLedger {
            records: RecordStore::new(),
            balances: BalanceBook::new(),
            substrate: Box::new(Unmetered),
            sink: Box::new(NullSink),
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_substrate(mut self, substrate: impl ValueSubstrate + 'static) -> Self {
        self.substrate = Box::new(substrate);
        self
    }

    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Record a transfer from `caller`
    ///
    /// Checks, in order, that the amount is positive, that `attached_value`
    /// equals the amount and that the receiver's custodial balance can absorb
    /// it. Then the substrate moves the value from `caller` to the receiver,
    /// and only after it succeeds is the record appended, the receiver
    /// credited and the event emitted.
    ///
    /// # Returns
    ///
    /// * `Ok(TransferRecord)` - The appended record
    /// * `Err(LedgerError)` - The transfer was rejected; nothing changed
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `request.amount` is zero
    /// - `ValueMismatch` if `attached_value != request.amount`
    /// - `ArithmeticOverflow` if the receiver's custodial balance would overflow
    /// - Any error raised by the substrate (e.g. `InsufficientFunds`)
    pub fn record_transfer(
        &mut self,
        caller: &AccountId,
        request: TransferRequest,
        attached_value: Amount,
    ) -> Result<TransferRecord, LedgerError> {
        let staged = self.stage(caller, request, attached_value)?;

        self.substrate.transfer(
            &staged.record.sender,
            &staged.record.receiver,
            staged.record.amount,
        )?;

        Ok(self.commit(staged))
    }

    fn stage(
        &self,
        caller: &AccountId,
        request: TransferRequest,
        attached_value: Amount,
    ) -> Result<StagedTransfer, LedgerError> {
        if request.amount == 0 {
            return Err(LedgerError::invalid_amount(request.amount));
        }

        if attached_value != request.amount {
            return Err(LedgerError::value_mismatch(request.amount, attached_value));
        }

        let receiver_balance = self
            .balances
            .preview_credit(&request.receiver, request.amount)?;

        // Never stamp a record earlier than its predecessor
        let now = self.clock.now();
        let timestamp = self
            .records
            .last_timestamp()
            .map_or(now, |last| last.max(now));

        Ok(StagedTransfer {
            record: TransferRecord {
                sender: caller.clone(),
                receiver: request.receiver,
                amount: request.amount,
                message: request.message,
                keyword: request.keyword,
                timestamp,
            },
            receiver_balance,
        })
    }

    fn commit(&mut self, staged: StagedTransfer) -> TransferRecord {
        let StagedTransfer {
            record,
            receiver_balance,
        } = staged;

        self.balances
            .commit(record.receiver.clone(), receiver_balance);
        self.records.append(record.clone());
        self.sink.emit(&TransferEvent::from(&record));

        record
    }

    /// Credit `value` to `account`'s wallet in the substrate
    ///
    /// Wallet funding never appends a record and never touches custodial
    /// balances.
    pub fn fund_wallet(&mut self, account: &AccountId, value: Amount) -> Result<(), LedgerError> {
        self.substrate.fund(account, value)
    }

    /// Apply one parsed input request
    ///
    /// # Returns
    ///
    /// * `Ok(Some(record))` for a committed transfer
    /// * `Ok(None)` for a wallet funding
    pub fn apply(&mut self, request: LedgerRequest) -> Result<Option<TransferRecord>, LedgerError> {
        match request {
            LedgerRequest::Fund { account, value } => {
                self.fund_wallet(&account, value)?;
                Ok(None)
            }
            LedgerRequest::Transfer {
                caller,
                request,
                attached_value,
            } => self
                .record_transfer(&caller, request, attached_value)
                .map(Some),
        }
    }

    /// Full history in append order
    pub fn list_transfers(&self) -> &[TransferRecord] {
        self.records.all()
    }

    /// Number of records ever appended
    pub fn count_transfers(&self) -> usize {
        self.records.len()
    }

    /// Custodial balance of `account`, zero if never credited
    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.balance_of(account)
    }

    /// Record at append position `index`
    pub fn transfer_at(&self, index: usize) -> Option<&TransferRecord> {
        self.records.get(index)
    }

    /// Up to `limit` records starting at append position `start`
    pub fn transfers_page(&self, start: usize, limit: usize) -> &[TransferRecord] {
        self.records.page(start, limit)
    }

    /// Every credited account with its custodial balance, sorted by account
    pub fn balances(&self) -> Vec<(AccountId, Amount)> {
        self.balances.all_balances()
    }

    /// Wallet balance of `account` in the substrate, if it keeps wallets
    pub fn wallet_balance(&self, account: &AccountId) -> Option<Amount> {
        self.substrate.wallet_balance(account)
    }
}

impl Default for TransferLedger {
    fn default() -> Self {
        Self::new()
    }
}
