//! Custodial balance bookkeeping
//!
//! This module provides the `BalanceBook` struct which tracks how much value
//! the ledger has credited to each receiving account.
//!
//! The BalanceBook is responsible for:
//! - Answering balance queries (zero for accounts never credited)
//! - Computing a credit without applying it, so the ledger can validate
//!   a whole transfer before mutating anything
//! - Providing sorted balance listings for reports

use crate::types::{AccountId, Amount, LedgerError};
use std::collections::HashMap;

/// Custodial balances keyed by account
///
/// Balances only ever grow: the sole mutation is a credit of a transfer's
/// amount to its receiver.
#[derive(Debug, Default)]
pub struct BalanceBook {
    /// Map of account to credited amount
    balances: HashMap<AccountId, Amount>,
}

impl BalanceBook {
    /// Create a new BalanceBook with no balances
    pub fn new() -> Self {
        BalanceBook {
            balances: HashMap::new(),
        }
    }

    /// Current custodial balance of `account`
    ///
    /// Accounts that were never credited hold zero.
    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Compute the balance `account` would hold after a credit of `amount`
    ///
    /// Does not touch the book.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if the new balance exceeds `Amount::MAX`.
    pub fn preview_credit(
        &self,
        account: &AccountId,
        amount: Amount,
    ) -> Result<Amount, LedgerError> {
        self.balance_of(account)
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("custodial credit", account))
    }

    /// Store a balance computed by [`BalanceBook::preview_credit`]
    pub(crate) fn commit(&mut self, account: AccountId, new_balance: Amount) {
        self.balances.insert(account, new_balance);
    }

    /// All credited accounts and their balances, sorted by account
    pub fn all_balances(&self) -> Vec<(AccountId, Amount)> {
        let mut balances: Vec<(AccountId, Amount)> = self
            .balances
            .iter()
            .map(|(account, balance)| (account.clone(), *balance))
            .collect();
        balances.sort_by(|a, b| a.0.cmp(&b.0));
        balances
    }
}
