//! Value-transfer substrates
//!
//! - [`Unmetered`] trusts the attached value and keeps no wallets.
//! - [`Wallets`] keeps an in-memory wallet per account and refuses transfers
//!   the paying wallet cannot cover.

use crate::core::traits::ValueSubstrate;
use crate::types::{AccountId, Amount, LedgerError};
use std::collections::HashMap;

/// Substrate that accepts any attached value as already paid
#[derive(Debug, Clone, Copy, Default)]
pub struct Unmetered;

impl ValueSubstrate for Unmetered {
    fn transfer(
        &mut self,
        _from: &AccountId,
        _to: &AccountId,
        _value: Amount,
    ) -> Result<(), LedgerError> {
        Ok(())
    }

    fn fund(&mut self, _account: &AccountId, _value: Amount) -> Result<(), LedgerError> {
        Ok(())
    }

    fn wallet_balance(&self, _account: &AccountId) -> Option<Amount> {
        None
    }
}

/// In-memory ambient wallets
///
/// Missing accounts hold zero. Both sides of a transfer are computed with
/// checked arithmetic before either wallet is written.
#[derive(Debug, Clone, Default)]
pub struct Wallets {
    balances: HashMap<AccountId, Amount>,
}

impl Wallets {
    pub fn new() -> Self {
        Wallets {
            balances: HashMap::new(),
        }
    }

    /// Current wallet balance of `account` (zero if never funded)
    pub fn balance(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }
}

impl ValueSubstrate for Wallets {
    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        value: Amount,
    ) -> Result<(), LedgerError> {
        let available = self.balance(from);
        if available < value {
            return Err(LedgerError::insufficient_funds(from, available, value));
        }

        // Paying yourself only needs the funds check
        if from == to {
            return Ok(());
        }

        let new_from = available
            .checked_sub(value)
            .ok_or_else(|| LedgerError::insufficient_funds(from, available, value))?;
        let new_to = self
            .balance(to)
            .checked_add(value)
            .ok_or_else(|| LedgerError::arithmetic_overflow("wallet credit", to))?;

        self.balances.insert(from.clone(), new_from);
        self.balances.insert(to.clone(), new_to);

        Ok(())
    }

    fn fund(&mut self, account: &AccountId, value: Amount) -> Result<(), LedgerError> {
        let new_balance = self
            .balance(account)
            .checked_add(value)
            .ok_or_else(|| LedgerError::arithmetic_overflow("wallet fund", account))?;
        self.balances.insert(account.clone(), new_balance);
        Ok(())
    }

    fn wallet_balance(&self, account: &AccountId) -> Option<Amount> {
        Some(self.balance(account))
    }
}
