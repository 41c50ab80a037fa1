//! Denomination handling for amount columns and reports
//!
//! The ledger only knows integer quantities of the smallest unit. Input files
//! and reports use a display denomination instead. Input is parsed with
//! `rust_decimal` and output is rendered with integer arithmetic, so no
//! floating point is ever involved.

use crate::types::{Amount, LedgerError};
use clap::ValueEnum;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Display unit for amount columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Denomination {
    /// Smallest unit, whole numbers only
    Wei,
    /// 10^9 wei
    Gwei,
    /// 10^18 wei
    #[default]
    Ether,
}

impl Denomination {
    /// Number of decimal places between this unit and wei
    pub fn decimals(self) -> u32 {
        match self {
            Denomination::Wei => 0,
            Denomination::Gwei => 9,
            Denomination::Ether => 18,
        }
    }
}

/// Convert a decimal string in `denomination` to the smallest unit
///
/// Leading and trailing whitespace is ignored. Trailing zeros past the
/// denomination's precision are accepted (`"1.50"` ether is fine), but any
/// non-zero digit finer than one wei is rejected.
pub fn parse_amount(raw: &str, denomination: Denomination) -> Result<Amount, LedgerError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::invalid_amount_format(raw, "amount is empty"));
    }

    if denomination == Denomination::Wei {
        if trimmed.starts_with('-') {
            return Err(LedgerError::invalid_amount_format(raw, "amount is negative"));
        }
        return trimmed
            .parse::<Amount>()
            .map_err(|e| LedgerError::invalid_amount_format(raw, &e.to_string()));
    }

    let value = Decimal::from_str(trimmed)
        .map_err(|_| LedgerError::invalid_amount_format(raw, "not a decimal number"))?
        .normalize();

    if value.is_sign_negative() && !value.is_zero() {
        return Err(LedgerError::invalid_amount_format(raw, "amount is negative"));
    }
    if value.scale() > denomination.decimals() {
        return Err(LedgerError::invalid_amount_format(
            raw,
            "more precise than the smallest unit",
        ));
    }

    let factor = Decimal::from(10u64.pow(denomination.decimals()));
    let scaled = value
        .checked_mul(factor)
        .ok_or_else(|| LedgerError::invalid_amount_format(raw, "amount is too large"))?
        .normalize();

    if scaled.scale() != 0 {
        return Err(LedgerError::invalid_amount_format(
            raw,
            "more precise than the smallest unit",
        ));
    }

    Amount::try_from(scaled.mantissa().abs())
        .map_err(|_| LedgerError::invalid_amount_format(raw, "amount is too large"))
}

/// Format a smallest-unit amount in `denomination`
///
/// Trailing zeros are dropped, so one ether prints as `1` and half an ether
/// as `0.5`. Integer arithmetic keeps every `u128` amount exact.
pub fn format_amount(amount: Amount, denomination: Denomination) -> String {
    let decimals = denomination.decimals();
    if decimals == 0 {
        return amount.to_string();
    }

    let unit = 10u128.pow(decimals);
    let whole = amount / unit;
    let fraction = amount % unit;
    if fraction == 0 {
        return whole.to_string();
    }

    let digits = format!("{:0width$}", fraction, width = decimals as usize);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}
