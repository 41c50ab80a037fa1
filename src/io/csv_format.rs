//! CSV format handling for ledger requests and reports
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRow structure for deserialization
//! - Conversion from CSV rows to ledger requests
//! - Balance and history report serialization
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::io::units::{format_amount, parse_amount, Denomination};
use crate::types::{
    AccountId, Amount, LedgerError, LedgerRequest, Timestamp, TransferRecord, TransferRequest,
};
use chrono::{DateTime, SecondsFormat};
use serde::Deserialize;
use std::io::Write;

/// CSV row structure for deserialization
///
/// Matches the input columns `type,sender,receiver,amount,value,message,keyword`.
/// Every column except `type` may be empty; which ones are required depends
/// on the request type. Structural columns are trimmed during conversion, while
/// `message` and `keyword` are opaque text and kept exactly as read.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct CsvRow {
    #[serde(rename = "type")]
    pub request_type: String,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub receiver: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub keyword: Option<String>,
}

/// Trim a structural column, treating empty and whitespace-only values as absent
fn present(column: Option<String>) -> Option<String> {
    column
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Convert a CsvRow to a LedgerRequest
///
/// - `fund` credits `value` (falling back to `amount`) to the `receiver` wallet
/// - `transfer` records `amount` from `sender` to `receiver` with `value`
///   attached; an empty `value` attaches nothing
///
/// A transfer without a sender fails with `IdentityUnavailable`. The ledger
/// itself decides whether a zero amount or a mismatched value is acceptable,
/// so those are converted as-is.
pub fn convert_csv_row(
    row: CsvRow,
    denomination: Denomination,
) -> Result<LedgerRequest, LedgerError> {
    let request_type = row.request_type.trim().to_lowercase();

    let receiver = present(row.receiver).map(AccountId::new);

    match request_type.as_str() {
        "fund" => {
            let account = receiver.ok_or_else(|| LedgerError::missing_field("receiver"))?;
            let raw_value = present(row.value)
                .or_else(|| present(row.amount))
                .ok_or_else(|| LedgerError::missing_field("value"))?;

            Ok(LedgerRequest::Fund {
                account,
                value: parse_amount(&raw_value, denomination)?,
            })
        }
        "transfer" => {
            let caller = present(row.sender)
                .map(AccountId::new)
                .ok_or(LedgerError::IdentityUnavailable)?;
            let receiver = receiver.ok_or_else(|| LedgerError::missing_field("receiver"))?;
            let raw_amount =
                present(row.amount).ok_or_else(|| LedgerError::missing_field("amount"))?;
            let amount = parse_amount(&raw_amount, denomination)?;
            let attached_value = match present(row.value) {
                Some(raw_value) => parse_amount(&raw_value, denomination)?,
                None => 0,
            };

            Ok(LedgerRequest::Transfer {
                caller,
                request: TransferRequest::new(
                    receiver,
                    amount,
                    row.message.unwrap_or_default(),
                    row.keyword.unwrap_or_default(),
                ),
                attached_value,
            })
        }
        _ => Err(LedgerError::invalid_request_type(&row.request_type)),
    }
}

/// Render a record timestamp as RFC 3339 UTC
///
/// Falls back to the raw seconds when the value is outside chrono's range.
pub fn format_timestamp(timestamp: Timestamp) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|time| time.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| timestamp.to_string())
}

/// Write custodial balances to CSV format
///
/// Writes columns `account,balance`, sorted by account for deterministic
/// output regardless of the order the caller supplies.
pub fn write_balances_csv(
    balances: &[(AccountId, Amount)],
    denomination: Denomination,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["account", "balance"])?;

    let mut sorted = balances.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    for (account, balance) in sorted {
        writer.write_record([
            account.as_str().to_string(),
            format_amount(balance, denomination),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the transfer history to CSV format
///
/// Writes columns `index,sender,receiver,amount,message,keyword,timestamp` in
/// append order.
pub fn write_history_csv(
    records: &[TransferRecord],
    denomination: Denomination,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record([
        "index",
        "sender",
        "receiver",
        "amount",
        "message",
        "keyword",
        "timestamp",
    ])?;

    for (index, record) in records.iter().enumerate() {
        writer.write_record([
            index.to_string(),
            record.sender.to_string(),
            record.receiver.to_string(),
            format_amount(record.amount, denomination),
            record.message.clone(),
            record.keyword.clone(),
            format_timestamp(record.timestamp),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
