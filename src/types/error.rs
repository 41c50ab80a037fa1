//! Error types for the transfer ledger
//!
//! This module defines all error types that can occur while recording
//! transfers or reading transfer requests from input.
//!
//! # Error Categories
//!
//! - **Ledger Errors**: invalid amount, attached value mismatch, balance overflow
//! - **Substrate Errors**: missing caller identity, insufficient wallet funds
//! - **Input Errors**: file not found, I/O failures, malformed CSV rows and amounts

use super::account::{AccountId, Amount};
use thiserror::Error;

/// Main error type for the transfer ledger
///
/// Every ledger and substrate error is raised before any state is mutated,
/// so receiving one of them means the operation had no effect.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// The stated amount is zero
    #[error("Invalid amount {amount}: amount must be greater than 0")]
    InvalidAmount {
        /// The rejected amount
        amount: Amount,
    },

    /// The value attached to the call differs from the stated amount
    #[error("Attached value {attached} must match amount {amount}")]
    ValueMismatch {
        /// Stated amount
        amount: Amount,
        /// Value actually submitted with the call
        attached: Amount,
    },

    /// A balance update would exceed the representable range
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account whose balance would overflow
        account: AccountId,
    },

    /// The substrate supplied no caller identity
    #[error("No caller identity available")]
    IdentityUnavailable,

    /// The caller's wallet cannot cover the attached value
    #[error(
        "Insufficient funds for account {account}: available {available}, requested {requested}"
    )]
    InsufficientFunds {
        /// Paying account
        account: AccountId,
        /// Wallet balance at the time of the call
        available: Amount,
        /// Value the call tried to move
        requested: Amount,
    },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading input or writing a report
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Unknown value in the `type` column
    #[error("Invalid request type '{request_type}'")]
    InvalidRequestType {
        /// The unrecognized type string
        request_type: String,
    },

    /// A column required by the request type is empty
    #[error("Missing required field '{field}'")]
    MissingField {
        /// Column name
        field: String,
    },

    /// An amount column could not be converted to the smallest unit
    #[error("Invalid amount '{amount}': {reason}")]
    InvalidAmountFormat {
        /// The raw column text
        amount: String,
        /// Why the conversion failed
        reason: String,
    },

    /// A row-level error annotated with its input line
    #[error("Line {line}: {source}")]
    InputRow {
        /// 1-based line number in the input file, header included
        line: u64,
        /// The underlying error
        #[source]
        source: Box<LedgerError>,
    },
}

// Conversion from io::Error to LedgerError
impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to LedgerError
impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl LedgerError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Amount) -> Self {
        LedgerError::InvalidAmount { amount }
    }

    /// Create a ValueMismatch error
    pub fn value_mismatch(amount: Amount, attached: Amount) -> Self {
        LedgerError::ValueMismatch { amount, attached }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: &AccountId) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account: account.clone(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: &AccountId, available: Amount, requested: Amount) -> Self {
        LedgerError::InsufficientFunds {
            account: account.clone(),
            available,
            requested,
        }
    }

    /// Create an InvalidRequestType error
    pub fn invalid_request_type(request_type: &str) -> Self {
        LedgerError::InvalidRequestType {
            request_type: request_type.to_string(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: &str) -> Self {
        LedgerError::MissingField {
            field: field.to_string(),
        }
    }

    /// Create an InvalidAmountFormat error
    pub fn invalid_amount_format(amount: &str, reason: &str) -> Self {
        LedgerError::InvalidAmountFormat {
            amount: amount.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Annotate an error with the input line it came from
    pub fn at_line(self, line: u64) -> Self {
        LedgerError::InputRow {
            line,
            source: Box::new(self),
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::invalid_amount(
        LedgerError::InvalidAmount { amount: 0 },
        "Invalid amount 0: amount must be greater than 0"
    )]
    #[case::value_mismatch(
        LedgerError::ValueMismatch { amount: 50, attached: 0 },
        "Attached value 0 must match amount 50"
    )]
    #[case::arithmetic_overflow(
        LedgerError::ArithmeticOverflow { operation: "credit".to_string(), account: AccountId::from("bob") },
        "Arithmetic overflow in credit for account bob"
    )]
    #[case::identity_unavailable(
        LedgerError::IdentityUnavailable,
        "No caller identity available"
    )]
    #[case::insufficient_funds(
        LedgerError::InsufficientFunds { account: AccountId::from("alice"), available: 5, requested: 10 },
        "Insufficient funds for account alice: available 5, requested 10"
    )]
    #[case::file_not_found(
        LedgerError::FileNotFound { path: "requests.csv".to_string() },
        "File not found: requests.csv"
    )]
    #[case::parse_error_with_line(
        LedgerError::ParseError { line: Some(42), message: "Invalid field".to_string() },
        "CSV parse error at line 42: Invalid field"
    )]
    #[case::parse_error_without_line(
        LedgerError::ParseError { line: None, message: "Invalid field".to_string() },
        "CSV parse error: Invalid field"
    )]
    #[case::invalid_request_type(
        LedgerError::InvalidRequestType { request_type: "refund".to_string() },
        "Invalid request type 'refund'"
    )]
    #[case::missing_field(
        LedgerError::MissingField { field: "receiver".to_string() },
        "Missing required field 'receiver'"
    )]
    #[case::invalid_amount_format(
        LedgerError::InvalidAmountFormat { amount: "-1".to_string(), reason: "amount is negative".to_string() },
        "Invalid amount '-1': amount is negative"
    )]
    fn test_error_display(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_at_line_wraps_source() {
        let error = LedgerError::invalid_amount(0).at_line(3);

        assert_eq!(
            error.to_string(),
            "Line 3: Invalid amount 0: amount must be greater than 0"
        );
        assert_eq!(
            error,
            LedgerError::InputRow {
                line: 3,
                source: Box::new(LedgerError::InvalidAmount { amount: 0 }),
            }
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: LedgerError = io_error.into();
        assert!(matches!(error, LedgerError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
