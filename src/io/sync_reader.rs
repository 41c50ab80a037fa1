//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over ledger requests from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<LedgerRequest, LedgerError>` for each CSV row:
//!
//! ```no_run
//! use transfer_ledger::io::{Denomination, SyncReader};
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("requests.csv"), Denomination::Ether).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(request) => println!("Applying request: {:?}", request),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, unreadable header) are returned from `new()`
//! - Row errors are yielded as `LedgerError::InputRow` carrying the 1-based
//!   file line, so iteration can continue past them
//!
//! Rows are read one at a time; memory use does not grow with the file.

use crate::io::csv_format::{convert_csv_row, CsvRow};
use crate::io::units::Denomination;
use crate::types::{LedgerError, LedgerRequest};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Synchronous CSV reader
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    headers: StringRecord,
    record: StringRecord,
    denomination: Denomination,
}

impl SyncReader {
    /// Open `path` and read its header row
    ///
    /// The CSV reader trims the header names and allows rows with fewer
    /// columns than the header (trailing empty columns may be omitted). Data
    /// columns are trimmed during conversion, except `message` and `keyword`.
    pub fn new(path: &Path, denomination: Denomination) -> Result<Self, LedgerError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LedgerError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => LedgerError::from(e),
        })?;

        let mut reader = ReaderBuilder::new()
            .trim(Trim::Headers)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        let headers = reader.headers()?.clone();

        Ok(Self {
            reader,
            headers,
            record: StringRecord::new(),
            denomination,
        })
    }

    /// 1-based file line of the row most recently yielded
    pub fn line(&self) -> u64 {
        self.record
            .position()
            .map(|pos| pos.line())
            .unwrap_or_else(|| self.reader.position().line())
    }
}

impl Iterator for SyncReader {
    type Item = Result<LedgerRequest, LedgerError>;

    /// Read, deserialize and convert the next row
    ///
    /// Returns `None` at end of file.
    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(false) => None,
            Ok(true) => {
                let line = self.line();
                let result = self
                    .record
                    .deserialize::<CsvRow>(Some(&self.headers))
                    .map_err(LedgerError::from)
                    .and_then(|row| convert_csv_row(row, self.denomination))
                    .map_err(|e| e.at_line(line));
                Some(result)
            }
            Err(e) => {
                let line = e
                    .position()
                    .map(|pos| pos.line())
                    .unwrap_or_else(|| self.reader.position().line());
                Some(Err(LedgerError::from(e).at_line(line)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccountId, RequestKind};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "type,sender,receiver,amount,value,message,keyword\n";

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(rows: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(HEADER.as_bytes())
            .expect("Failed to write header");
        file.write_all(rows.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn read_all(rows: &str, denomination: Denomination) -> Vec<Result<LedgerRequest, LedgerError>> {
        let file = create_temp_csv(rows);
        SyncReader::new(file.path(), denomination).unwrap().collect()
    }

    #[test]
    fn test_sync_reader_fails_on_missing_file() {
        let result = SyncReader::new(Path::new("nonexistent.csv"), Denomination::Ether);

        assert_eq!(
            result.unwrap_err(),
            LedgerError::FileNotFound {
                path: "nonexistent.csv".to_string()
            }
        );
    }

    #[test]
    fn test_sync_reader_fails_on_unreadable_header() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(b"type,\xffsender\n")
            .expect("Failed to write header");
        file.flush().expect("Failed to flush temp file");

        let result = SyncReader::new(file.path(), Denomination::Wei);

        assert!(matches!(result, Err(LedgerError::ParseError { .. })));
    }

    #[test]
    fn test_sync_reader_reads_fund_and_transfer() {
        let records = read_all(
            "fund,,alice,,2,,\ntransfer,alice,bob,1.5,1.5,hello,greeting\n",
            Denomination::Ether,
        );

        assert_eq!(records.len(), 2);

        let fund = records[0].as_ref().unwrap();
        assert_eq!(fund.kind(), RequestKind::Fund);
        assert_eq!(fund.acting_account(), &AccountId::from("alice"));

        match records[1].as_ref().unwrap() {
            LedgerRequest::Transfer {
                caller,
                request,
                attached_value,
            } => {
                assert_eq!(caller, &AccountId::from("alice"));
                assert_eq!(request.receiver, AccountId::from("bob"));
                assert_eq!(request.amount, 1_500_000_000_000_000_000);
                assert_eq!(request.message, "hello");
                assert_eq!(request.keyword, "greeting");
                assert_eq!(*attached_value, request.amount);
            }
            other => panic!("expected transfer, got {:?}", other),
        }
    }

    #[test]
    fn test_sync_reader_handles_whitespace_and_short_rows() {
        let records = read_all(
            "  transfer , alice , bob , 5 , 5 ,  spaced note , key \n",
            Denomination::Wei,
        );

        assert_eq!(records.len(), 1);
        match records[0].as_ref().unwrap() {
            LedgerRequest::Transfer { request, .. } => {
                assert_eq!(request.receiver, AccountId::from("bob"));
                assert_eq!(request.amount, 5);
                assert_eq!(request.message, "  spaced note ");
                assert_eq!(request.keyword, " key ");
            }
            other => panic!("expected transfer, got {:?}", other),
        }
    }

    #[test]
    fn test_sync_reader_reports_line_numbers() {
        let records = read_all(
            "fund,,alice,,10,,\nrefund,alice,bob,1,1,,\ntransfer,,bob,1,1,,\n",
            Denomination::Wei,
        );

        assert_eq!(records.len(), 3);
        assert!(records[0].is_ok());
        assert_eq!(
            records[1].as_ref().unwrap_err(),
            &LedgerError::invalid_request_type("refund").at_line(3)
        );
        assert_eq!(
            records[2].as_ref().unwrap_err(),
            &LedgerError::IdentityUnavailable.at_line(4)
        );
    }

    #[test]
    fn test_sync_reader_continues_after_bad_amount() {
        let records = read_all(
            "transfer,alice,bob,abc,,,\ntransfer,alice,bob,3,3,,\n",
            Denomination::Wei,
        );

        assert!(matches!(
            records[0],
            Err(LedgerError::InputRow { line: 2, .. })
        ));
        assert!(records[1].is_ok());
    }

    #[test]
    fn test_sync_reader_line_tracks_last_row() {
        let file = create_temp_csv("fund,,a,,1,,\n\nfund,,b,,1,,\n");
        let mut reader = SyncReader::new(file.path(), Denomination::Wei).unwrap();

        assert!(reader.next().unwrap().is_ok());
        assert_eq!(reader.line(), 2);
        assert!(reader.next().unwrap().is_ok());
        assert_eq!(reader.line(), 4);
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_sync_reader_handles_empty_file_after_header() {
        assert!(read_all("", Denomination::Ether).is_empty());
    }

    #[test]
    fn test_sync_reader_filter_map_pattern() {
        let valid = read_all(
            "fund,,a,,1,,\nbogus,,,,,,\ntransfer,a,b,1,1,,\n",
            Denomination::Wei,
        )
        .into_iter()
        .filter_map(Result::ok)
        .count();

        assert_eq!(valid, 2);
    }
}
