//! I/O module
//!
//! Handles CSV parsing, denomination conversion and report output.
//!
//! # Components
//!
//! - `units` - Display denominations and conversion to the smallest unit
//! - `csv_format` - CSV format handling (row conversion, report serialization)
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader with batch reading interface

pub mod async_reader;
pub mod csv_format;
pub mod sync_reader;
pub mod units;

pub use async_reader::AsyncReader;
pub use csv_format::{
    convert_csv_row, format_timestamp, write_balances_csv, write_history_csv, CsvRow,
};
pub use sync_reader::SyncReader;
pub use units::{format_amount, parse_amount, Denomination};
