//! Asynchronous CSV reader with batch interface
//!
//! Reads ledger requests in batches for the async processing pipeline.
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of LedgerRequests
//!                  ↓
//!           csv_format module
//!           (CsvRow, convert_csv_row)
//! ```
//!
//! An unreadable header is returned from `new()`, as the sync reader does.
//! Rows that fail to deserialize or convert are logged at `warn` and skipped.

use crate::io::csv_format::{convert_csv_row, CsvRow};
use crate::io::units::Denomination;
use crate::types::{LedgerError, LedgerRequest};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::warn;

/// Asynchronous CSV reader
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    denomination: Denomination,
    rows_read: u64,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Wrap `reader` and read its header row
    ///
    /// Only the header names are trimmed. Data columns are passed through
    /// untouched, so `message` and `keyword` keep their whitespace.
    pub async fn new(reader: R, denomination: Denomination) -> Result<Self, LedgerError> {
        let mut csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::Headers)
            .create_deserializer(reader);

        csv_reader
            .headers()
            .await
            .map_err(|e| LedgerError::ParseError {
                line: Some(1),
                message: e.to_string(),
            })?;

        Ok(Self {
            csv_reader,
            denomination,
            rows_read: 0,
        })
    }

    /// Read up to `batch_size` requests
    ///
    /// Returns an empty vector once the input is exhausted. Invalid rows do
    /// not count toward the batch size.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<LedgerRequest> {
        let mut batch = Vec::with_capacity(batch_size);
        let denomination = self.denomination;
        let mut rows = self.csv_reader.deserialize::<CsvRow>();

        while batch.len() < batch_size {
            let parsed = match rows.next().await {
                Some(parsed) => parsed,
                None => break,
            };
            self.rows_read += 1;
            // header is line 1
            let line = self.rows_read + 1;

            let result = parsed
                .map_err(|e| LedgerError::ParseError {
                    line: Some(line),
                    message: e.to_string(),
                })
                .and_then(|row| convert_csv_row(row, denomination));

            match result {
                Ok(request) => batch.push(request),
                Err(error) => warn!(line, %error, "skipping input row"),
            }
        }

        batch
    }
}
