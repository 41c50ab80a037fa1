//! Synchronous processing strategy
//!
//! Single-threaded pipeline that streams rows through a `SyncReader` and
//! applies each request to one `TransferLedger` in file order. File order is
//! the only ordering, so the report is fully determined by the input (and the
//! clock, unless pinned with an epoch).
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Validation and recording to `TransferLedger`
//! - Report output to `RunOptions::write_report`

use crate::io::sync_reader::SyncReader;
use crate::strategy::{ProcessingStrategy, RunOptions};
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use transfer_ledger::strategy::{ProcessingStrategy, RunOptions, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(RunOptions::default());
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("requests.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncProcessingStrategy {
    options: RunOptions,
}

impl SyncProcessingStrategy {
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), LedgerError> {
        let mut ledger = self.options.build_ledger();
        let mut reader = SyncReader::new(input_path, self.options.denomination)?;

        let mut rejected = 0usize;
        while let Some(result) = reader.next() {
            let request = match result {
                Ok(request) => request,
                Err(error) => {
                    warn!(%error, "skipping input row");
                    rejected += 1;
                    continue;
                }
            };

            let line = reader.line();
            if let Err(error) = ledger.apply(request) {
                warn!(line, %error, "request rejected");
                rejected += 1;
            }
        }

        debug!(
            transfers = ledger.count_transfers(),
            rejected, "input exhausted"
        );

        self.options
            .write_report(ledger.list_transfers(), &ledger.balances(), output)
    }
}
