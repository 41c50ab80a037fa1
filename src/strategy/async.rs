//! Asynchronous batch processing strategy
//!
//! Multi-threaded pipeline that reads requests in batches and applies each
//! batch with one task per acting account.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── BatchProcessor (account partitioning + tokio tasks)
//!     └── SharedLedger (one RwLock around the TransferLedger)
//! ```
//!
//! # Ordering
//!
//! - Batches are processed one after another, so an account's requests keep
//!   file order across the whole input
//! - Within a batch, different accounts run concurrently and their relative
//!   order is not fixed
//!
//! Inputs where one account spends value it receives from another account in
//! the same batch can therefore produce different results than the sync
//! strategy. Record timestamps and history order may also differ.

use crate::core::r#async::{BatchProcessor, SharedLedger};
use crate::io::async_reader::AsyncReader;
use crate::strategy::{ProcessingStrategy, RunOptions};
use crate::types::LedgerError;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Configuration for batch processing
///
/// Controls how requests are batched and the number of worker threads
/// for parallel processing within each batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of requests per batch
    pub batch_size: usize,
    /// Number of runtime worker threads
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a BatchConfig, replacing zero values with the defaults
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                max_concurrent_batches,
                default = default.max_concurrent_batches,
                "invalid worker count, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
    options: RunOptions,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig, options: RunOptions) -> Self {
        Self { config, options }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Run the batch pipeline on a dedicated multi-thread runtime
    ///
    /// Each batch is fully applied before the next one is read. The report is
    /// written from one snapshot of the ledger taken after the last batch.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), LedgerError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()?;

        runtime.block_on(async {
            let ledger = SharedLedger::new(self.options.build_ledger());
            let processor = BatchProcessor::new(ledger.clone());

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| match e.kind() {
                    ErrorKind::NotFound => LedgerError::FileNotFound {
                        path: input_path.display().to_string(),
                    },
                    _ => LedgerError::from(e),
                })?;

            // csv-async reads through the futures io traits
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file, self.options.denomination).await?;

            let mut batches = 0usize;
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }
                batches += 1;

                for result in processor.process_batch(batch).await {
                    if let Err(error) = result.result {
                        warn!(
                            account = %result.request.acting_account(),
                            kind = ?result.request.kind(),
                            %error,
                            "request rejected"
                        );
                    }
                }
            }

            let snapshot = ledger.snapshot().await;
            debug!(
                batches,
                transfers = snapshot.records.len(),
                "input exhausted"
            );

            self.options
                .write_report(&snapshot.records, &snapshot.balances, output)
        })
    }
}
