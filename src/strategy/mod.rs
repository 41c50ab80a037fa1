//! Processing strategy module
//!
//! This module defines the Strategy pattern for complete request processing
//! pipelines, covering CSV parsing, ledger application and report output. The
//! synchronous and asynchronous batch implementations are selected at runtime.

use crate::cli::StrategyType;
use crate::core::{FixedClock, TracingSink, TransferLedger, Unmetered, Wallets};
use crate::io::csv_format::{write_balances_csv, write_history_csv};
use crate::io::units::Denomination;
use crate::types::{AccountId, Amount, LedgerError, Timestamp, TransferRecord};
use clap::ValueEnum;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Which report is written once the input is exhausted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportKind {
    /// `account,balance` per custodial balance
    #[default]
    Balances,
    /// Every record in append order
    History,
}

/// Options shared by every strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunOptions {
    /// Unit of the amount columns and the report
    pub denomination: Denomination,
    /// Report to write
    pub report: ReportKind,
    /// Pin the ledger clock to this unix time
    pub epoch: Option<Timestamp>,
    /// Take attached values as given instead of tracking wallets
    pub unmetered: bool,
}

impl RunOptions {
    /// Build an empty ledger configured by these options
    ///
    /// Committed transfers are always logged through a [`TracingSink`].
    pub fn build_ledger(&self) -> TransferLedger {
        let ledger = TransferLedger::new().with_sink(TracingSink);

        let ledger = if self.unmetered {
            ledger.with_substrate(Unmetered)
        } else {
            ledger.with_substrate(Wallets::new())
        };

        match self.epoch {
            Some(epoch) => ledger.with_clock(FixedClock(epoch)),
            None => ledger,
        }
    }

    /// Write the configured report
    pub fn write_report(
        &self,
        records: &[TransferRecord],
        balances: &[(AccountId, Amount)],
        output: &mut dyn Write,
    ) -> Result<(), LedgerError> {
        match self.report {
            ReportKind::Balances => write_balances_csv(balances, self.denomination, output),
            ReportKind::History => write_history_csv(records, self.denomination, output),
        }
    }
}

/// Processing strategy trait for complete request pipelines
///
/// Each strategy reads requests from a CSV file, applies them to a ledger
/// built from its [`RunOptions`], and writes the selected report.
pub trait ProcessingStrategy: Send + Sync {
    /// Process requests from `input_path` and write the report to `output`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened
    /// - The header row cannot be read
    /// - The report cannot be written
    ///
    /// Rejected rows and requests are logged at `warn` and do not stop
    /// processing.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), LedgerError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// `config` is only used by the async strategy; `None` means defaults.
pub fn create_strategy(
    strategy_type: StrategyType,
    options: RunOptions,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(options)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config, options))
        }
    }
}
