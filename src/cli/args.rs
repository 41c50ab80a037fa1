use crate::io::units::Denomination;
use crate::strategy::{BatchConfig, ReportKind, RunOptions};
use crate::types::Timestamp;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Record value transfers from a CSV file and print balances or history
#[derive(Parser, Debug)]
#[command(name = "transfer-ledger")]
#[command(about = "Record value transfers and report custodial balances", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing fund and transfer requests
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Processing strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Processing strategy: 'sync' applies rows in file order, 'async' in concurrent batches"
    )]
    pub strategy: StrategyType,

    /// Number of requests per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of requests per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of worker threads (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Unit of the amount and value columns and of the report
    #[arg(long = "denomination", value_name = "UNIT", default_value = "ether")]
    pub denomination: Denomination,

    /// Report printed to stdout
    #[arg(long = "report", value_name = "REPORT", default_value = "balances")]
    pub report: ReportKind,

    /// Pin every record timestamp to this unix time
    #[arg(long = "epoch", value_name = "SECS")]
    pub epoch: Option<Timestamp>,

    /// Take attached values as paid without tracking wallets
    #[arg(long = "unmetered")]
    pub unmetered: bool,
}

/// Available processing strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values fall back to the defaults; zero values are replaced
    /// with a warning by [`BatchConfig::new`].
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    /// Collect the options shared by both strategies
    pub fn to_run_options(&self) -> RunOptions {
        RunOptions {
            denomination: self.denomination,
            report: self.report,
            epoch: self.epoch,
            unmetered: self.unmetered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default_strategy(&["program", "input.csv"], StrategyType::Sync)]
    #[case::explicit_sync(&["program", "--strategy", "sync", "input.csv"], StrategyType::Sync)]
    #[case::explicit_async(&["program", "--strategy", "async", "input.csv"], StrategyType::Async)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.strategy, expected);
    }

    #[rstest]
    #[case::batch_size(&["program", "--batch-size", "2000", "input.csv"], Some(2000), None)]
    #[case::max_concurrent(&["program", "--max-concurrent", "8", "input.csv"], None, Some(8))]
    #[case::no_options(&["program", "input.csv"], None, None)]
    #[case::all_options(
        &["program", "--strategy", "async", "--batch-size", "2000", "--max-concurrent", "8", "input.csv"],
        Some(2000),
        Some(8)
    )]
    fn test_config_options(
        #[case] args: &[&str],
        #[case] batch_size: Option<usize>,
        #[case] max_concurrent: Option<usize>,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.batch_size, batch_size);
        assert_eq!(parsed.max_concurrent_batches, max_concurrent);
    }

    #[rstest]
    #[case::all_defaults(&["program", "input.csv"], 1000, num_cpus::get())]
    #[case::custom_batch_size(&["program", "--batch-size", "2000", "input.csv"], 2000, num_cpus::get())]
    #[case::custom_max_concurrent(&["program", "--max-concurrent", "8", "input.csv"], 1000, 8)]
    #[case::zero_batch_size(&["program", "--batch-size", "0", "input.csv"], 1000, num_cpus::get())]
    #[case::zero_max_concurrent(&["program", "--max-concurrent", "0", "input.csv"], 1000, num_cpus::get())]
    fn test_batch_config_conversion(
        #[case] args: &[&str],
        #[case] expected_batch_size: usize,
        #[case] expected_max_concurrent: usize,
    ) {
        let config = CliArgs::try_parse_from(args).unwrap().to_batch_config();

        assert_eq!(config.batch_size, expected_batch_size);
        assert_eq!(config.max_concurrent_batches, expected_max_concurrent);
    }

    #[test]
    fn test_run_options_defaults() {
        let options = CliArgs::try_parse_from(["program", "input.csv"])
            .unwrap()
            .to_run_options();

        assert_eq!(options, RunOptions::default());
        assert_eq!(options.denomination, Denomination::Ether);
        assert_eq!(options.report, ReportKind::Balances);
    }

    #[test]
    fn test_run_options_custom() {
        let options = CliArgs::try_parse_from([
            "program",
            "--denomination",
            "gwei",
            "--report",
            "history",
            "--epoch",
            "1700000000",
            "--unmetered",
            "input.csv",
        ])
        .unwrap()
        .to_run_options();

        assert_eq!(
            options,
            RunOptions {
                denomination: Denomination::Gwei,
                report: ReportKind::History,
                epoch: Some(1_700_000_000),
                unmetered: true,
            }
        );
    }

    #[rstest]
    #[case::missing_input(&["program"])]
    #[case::invalid_strategy(&["program", "--strategy", "invalid", "input.csv"])]
    #[case::invalid_denomination(&["program", "--denomination", "finney", "input.csv"])]
    #[case::invalid_report(&["program", "--report", "accounts", "input.csv"])]
    #[case::negative_epoch(&["program", "--epoch", "-5", "input.csv"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
