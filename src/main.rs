//! Transfer Ledger CLI
//!
//! Applies fund and transfer requests from a CSV file to a transfer ledger and
//! prints a report to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- requests.csv > balances.csv
//! cargo run -- --report history --epoch 1700000000 requests.csv
//! cargo run -- --denomination wei --unmetered requests.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 requests.csv
//! ```
//!
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG` (for example
//! `RUST_LOG=transfer_ledger=debug`) to change the level. The default is
//! `info`, which includes one line per committed transfer.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, file not readable, report not writable)

use std::process;
use tracing::error;
use tracing_subscriber::EnvFilter;
use transfer_ledger::cli;
use transfer_ledger::strategy;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    let strategy = {
        let config = if args.strategy == cli::StrategyType::Async {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, args.to_run_options(), config)
    };

    // the report goes to stdout
    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        error!(error = %e, input = %args.input_file.display(), "processing failed");
        process::exit(1);
    }
}
