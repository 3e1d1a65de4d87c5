//! SetKV Batch Runner
//!
//! Reads a count-prefixed command batch from stdin and answers `find`
//! queries on stdout. Logs go to stderr.

use std::io::{self, BufWriter};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use setkv::command::run_batch;
use setkv::{Config, SavePolicy, Store, WriteMode};
use tracing_subscriber::{fmt, EnvFilter};

/// SetKV
#[derive(Parser, Debug)]
#[command(name = "setkv")]
#[command(about = "Persistent multi-valued key index")]
#[command(version)]
struct Args {
    /// Backing data file
    #[arg(short, long, default_value = setkv::config::DEFAULT_DATA_FILE)]
    data_file: String,

    /// When to write the data file
    #[arg(short, long, value_enum, default_value_t = PolicyArg::OnClose)]
    save_policy: PolicyArg,

    /// Write through a staging file and rename it into place
    #[arg(long)]
    staged: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    OnClose,
    EveryMutation,
}

impl From<PolicyArg> for SavePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::OnClose => SavePolicy::OnClose,
            PolicyArg::EveryMutation => SavePolicy::EveryMutation,
        }
    }
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,setkv=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("SetKV v{}", setkv::VERSION);

    let write_mode = if args.staged {
        WriteMode::Staged
    } else {
        WriteMode::InPlace
    };

    let config = Config::builder()
        .data_file(&args.data_file)
        .save_policy(args.save_policy.into())
        .write_mode(write_mode)
        .build();

    let mut store = match Store::open(config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin().lock();
    let mut stdout = BufWriter::new(io::stdout().lock());

    // The store's final save runs on every path, including the error one.
    let result = run_batch(&mut store, stdin, &mut stdout);
    let outcome = store.close();

    match result {
        Ok(stats) => {
            tracing::debug!(?stats, ?outcome, "done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Batch failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
