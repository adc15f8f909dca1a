use std::path::PathBuf;

use clap::Parser;
use sumgraph_core::error::{ConfigError, StoreError, SumgraphError};

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "sumgraph",
    version,
    about = "Build an entity-relationship graph from LLM summaries"
)]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,

    /// Config file (default: ./sumgraph.toml when present)
    #[arg(long, global = true, env = "SUMGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Classify an error into a process exit code.
///
/// Exit codes:
///   0  — success
///   1  — general/unknown error
///   2  — configuration error (clap usage errors also exit 2)
///   4  — database error
fn classify_exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<SumgraphError>() {
            return match e {
                SumgraphError::Config(_) => 2,
                SumgraphError::Store(_) => 4,
                SumgraphError::Export(_) => 1,
            };
        }
        if cause.is::<ConfigError>() {
            return 2;
        }
        if cause.is::<StoreError>() {
            return 4;
        }
    }

    // Errors raised by the CLI itself carry a fixed context prefix; user
    // paths follow it and must not affect the outcome.
    let lower = err.to_string().to_lowercase();
    if lower.starts_with("cannot load config") {
        2
    } else if lower.starts_with("cannot open database") {
        4
    } else {
        1
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let filter = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (_, 0) => "warn",
        (_, 1) => "info",
        (_, 2) => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    match commands::run(cli.command, cli.config.as_deref()) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(classify_exit_code(&e));
        }
    }
}
