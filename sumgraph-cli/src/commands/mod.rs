pub mod build;
pub mod export;
pub mod report;
pub mod status;

use std::path::Path;

use anyhow::Context;
use clap::Subcommand;
use tracing::debug;

use sumgraph_core::config::SumgraphConfig;
use sumgraph_core::store::sqlite::SqliteStore;

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILE: &str = "sumgraph.toml";

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Reset the database and build the graph from summary files
    Build(build::BuildArgs),
    /// Print centrality rankings and relationship types
    Report(report::ReportArgs),
    /// Export the graph as JSON for force-directed visualization
    Export(export::ExportArgs),
    /// Show node and edge counts
    Status(status::StatusArgs),
}

pub fn run(cmd: Command, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    match cmd {
        Command::Build(args) => build::run(&args, &config),
        Command::Report(args) => report::run(&args, &config),
        Command::Export(args) => export::run(&args, &config),
        Command::Status(args) => status::run(&args, &config),
    }
}

/// Load the explicit config file, else `sumgraph.toml` if present, else defaults.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<SumgraphConfig> {
    let path = match explicit {
        Some(p) => p,
        None => {
            let fallback = Path::new(DEFAULT_CONFIG_FILE);
            if !fallback.exists() {
                debug!("No config file, using defaults");
                return Ok(SumgraphConfig::default());
            }
            fallback
        }
    };
    SumgraphConfig::load(path).with_context(|| format!("Cannot load config: {}", path.display()))
}

/// Open the store at `db_path` honoring the configured journal mode.
pub fn open_store(db_path: &Path, config: &SumgraphConfig) -> anyhow::Result<SqliteStore> {
    SqliteStore::open_with(db_path, config.store.wal)
        .with_context(|| format!("Cannot open database: {}", db_path.display()))
}

/// Open an existing store; read-only commands refuse to create one.
pub fn open_existing_store(
    db_path: &Path,
    config: &SumgraphConfig,
) -> anyhow::Result<SqliteStore> {
    if !db_path.exists() {
        anyhow::bail!(
            "Cannot open database: {} does not exist. Run `sumgraph build` first.",
            db_path.display()
        );
    }
    open_store(db_path, config)
}
