use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use sumgraph_core::config::SumgraphConfig;
use sumgraph_core::export::{export_graph, write_json};

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Path to the graph database
    pub db: PathBuf,

    /// Output file (default: export.output from config)
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &ExportArgs, config: &SumgraphConfig) -> anyhow::Result<()> {
    let store = super::open_existing_store(&args.db, config)?;
    let out = args.out.as_ref().unwrap_or(&config.export.output);

    let export = export_graph(&store).context("Failed to read graph")?;
    write_json(&export, out, config.export.indent)
        .with_context(|| format!("Cannot write export: {}", out.display()))?;

    println!("Graph data exported to '{}'.", out.display());
    Ok(())
}
