use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use sumgraph_core::config::SumgraphConfig;
use sumgraph_core::store::GraphStore;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Path to the graph database
    pub db: PathBuf,
}

pub fn run(args: &StatusArgs, config: &SumgraphConfig) -> anyhow::Result<()> {
    let store = super::open_existing_store(&args.db, config)?;
    let stats = store.stats().context("Failed to read database stats")?;

    println!("Database: {}", args.db.display());
    println!("  Nodes:              {}", stats.total_nodes);
    println!("  Edges:              {}", stats.total_edges);
    println!("  Relationship types: {}", stats.total_relationship_types);
    #[allow(clippy::cast_precision_loss)]
    let size_kib = stats.db_size_bytes as f64 / 1024.0;
    println!("  Size:               {size_kib:.1} KiB");
    Ok(())
}
