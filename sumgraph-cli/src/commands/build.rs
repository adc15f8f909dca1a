use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::info;

use sumgraph_core::build::GraphBuilder;
use sumgraph_core::config::SumgraphConfig;
use sumgraph_core::store::GraphStore;

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the graph database
    pub db: PathBuf,

    /// Summary file; repeat for several (one summary per file, `-` for stdin)
    #[arg(short, long = "summary", value_name = "FILE", required = true)]
    pub summaries: Vec<PathBuf>,

    /// Keep the existing graph instead of clearing it first
    #[arg(long)]
    pub append: bool,
}

pub fn run(args: &BuildArgs, config: &SumgraphConfig) -> anyhow::Result<()> {
    let summaries = args
        .summaries
        .iter()
        .map(|p| read_summary(p))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let store = super::open_store(&args.db, config)?;
    if args.append {
        info!("Append mode: keeping existing graph");
    } else {
        store.clear().context("Failed to reset graph database")?;
    }

    let stats = GraphBuilder::new(&store)
        .build(&summaries)
        .context("Graph build failed")?;
    let totals = store.stats().context("Failed to read database stats")?;

    println!(
        "Built graph from {} summaries: {} new nodes, {} edges written, {} relationships skipped",
        stats.summaries, stats.nodes_created, stats.edges_written, stats.edges_dropped
    );
    println!(
        "Graph now has {} nodes and {} edges ({:.1?})",
        totals.total_nodes, totals.total_edges, stats.duration
    );
    Ok(())
}

fn read_summary(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Cannot read summary from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read summary: {}", path.display()))
}
