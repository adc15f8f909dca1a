use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use sumgraph_core::analyze::{GraphAnalytics, summarize};
use sumgraph_core::config::SumgraphConfig;

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Path to the graph database
    pub db: PathBuf,

    /// Show top N nodes (default: analysis.top_k from config)
    #[arg(long)]
    pub top: Option<usize>,

    /// Output format: text, json
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,
}

pub fn run(args: &ReportArgs, config: &SumgraphConfig) -> anyhow::Result<()> {
    let store = super::open_existing_store(&args.db, config)?;
    let analytics = GraphAnalytics::new(&store);
    let top = args.top.unwrap_or(config.analysis.top_k);

    let centrality = analytics
        .centrality_measures(top)
        .context("Degree centrality query failed")?;
    let types = analytics
        .relationship_types()
        .context("Relationship type query failed")?;
    let missing_weights = analytics
        .verify_weights()
        .context("Weight verification failed")?;

    if args.format == "json" {
        let out = serde_json::json!({
            "centrality": centrality,
            "relationship_types": types,
            "missing_weights": missing_weights,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print!("{}", summarize(&centrality));
    println!("\n#### Relationship Types:");
    if types.is_empty() {
        println!("(none)");
    }
    for t in &types {
        println!(" - {t}");
    }
    if missing_weights {
        println!("\nWarning: some relationships have no weight assigned.");
    }
    Ok(())
}
