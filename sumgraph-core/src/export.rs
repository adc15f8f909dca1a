//! One-shot graph export for force-directed visualizations.
//!
//! The document shape is `{"nodes": [{"id"}], "links": [{"source", "target",
//! "relationship", "weight"}]}`, the layout D3-style tooling expects.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ExportError;
use crate::store::GraphStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportNode {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportLink {
    pub source: String,
    pub target: String,
    pub relationship: String,
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<ExportNode>,
    pub links: Vec<ExportLink>,
}

/// Read the whole graph out of the store.
pub fn export_graph<S: GraphStore + ?Sized>(store: &S) -> crate::error::Result<GraphExport> {
    let nodes = store
        .all_nodes()?
        .into_iter()
        .map(|n| ExportNode { id: n.id })
        .collect();
    let links = store
        .all_edges()?
        .into_iter()
        .map(|e| ExportLink {
            source: e.source,
            target: e.target,
            relationship: e.relationship,
            weight: e.weight,
        })
        .collect();
    Ok(GraphExport { nodes, links })
}

/// Serialize `export` to `writer`. `indent` is spaces per level; 0 is compact.
pub fn write_json_to<W: Write>(
    export: &GraphExport,
    writer: W,
    indent: usize,
) -> Result<(), ExportError> {
    if indent == 0 {
        serde_json::to_writer(writer, export)?;
    } else {
        let pad = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(pad.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
        export.serialize(&mut ser)?;
    }
    Ok(())
}

/// Write `export` to `path`, creating parent directories.
pub fn write_json(export: &GraphExport, path: &Path, indent: usize) -> crate::error::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(ExportError::Io)?;
    }
    let file = std::fs::File::create(path).map_err(ExportError::Io)?;
    let mut writer = std::io::BufWriter::new(file);
    write_json_to(export, &mut writer, indent)?;
    writer.flush().map_err(ExportError::Io)?;
    info!(
        path = %path.display(),
        nodes = export.nodes.len(),
        links = export.links.len(),
        "Graph data exported"
    );
    Ok(())
}
