use std::time::Duration;

use serde::{Deserialize, Serialize};

// ── Graph records ──────────────────────────────────────────────────

/// Weight assigned to an edge when the summary carries no strength annotation.
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

/// A node keyed by its normalized entity name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    /// Opaque property bag, stored as a JSON object. Not interpreted by the core.
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            properties: serde_json::Map::new(),
        }
    }
}

/// Primary key of an edge: `(source, target, relationship)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    pub source: String,
    pub target: String,
    pub relationship: String,
}

/// A directed, labeled, weighted edge.
///
/// `weight` is optional only because rows written outside the builder may
/// carry `NULL`; the builder always fills it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub relationship: String,
    pub weight: Option<f64>,
}

impl Edge {
    pub fn new(
        source: impl Into<String>,
        relationship: impl Into<String>,
        target: impl Into<String>,
        weight: f64,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relationship: relationship.into(),
            weight: Some(weight),
        }
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey {
            source: self.source.clone(),
            target: self.target.clone(),
            relationship: self.relationship.clone(),
        }
    }
}

// ── Analytics results ──────────────────────────────────────────────

/// A node and its degree (outgoing + incoming edge count).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DegreeScore {
    pub entity_name: String,
    pub score: u64,
}

/// Centrality rankings. Betweenness and closeness are never computed and
/// stay empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CentralityData {
    pub degree: Vec<DegreeScore>,
    pub betweenness: Vec<DegreeScore>,
    pub closeness: Vec<DegreeScore>,
}

/// Summary statistics about the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub total_nodes: u64,
    pub total_edges: u64,
    pub total_relationship_types: u64,
    pub db_size_bytes: u64,
}

/// Counters from a single build pass.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    pub summaries: u64,
    pub lines: u64,
    pub nodes_created: u64,
    /// Entity mentions whose node already existed.
    pub nodes_existing: u64,
    pub edges_written: u64,
    /// Relationships skipped because an endpoint was not declared yet.
    pub edges_dropped: u64,
    pub duration: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_score_uses_entity_name_field() {
        let json = serde_json::to_value(DegreeScore {
            entity_name: "alice".into(),
            score: 3,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"entityName": "alice", "score": 3}));
    }

    #[test]
    fn new_edge_fills_weight() {
        let edge = Edge::new("a", "knows", "b", 0.5);
        assert_eq!(edge.weight, Some(0.5));
        assert_eq!(
            edge.key(),
            EdgeKey {
                source: "a".into(),
                target: "b".into(),
                relationship: "knows".into(),
            }
        );
    }

    #[test]
    fn node_properties_default_to_empty_object() {
        let node: Node = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert!(node.properties.is_empty());
    }
}
