//! Read-only graph analytics: degree centrality, relationship types, weight checks.
//!
//! Betweenness and closeness need a traversal the relational store does not
//! offer; they are reported as not calculated.

use std::collections::BTreeSet;
use std::time::Instant;

use tracing::{Span, debug, info_span, warn};

use crate::config::DEFAULT_TOP_K;
use crate::store::GraphStore;
use crate::types::{CentralityData, DegreeScore};

/// Maximum offending rows reported by [`GraphAnalytics::verify_weights`].
const MISSING_WEIGHT_SAMPLE: usize = 5;

#[derive(Debug)]
pub struct GraphAnalytics<'a, S: GraphStore + ?Sized> {
    store: &'a S,
    span: Span,
}

impl<'a, S: GraphStore + ?Sized> GraphAnalytics<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self::with_span(store, info_span!("graph_analytics"))
    }

    pub fn with_span(store: &'a S, span: Span) -> Self {
        Self { store, span }
    }

    /// Top `k` nodes by degree, descending. Order among equal degrees is
    /// whatever the store returns.
    pub fn degree_centrality(&self, k: usize) -> crate::error::Result<Vec<DegreeScore>> {
        let _entered = self.span.enter();
        debug!(k, "Starting degree centrality query");
        let start = Instant::now();
        let ranking = self.store.degree_ranking(k)?;
        debug!(
            rows = ranking.len(),
            elapsed = ?start.elapsed(),
            "Degree centrality query completed"
        );
        Ok(ranking)
    }

    /// Degree ranking with the default `k`.
    pub fn top_degree(&self) -> crate::error::Result<Vec<DegreeScore>> {
        self.degree_centrality(DEFAULT_TOP_K)
    }

    /// All centrality measures. Only degree is computed.
    pub fn centrality_measures(&self, k: usize) -> crate::error::Result<CentralityData> {
        Ok(CentralityData {
            degree: self.degree_centrality(k)?,
            betweenness: Vec::new(),
            closeness: Vec::new(),
        })
    }

    /// Distinct relationship labels in the graph.
    pub fn relationship_types(&self) -> crate::error::Result<BTreeSet<String>> {
        let _entered = self.span.enter();
        debug!("Starting get relationship types query");
        let start = Instant::now();
        let types: BTreeSet<String> = self.store.relationship_types()?.into_iter().collect();
        debug!(
            count = types.len(),
            elapsed = ?start.elapsed(),
            "Get relationship types query completed"
        );
        Ok(types)
    }

    /// Returns `true` if any edge is missing its weight. A handful of the
    /// offending edges are logged as a warning.
    pub fn verify_weights(&self) -> crate::error::Result<bool> {
        let _entered = self.span.enter();
        debug!("Starting verify relationship weights query");
        let start = Instant::now();
        let missing = self.store.edges_missing_weight(MISSING_WEIGHT_SAMPLE)?;
        debug!(
            elapsed = ?start.elapsed(),
            "Verify relationship weights query completed"
        );

        if missing.is_empty() {
            return Ok(false);
        }
        let sample: Vec<String> = missing
            .iter()
            .map(|k| format!("{} -> {} -> {}", k.source, k.relationship, k.target))
            .collect();
        warn!(
            edges = ?sample,
            "Some relationships do not have weights assigned"
        );
        Ok(true)
    }
}
