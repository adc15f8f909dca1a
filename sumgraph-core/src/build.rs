use std::collections::HashSet;
use std::time::Instant;

use tracing::{Span, debug, error, info, info_span};

use crate::parse::{ParsedLine, RelationshipDecl, SummaryParser};
use crate::store::GraphStore;
use crate::types::{BuildStats, Edge, Node};

/// Writes parsed summaries into a [`GraphStore`].
///
/// The builder never clears the store; callers that want a fresh graph call
/// [`GraphStore::clear`] first.
#[derive(Debug)]
pub struct GraphBuilder<'a, S: GraphStore + ?Sized> {
    store: &'a S,
    span: Span,
}

/// State threaded through one build pass.
#[derive(Debug, Default)]
struct BuildPass {
    parser: SummaryParser,
    /// Entities declared so far in this pass; edge endpoints must be in here.
    known: HashSet<String>,
}

impl<'a, S: GraphStore + ?Sized> GraphBuilder<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self::with_span(store, info_span!("graph_builder"))
    }

    /// Use `span` as the logging context for every build.
    pub fn with_span(store: &'a S, span: Span) -> Self {
        Self { store, span }
    }

    /// Parse `summaries` in order and persist their nodes and edges.
    ///
    /// Parser section and known entities carry over from one summary to the
    /// next. The whole pass runs in one transaction.
    pub fn build<T: AsRef<str>>(&self, summaries: &[T]) -> crate::error::Result<BuildStats> {
        let _entered = self.span.enter();
        let start = Instant::now();
        let mut stats = BuildStats::default();

        if summaries.is_empty() {
            debug!("No summaries supplied, nothing to build");
            return Ok(stats);
        }

        if let Err(e) = self.store.check_connection() {
            error!(error = %e, "Graph database connection is not available");
            return Err(e);
        }

        self.store.begin_transaction()?;
        let mut pass = BuildPass::default();
        let outcome = summaries
            .iter()
            .try_for_each(|summary| self.apply_summary(summary.as_ref(), &mut pass, &mut stats));

        if let Err(e) = outcome {
            error!(error = %e, "Graph build failed, rolling back");
            if let Err(rollback) = self.store.rollback_transaction() {
                error!(error = %rollback, "Rollback failed");
            }
            return Err(e);
        }
        self.store.commit_transaction()?;

        stats.duration = start.elapsed();
        info!(
            summaries = stats.summaries,
            nodes_created = stats.nodes_created,
            edges_written = stats.edges_written,
            edges_dropped = stats.edges_dropped,
            duration = ?stats.duration,
            "Graph build complete"
        );
        Ok(stats)
    }

    fn apply_summary(
        &self,
        summary: &str,
        pass: &mut BuildPass,
        stats: &mut BuildStats,
    ) -> crate::error::Result<()> {
        stats.summaries += 1;
        for line in summary.lines() {
            stats.lines += 1;
            match pass.parser.feed_line(line) {
                Some(ParsedLine::Entity(name)) => self.apply_entity(name, pass, stats)?,
                Some(ParsedLine::Relationship(rel)) => self.apply_relationship(&rel, pass, stats)?,
                None => {}
            }
        }
        Ok(())
    }

    fn apply_entity(
        &self,
        name: String,
        pass: &mut BuildPass,
        stats: &mut BuildStats,
    ) -> crate::error::Result<()> {
        if self.store.insert_node_if_absent(&Node::new(name.clone()))? {
            debug!(node = %name, "Creating node");
            stats.nodes_created += 1;
        } else {
            debug!(node = %name, "Node already exists");
            stats.nodes_existing += 1;
        }
        pass.known.insert(name);
        Ok(())
    }

    fn apply_relationship(
        &self,
        rel: &RelationshipDecl,
        pass: &BuildPass,
        stats: &mut BuildStats,
    ) -> crate::error::Result<()> {
        debug!(
            source = %rel.source,
            relationship = %rel.relationship,
            target = %rel.target,
            weight = rel.weight,
            "Parsed relationship"
        );
        if !(pass.known.contains(&rel.source) && pass.known.contains(&rel.target)) {
            debug!(
                source = %rel.source,
                relationship = %rel.relationship,
                target = %rel.target,
                "Skipping relationship: one or both entities not found"
            );
            stats.edges_dropped += 1;
            return Ok(());
        }

        self.store.upsert_edge(&Edge::new(
            rel.source.clone(),
            rel.relationship.clone(),
            rel.target.clone(),
            rel.weight,
        ))?;
        stats.edges_written += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StoreError, SumgraphError};
    use crate::store::sqlite::SqliteStore;
    use crate::types::{DegreeScore, EdgeKey, StoreStats};

    fn key(source: &str, relationship: &str, target: &str) -> EdgeKey {
        EdgeKey {
            source: source.into(),
            target: target.into(),
            relationship: relationship.into(),
        }
    }

    fn weight_of(store: &SqliteStore, k: &EdgeKey) -> Option<f64> {
        store.get_edge(k).unwrap().and_then(|e| e.weight)
    }

    #[test]
    fn duplicate_entity_yields_one_node() {
        let store = SqliteStore::in_memory().unwrap();
        let stats = GraphBuilder::new(&store)
            .build(&["Entities:\n1. **Foo**\n foo \nFOO\n"])
            .unwrap();

        assert_eq!(stats.nodes_created, 1);
        assert_eq!(stats.nodes_existing, 2);
        let nodes = store.all_nodes().unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].id, "foo");
    }

    #[test]
    fn rebuild_overwrites_edge_weight() {
        let store = SqliteStore::in_memory().unwrap();
        let builder = GraphBuilder::new(&store);
        builder
            .build(&["Entities:\nA\nB\nRelationships:\nA -> likes [strength: 0.2] -> B\n"])
            .unwrap();
        builder
            .build(&["Entities:\nA\nB\nRelationships:\nA -> likes [strength: 0.7] -> B\n"])
            .unwrap();

        assert_eq!(store.all_edges().unwrap().len(), 1);
        assert_eq!(weight_of(&store, &key("a", "likes", "b")), Some(0.7));
    }

    #[test]
    fn later_line_in_same_pass_wins() {
        let store = SqliteStore::in_memory().unwrap();
        GraphBuilder::new(&store)
            .build(&[
                "Entities:\nA\nB\nRelationships:\nA -> likes [strength: 0.4] -> B\n",
                "Relationships:\nA -> likes -> B\n",
            ])
            .unwrap();
        assert_eq!(weight_of(&store, &key("a", "likes", "b")), Some(1.0));
    }

    #[test]
    fn unknown_endpoint_is_dropped() {
        let store = SqliteStore::in_memory().unwrap();
        let stats = GraphBuilder::new(&store)
            .build(&["Entities:\nAlice\nRelationships:\nAlice -> knows -> Mallory\n"])
            .unwrap();

        assert_eq!(stats.edges_dropped, 1);
        assert_eq!(stats.edges_written, 0);
        assert!(store.all_edges().unwrap().is_empty());
        assert!(store.get_node("mallory").unwrap().is_none());
    }

    #[test]
    fn entity_declared_after_relationship_is_too_late() {
        let store = SqliteStore::in_memory().unwrap();
        let stats = GraphBuilder::new(&store)
            .build(&["Entities:\nA\nRelationships:\nA -> r -> B\nEntities:\nB\n"])
            .unwrap();
        assert_eq!(stats.edges_dropped, 1);
        assert_eq!(store.all_nodes().unwrap().len(), 2);
        assert!(store.all_edges().unwrap().is_empty());
    }

    #[test]
    fn entities_from_earlier_summary_are_visible() {
        let store = SqliteStore::in_memory().unwrap();
        let stats = GraphBuilder::new(&store)
            .build(&[
                "### Entities:\n1. Alice\n",
                "### Entities:\n1. Bob\n### Relationships:\nAlice -> mentors -> Bob\n",
            ])
            .unwrap();
        assert_eq!(stats.summaries, 2);
        assert_eq!(stats.edges_written, 1);
        assert!(store.get_edge(&key("alice", "mentors", "bob")).unwrap().is_some());
    }

    #[test]
    fn section_carries_into_next_summary() {
        let store = SqliteStore::in_memory().unwrap();
        GraphBuilder::new(&store)
            .build(&["Entities:\nAlice\n", "Bob\n"])
            .unwrap();
        assert!(store.get_node("bob").unwrap().is_some());
    }

    #[test]
    fn nodes_from_previous_pass_are_not_known() {
        let store = SqliteStore::in_memory().unwrap();
        let builder = GraphBuilder::new(&store);
        builder.build(&["Entities:\nA\nB\n"]).unwrap();

        let stats = builder
            .build(&["Relationships:\nA -> r -> B\n"])
            .unwrap();
        assert_eq!(stats.edges_dropped, 1);
        assert!(store.all_edges().unwrap().is_empty());
    }

    #[test]
    fn empty_input_writes_nothing() {
        let store = SqliteStore::in_memory().unwrap();
        let empty: [&str; 0] = [];
        let stats = GraphBuilder::new(&store).build(&empty).unwrap();
        assert_eq!(stats.summaries, 0);
        assert_eq!(store.stats().unwrap(), StoreStats::default());
    }

    #[test]
    fn empty_input_succeeds_even_when_store_is_closed() {
        let store = SqliteStore::in_memory().unwrap();
        store.close().unwrap();
        let empty: Vec<String> = Vec::new();
        assert!(GraphBuilder::new(&store).build(&empty).is_ok());
    }

    #[test]
    fn closed_store_aborts_build() {
        let store = SqliteStore::in_memory().unwrap();
        store.close().unwrap();
        let err = GraphBuilder::new(&store)
            .build(&["Entities:\nA\n"])
            .unwrap_err();
        assert!(matches!(err, SumgraphError::Store(StoreError::Unavailable(_))));
    }

    #[test]
    fn builder_accepts_custom_span() {
        let store = SqliteStore::in_memory().unwrap();
        let builder = GraphBuilder::with_span(&store, tracing::debug_span!("test_pass", run = 1));
        let stats = builder.build(&[String::from("Entities:\nA\n")]).unwrap();
        assert_eq!(stats.nodes_created, 1);
    }

    /// Delegates to `SqliteStore` but refuses every edge write.
    struct EdgeRejectingStore(SqliteStore);

    impl GraphStore for EdgeRejectingStore {
        fn check_connection(&self) -> crate::error::Result<()> {
            self.0.check_connection()
        }
        fn insert_node_if_absent(&self, node: &Node) -> crate::error::Result<bool> {
            self.0.insert_node_if_absent(node)
        }
        fn get_node(&self, id: &str) -> crate::error::Result<Option<Node>> {
            self.0.get_node(id)
        }
        fn all_nodes(&self) -> crate::error::Result<Vec<Node>> {
            self.0.all_nodes()
        }
        fn upsert_edge(&self, _edge: &Edge) -> crate::error::Result<()> {
            Err(StoreError::Unavailable("disk full".into()).into())
        }
        fn get_edge(&self, key: &EdgeKey) -> crate::error::Result<Option<Edge>> {
            self.0.get_edge(key)
        }
        fn all_edges(&self) -> crate::error::Result<Vec<Edge>> {
            self.0.all_edges()
        }
        fn degree_ranking(&self, limit: usize) -> crate::error::Result<Vec<DegreeScore>> {
            self.0.degree_ranking(limit)
        }
        fn relationship_types(&self) -> crate::error::Result<Vec<String>> {
            self.0.relationship_types()
        }
        fn edges_missing_weight(&self, limit: usize) -> crate::error::Result<Vec<EdgeKey>> {
            self.0.edges_missing_weight(limit)
        }
        fn clear(&self) -> crate::error::Result<()> {
            self.0.clear()
        }
        fn begin_transaction(&self) -> crate::error::Result<()> {
            self.0.begin_transaction()
        }
        fn commit_transaction(&self) -> crate::error::Result<()> {
            self.0.commit_transaction()
        }
        fn rollback_transaction(&self) -> crate::error::Result<()> {
            self.0.rollback_transaction()
        }
        fn stats(&self) -> crate::error::Result<StoreStats> {
            self.0.stats()
        }
    }

    #[test]
    fn store_failure_rolls_back_whole_pass() {
        let store = EdgeRejectingStore(SqliteStore::in_memory().unwrap());
        let err = GraphBuilder::new(&store)
            .build(&["Entities:\nA\nB\nRelationships:\nA -> r -> B\n"])
            .unwrap_err();
        assert!(matches!(err, SumgraphError::Store(_)));
        assert!(store.all_nodes().unwrap().is_empty());
    }

    #[test]
    fn builder_works_through_trait_object() {
        let store = SqliteStore::in_memory().unwrap();
        let dyn_store: &dyn GraphStore = &store;
        let stats = GraphBuilder::new(dyn_store)
            .build(&["Entities:\nA\n"])
            .unwrap();
        assert_eq!(stats.nodes_created, 1);
    }
}
