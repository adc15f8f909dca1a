use crate::types::{DegreeScore, Edge, EdgeKey, Node, StoreStats};

/// The relational store abstraction. The builder writes through it; analytics
/// and export only read.
pub trait GraphStore {
    // ── Connection ─────────────────────────────────────────────────

    /// Fail with `StoreError::Unavailable` if the connection cannot be used.
    fn check_connection(&self) -> crate::error::Result<()>;

    // ── Node operations ────────────────────────────────────────────

    /// Insert a node unless one with the same id exists. Returns `true` if a
    /// row was created; an existing node and its properties are left as is.
    fn insert_node_if_absent(&self, node: &Node) -> crate::error::Result<bool>;

    /// Get a node by its normalized id.
    fn get_node(&self, id: &str) -> crate::error::Result<Option<Node>>;

    /// All nodes, in store order.
    fn all_nodes(&self) -> crate::error::Result<Vec<Node>>;

    // ── Edge operations ────────────────────────────────────────────

    /// Insert an edge, replacing the weight of any edge with the same key.
    fn upsert_edge(&self, edge: &Edge) -> crate::error::Result<()>;

    /// Get an edge by its `(source, target, relationship)` key.
    fn get_edge(&self, key: &EdgeKey) -> crate::error::Result<Option<Edge>>;

    /// All edges, in store order.
    fn all_edges(&self) -> crate::error::Result<Vec<Edge>>;

    // ── Queries ────────────────────────────────────────────────────

    /// Top `limit` nodes by outgoing + incoming edge count, descending.
    fn degree_ranking(&self, limit: usize) -> crate::error::Result<Vec<DegreeScore>>;

    /// Distinct relationship labels, in store order.
    fn relationship_types(&self) -> crate::error::Result<Vec<String>>;

    /// Up to `limit` edges whose weight is `NULL`.
    fn edges_missing_weight(&self, limit: usize) -> crate::error::Result<Vec<EdgeKey>>;

    // ── Maintenance ────────────────────────────────────────────────

    /// Delete every edge, then every node.
    fn clear(&self) -> crate::error::Result<()>;

    // ── Transactions ──────────────────────────────────────────────

    /// Begin an explicit transaction. Default: no-op (each operation auto-commits).
    fn begin_transaction(&self) -> crate::error::Result<()> {
        Ok(())
    }

    /// Commit the current transaction started by `begin_transaction`.
    fn commit_transaction(&self) -> crate::error::Result<()> {
        Ok(())
    }

    /// Roll back the current transaction started by `begin_transaction`.
    fn rollback_transaction(&self) -> crate::error::Result<()> {
        Ok(())
    }

    // ── Metrics ────────────────────────────────────────────────────

    /// Get summary statistics about the store.
    fn stats(&self) -> crate::error::Result<StoreStats>;
}
