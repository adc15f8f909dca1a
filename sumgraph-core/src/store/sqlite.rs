use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info};

use crate::error::{ConfigError, StoreError};
use crate::types::{DegreeScore, Edge, EdgeKey, Node, StoreStats};

use super::GraphStore;
use super::schema;

/// SQLite-backed implementation of `GraphStore`.
///
/// The connection lives until [`SqliteStore::close`]; afterwards every
/// operation fails with [`StoreError::Unavailable`].
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Option<Connection>>,
    db_path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open (or create) a store at the given path with WAL journaling.
    pub fn open(path: &Path) -> crate::error::Result<Self> {
        Self::open_with(path, true)
    }

    /// Open (or create) a store, choosing the journal mode.
    pub fn open_with(path: &Path, wal: bool) -> crate::error::Result<Self> {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "Database path must be provided to initialize the graph store".to_string(),
            )
            .into());
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Unavailable(format!("cannot create {}: {e}", parent.display()))
            })?;
        }

        let conn = Connection::open(path).map_err(StoreError::Sqlite)?;
        let store = Self {
            conn: Mutex::new(Some(conn)),
            db_path: Some(path.to_path_buf()),
        };
        store.initialize(wal)?;
        info!(path = %path.display(), wal, "Opened graph store");
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    pub fn in_memory() -> crate::error::Result<Self> {
        let conn = Connection::open_in_memory().map_err(StoreError::Sqlite)?;
        let store = Self {
            conn: Mutex::new(Some(conn)),
            db_path: None,
        };
        store.initialize(false)?;
        Ok(store)
    }

    /// Path of the backing file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Release the connection. Later operations report the store as unavailable.
    pub fn close(&self) -> crate::error::Result<()> {
        let mut guard = self.lock()?;
        if let Some(conn) = guard.take() {
            conn.close().map_err(|(_, e)| StoreError::Sqlite(e))?;
            debug!("Graph store connection closed");
        }
        Ok(())
    }

    fn initialize(&self, wal: bool) -> crate::error::Result<()> {
        self.with_conn(|conn| {
            conn.execute_batch(schema::PRAGMAS_SQL)?;
            if wal {
                // In-memory databases answer "memory" and stay that way
                let mode: String =
                    conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
                debug!(journal_mode = %mode, "Journal mode set");
            }
            conn.execute_batch(schema::SCHEMA_SQL)
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<Connection>>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))
    }

    /// Run `f` against the open connection.
    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> crate::error::Result<T> {
        let guard = self.lock()?;
        let conn = guard
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("connection is closed".to_string()))?;
        Ok(f(conn).map_err(StoreError::Sqlite)?)
    }

    /// Helper: parse a properties JSON object, tolerating `NULL` and garbage.
    fn parse_properties(json_str: Option<&str>) -> serde_json::Map<String, serde_json::Value> {
        json_str
            .and_then(|s| serde_json::from_str(s).ok())
            .unwrap_or_default()
    }

    fn row_to_node(row: &rusqlite::Row<'_>) -> rusqlite::Result<Node> {
        let properties: Option<String> = row.get("properties")?;
        Ok(Node {
            id: row.get("id")?,
            properties: Self::parse_properties(properties.as_deref()),
        })
    }

    fn row_to_edge(row: &rusqlite::Row<'_>) -> rusqlite::Result<Edge> {
        Ok(Edge {
            source: row.get("source")?,
            target: row.get("target")?,
            relationship: row.get("relationship")?,
            weight: row.get("weight")?,
        })
    }

    #[cfg(test)]
    pub(crate) fn execute_raw(&self, sql: &str) -> crate::error::Result<()> {
        self.with_conn(|conn| conn.execute_batch(sql))
    }
}

/// Clamp a row limit into `SQLite`'s signed integer range.
fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

impl GraphStore for SqliteStore {
    // ── Connection ─────────────────────────────────────────────────

    fn check_connection(&self) -> crate::error::Result<()> {
        self.with_conn(|conn| conn.query_row("SELECT 1", [], |_| Ok(())))
    }

    // ── Node operations ────────────────────────────────────────────

    fn insert_node_if_absent(&self, node: &Node) -> crate::error::Result<bool> {
        let properties =
            serde_json::to_string(&node.properties).map_err(StoreError::Serialization)?;
        let changed = self.with_conn(|conn| {
            conn.prepare_cached("INSERT OR IGNORE INTO nodes (id, properties) VALUES (?1, ?2)")?
                .execute(params![node.id, properties])
        })?;
        Ok(changed > 0)
    }

    fn get_node(&self, id: &str) -> crate::error::Result<Option<Node>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, properties FROM nodes WHERE id = ?1",
                params![id],
                Self::row_to_node,
            )
            .optional()
        })
    }

    fn all_nodes(&self) -> crate::error::Result<Vec<Node>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, properties FROM nodes")?;
            stmt.query_map([], Self::row_to_node)?
                .collect::<rusqlite::Result<Vec<_>>>()
        })
    }

    // ── Edge operations ────────────────────────────────────────────

    fn upsert_edge(&self, edge: &Edge) -> crate::error::Result<()> {
        self.with_conn(|conn| {
            conn.prepare_cached(
                "INSERT INTO edges (source, target, relationship, weight)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(source, target, relationship) DO UPDATE SET
                    weight = excluded.weight",
            )?
            .execute(params![
                edge.source,
                edge.target,
                edge.relationship,
                edge.weight
            ])
        })?;
        Ok(())
    }

    fn get_edge(&self, key: &EdgeKey) -> crate::error::Result<Option<Edge>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT source, target, relationship, weight FROM edges
                 WHERE source = ?1 AND target = ?2 AND relationship = ?3",
                params![key.source, key.target, key.relationship],
                Self::row_to_edge,
            )
            .optional()
        })
    }

    fn all_edges(&self) -> crate::error::Result<Vec<Edge>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT source, target, relationship, weight FROM edges")?;
            stmt.query_map([], Self::row_to_edge)?
                .collect::<rusqlite::Result<Vec<_>>>()
        })
    }

    // ── Queries ────────────────────────────────────────────────────

    fn degree_ranking(&self, limit: usize) -> crate::error::Result<Vec<DegreeScore>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(schema::DEGREE_CENTRALITY_SQL)?;
            stmt.query_map(params![sql_limit(limit)], |row| {
                Ok(DegreeScore {
                    entity_name: row.get(0)?,
                    score: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
        })
    }

    fn relationship_types(&self) -> crate::error::Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT DISTINCT relationship FROM edges")?;
            stmt.query_map([], |row| row.get(0))?
                .collect::<rusqlite::Result<Vec<_>>>()
        })
    }

    fn edges_missing_weight(&self, limit: usize) -> crate::error::Result<Vec<EdgeKey>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT source, target, relationship FROM edges WHERE weight IS NULL LIMIT ?1",
            )?;
            stmt.query_map(params![sql_limit(limit)], |row| {
                Ok(EdgeKey {
                    source: row.get(0)?,
                    target: row.get(1)?,
                    relationship: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
        })
    }

    // ── Maintenance ────────────────────────────────────────────────

    fn clear(&self) -> crate::error::Result<()> {
        self.with_conn(|conn| {
            let tx = conn.unchecked_transaction()?;
            // Edges first: they reference nodes.
            tx.execute("DELETE FROM edges", [])?;
            tx.execute("DELETE FROM nodes", [])?;
            tx.commit()
        })?;
        info!("Cleared graph store");
        Ok(())
    }

    // ── Transactions ──────────────────────────────────────────────

    fn begin_transaction(&self) -> crate::error::Result<()> {
        self.with_conn(|conn| conn.execute_batch("BEGIN IMMEDIATE"))
    }

    fn commit_transaction(&self) -> crate::error::Result<()> {
        self.with_conn(|conn| conn.execute_batch("COMMIT"))
    }

    fn rollback_transaction(&self) -> crate::error::Result<()> {
        self.with_conn(|conn| conn.execute_batch("ROLLBACK"))
    }

    // ── Metrics ────────────────────────────────────────────────────

    fn stats(&self) -> crate::error::Result<StoreStats> {
        let (total_nodes, total_edges, total_relationship_types) = self.with_conn(|conn| {
            let nodes: u64 = conn.query_row("SELECT COUNT(*) FROM nodes", [], |row| row.get(0))?;
            let edges: u64 = conn.query_row("SELECT COUNT(*) FROM edges", [], |row| row.get(0))?;
            let kinds: u64 = conn.query_row(
                "SELECT COUNT(DISTINCT relationship) FROM edges",
                [],
                |row| row.get(0),
            )?;
            Ok((nodes, edges, kinds))
        })?;

        let db_size_bytes = self
            .db_path
            .as_ref()
            .and_then(|p| std::fs::metadata(p).ok())
            .map_or(0, |m| m.len());

        Ok(StoreStats {
            total_nodes,
            total_edges,
            total_relationship_types,
            db_size_bytes,
        })
    }
}
