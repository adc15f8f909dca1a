/// Full SQL schema for the sumgraph `SQLite` database.
pub const SCHEMA_SQL: &str = r"
-- Entities, keyed by normalized name
CREATE TABLE IF NOT EXISTS nodes (
    id TEXT PRIMARY KEY,
    properties TEXT DEFAULT '{}'
);

-- Directed labeled relations, one weight per (source, target, relationship)
CREATE TABLE IF NOT EXISTS edges (
    source TEXT,
    target TEXT,
    relationship TEXT,
    weight REAL,
    PRIMARY KEY (source, target, relationship),
    FOREIGN KEY (source) REFERENCES nodes(id),
    FOREIGN KEY (target) REFERENCES nodes(id)
);
CREATE INDEX IF NOT EXISTS source_idx ON edges(source);
CREATE INDEX IF NOT EXISTS target_idx ON edges(target);
";

/// `SQLite` PRAGMAs applied to every connection.
pub const PRAGMAS_SQL: &str = r"
PRAGMA synchronous = NORMAL;
PRAGMA foreign_keys = ON;
";

/// Degree of every node: outgoing plus incoming edge count.
///
/// Ties fall back to whatever order `SQLite` produces.
pub const DEGREE_CENTRALITY_SQL: &str = r"
SELECT id,
       (SELECT COUNT(*) FROM edges WHERE source = nodes.id) +
       (SELECT COUNT(*) FROM edges WHERE target = nodes.id) AS degree
FROM nodes
ORDER BY degree DESC
LIMIT ?1
";
