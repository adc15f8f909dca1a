// Integration test utilities and summary fixtures for sumgraph.

use sumgraph_core::build::GraphBuilder;
use sumgraph_core::store::sqlite::SqliteStore;
use sumgraph_core::types::BuildStats;

/// A file-backed store in a temporary directory.
#[derive(Debug)]
pub struct TestGraph {
    pub dir: tempfile::TempDir,
    pub store: SqliteStore,
}

impl TestGraph {
    /// Open an empty WAL-mode store under a fresh temp dir.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create tempdir");
        let store = SqliteStore::open(&dir.path().join("data/graph_database.sqlite"))
            .expect("open store");
        Self { dir, store }
    }

    /// Build `summaries` into the store, panicking on error.
    pub fn build(&self, summaries: &[&str]) -> BuildStats {
        GraphBuilder::new(&self.store)
            .build(summaries)
            .expect("build graph")
    }
}

impl Default for TestGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// A summary in the shape LLMs typically produce: markdown headings,
/// enumerated bold entities, and a mix of weighted and plain relationships.
pub const TEAM_SUMMARY: &str = "\
Here is the extracted structure of the document.

### Entities:
1. **Alice**
2. **Bob**
3. **Acme Corp**
4. **Project Falcon**

### Relationships:
Alice -> mentors [strength: 0.8] -> Bob
Alice -> works for -> Acme Corp
Bob -> works for [strength: 0.9] -> Acme Corp
Acme Corp -> funds [strength: 0.6] -> Project Falcon
Bob -> leads -> Project Falcon
Alice -> advises -> Eve
";

/// A second summary that only references entities from [`TEAM_SUMMARY`]
/// plus one new one, using the bold-label header style.
pub const FOLLOW_UP_SUMMARY: &str = "\
**Entities:**
Carol

**Relationships:**
Carol -> reviews -> Project Falcon
Alice -> mentors [strength: 0.5] -> Bob
";

/// Plain-label headers, unnumbered entities, and noise lines.
pub const PLAIN_SUMMARY: &str = "\
Entities:
 Foo
**foo**
1. FOO

Relationships:
Foo -> is a friend of! -> Foo
this line has no arrow
";
