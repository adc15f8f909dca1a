/// Top-level sumgraph error type.
///
/// All fallible operations in `sumgraph-core` return [`Result<T, SumgraphError>`](Result).
/// Each variant wraps a domain-specific error enum, allowing callers to
/// match on the error source without losing type information.
#[derive(thiserror::Error, Debug)]
pub enum SumgraphError {
    /// Error from the graph store layer (`SQLite` operations, connection state).
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Error in configuration parsing or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error writing the graph export document.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Errors from the SQLite-backed graph store.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// Underlying `SQLite` operation failed.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The database connection is closed or otherwise unusable.
    #[error("Graph database connection is not available: {0}")]
    Unavailable(String),

    /// JSON serialization/deserialization of node properties failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors in sumgraph configuration parsing and validation.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The configuration file does not exist at the expected path.
    #[error("Config file not found: {0}")]
    NotFound(String),

    /// Configuration values are present but semantically invalid.
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// Configuration file syntax could not be parsed (TOML error).
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Errors while exporting the graph document.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    /// Filesystem I/O error writing the export.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The export document could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias for `Result<T, SumgraphError>`.
pub type Result<T> = std::result::Result<T, SumgraphError>;
