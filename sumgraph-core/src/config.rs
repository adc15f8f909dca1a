use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default number of nodes returned by centrality rankings.
pub const DEFAULT_TOP_K: usize = 10;

/// Default location of the JSON graph export.
pub const DEFAULT_EXPORT_PATH: &str = "public/graph_data.json";

/// Top-level sumgraph configuration, matching `sumgraph.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SumgraphConfig {
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub analysis: AnalysisSection,
    #[serde(default)]
    pub export: ExportSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    /// Use WAL journaling for file-backed stores.
    pub wal: bool,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self { wal: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    pub top_k: usize,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    pub output: PathBuf,
    /// Spaces per indentation level; 0 writes compact JSON.
    pub indent: usize,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_EXPORT_PATH),
            indent: 4,
        }
    }
}

impl SumgraphConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.top_k == 0 {
            return Err(ConfigError::Invalid(
                "analysis.top_k must be at least 1".to_string(),
            ));
        }
        if self.export.indent > 16 {
            return Err(ConfigError::Invalid(format!(
                "export.indent must be at most 16, got {}",
                self.export.indent
            )));
        }
        if self.export.output.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "export.output must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
