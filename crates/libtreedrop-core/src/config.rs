use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TreedropError;

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "treedrop.toml";

/// Top-level configuration stored in treedrop.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreedropConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Where the chat/indexing backend lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// Send the ingestion manifest to the backend after each ingestion
    pub notify_on_ingest: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_ms: 30_000,
            notify_on_ingest: true,
        }
    }
}

/// Tree walking options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Max children returned by one filesystem enumeration call
    pub read_batch_size: usize,
    /// Resolve siblings concurrently; emitted order is unchanged
    pub parallel_siblings: bool,
    /// Glob patterns matched against basenames found while enumerating
    pub ignore: Vec<String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            read_batch_size: 100,
            parallel_siblings: false,
            ignore: Vec::new(),
        }
    }
}

impl IngestConfig {
    /// Batch size clamped to at least one entry
    pub fn batch_size(&self) -> usize {
        self.read_batch_size.max(1)
    }

    /// Compile the ignore patterns
    pub fn ignore_patterns(&self) -> Result<Vec<glob::Pattern>, TreedropError> {
        self.ignore
            .iter()
            .map(|p| glob::Pattern::new(p).map_err(TreedropError::from))
            .collect()
    }
}

/// Chat submission options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Feedback flag forwarded with every query
    pub feedback: u8,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { feedback: 1 }
    }
}

/// Resolve the config path: explicit override or treedrop.toml in `dir`
pub fn config_path(dir: &Path, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => dir.join(CONFIG_FILE_NAME),
    }
}

/// Load config from a TOML file. Returns `None` when the file does not exist.
pub fn load_config(path: &Path) -> Result<Option<TreedropConfig>, TreedropError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    let config: TreedropConfig = toml::from_str(&content)?;
    config.ingest.ignore_patterns()?;
    Ok(Some(config))
}

/// Save config as pretty TOML, creating parent directories
pub fn save_config(path: &Path, config: &TreedropConfig) -> Result<(), TreedropError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
