use std::path::PathBuf;
use std::sync::Arc;

use libtreedrop_core::{
    config::{config_path, load_config},
    host::FsHost,
    Ingestion, Ingestor, TreedropConfig, TreedropError,
};
use libtreedrop_http::HttpBackend;
use tracing::debug;

use crate::cli::Cli;

/// Resolved configuration for one invocation
pub struct TreedropContext {
    pub config: TreedropConfig,
    pub config_path: PathBuf,
    /// Whether `config_path` exists
    pub from_file: bool,
    notify: bool,
}

impl TreedropContext {
    /// Load the config named by `--config`, or ./treedrop.toml if present
    pub fn resolve(cli: &Cli) -> Result<Self, TreedropError> {
        let cwd = std::env::current_dir()?;
        let path = config_path(&cwd, cli.config.as_deref());
        let loaded = load_config(&path)?;
        if loaded.is_none() && cli.config.is_some() {
            return Err(TreedropError::NotFound(format!(
                "Config file '{}' does not exist",
                path.display()
            )));
        }
        debug!(path = %path.display(), found = loaded.is_some(), "resolved config");

        let from_file = loaded.is_some();
        let config = loaded.unwrap_or_default();
        let notify = config.backend.notify_on_ingest && !cli.no_notify;
        Ok(Self {
            config,
            config_path: path,
            from_file,
            notify,
        })
    }

    pub fn backend(&self) -> Result<HttpBackend, TreedropError> {
        Ok(HttpBackend::new(&self.config.backend)?)
    }

    /// Ingest local paths and wait for the backend notice, if any
    pub async fn ingest(&self, paths: &[PathBuf]) -> Result<Ingestion, TreedropError> {
        let host = FsHost::new(&self.config.ingest)?;
        let mut ingestor = Ingestor::from_config(&self.config.ingest);
        if self.notify {
            ingestor = ingestor.with_notifier(Arc::new(self.backend()?));
        }
        let ingestion = ingestor.ingest_paths(&host, paths).await?;
        ingestor.flush_notices().await;
        Ok(ingestion)
    }
}
