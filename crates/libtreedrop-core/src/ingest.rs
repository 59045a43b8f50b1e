//! Ingestion: one drop or pick turned into a tree and a flat file list.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use crate::backend::IngestNotifier;
use crate::builder::{normalize_roots, TreeBuilder};
use crate::config::IngestConfig;
use crate::error::TreedropError;
use crate::flatten::flatten;
use crate::host::{ChildEnumerator, FsHost, LeafMaterializer};
use crate::identity::IdentityIndex;
use crate::resolver::{resolve_entries, DropEvent};
use crate::types::file::FileHandle;
use crate::types::node::DirectoryNode;

/// Result of one ingestion. Read-only for every consumer.
#[derive(Debug, Clone)]
pub struct Ingestion {
    pub id: Uuid,
    pub tree: Arc<DirectoryNode>,
    /// Flattened files in tree pre-order
    pub files: Arc<[FileHandle]>,
    pub completed_at: DateTime<Utc>,
}

/// One file of a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub path: String,
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// Description of an uploaded set, sent to the indexing backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestManifest {
    pub ingestion_id: Uuid,
    pub root: String,
    pub file_count: usize,
    pub total_bytes: u64,
    pub files: Vec<ManifestEntry>,
}

impl Ingestion {
    fn new(tree: DirectoryNode) -> Self {
        let files: Arc<[FileHandle]> = flatten(&tree).into();
        Self {
            id: Uuid::new_v4(),
            tree: Arc::new(tree),
            files,
            completed_at: Utc::now(),
        }
    }

    /// Identity lookup over the flat file list
    pub fn index(&self) -> IdentityIndex {
        IdentityIndex::new(&self.files)
    }

    /// File node handle at a tree path
    pub fn file_at(&self, path: &str) -> Option<&FileHandle> {
        self.tree.find(path).and_then(|node| node.file_ref())
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size()).sum()
    }

    pub fn manifest(&self) -> IngestManifest {
        let mut files = Vec::with_capacity(self.files.len());
        self.tree.walk(|node| {
            if let Some(file) = node.file_ref() {
                files.push(ManifestEntry {
                    path: node.path.clone(),
                    name: file.name().to_string(),
                    size: file.size(),
                    mime_type: file.mime_type().to_string(),
                });
            }
        });
        IngestManifest {
            ingestion_id: self.id,
            root: self.tree.path.clone(),
            file_count: files.len(),
            total_bytes: self.total_bytes(),
            files,
        }
    }
}

/// Owns ingestions end to end: resolve, build, normalize, flatten, notify.
#[derive(Default)]
pub struct Ingestor {
    parallel_siblings: bool,
    notifier: Option<Arc<dyn IngestNotifier>>,
    notices: Mutex<Vec<JoinHandle<()>>>,
}

impl Ingestor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &IngestConfig) -> Self {
        Self::new().parallel_siblings(config.parallel_siblings)
    }

    pub fn parallel_siblings(mut self, enabled: bool) -> Self {
        self.parallel_siblings = enabled;
        self
    }

    /// Notify `notifier` after every completed ingestion
    pub fn with_notifier(mut self, notifier: Arc<dyn IngestNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Ingest one event. Per-entry failures are absorbed by the builder,
    /// so once an event exists the ingestion always completes.
    pub async fn ingest<H>(&self, host: &H, event: DropEvent<<H as ChildEnumerator>::Raw>) -> Ingestion
    where
        H: ChildEnumerator + LeafMaterializer<Raw = <H as ChildEnumerator>::Raw>,
        <H as ChildEnumerator>::Raw: 'static,
    {
        let entries = resolve_entries(event);
        let nodes = TreeBuilder::new(host, host)
            .parallel_siblings(self.parallel_siblings)
            .build(entries)
            .await;
        let ingestion = Ingestion::new(normalize_roots(nodes));

        info!(
            ingestion = %ingestion.id,
            root = %ingestion.tree.path,
            files = ingestion.files.len(),
            bytes = ingestion.total_bytes(),
            "ingestion complete"
        );

        self.spawn_notice(&ingestion);
        ingestion
    }

    /// Ingest local paths. A missing path fails the whole ingestion.
    pub async fn ingest_paths(&self, host: &FsHost, paths: &[PathBuf]) -> Result<Ingestion, TreedropError> {
        let event = host.drop_event(paths).await?;
        Ok(self.ingest(host, event).await)
    }

    /// Wait for outstanding notifications, e.g. before a process exits.
    /// Their outcome is only logged.
    pub async fn flush_notices(&self) {
        let pending: Vec<JoinHandle<()>> = std::mem::take(&mut *self.notices.lock());
        for handle in pending {
            if let Err(e) = handle.await {
                warn!(error = %e, "ingestion notice task failed");
            }
        }
    }

    fn spawn_notice(&self, ingestion: &Ingestion) {
        let notifier = match &self.notifier {
            Some(notifier) => Arc::clone(notifier),
            None => return,
        };
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                warn!(ingestion = %ingestion.id, "no tokio runtime, skipping backend notice");
                return;
            }
        };
        let manifest = ingestion.manifest();
        let handle = runtime.spawn(async move {
            if let Err(e) = notifier.notify(&manifest).await {
                warn!(ingestion = %manifest.ingestion_id, error = %e, "backend notice failed");
            }
        });
        let mut notices = self.notices.lock();
        notices.retain(|pending| !pending.is_finished());
        notices.push(handle);
    }

    /// Notice tasks spawned and not yet reaped
    pub fn pending_notices(&self) -> usize {
        self.notices.lock().len()
    }
}
