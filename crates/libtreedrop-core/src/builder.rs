//! Recursive, asynchronous tree construction over host capabilities.

use std::future::Future;
use std::pin::Pin;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::error::HostError;
use crate::host::{ChildEnumerator, LeafMaterializer};
use crate::types::entry::{EntryHandle, EntryKind, EntrySource};
use crate::types::node::DirectoryNode;
use crate::{SYNTHETIC_ROOT_NAME, SYNTHETIC_ROOT_PATH};

type BoxFut<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Builds `DirectoryNode` trees from entry handles.
///
/// Recovery is per entry: a container whose children cannot be listed
/// becomes an empty directory, a leaf that cannot be materialized is left
/// out. Nothing is retried. There is no depth limit; the host is trusted
/// not to report cycles.
pub struct TreeBuilder<'h, E, M> {
    enumerator: &'h E,
    materializer: &'h M,
    parallel_siblings: bool,
}

impl<'h, E, M> TreeBuilder<'h, E, M>
where
    E: ChildEnumerator,
    M: LeafMaterializer<Raw = E::Raw>,
    E::Raw: 'static,
{
    pub fn new(enumerator: &'h E, materializer: &'h M) -> Self {
        Self {
            enumerator,
            materializer,
            parallel_siblings: false,
        }
    }

    /// Resolve siblings concurrently. Emitted order still follows the host.
    pub fn parallel_siblings(mut self, enabled: bool) -> Self {
        self.parallel_siblings = enabled;
        self
    }

    /// Build one node per entry, in entry order. Entries that cannot be
    /// materialized are omitted.
    ///
    /// Does not wrap several top-level nodes in a synthetic root; the owner
    /// of the ingestion does that once with [`normalize_roots`].
    pub async fn build(&self, entries: Vec<EntryHandle<E::Raw>>) -> Vec<DirectoryNode> {
        self.build_all(entries).await
    }

    fn build_all<'s>(&'s self, entries: Vec<EntryHandle<E::Raw>>) -> BoxFut<'s, Vec<DirectoryNode>> {
        Box::pin(async move {
            if self.parallel_siblings {
                // join_all yields results in input order
                join_all(entries.into_iter().map(|entry| self.build_entry(entry)))
                    .await
                    .into_iter()
                    .flatten()
                    .collect()
            } else {
                let mut nodes = Vec::with_capacity(entries.len());
                for entry in entries {
                    if let Some(node) = self.build_entry(entry).await {
                        nodes.push(node);
                    }
                }
                nodes
            }
        })
    }

    fn build_entry<'s>(&'s self, entry: EntryHandle<E::Raw>) -> BoxFut<'s, Option<DirectoryNode>> {
        Box::pin(async move {
            let path = entry.path();

            if let EntrySource::Picked(file) = &entry.source {
                debug!(path = %path, "picked file");
                return Some(DirectoryNode::file(entry.name.clone(), path, file.clone()));
            }

            match entry.kind {
                EntryKind::Leaf => match self.materializer.materialize(&entry).await {
                    Ok(file) => {
                        debug!(path = %path, size = file.size(), "materialized file");
                        Some(DirectoryNode::file(entry.name, path, file))
                    }
                    Err(e) => {
                        warn!(path = %path, error = %e, "dropping unreadable file");
                        None
                    }
                },
                EntryKind::Container => {
                    let child_entries = match self.enumerate(&entry).await {
                        Ok(children) => children,
                        Err(e) => {
                            warn!(path = %path, error = %e, "cannot list directory, keeping it empty");
                            Vec::new()
                        }
                    };
                    debug!(path = %path, children = child_entries.len(), "enumerated directory");
                    let children = self.build_all(child_entries).await;
                    Some(DirectoryNode::directory(entry.name, path, children))
                }
            }
        })
    }

    /// Read every child of a container, looping over partial batches
    async fn enumerate(
        &self,
        container: &EntryHandle<E::Raw>,
    ) -> Result<Vec<EntryHandle<E::Raw>>, HostError> {
        let mut reader = self.enumerator.open(container).await?;
        let mut children = Vec::new();
        loop {
            let batch = self.enumerator.read_batch(&mut reader).await?;
            if batch.is_empty() {
                break;
            }
            children.extend(batch);
        }
        Ok(children)
    }
}

/// Single-entry normalization.
///
/// Exactly one top-level node is the tree itself; otherwise the nodes are
/// wrapped in a synthetic `root` directory at `/`.
pub fn normalize_roots(mut nodes: Vec<DirectoryNode>) -> DirectoryNode {
    if nodes.len() == 1 {
        if let Some(node) = nodes.pop() {
            return node;
        }
    }
    DirectoryNode::directory(SYNTHETIC_ROOT_NAME, SYNTHETIC_ROOT_PATH, nodes)
}
