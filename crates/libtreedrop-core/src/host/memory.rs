//! In-memory host.
//!
//! Holds a directory graph keyed by full path. Failures, batch sizes and
//! per-path latency can be scripted, which makes it the reference host for
//! exercising the tree builder's recovery and ordering rules.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::HostError;
use crate::host::{ChildEnumerator, LeafMaterializer};
use crate::resolver::DropEvent;
use crate::types::entry::{EntryHandle, EntryKind};
use crate::types::file::FileHandle;

#[derive(Debug, Clone)]
enum MemEntry {
    Dir { children: Vec<String> },
    File { bytes: Arc<[u8]>, mime_type: String },
}

/// Cursor over one in-memory directory
#[derive(Debug)]
pub struct MemoryReader {
    children: Vec<String>,
    pos: usize,
}

/// Scriptable in-memory host
#[derive(Debug)]
pub struct MemoryHost {
    entries: HashMap<String, MemEntry>,
    top_level: Vec<String>,
    batch_size: usize,
    failing_enumerations: HashSet<String>,
    failing_materializations: HashSet<String>,
    delays: HashMap<String, Duration>,
    batch_calls: AtomicUsize,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            top_level: Vec::new(),
            batch_size: usize::MAX,
            failing_enumerations: HashSet::new(),
            failing_materializations: HashSet::new(),
            delays: HashMap::new(),
            batch_calls: AtomicUsize::new(0),
        }
    }

    /// Limit how many children one `read_batch` call returns
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Add a directory (and any missing ancestors)
    pub fn dir(mut self, path: &str) -> Self {
        self.ensure_dir(path);
        self
    }

    /// Add a file (and any missing ancestor directories)
    pub fn file(mut self, path: &str, bytes: &[u8]) -> Self {
        self.insert_file(path, bytes, "");
        self
    }

    /// Add a file with a MIME type
    pub fn typed_file(mut self, path: &str, bytes: &[u8], mime_type: &str) -> Self {
        self.insert_file(path, bytes, mime_type);
        self
    }

    /// Make enumeration of the container at `path` fail
    pub fn fail_enumeration(mut self, path: &str) -> Self {
        self.failing_enumerations.insert(path.to_string());
        self
    }

    /// Make materialization of the leaf at `path` fail
    pub fn fail_materialization(mut self, path: &str) -> Self {
        self.failing_materializations.insert(path.to_string());
        self
    }

    /// Delay every host call touching `path`
    pub fn delay(mut self, path: &str, delay: Duration) -> Self {
        self.delays.insert(path.to_string(), delay);
        self
    }

    /// Number of `read_batch` calls served so far
    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    /// Structured drop of every top-level entry, in insertion order
    pub fn drop_event(&self) -> DropEvent<String> {
        let entries = self
            .top_level
            .iter()
            .filter_map(|path| self.entry_handle(path))
            .collect();
        DropEvent::structured(entries)
    }

    fn entry_handle(&self, path: &str) -> Option<EntryHandle<String>> {
        let name = basename(path).to_string();
        match self.entries.get(path)? {
            MemEntry::Dir { .. } => Some(EntryHandle::container(name, path, path.to_string())),
            MemEntry::File { .. } => Some(EntryHandle::leaf(name, path, path.to_string())),
        }
    }

    fn insert_file(&mut self, path: &str, bytes: &[u8], mime_type: &str) {
        self.link(path);
        self.entries.insert(
            path.to_string(),
            MemEntry::File {
                bytes: Arc::from(bytes),
                mime_type: mime_type.to_string(),
            },
        );
    }

    fn ensure_dir(&mut self, path: &str) {
        if self.entries.contains_key(path) {
            return;
        }
        self.link(path);
        self.entries
            .insert(path.to_string(), MemEntry::Dir { children: Vec::new() });
    }

    /// Register `path` under its parent, creating the parent if needed
    fn link(&mut self, path: &str) {
        if self.entries.contains_key(path) {
            return;
        }
        match parent(path) {
            None => self.top_level.push(path.to_string()),
            Some(parent_path) => {
                self.ensure_dir(parent_path);
                if let Some(MemEntry::Dir { children }) = self.entries.get_mut(parent_path) {
                    children.push(path.to_string());
                }
            }
        }
    }

    async fn pause(&self, path: &str) {
        if let Some(delay) = self.delays.get(path) {
            tokio::time::sleep(*delay).await;
        }
    }
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Parent path, or `None` for a top-level entry like `/docs`
fn parent(path: &str) -> Option<&str> {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) | None => None,
        Some(idx) => Some(&trimmed[..idx]),
    }
}

#[async_trait]
impl ChildEnumerator for MemoryHost {
    type Raw = String;
    type Reader = MemoryReader;

    async fn open(&self, container: &EntryHandle<String>) -> Result<MemoryReader, HostError> {
        let path = container.path();
        self.pause(&path).await;
        if self.failing_enumerations.contains(&path) {
            return Err(HostError::Unreadable(path));
        }
        match self.entries.get(&path) {
            Some(MemEntry::Dir { children }) => Ok(MemoryReader {
                children: children.clone(),
                pos: 0,
            }),
            Some(MemEntry::File { .. }) => Err(HostError::WrongKind {
                expected: "directory",
                path,
            }),
            None => Err(HostError::NotFound(path)),
        }
    }

    async fn read_batch(
        &self,
        reader: &mut MemoryReader,
    ) -> Result<Vec<EntryHandle<String>>, HostError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        let end = reader
            .children
            .len()
            .min(reader.pos.saturating_add(self.batch_size));
        let batch = reader.children[reader.pos..end]
            .iter()
            .filter_map(|path| self.entry_handle(path))
            .collect();
        reader.pos = end;
        Ok(batch)
    }
}

#[async_trait]
impl LeafMaterializer for MemoryHost {
    type Raw = String;

    async fn materialize(&self, leaf: &EntryHandle<String>) -> Result<FileHandle, HostError> {
        let path = leaf.path();
        self.pause(&path).await;
        if self.failing_materializations.contains(&path) {
            return Err(HostError::Unreadable(path));
        }
        match self.entries.get(&path) {
            Some(MemEntry::File { bytes, mime_type }) => Ok(FileHandle::from_bytes(
                leaf.name.clone(),
                mime_type.clone(),
                bytes,
            )),
            Some(MemEntry::Dir { .. }) => Err(HostError::WrongKind {
                expected: "file",
                path,
            }),
            None => Err(HostError::NotFound(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent() {
        assert_eq!(parent("/docs"), None);
        assert_eq!(parent("/docs/a.txt"), Some("/docs"));
        assert_eq!(parent("/docs/sub/a.txt"), Some("/docs/sub"));
    }

    #[test]
    fn test_drop_event_lists_top_level_in_order() {
        let host = MemoryHost::new()
            .file("/z.txt", b"z")
            .file("/docs/a.txt", b"a")
            .file("/b.txt", b"b");
        let entries = host.drop_event().entries.unwrap();
        let paths: Vec<String> = entries.iter().map(|e| e.path()).collect();
        assert_eq!(paths, vec!["/z.txt", "/docs", "/b.txt"]);
        assert_eq!(entries[1].kind, EntryKind::Container);
    }

    #[tokio::test]
    async fn test_read_batches() {
        let host = MemoryHost::new()
            .file("/d/1", b"1")
            .file("/d/2", b"2")
            .file("/d/3", b"3")
            .with_batch_size(2);
        let dir = EntryHandle::container("d", "/d", "/d".to_string());
        let mut reader = host.open(&dir).await.unwrap();
        assert_eq!(host.read_batch(&mut reader).await.unwrap().len(), 2);
        assert_eq!(host.read_batch(&mut reader).await.unwrap().len(), 1);
        assert!(host.read_batch(&mut reader).await.unwrap().is_empty());
        assert_eq!(host.batch_calls(), 3);
    }

    #[tokio::test]
    async fn test_scripted_failures() {
        let host = MemoryHost::new()
            .file("/d/a.txt", b"a")
            .fail_enumeration("/d")
            .fail_materialization("/d/a.txt");
        let dir = EntryHandle::container("d", "/d", "/d".to_string());
        assert!(host.open(&dir).await.is_err());
        let leaf = EntryHandle::leaf("a.txt", "/d/a.txt", "/d/a.txt".to_string());
        assert!(matches!(
            host.materialize(&leaf).await,
            Err(HostError::Unreadable(_))
        ));
    }
}
