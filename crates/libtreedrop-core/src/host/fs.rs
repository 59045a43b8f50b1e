//! Local filesystem host.
//!
//! Dropped paths become top-level entries named `/<basename>`; children get
//! `/<basename>/<...>` paths, mirroring what a browser reports for a
//! directory drop. Ignore patterns apply only to entries discovered while
//! enumerating, never to the paths the user dropped.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::config::IngestConfig;
use crate::error::{HostError, TreedropError};
use crate::host::{ChildEnumerator, LeafMaterializer};
use crate::resolver::DropEvent;
use crate::types::entry::{EntryHandle, EntrySource};
use crate::types::file::{ContentRef, FileHandle};
use crate::SYNTHETIC_ROOT_NAME;

/// Extension to MIME type table for common document types
const MIME_TYPES: &[(&str, &str)] = &[
    ("txt", "text/plain"),
    ("md", "text/markdown"),
    ("csv", "text/csv"),
    ("html", "text/html"),
    ("json", "application/json"),
    ("pdf", "application/pdf"),
    ("zip", "application/zip"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("mp4", "video/mp4"),
];

/// Guess a MIME type from the file extension; empty when unknown
pub fn guess_mime_type(path: &Path) -> &'static str {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.to_ascii_lowercase(),
        None => return "",
    };
    MIME_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or("")
}

/// Cursor over one directory on disk
#[derive(Debug)]
pub struct FsReader {
    dir: tokio::fs::ReadDir,
    base: String,
    done: bool,
}

/// Filesystem-backed host
#[derive(Debug, Clone)]
pub struct FsHost {
    batch_size: usize,
    ignore: Vec<glob::Pattern>,
}

impl FsHost {
    pub fn new(config: &IngestConfig) -> Result<Self, TreedropError> {
        Ok(Self {
            batch_size: config.batch_size(),
            ignore: config.ignore_patterns()?,
        })
    }

    fn is_ignored(&self, name: &str) -> bool {
        self.ignore.iter().any(|p| p.matches(name))
    }

    /// Turn user-supplied paths into a structured drop.
    ///
    /// A path that does not exist fails the whole ingestion. Top-level names
    /// come from the canonical path, so `.` is named after the directory it
    /// points to. Clashing names get a ` (2)`, ` (3)` ... suffix so every
    /// node path stays unique.
    pub async fn drop_event(&self, paths: &[PathBuf]) -> Result<DropEvent<PathBuf>, TreedropError> {
        let mut entries = Vec::with_capacity(paths.len());
        let mut taken = HashSet::with_capacity(paths.len());
        for path in paths {
            let not_found = |e: std::io::Error| {
                TreedropError::IngestionFailed(format!(
                    "Path does not exist: {} ({})",
                    path.display(),
                    e
                ))
            };
            let metadata = tokio::fs::metadata(path).await.map_err(not_found)?;
            let canonical = tokio::fs::canonicalize(path).await.map_err(not_found)?;
            let name = unique_name(display_name(&canonical), &mut taken);
            let full_path = format!("/{}", name);
            let entry = if metadata.is_dir() {
                EntryHandle::container(name, full_path, canonical)
            } else {
                EntryHandle::leaf(name, full_path, canonical)
            };
            entries.push(entry);
        }
        Ok(DropEvent::structured(entries))
    }
}

/// Basename of a path; the filesystem root has none and is named `root`
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| SYNTHETIC_ROOT_NAME.to_string())
}

/// First of `name`, `name (2)`, `name (3)` ... not yet in `taken`
fn unique_name(name: String, taken: &mut HashSet<String>) -> String {
    let mut candidate = name.clone();
    let mut n = 2;
    while taken.contains(&candidate) {
        candidate = format!("{} ({})", name, n);
        n += 1;
    }
    taken.insert(candidate.clone());
    candidate
}

fn raw_path(entry: &EntryHandle<PathBuf>) -> Result<&PathBuf, HostError> {
    match &entry.source {
        EntrySource::Host(path) => Ok(path),
        EntrySource::Picked(_) => Err(HostError::WrongKind {
            expected: "host entry",
            path: entry.path(),
        }),
    }
}

#[async_trait]
impl ChildEnumerator for FsHost {
    type Raw = PathBuf;
    type Reader = FsReader;

    async fn open(&self, container: &EntryHandle<PathBuf>) -> Result<FsReader, HostError> {
        let path = raw_path(container)?;
        let dir = tokio::fs::read_dir(path).await?;
        Ok(FsReader {
            dir,
            base: container.path(),
            done: false,
        })
    }

    async fn read_batch(
        &self,
        reader: &mut FsReader,
    ) -> Result<Vec<EntryHandle<PathBuf>>, HostError> {
        let mut batch = Vec::new();
        // Ignored entries must not end the batch early, or an all-ignored
        // batch would look like the end of the directory.
        while !reader.done && batch.len() < self.batch_size {
            let entry = match reader.dir.next_entry().await? {
                Some(entry) => entry,
                None => {
                    reader.done = true;
                    break;
                }
            };
            let name = entry.file_name().to_string_lossy().to_string();
            if self.is_ignored(&name) {
                debug!(name = %name, "ignored entry");
                continue;
            }
            let full_path = format!("{}/{}", reader.base.trim_end_matches('/'), name);
            let file_type = entry.file_type().await?;
            let child_path = entry.path();
            if file_type.is_dir() {
                batch.push(EntryHandle::container(name, full_path, child_path));
            } else if file_type.is_file() {
                batch.push(EntryHandle::leaf(name, full_path, child_path));
            } else if file_type.is_symlink() {
                // Symlinked directories are not followed so a walk always ends
                match tokio::fs::metadata(&child_path).await {
                    Ok(meta) if meta.is_file() => {
                        batch.push(EntryHandle::leaf(name, full_path, child_path));
                    }
                    _ => debug!(path = %full_path, "skipping symlink"),
                }
            }
        }
        Ok(batch)
    }
}

#[async_trait]
impl LeafMaterializer for FsHost {
    type Raw = PathBuf;

    async fn materialize(&self, leaf: &EntryHandle<PathBuf>) -> Result<FileHandle, HostError> {
        let path = raw_path(leaf)?;
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(HostError::WrongKind {
                expected: "file",
                path: leaf.path(),
            });
        }
        Ok(FileHandle::new(
            leaf.name.clone(),
            metadata.len(),
            guess_mime_type(path),
            ContentRef::Path(path.clone()),
        ))
    }
}
