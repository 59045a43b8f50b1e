//! Materialized file handles.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Serialize, Serializer};

/// Where a file's bytes live. Never read by this crate.
#[derive(Debug, Clone)]
pub enum ContentRef {
    /// File on the local filesystem
    Path(PathBuf),
    /// Bytes already held in memory
    Memory(Arc<[u8]>),
}

#[derive(Debug)]
struct FileInner {
    name: String,
    size: u64,
    mime_type: String,
    content: ContentRef,
}

/// Handle to one materialized file.
///
/// Cloning is cheap and yields the *same* handle. Two handles created
/// independently for the same logical file are different handles; compare
/// them with [`crate::identity_of`], never by pointer. `FileHandle`
/// intentionally has no `PartialEq`.
#[derive(Debug, Clone)]
pub struct FileHandle {
    inner: Arc<FileInner>,
}

impl FileHandle {
    pub fn new(
        name: impl Into<String>,
        size: u64,
        mime_type: impl Into<String>,
        content: ContentRef,
    ) -> Self {
        Self {
            inner: Arc::new(FileInner {
                name: name.into(),
                size,
                mime_type: mime_type.into(),
                content,
            }),
        }
    }

    /// Create an in-memory file; size is the byte length
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(
            name,
            bytes.len() as u64,
            mime_type,
            ContentRef::Memory(Arc::from(bytes)),
        )
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn size(&self) -> u64 {
        self.inner.size
    }

    /// MIME type reported by the host, empty when unknown
    pub fn mime_type(&self) -> &str {
        &self.inner.mime_type
    }

    pub fn content(&self) -> &ContentRef {
        &self.inner.content
    }

    /// Host-level identity: true only for clones of one handle.
    pub fn same_handle(a: &FileHandle, b: &FileHandle) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

#[derive(Serialize)]
struct FileMeta<'a> {
    name: &'a str,
    size: u64,
    #[serde(rename = "type")]
    mime_type: &'a str,
}

impl Serialize for FileHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FileMeta {
            name: self.name(),
            size: self.size(),
            mime_type: self.mime_type(),
        }
        .serialize(serializer)
    }
}
