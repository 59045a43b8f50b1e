//! Host capability interfaces
//!
//! The tree builder only talks to a host through these two traits:
//! - `ChildEnumerator` lists a container's children, possibly in several batches
//! - `LeafMaterializer` turns a leaf entry into a file handle
//!
//! Adapters:
//! - `memory::MemoryHost` for embedding and tests
//! - `fs::FsHost` for the local filesystem

pub mod fs;
pub mod memory;

use async_trait::async_trait;

use crate::error::HostError;
use crate::types::entry::EntryHandle;
use crate::types::file::FileHandle;

pub use fs::FsHost;
pub use memory::MemoryHost;

/// Enumerates the direct children of a container entry.
///
/// `read_batch` may return a partial batch; callers keep reading until it
/// returns an empty one.
#[async_trait]
pub trait ChildEnumerator: Send + Sync {
    /// Host reference carried by entry handles
    type Raw: Send + Sync;
    /// Cursor over one container's children
    type Reader: Send;

    async fn open(&self, container: &EntryHandle<Self::Raw>) -> Result<Self::Reader, HostError>;

    async fn read_batch(
        &self,
        reader: &mut Self::Reader,
    ) -> Result<Vec<EntryHandle<Self::Raw>>, HostError>;
}

/// Materializes a leaf entry into an addressable file
#[async_trait]
pub trait LeafMaterializer: Send + Sync {
    type Raw: Send + Sync;

    async fn materialize(&self, leaf: &EntryHandle<Self::Raw>) -> Result<FileHandle, HostError>;
}
