pub mod entry;
pub mod file;
pub mod identity;
pub mod node;

pub use entry::{EntryHandle, EntryKind, EntrySource};
pub use file::{ContentRef, FileHandle};
pub use identity::FileIdentity;
pub use node::{DirectoryNode, NodeKind};
