use std::fmt;

use serde::{Deserialize, Serialize};

/// Weak file identity: `(name, size)`.
///
/// Every "same file" decision (selection, drag resolution, removal) uses this
/// key. Two different files that share a name and a byte size collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileIdentity {
    pub name: String,
    pub size: u64,
}

impl FileIdentity {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

impl fmt::Display for FileIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.name, self.size)
    }
}
