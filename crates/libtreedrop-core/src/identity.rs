use std::collections::HashMap;

use crate::types::file::FileHandle;
use crate::types::identity::FileIdentity;

/// Identity of a file handle. The only "same file" test in this crate.
pub fn identity_of(file: &FileHandle) -> FileIdentity {
    FileIdentity::new(file.name(), file.size())
}

/// Lookup from identity to the first matching file of a known list
#[derive(Debug, Clone, Default)]
pub struct IdentityIndex {
    files: Vec<FileHandle>,
    by_identity: HashMap<FileIdentity, usize>,
}

impl IdentityIndex {
    /// Index a file list; on collisions the earliest file wins
    pub fn new(files: &[FileHandle]) -> Self {
        let mut by_identity = HashMap::with_capacity(files.len());
        for (pos, file) in files.iter().enumerate() {
            by_identity.entry(identity_of(file)).or_insert(pos);
        }
        Self {
            files: files.to_vec(),
            by_identity,
        }
    }

    pub fn resolve(&self, identity: &FileIdentity) -> Option<&FileHandle> {
        self.by_identity.get(identity).map(|&pos| &self.files[pos])
    }

    pub fn contains(&self, file: &FileHandle) -> bool {
        self.by_identity.contains_key(&identity_of(file))
    }

    /// Known files in original order
    pub fn files(&self) -> &[FileHandle] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of distinct identities; lower than `len` when files collide
    pub fn distinct(&self) -> usize {
        self.by_identity.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_ignores_handle() {
        let a = FileHandle::from_bytes("c.txt", "", b"12345");
        let b = FileHandle::from_bytes("c.txt", "text/plain", b"abcde");
        assert!(!FileHandle::same_handle(&a, &b));
        assert_eq!(identity_of(&a), identity_of(&b));
    }

    #[test]
    fn test_resolve_first_match() {
        let first = FileHandle::from_bytes("dup.txt", "", b"aaa");
        let second = FileHandle::from_bytes("dup.txt", "", b"bbb");
        let other = FileHandle::from_bytes("other.txt", "", b"o");
        let index = IdentityIndex::new(&[first.clone(), other, second]);

        let found = index.resolve(&FileIdentity::new("dup.txt", 3)).unwrap();
        assert!(FileHandle::same_handle(found, &first));
        assert_eq!(index.len(), 3);
        assert_eq!(index.distinct(), 2);
    }

    #[test]
    fn test_resolve_miss() {
        let index = IdentityIndex::new(&[FileHandle::from_bytes("a.txt", "", b"a")]);
        assert!(index.resolve(&FileIdentity::new("a.txt", 2)).is_none());
        assert!(index.resolve(&FileIdentity::new("b.txt", 1)).is_none());
        assert!(index.contains(&FileHandle::from_bytes("a.txt", "", b"z")));
    }
}
