use crate::types::file::FileHandle;

/// Whether an entry is a file or a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Leaf,
    Container,
}

/// What backs an entry handle
#[derive(Debug, Clone)]
pub enum EntrySource<R> {
    /// Host reference, resolved through the host capabilities
    Host(R),
    /// File already materialized by a flat picker
    Picked(FileHandle),
}

/// One item of a drop or pick, before its contents are known.
#[derive(Debug, Clone)]
pub struct EntryHandle<R> {
    pub name: String,
    /// Full slash-delimited path from the drop root, if the host reports one
    pub full_path: Option<String>,
    pub kind: EntryKind,
    pub source: EntrySource<R>,
}

impl<R> EntryHandle<R> {
    /// Host-backed leaf entry
    pub fn leaf(name: impl Into<String>, full_path: impl Into<String>, raw: R) -> Self {
        Self {
            name: name.into(),
            full_path: Some(full_path.into()),
            kind: EntryKind::Leaf,
            source: EntrySource::Host(raw),
        }
    }

    /// Host-backed container entry
    pub fn container(name: impl Into<String>, full_path: impl Into<String>, raw: R) -> Self {
        Self {
            name: name.into(),
            full_path: Some(full_path.into()),
            kind: EntryKind::Container,
            source: EntrySource::Host(raw),
        }
    }

    /// Leaf for a file handed over by a plain picker. It has no host path.
    pub fn picked(file: FileHandle) -> Self {
        Self {
            name: file.name().to_string(),
            full_path: None,
            kind: EntryKind::Leaf,
            source: EntrySource::Picked(file),
        }
    }

    /// Host-reported path, or `"/" + name` when the host gives none
    pub fn path(&self) -> String {
        match &self.full_path {
            Some(path) => path.clone(),
            None => format!("/{}", self.name),
        }
    }

    pub fn is_container(&self) -> bool {
        self.kind == EntryKind::Container
    }
}
