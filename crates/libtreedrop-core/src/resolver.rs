//! Entry resolution for drop and pick events.

use crate::types::entry::EntryHandle;
use crate::types::file::FileHandle;

/// A drop or pick as reported by the host.
///
/// `entries` is `None` when the host cannot supply structured entries, for
/// example a plain multi-file picker.
#[derive(Debug, Clone)]
pub struct DropEvent<R> {
    pub entries: Option<Vec<EntryHandle<R>>>,
    pub files: Vec<FileHandle>,
}

impl<R> DropEvent<R> {
    /// Directory drop with structured entries
    pub fn structured(entries: Vec<EntryHandle<R>>) -> Self {
        Self {
            entries: Some(entries),
            files: Vec::new(),
        }
    }

    /// Plain pick of files, no hierarchy
    pub fn picked(files: Vec<FileHandle>) -> Self {
        Self {
            entries: None,
            files,
        }
    }
}

/// Produce the entry handles of an event in host order.
///
/// Structured entries win when present and non-empty. Otherwise every picked
/// file becomes a leaf at the ingestion root. Never fails.
pub fn resolve_entries<R>(event: DropEvent<R>) -> Vec<EntryHandle<R>> {
    match event.entries {
        Some(entries) if !entries.is_empty() => entries,
        _ => event.files.into_iter().map(EntryHandle::picked).collect(),
    }
}
