//! Selection of files chosen for attachment.
//!
//! One `SelectionSet` backs every view (tree indicators, compose chips, drag
//! target). Membership is keyed by [`FileIdentity`], so independently
//! created handles for the same logical file share one slot.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::identity::identity_of;
use crate::types::file::FileHandle;
use crate::types::identity::FileIdentity;

/// Change emitted to subscribers after an effective mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    Added { identity: FileIdentity },
    Removed { identity: FileIdentity },
    Cleared { count: usize },
}

/// Handle returned by [`SelectionSet::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn Fn(&SelectionEvent) + Send + Sync>;

/// Ordered identity → handle mapping.
///
/// Insertion order is kept so chips render in the order files were picked.
#[derive(Default)]
pub struct SelectionSet {
    entries: Vec<(FileIdentity, FileHandle)>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl fmt::Debug for SelectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionSet")
            .field("identities", &self.identities())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the file's identity if present, otherwise add it.
    /// Returns whether the identity is selected afterwards.
    pub fn toggle(&mut self, file: &FileHandle) -> bool {
        let identity = identity_of(file);
        if self.remove_identity(&identity) {
            false
        } else {
            self.push(identity, file.clone());
            true
        }
    }

    /// Add the file unless its identity is already selected.
    /// Returns whether it was added.
    pub fn insert(&mut self, file: &FileHandle) -> bool {
        let identity = identity_of(file);
        if self.position(&identity).is_some() {
            return false;
        }
        self.push(identity, file.clone());
        true
    }

    /// Remove the file's identity; absent is not an error
    pub fn remove(&mut self, file: &FileHandle) -> bool {
        self.remove_identity(&identity_of(file))
    }

    pub fn remove_identity(&mut self, identity: &FileIdentity) -> bool {
        match self.position(identity) {
            Some(pos) => {
                let (identity, _) = self.entries.remove(pos);
                self.emit(&SelectionEvent::Removed { identity });
                true
            }
            None => false,
        }
    }

    pub fn has(&self, file: &FileHandle) -> bool {
        self.contains_identity(&identity_of(file))
    }

    pub fn contains_identity(&self, identity: &FileIdentity) -> bool {
        self.position(identity).is_some()
    }

    /// Empty the set, e.g. after a successful submit
    pub fn clear(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let count = self.entries.len();
        self.entries.clear();
        self.emit(&SelectionEvent::Cleared { count });
    }

    /// Selected handles in selection order
    pub fn files(&self) -> Vec<FileHandle> {
        self.entries.iter().map(|(_, file)| file.clone()).collect()
    }

    pub fn identities(&self) -> Vec<FileIdentity> {
        self.entries.iter().map(|(id, _)| id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register a callback run synchronously after every effective mutation
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: Fn(&SelectionEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn position(&self, identity: &FileIdentity) -> Option<usize> {
        self.entries.iter().position(|(id, _)| id == identity)
    }

    fn push(&mut self, identity: FileIdentity, file: FileHandle) {
        self.entries.push((identity.clone(), file));
        self.emit(&SelectionEvent::Added { identity });
    }

    fn emit(&self, event: &SelectionEvent) {
        for (_, observer) in &self.observers {
            observer(event);
        }
    }
}

/// Selection shared across threads.
///
/// Mutations and the reads used to render chips go through one lock.
/// Observers run while the lock is held and must not call back into the
/// same `SharedSelection`.
#[derive(Debug, Clone, Default)]
pub struct SharedSelection {
    inner: Arc<Mutex<SelectionSet>>,
}

impl SharedSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&self, file: &FileHandle) -> bool {
        self.inner.lock().toggle(file)
    }

    pub fn insert(&self, file: &FileHandle) -> bool {
        self.inner.lock().insert(file)
    }

    pub fn remove(&self, file: &FileHandle) -> bool {
        self.inner.lock().remove(file)
    }

    pub fn has(&self, file: &FileHandle) -> bool {
        self.inner.lock().has(file)
    }

    pub fn clear(&self) {
        self.inner.lock().clear()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Selected handles, read under the lock
    pub fn snapshot(&self) -> Vec<FileHandle> {
        self.inner.lock().files()
    }

    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&SelectionEvent) + Send + Sync + 'static,
    {
        self.inner.lock().subscribe(observer)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.lock().unsubscribe(id)
    }
}
