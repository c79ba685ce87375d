//! Entry store
//!
//! The aggregation engine consumes the entry collection through
//! [`EntryStore`], one immutable snapshot per call. Durable persistence
//! lives outside this crate; [`MemoryStore`] is the in-process reference
//! implementation backing tests and embedding callers.

use std::sync::Mutex;

use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::debug;

use crate::models::{DiaryEntry, EntryBuilder, EntryId};

/// Store errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("entry not found: {0}")]
    NotFound(EntryId),

    #[error("lock poisoned")]
    LockPoisoned,
}

/// A queryable collection of diary entries
///
/// Implementations hand out snapshots: the returned entries are owned
/// clones the caller may hold across subsequent edits. Snapshot order is
/// newest first, matching the diary list.
pub trait EntryStore {
    fn fetch_entries(&self) -> Vec<DiaryEntry>;
}

/// In-memory entry store
///
/// Identity is assigned at insert and survives every edit, including
/// timestamp edits. Duplicate timestamps are allowed here; the
/// import/export merge is where timestamp-equality dedup applies.
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

struct Inner {
    next_id: u64,
    entries: Vec<DiaryEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                entries: Vec::new(),
            }),
        }
    }

    fn with_inner<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Inner) -> Result<T, StoreError>,
    {
        let mut inner = self.inner.lock().map_err(|_| StoreError::LockPoisoned)?;
        f(&mut inner)
    }

    /// Insert a new entry, assigning its identity
    pub fn insert(&self, builder: EntryBuilder) -> Result<EntryId, StoreError> {
        self.with_inner(|inner| {
            let id = EntryId(inner.next_id);
            inner.next_id += 1;
            inner.entries.push(builder.build(id));
            debug!(entry = %id, "inserted diary entry");
            Ok(id)
        })
    }

    /// Fetch one entry by identity
    pub fn get(&self, id: EntryId) -> Result<DiaryEntry, StoreError> {
        self.with_inner(|inner| {
            inner
                .entries
                .iter()
                .find(|e| e.id == id)
                .cloned()
                .ok_or(StoreError::NotFound(id))
        })
    }

    /// Edit an entry in place
    pub fn update<F>(&self, id: EntryId, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut DiaryEntry),
    {
        self.with_inner(|inner| {
            let entry = inner
                .entries
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or(StoreError::NotFound(id))?;
            f(entry);
            Ok(())
        })
    }

    /// Move an entry to a different instant, keeping its identity
    pub fn set_timestamp(&self, id: EntryId, timestamp: NaiveDateTime) -> Result<(), StoreError> {
        self.update(id, |entry| entry.timestamp = timestamp)
    }

    /// Delete an entry
    pub fn delete(&self, id: EntryId) -> Result<(), StoreError> {
        self.with_inner(|inner| {
            let before = inner.entries.len();
            inner.entries.retain(|e| e.id != id);
            if inner.entries.len() == before {
                return Err(StoreError::NotFound(id));
            }
            debug!(entry = %id, "deleted diary entry");
            Ok(())
        })
    }

    /// Snapshot of all entries, newest first
    pub fn snapshot(&self) -> Result<Vec<DiaryEntry>, StoreError> {
        self.with_inner(|inner| {
            let mut entries = inner.entries.clone();
            entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
            Ok(entries)
        })
    }

    pub fn len(&self) -> usize {
        self.with_inner(|inner| Ok(inner.entries.len())).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryStore for MemoryStore {
    fn fetch_entries(&self) -> Vec<DiaryEntry> {
        match self.snapshot() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!(error = %e, "entry snapshot failed");
                Vec::new()
            }
        }
    }
}
