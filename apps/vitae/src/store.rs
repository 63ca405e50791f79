//! Session-scoped resume store.
//!
//! One shared mutable cell holding the last validated record plus the display
//! theme flag. The store is an explicit, injectable handle — constructed at
//! application start and cloned into whoever needs it — never a hidden
//! global. Both operations are total: no validation happens at this layer,
//! the validator runs before a write is ever attempted.

use std::sync::{Arc, PoisonError, RwLock};

use crate::schema::record::ResumeRecord;

#[derive(Debug)]
struct StoreInner {
    record: ResumeRecord,
    dark_theme: bool,
}

/// Cheap-to-clone handle over the shared session state.
#[derive(Debug, Clone)]
pub struct ResumeStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl ResumeStore {
    /// Creates the store with the scaffold record and the light theme.
    pub fn new() -> Self {
        ResumeStore {
            inner: Arc::new(RwLock::new(StoreInner {
                record: ResumeRecord::scaffold(),
                dark_theme: false,
            })),
        }
    }

    /// Replaces the current record wholesale. Last writer wins; old and new
    /// sub-fields are never merged.
    pub fn set_resume(&self, record: ResumeRecord) {
        // Writes are whole-record replacement, so a poisoned lock still holds
        // a coherent last-good record; recover rather than propagate.
        let mut inner = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        inner.record = record;
    }

    /// Snapshot of the current record. Returned by value — callers must not
    /// expect later store writes to show through, nor can they mutate the
    /// stored record in place.
    pub fn resume(&self) -> ResumeRecord {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .record
            .clone()
    }

    /// Sets the display theme flag. Independent of the resume lifecycle.
    pub fn set_theme(&self, dark: bool) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .dark_theme = dark;
    }

    pub fn theme(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .dark_theme
    }
}

impl Default for ResumeStore {
    fn default() -> Self {
        ResumeStore::new()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
