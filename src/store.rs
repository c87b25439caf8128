//! Session-scoped schedule entry store.
//!
//! Holds the entry set for exactly one "current" run being viewed or
//! reviewed. The set is only ever replaced wholesale from a fetched run,
//! never patched in place, so the local view cannot diverge from the server.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::api::{ScheduleEntry, ScheduleRunId};

#[derive(Debug, Clone)]
struct LoadedRun {
    run_id: ScheduleRunId,
    entries: Vec<ScheduleEntry>,
}

/// Clonable handle to the current run's entries.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    inner: Arc<RwLock<Option<LoadedRun>>>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held set atomically with the given run's entries.
    pub fn load(&self, run_id: ScheduleRunId, entries: Vec<ScheduleEntry>) {
        *self.inner.write() = Some(LoadedRun { run_id, entries });
    }

    /// Immutable snapshot of the current entries. Empty when nothing is
    /// loaded.
    pub fn current(&self) -> Vec<ScheduleEntry> {
        self.inner
            .read()
            .as_ref()
            .map(|run| run.entries.clone())
            .unwrap_or_default()
    }

    /// The run whose entries are currently loaded, if any.
    pub fn current_run(&self) -> Option<ScheduleRunId> {
        self.inner.read().as_ref().map(|run| run.run_id)
    }

    /// Drop the held set.
    pub fn clear(&self) {
        *self.inner.write() = None;
    }

    /// Clear only if the given run's entries are the ones loaded.
    pub fn clear_if_current(&self, run_id: ScheduleRunId) -> bool {
        let mut guard = self.inner.write();
        if guard.as_ref().is_some_and(|run| run.run_id == run_id) {
            *guard = None;
            true
        } else {
            false
        }
    }
}
