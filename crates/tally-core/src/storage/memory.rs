//! In-memory ledger store.
//!
//! Backs tests and ephemeral sessions. Same contract as the durable
//! stores: snapshots come back ordered `(expense_date desc, created_at
//! desc)` and every mutation signals the attached notifier, if any.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::entry::{EntryPatch, LedgerEntry, NewEntry};
use crate::error::{Result, TallyError};
use crate::snapshot::LedgerSnapshot;
use crate::storage::notify::ChangeNotifier;
use crate::storage::traits::LedgerStore;

/// In-memory `LedgerStore` implementation.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<LedgerEntry>>,
    notifier: Option<Arc<dyn ChangeNotifier>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a change notifier signaled after every successful mutation.
    pub fn with_notifier(notifier: Arc<dyn ChangeNotifier>) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            notifier: Some(notifier),
        }
    }

    fn lock_entries(&self) -> Result<MutexGuard<'_, Vec<LedgerEntry>>> {
        self.entries
            .lock()
            .map_err(|_| TallyError::Storage("memory store lock poisoned".to_string()))
    }

    fn notify(&self) {
        if let Some(ref notifier) = self.notifier {
            notifier.notify_changed();
        }
    }
}

impl LedgerStore for MemoryStore {
    fn fetch_snapshot(&self) -> Result<LedgerSnapshot> {
        let entries = self.lock_entries()?;
        let mut ordered = entries.clone();
        ordered.sort_by(|a, b| {
            b.expense_date
                .cmp(&a.expense_date)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(LedgerSnapshot::new(ordered))
    }

    fn insert(&self, entry: &NewEntry) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let record = entry.clone().into_entry(id, Utc::now())?;
        self.lock_entries()?.push(record);
        self.notify();
        Ok(id)
    }

    fn update(&self, id: &Uuid, patch: &EntryPatch) -> Result<()> {
        {
            let mut entries = self.lock_entries()?;
            let entry = entries
                .iter_mut()
                .find(|e| e.id == *id)
                .ok_or_else(|| TallyError::NotFound(format!("entry {}", id)))?;
            *entry = entry.apply_patch(patch)?;
        }
        self.notify();
        Ok(())
    }

    fn delete(&self, id: &Uuid) -> Result<()> {
        {
            let mut entries = self.lock_entries()?;
            let position = entries
                .iter()
                .position(|e| e.id == *id)
                .ok_or_else(|| TallyError::NotFound(format!("entry {}", id)))?;
            entries.remove(position);
        }
        self.notify();
        Ok(())
    }
}
