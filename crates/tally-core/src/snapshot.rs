//! Immutable ledger snapshot.
//!
//! A snapshot is the full set of entries at one fetch instant, owned by
//! whichever call fetched it. The engines only ever read it; anything that
//! changes ledger state goes through the store and the caller fetches a
//! fresh snapshot afterward, so view and store cannot diverge silently.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entry::LedgerEntry;

/// An ordered, immutable sequence of ledger entries at one point in time.
///
/// Stores return snapshots ordered by `(expense_date desc, created_at
/// desc)`; that input order is the tie-break order for stable sorting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    entries: Vec<LedgerEntry>,
}

impl LedgerSnapshot {
    pub fn new(entries: Vec<LedgerEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by id. Entries can disappear between fetches, so
    /// absence is an expected outcome, not an error.
    pub fn get(&self, id: &Uuid) -> Option<&LedgerEntry> {
        self.entries.iter().find(|entry| entry.id == *id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LedgerEntry> {
        self.entries.iter()
    }
}

impl From<Vec<LedgerEntry>> for LedgerSnapshot {
    fn from(entries: Vec<LedgerEntry>) -> Self {
        Self::new(entries)
    }
}

impl<'a> IntoIterator for &'a LedgerSnapshot {
    type Item = &'a LedgerEntry;
    type IntoIter = std::slice::Iter<'a, LedgerEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
