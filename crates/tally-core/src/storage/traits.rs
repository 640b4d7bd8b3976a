//! Ledger store trait definition.
//!
//! The `LedgerStore` trait defines the interface the reconciliation and
//! query engines need from a durable record keeper. This abstraction keeps
//! the engines pure: they consume snapshots fetched here and write back
//! through `insert`/`update`/`delete` without knowing the backend.

use uuid::Uuid;

use crate::entry::{EntryPatch, NewEntry};
use crate::error::Result;
use crate::snapshot::LedgerSnapshot;

/// Durable record keeper for ledger entries.
///
/// All implementations must ensure:
/// - `fetch_snapshot` returns entries ordered by `(expense_date desc,
///   created_at desc)`
/// - `insert` validates the draft and assigns id and creation timestamp
/// - per-row updates are last-write-wins under concurrent callers
///
/// Retries, timeouts, and transactional grouping are the store adapter's
/// business, not the engine's; batch operations in the engine are
/// best-effort sequences of these single-row calls.
pub trait LedgerStore: Send + Sync {
    /// Fetch the full ledger as an immutable snapshot.
    ///
    /// The snapshot is owned by the caller; later mutations never patch an
    /// already-fetched snapshot in memory.
    fn fetch_snapshot(&self) -> Result<LedgerSnapshot>;

    /// Validate and insert a new entry.
    ///
    /// # Returns
    ///
    /// The store-assigned id of the created entry.
    ///
    /// # Errors
    ///
    /// Returns the draft's validation error (`Validation`,
    /// `InvalidAmount`, `SplitMismatch`) unchanged, or `Storage` when the
    /// backend fails.
    fn insert(&self, entry: &NewEntry) -> Result<Uuid>;

    /// Apply a patch to an existing entry.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::NotFound` if the id is absent, or the patch's
    /// validation error when the patched record would violate an
    /// invariant.
    fn update(&self, id: &Uuid, patch: &EntryPatch) -> Result<()>;

    /// Delete an entry.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::NotFound` if the id is absent.
    fn delete(&self, id: &Uuid) -> Result<()>;
}
