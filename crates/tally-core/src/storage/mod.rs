//! Storage abstraction for Tally.
//!
//! The engine treats persistence as an external collaborator: everything
//! it needs is the `LedgerStore` trait plus the payload-free
//! `ChangeNotifier` refresh channel. Two backends ship here:
//!
//! - `SqliteStore`: durable single-file SQLite database
//! - `MemoryStore`: in-process store for tests and ephemeral use
//!
//! Both honor the snapshot ordering contract: entries come back ordered by
//! `(expense_date desc, created_at desc)`. Concurrency correctness is
//! per-row last-write-wins; the engine holds no client-side locks.

pub mod memory;
pub mod notify;
pub mod sqlite;
pub mod traits;

// Re-export public types
pub use memory::MemoryStore;
pub use notify::{ChangeNotifier, RefreshChannel, RefreshListener};
pub use sqlite::SqliteStore;
pub use traits::LedgerStore;
