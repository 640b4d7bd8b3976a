//! # Tally Core
//!
//! Core library for Tally - a two-party shared expense ledger and
//! reconciliation engine.
//!
//! This crate provides the core domain logic, storage abstractions, and data
//! models independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **money**: Integer-cents parsing, even splitting, and display formatting
//! - **party**: The two fixed parties and provisioned identity resolution
//! - **split**: Split policy (even or custom) producing the per-party shares
//! - **entry**: Ledger entry record, drafts, patches, and validation
//! - **snapshot**: Immutable ordered view of the ledger at one fetch instant
//! - **reconcile**: Net balance computation and idempotent settlement
//! - **query**: Filtering, sorting, and aggregation over a snapshot
//! - **storage**: Ledger store trait, SQLite and in-memory backends, change
//!   notification
//!
//! All engine operations are synchronous, stateless per call, and operate on
//! a caller-supplied snapshot. State lives in the store; the engine never
//! caches a snapshot across calls.

pub mod entry;
pub mod error;
pub mod money;
pub mod party;
pub mod query;
pub mod reconcile;
pub mod snapshot;
pub mod split;
pub mod storage;

pub use entry::{Category, EntryPatch, LedgerEntry, NewEntry, SplitMode};
pub use error::{Result, TallyError};
pub use party::{Party, PartyRegistry};
pub use reconcile::{net_balance, settle, settle_many, NetBalance, SettlementReport};
pub use snapshot::LedgerSnapshot;
pub use split::Split;
pub use storage::{ChangeNotifier, LedgerStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
