//! Reconciliation engine: net balance and settlement.
//!
//! Balance computation is a pure fold over a snapshot; settlement is an
//! idempotent per-entry transition applied through the store. The engine
//! never reads its own writes - after settling, the caller fetches a fresh
//! snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entry::{EntryPatch, LedgerEntry};
use crate::error::{Result, TallyError};
use crate::party::Party;
use crate::snapshot::LedgerSnapshot;
use crate::storage::LedgerStore;

/// The single net debt between the two parties after offsetting all
/// unsettled entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "state")]
pub enum NetBalance {
    /// Nothing outstanding (the net is zero cents).
    Settled,
    /// One party owes the other.
    Outstanding {
        owing: Party,
        owed: Party,
        amount_cents: i64,
    },
}

impl NetBalance {
    pub fn is_settled(&self) -> bool {
        matches!(self, NetBalance::Settled)
    }

    pub fn amount_cents(&self) -> i64 {
        match self {
            NetBalance::Settled => 0,
            NetBalance::Outstanding { amount_cents, .. } => *amount_cents,
        }
    }
}

/// Compute the net balance over a snapshot.
///
/// For every unsettled entry, the non-payer's share is added to their
/// running debt to the payer; the two running debts are then netted into
/// one signed quantity. The fold is commutative and associative, so entry
/// order never affects the result. Settled entries contribute nothing.
///
/// Split arithmetic can leave a sub-cent residual; in integer cents that
/// residual is exactly zero, which reports as settled rather than as a
/// phantom debt.
pub fn net_balance(snapshot: &LedgerSnapshot) -> NetBalance {
    let mut b_owes_a: i64 = 0;
    let mut a_owes_b: i64 = 0;

    for entry in snapshot.iter().filter(|e| !e.settled) {
        match entry.paid_by {
            Party::A => b_owes_a += entry.party_b_owes_cents,
            Party::B => a_owes_b += entry.party_a_owes_cents,
        }
    }

    let net = b_owes_a - a_owes_b;
    if net == 0 {
        NetBalance::Settled
    } else if net > 0 {
        NetBalance::Outstanding {
            owing: Party::B,
            owed: Party::A,
            amount_cents: net,
        }
    } else {
        NetBalance::Outstanding {
            owing: Party::A,
            owed: Party::B,
            amount_cents: -net,
        }
    }
}

/// Mark an entry settled at the given instant.
///
/// Idempotent: settling an already-settled entry returns it unchanged,
/// keeping the original timestamp, so a double-submitted settle never
/// surfaces a user-visible failure.
pub fn settle(entry: &LedgerEntry, now: DateTime<Utc>) -> LedgerEntry {
    if entry.settled {
        return entry.clone();
    }
    let mut settled = entry.clone();
    settled.settled = true;
    settled.settled_at = Some(now);
    settled
}

/// Outcome of a batch settlement: which ids were settled and which were
/// skipped because they were not in the snapshot (or vanished from the
/// store between fetch and update).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReport {
    pub settled: Vec<Uuid>,
    pub skipped: Vec<Uuid>,
}

impl SettlementReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Settle every referenced entry present in the snapshot.
///
/// Best-effort sequence of independent idempotent updates, not a
/// transaction: ids absent from the snapshot are skipped rather than
/// failing the batch, and an id deleted between fetch and update is also
/// skipped. A hard store failure passes through unchanged; entries updated
/// before the failure stay settled. The caller should fetch a fresh
/// snapshot afterward.
pub fn settle_many(
    store: &dyn LedgerStore,
    snapshot: &LedgerSnapshot,
    ids: &[Uuid],
    now: DateTime<Utc>,
) -> Result<SettlementReport> {
    let mut report = SettlementReport::default();

    for id in ids {
        if snapshot.get(id).is_none() {
            report.skipped.push(*id);
            continue;
        }
        match store.update(id, &EntryPatch::settle_at(now)) {
            Ok(()) => report.settled.push(*id),
            // Deleted since the snapshot was fetched: stale, not fatal
            Err(TallyError::NotFound(_)) => report.skipped.push(*id),
            Err(err) => return Err(err),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    use crate::entry::{Category, NewEntry};
    use crate::split::Split;
    use crate::storage::MemoryStore;

    fn entry(paid_by: Party, a_owes: i64, b_owes: i64, settled: bool) -> LedgerEntry {
        let mut e = NewEntry::new(
            paid_by,
            paid_by,
            "test",
            a_owes + b_owes,
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            Category::Misc,
            Split::Custom {
                share_a_cents: a_owes,
                share_b_cents: b_owes,
            },
        )
        .into_entry(Uuid::new_v4(), Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap())
        .unwrap();
        if settled {
            e.settled = true;
            e.settled_at = Some(e.created_at);
        }
        e
    }

    #[test]
    fn test_empty_snapshot_is_settled() {
        assert_eq!(net_balance(&LedgerSnapshot::default()), NetBalance::Settled);
    }

    #[test]
    fn test_offsetting_entries_net_out() {
        // paid_by=A, B owes 3000; paid_by=B, A owes 1000 -> B owes A 2000
        let snapshot = LedgerSnapshot::new(vec![
            entry(Party::A, 3000, 3000, false),
            entry(Party::B, 1000, 1000, false),
        ]);
        assert_eq!(
            net_balance(&snapshot),
            NetBalance::Outstanding {
                owing: Party::B,
                owed: Party::A,
                amount_cents: 2000,
            }
        );
    }

    #[test]
    fn test_settled_entries_ignored() {
        let snapshot = LedgerSnapshot::new(vec![entry(Party::A, 3000, 3000, true)]);
        assert_eq!(net_balance(&snapshot), NetBalance::Settled);
    }

    #[test]
    fn test_exact_offset_reports_settled() {
        let snapshot = LedgerSnapshot::new(vec![
            entry(Party::A, 1500, 1500, false),
            entry(Party::B, 1500, 1500, false),
        ]);
        assert_eq!(net_balance(&snapshot), NetBalance::Settled);
    }

    #[test]
    fn test_settle_sets_flag_and_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 5, 2, 10, 0, 0).unwrap();
        let settled = settle(&entry(Party::A, 500, 500, false), now);
        assert!(settled.settled);
        assert_eq!(settled.settled_at, Some(now));
    }

    #[test]
    fn test_settle_idempotent_keeps_timestamp() {
        let first = Utc.with_ymd_and_hms(2024, 5, 2, 10, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 5, 3, 10, 0, 0).unwrap();
        let once = settle(&entry(Party::A, 500, 500, false), first);
        let twice = settle(&once, later);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_settle_many_skips_unknown_ids() {
        let store = MemoryStore::new();
        let draft = NewEntry::new(
            Party::A,
            Party::A,
            "rent share",
            10000,
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            Category::Household,
            Split::Even,
        );
        let known = store.insert(&draft).unwrap();
        let unknown = Uuid::new_v4();

        let snapshot = store.fetch_snapshot().unwrap();
        let now = Utc.with_ymd_and_hms(2024, 5, 2, 10, 0, 0).unwrap();
        let report = settle_many(&store, &snapshot, &[known, unknown], now).unwrap();

        assert_eq!(report.settled, vec![known]);
        assert_eq!(report.skipped, vec![unknown]);
        assert!(!report.is_complete());

        let refreshed = store.fetch_snapshot().unwrap();
        assert!(refreshed.get(&known).unwrap().settled);
    }

    #[test]
    fn test_settle_many_empty_batch() {
        let store = MemoryStore::new();
        let snapshot = store.fetch_snapshot().unwrap();
        let report = settle_many(&store, &snapshot, &[], Utc::now()).unwrap();
        assert!(report.settled.is_empty());
        assert!(report.is_complete());
    }
}
