//! End-to-end reconciliation flows against the in-memory store.

use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use tally_core::entry::{Category, EntryPatch, NewEntry};
use tally_core::party::Party;
use tally_core::reconcile::{net_balance, settle_many, NetBalance};
use tally_core::split::Split;
use tally_core::storage::{LedgerStore, MemoryStore};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn add(
    store: &MemoryStore,
    paid_by: Party,
    description: &str,
    amount_cents: i64,
    split: Split,
) -> Uuid {
    let draft = NewEntry::new(
        paid_by,
        paid_by,
        description,
        amount_cents,
        date(2024, 8, 10),
        Category::Household,
        split,
    );
    store.insert(&draft).expect("insert should succeed")
}

#[test]
fn test_net_balance_offsets_entries_across_payers() {
    let store = MemoryStore::new();
    // A fronts 6000, split evenly: B owes A 3000
    add(&store, Party::A, "utilities", 6000, Split::Even);
    // B fronts 2000, split evenly: A owes B 1000
    add(&store, Party::B, "takeout", 2000, Split::Even);

    let snapshot = store.fetch_snapshot().unwrap();
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
fn test_settling_everything_zeroes_the_balance() {
    let store = MemoryStore::new();
    let first = add(&store, Party::A, "rent share", 120000, Split::Even);
    let second = add(&store, Party::A, "internet", 7000, Split::Even);

    let snapshot = store.fetch_snapshot().unwrap();
    assert!(!net_balance(&snapshot).is_settled());

    let now = Utc.with_ymd_and_hms(2024, 8, 15, 18, 30, 0).unwrap();
    let report = settle_many(&store, &snapshot, &[first, second], now).unwrap();
    assert_eq!(report.settled.len(), 2);
    assert!(report.is_complete());

    // Fresh snapshot, never a patched copy of the old one
    let refreshed = store.fetch_snapshot().unwrap();
    assert_eq!(net_balance(&refreshed), NetBalance::Settled);
    for entry in refreshed.entries() {
        assert!(entry.settled);
        assert_eq!(entry.settled_at, Some(now));
    }
}

#[test]
fn test_batch_settlement_partial_success() {
    let store = MemoryStore::new();
    let known = add(&store, Party::A, "groceries", 4500, Split::Even);
    let stale = Uuid::new_v4();

    let snapshot = store.fetch_snapshot().unwrap();
    let report = settle_many(&store, &snapshot, &[known, stale], Utc::now()).unwrap();

    assert_eq!(report.settled, vec![known]);
    assert_eq!(report.skipped, vec![stale]);
}

#[test]
fn test_entry_deleted_between_fetch_and_settle_is_skipped() {
    let store = MemoryStore::new();
    let id = add(&store, Party::A, "doomed", 1000, Split::Even);

    let snapshot = store.fetch_snapshot().unwrap();
    store.delete(&id).unwrap();

    let report = settle_many(&store, &snapshot, &[id], Utc::now()).unwrap();
    assert!(report.settled.is_empty());
    assert_eq!(report.skipped, vec![id]);
}

#[test]
fn test_double_settlement_keeps_first_timestamp() {
    let store = MemoryStore::new();
    let id = add(&store, Party::B, "cinema", 3200, Split::Even);

    let first = Utc.with_ymd_and_hms(2024, 8, 16, 9, 0, 0).unwrap();
    let second = Utc.with_ymd_and_hms(2024, 8, 17, 9, 0, 0).unwrap();

    let snapshot = store.fetch_snapshot().unwrap();
    settle_many(&store, &snapshot, &[id], first).unwrap();

    // Two rapid clicks: second settle is a no-op, not an error
    let snapshot = store.fetch_snapshot().unwrap();
    let report = settle_many(&store, &snapshot, &[id], second).unwrap();
    assert_eq!(report.settled, vec![id]);

    let refreshed = store.fetch_snapshot().unwrap();
    assert_eq!(refreshed.get(&id).unwrap().settled_at, Some(first));
}

#[test]
fn test_custom_split_entry_flows_through_balance() {
    let store = MemoryStore::new();
    // A pays 10000 but only asks B for 2500
    add(
        &store,
        Party::A,
        "birthday dinner",
        10000,
        Split::Custom {
            share_a_cents: 7500,
            share_b_cents: 2500,
        },
    );

    let snapshot = store.fetch_snapshot().unwrap();
    assert_eq!(
        net_balance(&snapshot),
        NetBalance::Outstanding {
            owing: Party::B,
            owed: Party::A,
            amount_cents: 2500,
        }
    );
}

#[test]
fn test_edit_then_balance_reflects_fresh_snapshot() {
    let store = MemoryStore::new();
    let id = add(&store, Party::A, "groceries", 6000, Split::Even);

    store
        .update(
            &id,
            &EntryPatch {
                amount_cents: Some(8000),
                ..EntryPatch::default()
            },
        )
        .unwrap();

    let snapshot = store.fetch_snapshot().unwrap();
    assert_eq!(net_balance(&snapshot).amount_cents(), 4000);
}
