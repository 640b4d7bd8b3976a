//! SQLite store integration tests.

use chrono::NaiveDate;
use tempfile::tempdir;
use uuid::Uuid;

use tally_core::entry::{Category, EntryPatch, NewEntry, SplitMode};
use tally_core::error::TallyError;
use tally_core::party::Party;
use tally_core::split::Split;
use tally_core::storage::{LedgerStore, SqliteStore};

fn draft(description: &str, cents: i64, date: (i32, u32, u32)) -> NewEntry {
    NewEntry::new(
        Party::A,
        Party::B,
        description,
        cents,
        NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        Category::Food,
        Split::Even,
    )
}

#[test]
fn test_create_open_round_trip() {
    let dir = tempdir().expect("tempdir should be available");
    let path = dir.path().join("shared.tally");

    let store = SqliteStore::create(&path).expect("create should succeed");
    let id = store.insert(&draft("first", 1200, (2024, 9, 1))).unwrap();
    drop(store);

    let reopened = SqliteStore::open(&path).expect("open should succeed");
    let snapshot = reopened.fetch_snapshot().unwrap();
    assert_eq!(snapshot.len(), 1);

    let entry = snapshot.get(&id).unwrap();
    assert_eq!(entry.description, "first");
    assert_eq!(entry.amount_cents, 1200);
    assert_eq!(entry.paid_by, Party::B);
    assert_eq!(entry.category, Category::Food);
    assert_eq!(entry.split_mode, SplitMode::Even);
    assert_eq!(entry.party_a_owes_cents, 600);
    assert!(!entry.settled);
    assert!(entry.settled_at.is_none());
}

#[test]
fn test_create_refuses_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shared.tally");
    SqliteStore::create(&path).unwrap();
    assert!(SqliteStore::create(&path).is_err());
}

#[test]
fn test_open_missing_file_fails() {
    let dir = tempdir().unwrap();
    let result = SqliteStore::open(&dir.path().join("absent.tally"));
    assert!(matches!(result, Err(TallyError::Storage(_))));
}

#[test]
fn test_snapshot_ordering_contract() {
    let dir = tempdir().unwrap();
    let store = SqliteStore::create(&dir.path().join("shared.tally")).unwrap();

    store.insert(&draft("middle", 100, (2024, 9, 5))).unwrap();
    store.insert(&draft("oldest", 100, (2024, 9, 1))).unwrap();
    store.insert(&draft("newest", 100, (2024, 9, 9))).unwrap();

    let snapshot = store.fetch_snapshot().unwrap();
    let order: Vec<_> = snapshot
        .iter()
        .map(|e| e.description.as_str())
        .collect();
    assert_eq!(order, vec!["newest", "middle", "oldest"]);
}

#[test]
fn test_same_date_ties_break_on_created_at_desc() {
    let dir = tempdir().unwrap();
    let store = SqliteStore::create(&dir.path().join("shared.tally")).unwrap();

    store.insert(&draft("earlier insert", 100, (2024, 9, 5))).unwrap();
    store.insert(&draft("later insert", 100, (2024, 9, 5))).unwrap();

    let snapshot = store.fetch_snapshot().unwrap();
    assert_eq!(snapshot.entries()[0].description, "later insert");
}

#[test]
fn test_update_persists_patch() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shared.tally");
    let store = SqliteStore::create(&path).unwrap();
    let id = store.insert(&draft("typo", 5000, (2024, 9, 2))).unwrap();

    store
        .update(
            &id,
            &EntryPatch {
                description: Some("fixed".to_string()),
                split: Some(Split::Custom {
                    share_a_cents: 2000,
                    share_b_cents: 3000,
                }),
                ..EntryPatch::default()
            },
        )
        .unwrap();
    drop(store);

    let reopened = SqliteStore::open(&path).unwrap();
    let entry = reopened.fetch_snapshot().unwrap().get(&id).cloned().unwrap();
    assert_eq!(entry.description, "fixed");
    assert_eq!(entry.split_mode, SplitMode::Custom);
    assert_eq!(entry.party_a_owes_cents, 2000);
    assert_eq!(entry.party_b_owes_cents, 3000);
}

#[test]
fn test_update_missing_id_is_not_found() {
    let dir = tempdir().unwrap();
    let store = SqliteStore::create(&dir.path().join("shared.tally")).unwrap();
    let result = store.update(&Uuid::new_v4(), &EntryPatch::default());
    assert!(matches!(result, Err(TallyError::NotFound(_))));
}

#[test]
fn test_delete_and_not_found() {
    let dir = tempdir().unwrap();
    let store = SqliteStore::create(&dir.path().join("shared.tally")).unwrap();
    let id = store.insert(&draft("temp", 100, (2024, 9, 1))).unwrap();

    store.delete(&id).unwrap();
    assert!(store.fetch_snapshot().unwrap().is_empty());
    assert!(matches!(store.delete(&id), Err(TallyError::NotFound(_))));
}

#[test]
fn test_invalid_patch_leaves_row_unchanged() {
    let dir = tempdir().unwrap();
    let store = SqliteStore::create(&dir.path().join("shared.tally")).unwrap();
    let id = store.insert(&draft("stable", 1000, (2024, 9, 1))).unwrap();

    let result = store.update(
        &id,
        &EntryPatch {
            description: Some("  ".to_string()),
            ..EntryPatch::default()
        },
    );
    assert!(matches!(result, Err(TallyError::Validation(_))));

    let entry = store.fetch_snapshot().unwrap().get(&id).cloned().unwrap();
    assert_eq!(entry.description, "stable");
}
