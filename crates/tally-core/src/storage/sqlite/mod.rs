//! SQLite storage backend.
//!
//! A plain single-file SQLite database implementing `LedgerStore`. The
//! connection lives behind a mutex; every mutation is a single-row
//! statement, so concurrent callers get last-write-wins per row with no
//! client-held lock, which is exactly the contract the engine assumes.

mod row;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::entry::{EntryPatch, LedgerEntry, NewEntry};
use crate::error::{Result, TallyError};
use crate::snapshot::LedgerSnapshot;
use crate::storage::notify::ChangeNotifier;
use crate::storage::traits::LedgerStore;

use row::EntryRow;

const SELECT_COLUMNS: &str = "id, created_by, paid_by, description, amount_cents, \
     expense_date, created_at, category, split_mode, party_a_owes_cents, \
     party_b_owes_cents, settled, settled_at";

/// SQLite-backed ledger store.
pub struct SqliteStore {
    #[allow(dead_code)]
    path: PathBuf,
    conn: Mutex<Connection>,
    notifier: Option<Arc<dyn ChangeNotifier>>,
}

impl SqliteStore {
    /// Create a new ledger database at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::Storage` if the file already exists or the
    /// schema cannot be written.
    pub fn create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Err(TallyError::Storage(format!(
                "ledger file already exists: {}",
                path.display()
            )));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            CREATE TABLE meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE entries (
                id TEXT PRIMARY KEY,
                created_by TEXT NOT NULL,
                paid_by TEXT NOT NULL,
                description TEXT NOT NULL,
                amount_cents INTEGER NOT NULL,
                expense_date TEXT NOT NULL,
                created_at TEXT NOT NULL,
                category TEXT NOT NULL,
                split_mode TEXT NOT NULL,
                party_a_owes_cents INTEGER NOT NULL,
                party_b_owes_cents INTEGER NOT NULL,
                settled INTEGER NOT NULL DEFAULT 0,
                settled_at TEXT
            );

            CREATE INDEX entries_by_date
            ON entries (expense_date DESC, created_at DESC);
            "#,
        )?;

        conn.execute(
            "INSERT INTO meta (key, value) VALUES (?, ?)",
            ["format_version", "1"],
        )?;
        conn.execute(
            "INSERT INTO meta (key, value) VALUES (?, ?)",
            ["created_at", &Utc::now().to_rfc3339()],
        )?;

        Ok(Self {
            path: path.to_path_buf(),
            conn: Mutex::new(conn),
            notifier: None,
        })
    }

    /// Open an existing ledger database.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::Storage` if the file does not exist or is not
    /// a tally ledger.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TallyError::Storage(format!(
                "ledger file not found: {} (run `tally init` first)",
                path.display()
            )));
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let format_version: Option<String> = conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'format_version'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        if format_version.is_none() {
            return Err(TallyError::Storage(format!(
                "not a tally ledger: {}",
                path.display()
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
            conn: Mutex::new(conn),
            notifier: None,
        })
    }

    /// Attach a change notifier signaled after every successful mutation.
    pub fn with_notifier(mut self, notifier: Arc<dyn ChangeNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Lock the database connection, returning an error if the mutex is
    /// poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| TallyError::Storage("SQLite connection poisoned".to_string()))
    }

    fn notify(&self) {
        if let Some(ref notifier) = self.notifier {
            notifier.notify_changed();
        }
    }

    fn row_from_sqlite(row: &rusqlite::Row<'_>) -> rusqlite::Result<EntryRow> {
        Ok(EntryRow {
            id: row.get(0)?,
            created_by: row.get(1)?,
            paid_by: row.get(2)?,
            description: row.get(3)?,
            amount_cents: row.get(4)?,
            expense_date: row.get(5)?,
            created_at: row.get(6)?,
            category: row.get(7)?,
            split_mode: row.get(8)?,
            party_a_owes_cents: row.get(9)?,
            party_b_owes_cents: row.get(10)?,
            settled: row.get::<_, i64>(11)? != 0,
            settled_at: row.get(12)?,
        })
    }

    fn get_entry(conn: &Connection, id: &Uuid) -> Result<Option<LedgerEntry>> {
        let row = conn
            .query_row(
                &format!("SELECT {} FROM entries WHERE id = ?", SELECT_COLUMNS),
                [id.to_string()],
                Self::row_from_sqlite,
            )
            .optional()?;
        row.map(LedgerEntry::try_from).transpose()
    }

    fn write_entry(conn: &Connection, entry: &LedgerEntry) -> Result<()> {
        conn.execute(
            "UPDATE entries SET
                paid_by = ?2,
                description = ?3,
                amount_cents = ?4,
                expense_date = ?5,
                category = ?6,
                split_mode = ?7,
                party_a_owes_cents = ?8,
                party_b_owes_cents = ?9,
                settled = ?10,
                settled_at = ?11
             WHERE id = ?1",
            params![
                entry.id.to_string(),
                entry.paid_by.to_string(),
                entry.description,
                entry.amount_cents,
                entry.expense_date.format("%Y-%m-%d").to_string(),
                entry.category.key(),
                entry.split_mode.to_string(),
                entry.party_a_owes_cents,
                entry.party_b_owes_cents,
                entry.settled as i64,
                entry.settled_at.map(|at| at.to_rfc3339()),
            ],
        )?;
        Ok(())
    }
}

impl LedgerStore for SqliteStore {
    fn fetch_snapshot(&self) -> Result<LedgerSnapshot> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM entries ORDER BY expense_date DESC, created_at DESC",
            SELECT_COLUMNS
        ))?;
        let rows = stmt.query_map([], Self::row_from_sqlite)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(LedgerEntry::try_from(row?)?);
        }
        Ok(LedgerSnapshot::new(entries))
    }

    fn insert(&self, entry: &NewEntry) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let record = entry.clone().into_entry(id, Utc::now())?;

        {
            let conn = self.lock_conn()?;
            conn.execute(
                "INSERT INTO entries (
                    id, created_by, paid_by, description, amount_cents,
                    expense_date, created_at, category, split_mode,
                    party_a_owes_cents, party_b_owes_cents, settled, settled_at
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    record.id.to_string(),
                    record.created_by.to_string(),
                    record.paid_by.to_string(),
                    record.description,
                    record.amount_cents,
                    record.expense_date.format("%Y-%m-%d").to_string(),
                    record.created_at.to_rfc3339(),
                    record.category.key(),
                    record.split_mode.to_string(),
                    record.party_a_owes_cents,
                    record.party_b_owes_cents,
                    record.settled as i64,
                    record.settled_at.map(|at| at.to_rfc3339()),
                ],
            )?;
        }

        self.notify();
        Ok(id)
    }

    fn update(&self, id: &Uuid, patch: &EntryPatch) -> Result<()> {
        {
            let conn = self.lock_conn()?;
            let current = Self::get_entry(&conn, id)?
                .ok_or_else(|| TallyError::NotFound(format!("entry {}", id)))?;
            let updated = current.apply_patch(patch)?;
            Self::write_entry(&conn, &updated)?;
        }

        self.notify();
        Ok(())
    }

    fn delete(&self, id: &Uuid) -> Result<()> {
        {
            let conn = self.lock_conn()?;
            let affected =
                conn.execute("DELETE FROM entries WHERE id = ?", [id.to_string()])?;
            if affected == 0 {
                return Err(TallyError::NotFound(format!("entry {}", id)));
            }
        }

        self.notify();
        Ok(())
    }
}
