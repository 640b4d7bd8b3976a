//! Entry row type for database queries.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::entry::{Category, LedgerEntry, SplitMode};
use crate::error::{Result, TallyError};
use crate::party::Party;

/// Raw row data from the entries table, before parsing into domain types.
#[derive(Debug)]
pub struct EntryRow {
    pub id: String,
    pub created_by: String,
    pub paid_by: String,
    pub description: String,
    pub amount_cents: i64,
    pub expense_date: String,
    pub created_at: String,
    pub category: String,
    pub split_mode: String,
    pub party_a_owes_cents: i64,
    pub party_b_owes_cents: i64,
    pub settled: bool,
    pub settled_at: Option<String>,
}

fn parse_timestamp(value: &str, column: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| TallyError::Storage(format!("Invalid {} timestamp: {}", column, e)))
}

impl TryFrom<EntryRow> for LedgerEntry {
    type Error = TallyError;

    fn try_from(row: EntryRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| TallyError::Storage(format!("Invalid entry UUID: {}", e)))?;
        let created_by: Party = row
            .created_by
            .parse()
            .map_err(|_| TallyError::Storage(format!("Invalid created_by: {}", row.created_by)))?;
        let paid_by: Party = row
            .paid_by
            .parse()
            .map_err(|_| TallyError::Storage(format!("Invalid paid_by: {}", row.paid_by)))?;
        let expense_date = NaiveDate::parse_from_str(&row.expense_date, "%Y-%m-%d")
            .map_err(|e| TallyError::Storage(format!("Invalid expense_date: {}", e)))?;
        let created_at = parse_timestamp(&row.created_at, "created_at")?;
        let category: Category = row
            .category
            .parse()
            .map_err(|_| TallyError::Storage(format!("Invalid category: {}", row.category)))?;
        let split_mode: SplitMode = row
            .split_mode
            .parse()
            .map_err(|_| TallyError::Storage(format!("Invalid split_mode: {}", row.split_mode)))?;
        let settled_at = row
            .settled_at
            .as_deref()
            .map(|value| parse_timestamp(value, "settled_at"))
            .transpose()?;

        Ok(LedgerEntry {
            id,
            created_by,
            paid_by,
            description: row.description,
            amount_cents: row.amount_cents,
            expense_date,
            created_at,
            category,
            split_mode,
            party_a_owes_cents: row.party_a_owes_cents,
            party_b_owes_cents: row.party_b_owes_cents,
            settled: row.settled,
            settled_at,
        })
    }
}
