//! Ledger entry data model and validation.
//!
//! These types mirror the stored record: `LedgerEntry` is what the store
//! returns, `NewEntry` is the draft a caller builds before insertion, and
//! `EntryPatch` describes an edit. Validation is pure and never touches
//! the store.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, TallyError};
use crate::party::Party;
use crate::split::Split;

/// Expense category. The set is closed and the declaration order is the
/// tie-break order for aggregation, so do not reorder variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Food,
    GasElectric,
    WiFi,
    Household,
    Fun,
    Misc,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::GasElectric,
        Category::WiFi,
        Category::Household,
        Category::Fun,
        Category::Misc,
    ];

    /// Position in the declaration order, used as an aggregation tie-break.
    pub fn ordinal(&self) -> usize {
        Category::ALL
            .iter()
            .position(|c| c == self)
            .unwrap_or(Category::ALL.len())
    }

    /// Stable machine key, used for storage and JSON output.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::GasElectric => "gas-electric",
            Category::WiFi => "wifi",
            Category::Household => "household",
            Category::Fun => "fun",
            Category::Misc => "misc",
        }
    }

    /// User-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::GasElectric => "Gas & Electric",
            Category::WiFi => "WiFi",
            Category::Household => "Household",
            Category::Fun => "Fun",
            Category::Misc => "Misc",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "food" => Ok(Category::Food),
            "gas-electric" | "gas" | "electric" => Ok(Category::GasElectric),
            "wifi" => Ok(Category::WiFi),
            "household" => Ok(Category::Household),
            "fun" => Ok(Category::Fun),
            "misc" => Ok(Category::Misc),
            other => Err(TallyError::Validation(format!(
                "unknown category: {} (use food, gas-electric, wifi, household, fun, misc)",
                other
            ))),
        }
    }
}

/// How the entry's cost was divided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    Even,
    Custom,
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitMode::Even => write!(f, "even"),
            SplitMode::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for SplitMode {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "even" => Ok(SplitMode::Even),
            "custom" => Ok(SplitMode::Custom),
            other => Err(TallyError::Validation(format!(
                "unknown split mode: {} (use even or custom)",
                other
            ))),
        }
    }
}

/// One shared cost as stored in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier, store-assigned, immutable
    pub id: Uuid,

    /// Party who recorded the entry (immutable)
    pub created_by: Party,

    /// Party who fronted the money
    pub paid_by: Party,

    /// What the expense was
    pub description: String,

    /// Total cost in cents (always positive)
    pub amount_cents: i64,

    /// Calendar date of the expense (distinct from record creation time)
    pub expense_date: NaiveDate,

    /// Record creation timestamp, store-assigned, immutable
    pub created_at: DateTime<Utc>,

    /// Expense category
    pub category: Category,

    /// How the cost was divided
    pub split_mode: SplitMode,

    /// Party A's share of the cost in cents
    pub party_a_owes_cents: i64,

    /// Party B's share of the cost in cents
    pub party_b_owes_cents: i64,

    /// Whether the entry's debt has been repaid
    pub settled: bool,

    /// When the entry was settled; present iff `settled`
    pub settled_at: Option<DateTime<Utc>>,
}

impl LedgerEntry {
    /// Check the record-level invariants.
    ///
    /// Shares must reconcile to the total within the custom-split tolerance
    /// and the settlement flag must agree with its timestamp.
    pub fn check_invariants(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(TallyError::Validation(
                "description must not be empty".to_string(),
            ));
        }
        if self.amount_cents <= 0 {
            return Err(TallyError::InvalidAmount(format!(
                "amount must be positive, got {} cents",
                self.amount_cents
            )));
        }
        if self.party_a_owes_cents < 0 || self.party_b_owes_cents < 0 {
            return Err(TallyError::Validation(
                "split shares must be non-negative".to_string(),
            ));
        }
        let diff = (self.party_a_owes_cents + self.party_b_owes_cents - self.amount_cents).abs();
        if diff > crate::split::CUSTOM_SPLIT_TOLERANCE_CENTS {
            return Err(TallyError::SplitMismatch {
                total_cents: self.amount_cents,
                share_a_cents: self.party_a_owes_cents,
                share_b_cents: self.party_b_owes_cents,
            });
        }
        if self.settled != self.settled_at.is_some() {
            return Err(TallyError::Validation(
                "settled flag and settled_at timestamp disagree".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply an edit, producing the patched record.
    ///
    /// `id`, `created_by`, and `created_at` never change. Changing the
    /// amount of a custom-split entry requires new shares in the same
    /// patch, otherwise the old shares could silently stop reconciling.
    /// The result is re-validated before being returned.
    pub fn apply_patch(&self, patch: &EntryPatch) -> Result<LedgerEntry> {
        let mut updated = self.clone();

        if let Some(paid_by) = patch.paid_by {
            updated.paid_by = paid_by;
        }
        if let Some(ref description) = patch.description {
            updated.description = description.clone();
        }
        if let Some(expense_date) = patch.expense_date {
            updated.expense_date = expense_date;
        }
        if let Some(category) = patch.category {
            updated.category = category;
        }
        if let Some(amount_cents) = patch.amount_cents {
            updated.amount_cents = amount_cents;
        }

        match (patch.split, patch.amount_cents) {
            (Some(split), _) => {
                let (a, b) = split.shares(updated.amount_cents)?;
                updated.split_mode = split.mode();
                updated.party_a_owes_cents = a;
                updated.party_b_owes_cents = b;
            }
            (None, Some(_)) => match updated.split_mode {
                SplitMode::Even => {
                    let (a, b) = Split::Even.shares(updated.amount_cents)?;
                    updated.party_a_owes_cents = a;
                    updated.party_b_owes_cents = b;
                }
                SplitMode::Custom => {
                    return Err(TallyError::Validation(
                        "changing the amount of a custom-split entry requires new shares"
                            .to_string(),
                    ));
                }
            },
            (None, None) => {}
        }

        match patch.settlement {
            Some(SettlementPatch::Settle(at)) => {
                // Idempotent: an already-settled entry keeps its timestamp
                if !updated.settled {
                    updated.settled = true;
                    updated.settled_at = Some(at);
                }
            }
            Some(SettlementPatch::Reopen) => {
                updated.settled = false;
                updated.settled_at = None;
            }
            None => {}
        }

        updated.check_invariants()?;
        Ok(updated)
    }
}

/// Draft for a new ledger entry.
///
/// The store assigns `id` and `created_at` on insert; everything else is
/// caller-supplied. Validation and share computation are pure so they can
/// be tested without any persistence.
#[derive(Debug, Clone)]
pub struct NewEntry {
    /// Party recording the entry
    pub created_by: Party,

    /// Party who fronted the money
    pub paid_by: Party,

    /// What the expense was
    pub description: String,

    /// Total cost in cents
    pub amount_cents: i64,

    /// Calendar date of the expense
    pub expense_date: NaiveDate,

    /// Expense category
    pub category: Category,

    /// How to divide the cost
    pub split: Split,
}

impl NewEntry {
    pub fn new(
        created_by: Party,
        paid_by: Party,
        description: impl Into<String>,
        amount_cents: i64,
        expense_date: NaiveDate,
        category: Category,
        split: Split,
    ) -> Self {
        Self {
            created_by,
            paid_by,
            description: description.into(),
            amount_cents,
            expense_date,
            category,
            split,
        }
    }

    /// Validate the draft without touching any store.
    ///
    /// Checks description, amount, and that the split reconciles to the
    /// total within tolerance.
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(TallyError::Validation(
                "description must not be empty".to_string(),
            ));
        }
        if self.amount_cents <= 0 {
            return Err(TallyError::InvalidAmount(format!(
                "amount must be positive, got {} cents",
                self.amount_cents
            )));
        }
        self.split.shares(self.amount_cents)?;
        Ok(())
    }

    /// Turn a validated draft into a full record with store-assigned fields.
    pub fn into_entry(self, id: Uuid, created_at: DateTime<Utc>) -> Result<LedgerEntry> {
        self.validate()?;
        let (party_a_owes_cents, party_b_owes_cents) = self.split.shares(self.amount_cents)?;
        Ok(LedgerEntry {
            id,
            created_by: self.created_by,
            paid_by: self.paid_by,
            description: self.description.trim().to_string(),
            amount_cents: self.amount_cents,
            expense_date: self.expense_date,
            created_at,
            category: self.category,
            split_mode: self.split.mode(),
            party_a_owes_cents,
            party_b_owes_cents,
            settled: false,
            settled_at: None,
        })
    }
}

/// Settlement transition carried by a patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementPatch {
    /// Mark settled at the given instant (no-op if already settled)
    Settle(DateTime<Utc>),
    /// Clear the settled flag and timestamp
    Reopen,
}

/// Partial update for an existing entry. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub paid_by: Option<Party>,
    pub description: Option<String>,
    pub amount_cents: Option<i64>,
    pub expense_date: Option<NaiveDate>,
    pub category: Option<Category>,
    pub split: Option<Split>,
    pub settlement: Option<SettlementPatch>,
}

impl EntryPatch {
    /// A patch that marks the entry settled at the given instant.
    pub fn settle_at(at: DateTime<Utc>) -> Self {
        Self {
            settlement: Some(SettlementPatch::Settle(at)),
            ..Self::default()
        }
    }
}
