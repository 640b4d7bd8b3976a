//! Parsing helpers for dates, parties, splits, and entry ids.

use chrono::NaiveDate;
use uuid::Uuid;

use tally_core::money::to_cents;
use tally_core::{LedgerSnapshot, Party, PartyRegistry, Split};

/// Parse a calendar date (YYYY-MM-DD).
pub fn parse_date(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid date (expected YYYY-MM-DD): {}", value))
}

/// Resolve a party from user input: the literal "a"/"b" or a provisioned
/// display name (case-insensitive exact match).
///
/// Unlike identity resolution from an external system, a typo on the
/// command line should error rather than fall back silently.
pub fn parse_party(registry: &PartyRegistry, value: &str) -> anyhow::Result<Party> {
    if let Ok(party) = value.parse::<Party>() {
        return Ok(party);
    }
    registry
        .lookup(&value.trim().to_lowercase())
        .ok_or_else(|| anyhow::anyhow!("Unknown party: {} (use a provisioned name, or a/b)", value))
}

/// Parse a settlement state filter: settled, unsettled, or any.
pub fn parse_settled_state(value: &str) -> anyhow::Result<Option<bool>> {
    match value.trim().to_ascii_lowercase().as_str() {
        "settled" => Ok(Some(true)),
        "unsettled" | "open" => Ok(Some(false)),
        "any" | "all" => Ok(None),
        other => Err(anyhow::anyhow!(
            "Invalid state: {} (use settled, unsettled, any)",
            other
        )),
    }
}

/// Build a split policy from optional custom share flags.
///
/// Both shares present means a custom split; neither means even. clap
/// enforces that the flags come in pairs.
pub fn parse_split(share_a: Option<&str>, share_b: Option<&str>) -> anyhow::Result<Split> {
    match (share_a, share_b) {
        (Some(a), Some(b)) => Ok(Split::Custom {
            share_a_cents: to_cents(a)?,
            share_b_cents: to_cents(b)?,
        }),
        (None, None) => Ok(Split::Even),
        _ => Err(anyhow::anyhow!(
            "Custom splits need both --share-a and --share-b"
        )),
    }
}

/// Resolve an entry id from a full UUID or a unique prefix against the
/// snapshot.
pub fn resolve_entry_id(snapshot: &LedgerSnapshot, value: &str) -> anyhow::Result<Uuid> {
    let needle = value.trim().to_lowercase();
    if let Ok(id) = Uuid::parse_str(&needle) {
        return Ok(id);
    }

    let matches: Vec<Uuid> = snapshot
        .iter()
        .map(|entry| entry.id)
        .filter(|id| id.to_string().starts_with(&needle))
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(anyhow::anyhow!(
            "No entry matches id {}.\nHint: Run `tally list` to see entry IDs.",
            value
        )),
        _ => Err(anyhow::anyhow!(
            "Entry id {} is ambiguous ({} matches); use more characters",
            value,
            matches.len()
        )),
    }
}
