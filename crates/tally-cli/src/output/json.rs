//! JSON output formatting.

use tally_core::money::format_cents;
use tally_core::reconcile::{NetBalance, SettlementReport};
use tally_core::LedgerEntry;

use crate::config::TallyConfig;

/// Convert an entry to JSON for output.
pub fn entry_json(entry: &LedgerEntry, config: &TallyConfig) -> serde_json::Value {
    serde_json::json!({
        "id": entry.id,
        "created_by": entry.created_by,
        "paid_by": entry.paid_by,
        "paid_by_name": config.display_name(entry.paid_by),
        "description": entry.description,
        "amount_cents": entry.amount_cents,
        "amount": format_cents(entry.amount_cents),
        "expense_date": entry.expense_date.format("%Y-%m-%d").to_string(),
        "created_at": entry.created_at,
        "category": entry.category.key(),
        "split_mode": entry.split_mode,
        "party_a_owes_cents": entry.party_a_owes_cents,
        "party_b_owes_cents": entry.party_b_owes_cents,
        "settled": entry.settled,
        "settled_at": entry.settled_at,
    })
}

/// Convert multiple entries to a JSON array for output.
pub fn entries_json(entries: &[LedgerEntry], config: &TallyConfig) -> Vec<serde_json::Value> {
    entries
        .iter()
        .map(|entry| entry_json(entry, config))
        .collect()
}

/// Convert a net balance to JSON for output.
pub fn balance_json(balance: &NetBalance, config: &TallyConfig) -> serde_json::Value {
    match balance {
        NetBalance::Settled => serde_json::json!({
            "settled": true,
            "amount_cents": 0,
        }),
        NetBalance::Outstanding {
            owing,
            owed,
            amount_cents,
        } => serde_json::json!({
            "settled": false,
            "owing": owing,
            "owing_name": config.display_name(*owing),
            "owed": owed,
            "owed_name": config.display_name(*owed),
            "amount_cents": amount_cents,
            "amount": format_cents(*amount_cents),
        }),
    }
}

/// Convert a settlement report to JSON for output.
pub fn report_json(report: &SettlementReport) -> serde_json::Value {
    serde_json::json!({
        "settled": report.settled,
        "skipped": report.skipped,
        "complete": report.is_complete(),
    })
}
