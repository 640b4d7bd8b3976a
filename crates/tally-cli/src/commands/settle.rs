//! Settle command handler: single or batch settlement.

use chrono::Utc;
use uuid::Uuid;

use tally_core::reconcile::settle_many;
use tally_core::storage::LedgerStore;

use crate::app::AppContext;
use crate::cli::SettleArgs;
use crate::helpers::resolve_entry_id;
use crate::output::{report_json, short_id};

pub fn handle_settle(ctx: &AppContext, args: &SettleArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;

    let snapshot = store.fetch_snapshot()?;

    // Full UUIDs resolve even when absent from the snapshot, so stale ids
    // flow into the batch and come back as skipped instead of aborting it.
    // Only a prefix that matches nothing is a hard error.
    let mut ids: Vec<Uuid> = Vec::with_capacity(args.ids.len());
    for raw in &args.ids {
        ids.push(resolve_entry_id(&snapshot, raw)?);
    }

    let report = settle_many(&store, &snapshot, &ids, Utc::now())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report_json(&report))?);
        return Ok(());
    }

    if !ctx.quiet() {
        for id in &report.settled {
            println!("Settled {}.", short_id(id));
        }
        for id in &report.skipped {
            println!("Skipped {} (not in the ledger).", short_id(id));
        }
        if report.settled.is_empty() && report.skipped.is_empty() {
            println!("Nothing to settle.");
        }
    }
    Ok(())
}
