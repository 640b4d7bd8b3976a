//! Edit command handler: patch an existing entry.
//!
//! The data model allows editing a settled entry; this command is where
//! that policy decision lands, behind `--force`.

use tally_core::money::to_cents;
use tally_core::storage::LedgerStore;
use tally_core::{EntryPatch, Split};

use crate::app::AppContext;
use crate::cli::EditArgs;
use crate::helpers::{parse_date, parse_party, resolve_entry_id};
use crate::output::{entry_json, print_entry_detail};

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let registry = ctx.registry()?;
    let config = ctx.config()?;

    let snapshot = store.fetch_snapshot()?;
    let id = resolve_entry_id(&snapshot, &args.id)?;
    let current = snapshot
        .get(&id)
        .ok_or_else(|| anyhow::anyhow!("Entry {} not found", id))?;

    if current.settled && !args.force {
        return Err(anyhow::anyhow!(
            "Entry {} is already settled; pass --force to edit it anyway",
            args.id
        ));
    }

    let mut patch = EntryPatch::default();
    if let Some(ref value) = args.description {
        patch.description = Some(value.clone());
    }
    if let Some(ref value) = args.amount {
        patch.amount_cents = Some(to_cents(value)?);
    }
    if let Some(ref value) = args.paid_by {
        patch.paid_by = Some(parse_party(&registry, value)?);
    }
    if let Some(ref value) = args.date {
        patch.expense_date = Some(parse_date(value)?);
    }
    if let Some(ref value) = args.category {
        patch.category = Some(value.parse()?);
    }
    if let (Some(a), Some(b)) = (&args.share_a, &args.share_b) {
        patch.split = Some(Split::Custom {
            share_a_cents: to_cents(a)?,
            share_b_cents: to_cents(b)?,
        });
    }

    store.update(&id, &patch)?;

    let refreshed = store.fetch_snapshot()?;
    let entry = refreshed
        .get(&id)
        .ok_or_else(|| anyhow::anyhow!("Entry {} not found after update", id))?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&entry_json(entry, config))?
        );
    } else if !ctx.quiet() {
        print_entry_detail(entry, config);
    }
    Ok(())
}
