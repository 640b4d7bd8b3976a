//! Add command handler: record a shared expense.

use chrono::Utc;

use tally_core::money::{format_cents, to_cents};
use tally_core::storage::LedgerStore;
use tally_core::NewEntry;

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::helpers::{parse_date, parse_party, parse_split};
use crate::output::{entry_json, short_id};

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let registry = ctx.registry()?;
    let config = ctx.config()?;

    let amount_cents = to_cents(&args.amount)?;
    let paid_by = parse_party(&registry, &args.paid_by)?;
    let created_by = match args.recorded_by {
        Some(ref value) => parse_party(&registry, value)?,
        None => paid_by,
    };
    let expense_date = match args.date {
        Some(ref value) => parse_date(value)?,
        None => Utc::now().date_naive(),
    };
    let category = args.category.parse()?;
    let split = parse_split(args.share_a.as_deref(), args.share_b.as_deref())?;

    let draft = NewEntry::new(
        created_by,
        paid_by,
        args.description.clone(),
        amount_cents,
        expense_date,
        category,
        split,
    );
    draft.validate()?;

    let id = store.insert(&draft)?;
    let snapshot = store.fetch_snapshot()?;
    let entry = snapshot
        .get(&id)
        .ok_or_else(|| anyhow::anyhow!("Entry vanished after insert"))?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&entry_json(entry, config))?
        );
    } else if !ctx.quiet() {
        println!(
            "Recorded {} for {} ({}), paid by {}.",
            format_cents(entry.amount_cents),
            entry.description,
            short_id(&entry.id),
            config.display_name(entry.paid_by),
        );
    }
    Ok(())
}
