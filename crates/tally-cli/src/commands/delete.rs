//! Delete command handler.

use std::io::IsTerminal;

use dialoguer::Confirm;

use tally_core::money::format_cents;
use tally_core::storage::LedgerStore;

use crate::app::AppContext;
use crate::cli::DeleteArgs;
use crate::helpers::resolve_entry_id;
use crate::output::short_id;

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;

    let snapshot = store.fetch_snapshot()?;
    let id = resolve_entry_id(&snapshot, &args.id)?;
    let entry = snapshot
        .get(&id)
        .ok_or_else(|| anyhow::anyhow!("Entry {} not found", id))?;

    if !args.yes {
        if !std::io::stdin().is_terminal() {
            return Err(anyhow::anyhow!(
                "Refusing to delete without confirmation; pass --yes"
            ));
        }
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete \"{}\" ({}, {})?",
                entry.description,
                format_cents(entry.amount_cents),
                short_id(&entry.id)
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            return Ok(());
        }
    }

    store.delete(&id)?;

    if !ctx.quiet() {
        println!("Deleted {}.", short_id(&id));
    }
    Ok(())
}
