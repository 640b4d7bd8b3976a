//! Show command handler: one entry in full.

use tally_core::storage::LedgerStore;

use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::helpers::resolve_entry_id;
use crate::output::{entry_json, print_entry_detail};

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let config = ctx.config()?;

    let snapshot = store.fetch_snapshot()?;
    let id = resolve_entry_id(&snapshot, &args.id)?;
    let entry = snapshot
        .get(&id)
        .ok_or_else(|| anyhow::anyhow!("Entry {} not found", id))?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&entry_json(entry, config))?
        );
    } else {
        print_entry_detail(entry, config);
    }
    Ok(())
}
