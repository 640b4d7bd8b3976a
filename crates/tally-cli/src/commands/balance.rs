//! Balance command handler: who currently owes whom.

use tally_core::money::format_cents;
use tally_core::reconcile::{net_balance, NetBalance};
use tally_core::storage::LedgerStore;

use crate::app::AppContext;
use crate::cli::BalanceArgs;
use crate::output::balance_json;

pub fn handle_balance(ctx: &AppContext, args: &BalanceArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let config = ctx.config()?;

    let snapshot = store.fetch_snapshot()?;
    let balance = net_balance(&snapshot);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&balance_json(&balance, config))?
        );
        return Ok(());
    }

    match balance {
        NetBalance::Settled => println!("All settled up."),
        NetBalance::Outstanding {
            owing,
            owed,
            amount_cents,
        } => println!(
            "{} owes {} {}.",
            config.display_name(owing),
            config.display_name(owed),
            format_cents(amount_cents),
        ),
    }
    Ok(())
}
