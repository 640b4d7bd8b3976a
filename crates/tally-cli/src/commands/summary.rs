//! Summary command handler: spending totals by category or month.

use tally_core::money::format_cents;
use tally_core::query::{aggregate_by_category, aggregate_by_month, filter_entries, EntryFilter};
use tally_core::storage::LedgerStore;

use crate::app::AppContext;
use crate::cli::SummaryArgs;
use crate::helpers::{parse_date, parse_settled_state};

pub fn handle_summary(ctx: &AppContext, args: &SummaryArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;

    let mut filter = EntryFilter {
        settled: parse_settled_state(&args.state)?,
        ..EntryFilter::default()
    };
    if let Some(ref value) = args.since {
        filter.from = Some(parse_date(value)?);
    }
    if let Some(ref value) = args.until {
        filter.to = Some(parse_date(value)?);
    }

    let snapshot = store.fetch_snapshot()?;
    let entries = filter_entries(snapshot.entries(), &filter);

    match args.by.trim().to_ascii_lowercase().as_str() {
        "category" => {
            let totals = aggregate_by_category(&entries);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&totals)?);
            } else if totals.is_empty() {
                println!("No entries.");
            } else {
                for total in &totals {
                    println!(
                        "{:<16} {}",
                        total.category.to_string(),
                        format_cents(total.total_cents)
                    );
                }
            }
        }
        "month" => {
            let totals = aggregate_by_month(&entries);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&totals)?);
            } else if totals.is_empty() {
                println!("No entries.");
            } else {
                for total in &totals {
                    println!("{}  {}", total.year_month, format_cents(total.total_cents));
                }
            }
        }
        other => {
            return Err(anyhow::anyhow!(
                "Invalid summary grouping: {} (use category or month)",
                other
            ))
        }
    }
    Ok(())
}
