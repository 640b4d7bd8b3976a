//! List command handler: filtered and sorted views of the ledger.

use tally_core::query::{filter_entries, sort_entries, EntryFilter, SortDirection, SortKey};
use tally_core::storage::LedgerStore;

use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::helpers::{parse_date, parse_settled_state};
use crate::output::{entries_json, print_entry_list};

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let config = ctx.config()?;

    let mut filter = EntryFilter {
        search: args.search.clone(),
        settled: parse_settled_state(&args.state)?,
        ..EntryFilter::default()
    };
    if let Some(ref value) = args.category {
        filter.category = Some(value.parse()?);
    }
    if let Some(ref value) = args.since {
        filter.from = Some(parse_date(value)?);
    }
    if let Some(ref value) = args.until {
        filter.to = Some(parse_date(value)?);
    }

    let key: SortKey = args.sort.parse()?;
    let direction = if args.asc {
        SortDirection::Ascending
    } else {
        SortDirection::Descending
    };

    let snapshot = store.fetch_snapshot()?;
    let filtered = filter_entries(snapshot.entries(), &filter);
    let mut entries = sort_entries(&filtered, key, direction);
    if let Some(limit) = args.limit {
        entries.truncate(limit);
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&entries_json(&entries, config))?
        );
    } else {
        print_entry_list(&entries, config, ctx.quiet());
    }
    Ok(())
}
