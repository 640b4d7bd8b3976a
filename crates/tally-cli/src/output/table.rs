//! Table and plain-text output formatting.

use std::io::IsTerminal;

use comfy_table::{presets::UTF8_BORDERS_ONLY, ContentArrangement, Table};
use owo_colors::OwoColorize;
use uuid::Uuid;

use tally_core::money::format_cents;
use tally_core::LedgerEntry;

use crate::config::TallyConfig;

/// Format a short ID from a UUID (first 8 characters).
pub fn short_id(id: &Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// Settlement status badge, colored when stdout is a terminal.
pub fn settled_badge(settled: bool) -> String {
    let color = std::io::stdout().is_terminal();
    match (settled, color) {
        (true, true) => "settled".green().to_string(),
        (true, false) => "settled".to_string(),
        (false, true) => "open".yellow().to_string(),
        (false, false) => "open".to_string(),
    }
}

/// Print a list of entries as a table.
pub fn print_entry_list(entries: &[LedgerEntry], config: &TallyConfig, quiet: bool) {
    if entries.is_empty() {
        if !quiet {
            println!("No entries.");
        }
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "ID", "Date", "Description", "Category", "Amount", "Paid by", "Status",
        ]);

    for entry in entries {
        table.add_row(vec![
            short_id(&entry.id),
            entry.expense_date.format("%Y-%m-%d").to_string(),
            entry.description.clone(),
            entry.category.to_string(),
            format_cents(entry.amount_cents),
            config.display_name(entry.paid_by).to_string(),
            settled_badge(entry.settled),
        ]);
    }

    println!("{}", table);
    if !quiet {
        println!(
            "{} entries. Run `tally show <id>` for details.",
            entries.len()
        );
    }
}

/// Print one entry in full as key/value lines.
pub fn print_entry_detail(entry: &LedgerEntry, config: &TallyConfig) {
    println!("id:           {}", entry.id);
    println!("description:  {}", entry.description);
    println!("amount:       {}", format_cents(entry.amount_cents));
    println!("date:         {}", entry.expense_date.format("%Y-%m-%d"));
    println!("category:     {}", entry.category);
    println!(
        "paid by:      {} ({})",
        config.display_name(entry.paid_by),
        entry.paid_by
    );
    println!(
        "recorded by:  {} ({})",
        config.display_name(entry.created_by),
        entry.created_by
    );
    println!("split:        {}", entry.split_mode);
    println!(
        "shares:       {} owes {}, {} owes {}",
        config.display_name(tally_core::Party::A),
        format_cents(entry.party_a_owes_cents),
        config.display_name(tally_core::Party::B),
        format_cents(entry.party_b_owes_cents),
    );
    println!("status:       {}", settled_badge(entry.settled));
    if let Some(at) = entry.settled_at {
        println!("settled at:   {}", at.format("%Y-%m-%d %H:%M UTC"));
    }
    println!("recorded at:  {}", entry.created_at.format("%Y-%m-%d %H:%M UTC"));
}
