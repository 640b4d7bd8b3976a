//! Output formatting helpers for the CLI.
//!
//! This module provides formatting utilities for displaying entries,
//! balances, and aggregates as tables or JSON.

mod json;
mod table;

// Re-export public API
pub use json::{balance_json, entries_json, entry_json, report_json};
pub use table::{print_entry_detail, print_entry_list, settled_badge, short_id};
