//! Shared helpers for command handlers.

pub mod parsing;

pub use parsing::{
    parse_date, parse_party, parse_settled_state, parse_split, resolve_entry_id,
};
