use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use tally_core::VERSION;

/// Tally - a shared expense ledger for two people
#[derive(Parser)]
#[command(name = "tally")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the ledger file
    #[arg(short, long, global = true, env = "TALLY_LEDGER")]
    pub ledger: Option<String>,

    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the ledger will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Display name for party A (the ledger owner)
    #[arg(long, value_name = "NAME")]
    pub party_a: Option<String>,

    /// Display name for party B
    #[arg(long, value_name = "NAME")]
    pub party_b: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// What the expense was
    #[arg(value_name = "DESCRIPTION")]
    pub description: String,

    /// Total amount (decimal, e.g. 42.50)
    #[arg(short, long, value_name = "AMOUNT")]
    pub amount: String,

    /// Who fronted the money (party letter or provisioned name)
    #[arg(short, long, value_name = "PARTY")]
    pub paid_by: String,

    /// Who is recording the entry (defaults to the payer)
    #[arg(long, value_name = "PARTY")]
    pub recorded_by: Option<String>,

    /// Expense date (YYYY-MM-DD, defaults to today)
    #[arg(short, long, value_name = "DATE")]
    pub date: Option<String>,

    /// Category (food, gas-electric, wifi, household, fun, misc)
    #[arg(short, long, default_value = "misc")]
    pub category: String,

    /// Party A's share for a custom split (decimal)
    #[arg(long, value_name = "AMOUNT", requires = "share_b")]
    pub share_a: Option<String>,

    /// Party B's share for a custom split (decimal)
    #[arg(long, value_name = "AMOUNT", requires = "share_a")]
    pub share_b: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Search descriptions (case-insensitive substring)
    #[arg(value_name = "QUERY")]
    pub search: Option<String>,

    /// Filter by category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Filter by settlement state (settled, unsettled, any)
    #[arg(long, default_value = "any")]
    pub state: String,

    /// Earliest expense date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub since: Option<String>,

    /// Latest expense date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub until: Option<String>,

    /// Sort key (date, amount, category)
    #[arg(long, default_value = "date")]
    pub sort: String,

    /// Sort ascending instead of descending
    #[arg(long)]
    pub asc: bool,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Entry ID (full UUID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Entry ID (full UUID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New total amount (decimal)
    #[arg(short, long)]
    pub amount: Option<String>,

    /// New payer (party letter or provisioned name)
    #[arg(short, long)]
    pub paid_by: Option<String>,

    /// New expense date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    /// New category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Party A's share for a custom split (decimal)
    #[arg(long, value_name = "AMOUNT", requires = "share_b")]
    pub share_a: Option<String>,

    /// Party B's share for a custom split (decimal)
    #[arg(long, value_name = "AMOUNT", requires = "share_a")]
    pub share_b: Option<String>,

    /// Allow editing an entry that is already settled
    #[arg(long)]
    pub force: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Entry ID (full UUID or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `balance` command
#[derive(Args)]
pub struct BalanceArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `settle` command
#[derive(Args)]
pub struct SettleArgs {
    /// Entry IDs to settle (full UUIDs or unique prefixes)
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `summary` command
#[derive(Args)]
pub struct SummaryArgs {
    /// Group totals by (category, month)
    #[arg(long, default_value = "category")]
    pub by: String,

    /// Filter by settlement state before aggregating (settled, unsettled, any)
    #[arg(long, default_value = "any")]
    pub state: String,

    /// Earliest expense date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub since: Option<String>,

    /// Latest expense date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub until: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new shared ledger
    Init(InitArgs),

    /// Record a shared expense
    Add(AddArgs),

    /// List entries with filters and sorting
    List(ListArgs),

    /// Show a specific entry by ID
    Show(ShowArgs),

    /// Edit an existing entry
    Edit(EditArgs),

    /// Delete an entry
    Delete(DeleteArgs),

    /// Show who currently owes whom
    Balance(BalanceArgs),

    /// Mark entries as repaid
    Settle(SettleArgs),

    /// Spending totals by category or month
    Summary(SummaryArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
