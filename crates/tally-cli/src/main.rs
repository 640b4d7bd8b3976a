//! Tally CLI - a shared expense ledger for two people.
//!
//! This is the command-line interface for Tally. It provides a
//! user-friendly surface over the core reconciliation and query engines;
//! every command opens the store fresh and works on a snapshot fetched at
//! that moment.

mod app;
mod cli;
mod commands;
mod config;
mod helpers;
mod output;

use clap::Parser;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{add, balance, delete, edit, init, list, misc, settle, show, summary};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    // Init runs before a config exists; everything else needs the context.
    if let Commands::Init(ref args) = cli.command {
        return init::handle_init(args, cli.quiet);
    }
    if let Commands::Completions(ref args) = cli.command {
        return misc::handle_completions(args.shell);
    }

    let ctx = AppContext::new(cli)?;
    match &cli.command {
        Commands::Init(_) | Commands::Completions(_) => unreachable!("handled above"),
        Commands::Add(args) => add::handle_add(&ctx, args),
        Commands::List(args) => list::handle_list(&ctx, args),
        Commands::Show(args) => show::handle_show(&ctx, args),
        Commands::Edit(args) => edit::handle_edit(&ctx, args),
        Commands::Delete(args) => delete::handle_delete(&ctx, args),
        Commands::Balance(args) => balance::handle_balance(&ctx, args),
        Commands::Settle(args) => settle::handle_settle(&ctx, args),
        Commands::Summary(args) => summary::handle_summary(&ctx, args),
    }
}
