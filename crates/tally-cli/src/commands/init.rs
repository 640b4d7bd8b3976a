//! Init command handler: create the ledger and provision the parties.

use std::io::IsTerminal;
use std::path::PathBuf;

use dialoguer::Input;

use tally_core::storage::SqliteStore;

use crate::cli::InitArgs;
use crate::config::{default_config_path, default_ledger_path, write_config, TallyConfig};

fn prompt_name(label: &str, default: &str) -> anyhow::Result<String> {
    let name: String = Input::new()
        .with_prompt(format!("Display name for {}", label))
        .default(default.to_string())
        .interact_text()?;
    Ok(name)
}

pub fn handle_init(args: &InitArgs, quiet: bool) -> anyhow::Result<()> {
    let config_path = default_config_path()?;
    if config_path.exists() {
        return Err(anyhow::anyhow!(
            "Tally is already initialized ({}).",
            config_path.display()
        ));
    }

    let ledger_path = match args.path {
        Some(ref path) => PathBuf::from(path),
        None => default_ledger_path()?,
    };

    let interactive = std::io::stdin().is_terminal() && !args.no_input;

    let party_a = match (&args.party_a, interactive) {
        (Some(name), _) => name.clone(),
        (None, true) => prompt_name("party A (you)", "A")?,
        (None, false) => "A".to_string(),
    };
    let party_b = match (&args.party_b, interactive) {
        (Some(name), _) => name.clone(),
        (None, true) => prompt_name("party B", "B")?,
        (None, false) => "B".to_string(),
    };

    if party_a.trim().is_empty() || party_b.trim().is_empty() {
        return Err(anyhow::anyhow!("Party names must not be empty"));
    }
    if party_a.trim().to_lowercase() == party_b.trim().to_lowercase() {
        return Err(anyhow::anyhow!(
            "Party names must differ so they can be told apart"
        ));
    }

    SqliteStore::create(&ledger_path)?;

    let config = TallyConfig::new(ledger_path.clone(), party_a.clone(), party_b.clone());
    write_config(&config_path, &config)?;

    if !quiet {
        println!("Created ledger at {}", ledger_path.display());
        println!("Parties: {} (a) and {} (b)", party_a, party_b);
        println!("Add your first expense with `tally add`.");
    }
    Ok(())
}
