//! Application context for the Tally CLI.
//!
//! Bundles CLI arguments with the loaded config so handlers don't thread
//! the same parameters around. The store is opened fresh per command; no
//! snapshot survives across invocations.

use std::path::PathBuf;

use tally_core::storage::SqliteStore;
use tally_core::PartyRegistry;

use crate::cli::Cli;
use crate::config::{default_config_path, read_config, TallyConfig};

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: Option<TallyConfig>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context, loading the config if it exists.
    pub fn new(cli: &'a Cli) -> anyhow::Result<Self> {
        let config_path = default_config_path()?;
        let config = if config_path.exists() {
            Some(read_config(&config_path)?)
        } else {
            None
        };
        Ok(Self { cli, config })
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// The loaded config, or an error pointing at `tally init`.
    pub fn config(&self) -> anyhow::Result<&TallyConfig> {
        self.config
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Tally is not initialized.\nHint: Run `tally init`."))
    }

    /// The ledger path: `--ledger` flag wins, then the config file.
    pub fn ledger_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(ref path) = self.cli.ledger {
            return Ok(PathBuf::from(path));
        }
        Ok(PathBuf::from(&self.config()?.ledger.path))
    }

    /// Open the ledger store.
    pub fn open_store(&self) -> anyhow::Result<SqliteStore> {
        let path = self.ledger_path()?;
        Ok(SqliteStore::open(&path)?)
    }

    /// The provisioned party registry from the config.
    pub fn registry(&self) -> anyhow::Result<PartyRegistry> {
        self.config()?.registry()
    }
}
