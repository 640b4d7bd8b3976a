//! CLI configuration file handling.
//!
//! The config lives in the XDG config directory and records the ledger
//! path plus the two provisioned parties. Party assignment happens once
//! here at init time; commands resolve names through the registry built
//! from this file, never by matching display names at runtime.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use tally_core::{Party, PartyRegistry};

#[derive(Debug, Serialize, Deserialize)]
pub struct TallyConfig {
    pub ledger: LedgerSection,
    pub parties: PartiesSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LedgerSection {
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PartiesSection {
    /// Display name for party A
    pub a: String,

    /// Display name for party B
    pub b: String,

    /// Party used when a name cannot be resolved ("a" or "b")
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

fn default_fallback() -> String {
    "a".to_string()
}

impl TallyConfig {
    pub fn new(ledger_path: PathBuf, party_a: String, party_b: String) -> Self {
        Self {
            ledger: LedgerSection {
                path: ledger_path.to_string_lossy().to_string(),
            },
            parties: PartiesSection {
                a: party_a,
                b: party_b,
                fallback: default_fallback(),
            },
        }
    }

    /// Build the provisioned party registry from the config.
    ///
    /// Names are registered lowercased so resolution is case-insensitive
    /// exact lookup, plus the literal "a"/"b" shorthands.
    pub fn registry(&self) -> anyhow::Result<PartyRegistry> {
        let fallback: Party = self
            .parties
            .fallback
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid fallback party: {}", self.parties.fallback))?;

        let mut registry = PartyRegistry::new(fallback);
        registry.assign(self.parties.a.trim().to_lowercase(), Party::A);
        registry.assign(self.parties.b.trim().to_lowercase(), Party::B);
        Ok(registry)
    }

    /// Display name for a party.
    pub fn display_name(&self, party: Party) -> &str {
        match party {
            Party::A => &self.parties.a,
            Party::B => &self.parties.b,
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_ledger_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("shared.tally"))
}

pub fn read_config(path: &Path) -> anyhow::Result<TallyConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &TallyConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("tally"));
        }
    }
    Ok(home_dir()?.join(".config").join("tally"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("tally"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("tally"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
