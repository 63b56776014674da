//! Application configuration loaded from `tournament.toml`

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tourney_core::RoundCount;

/// Default location of the configuration file
pub const CONFIG_FILE: &str = "tournament.toml";

/// Settings shared by every subcommand.
///
/// Every field is optional in the file; missing fields fall back to the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding one JSON file per tournament
    pub data_dir: PathBuf,
    /// Player registry participants are enrolled from
    pub players_file: PathBuf,
    /// Round count policy for new tournaments
    pub round_count: RoundCount,
    /// Fixed seed for the pairing tie-break (None = random each run)
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/tournaments"),
            players_file: PathBuf::from("data/players.json"),
            round_count: RoundCount::RoundRobin,
            seed: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file. A missing file yields defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents)
                .with_context(|| format!("Failed to parse {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
