//! Player registry ingestion
//!
//! The registry is a JSON array of player entries maintained outside this
//! tool. Entries are read once, when a tournament is created, and copied
//! into participant snapshots. Nothing is ever written back.

use std::path::Path;

use anyhow::{Context, bail};
use serde::Deserialize;
use tourney_core::{ParticipantId, ParticipantSnapshot};

/// A registry entry. Fields other than these are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryEntry {
    #[serde(alias = "national_id")]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub birthdate: Option<String>,
}

impl RegistryEntry {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }
}

/// Load the raw registry entries, as stored.
pub fn load_entries(path: &Path) -> anyhow::Result<Vec<RegistryEntry>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read player registry {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid player registry {}", path.display()))
}

/// Load every player in the registry file as a participant snapshot.
pub fn load_registry(path: &Path) -> anyhow::Result<Vec<ParticipantSnapshot>> {
    into_snapshots(load_entries(path)?)
        .with_context(|| format!("Invalid player registry {}", path.display()))
}

pub fn parse_registry(contents: &str) -> anyhow::Result<Vec<ParticipantSnapshot>> {
    into_snapshots(serde_json::from_str(contents)?)
}

fn into_snapshots(entries: Vec<RegistryEntry>) -> anyhow::Result<Vec<ParticipantSnapshot>> {
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Ok(ParticipantSnapshot::new(id, entry.display_name())),
            _ => bail!("player #{} ({}) has no id", index + 1, entry.display_name()),
        })
        .collect()
}

/// Pick the requested ids out of the registry, in the requested order.
/// An empty request selects everyone.
pub fn select(
    registry: Vec<ParticipantSnapshot>,
    ids: &[String],
) -> anyhow::Result<Vec<ParticipantSnapshot>> {
    if ids.is_empty() {
        return Ok(registry);
    }

    ids.iter()
        .map(|id| {
            let id = ParticipantId::new(id.as_str());
            registry
                .iter()
                .find(|snapshot| snapshot.id == id)
                .cloned()
                .with_context(|| format!("player '{id}' is not in the registry"))
        })
        .collect()
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod registry_tests;
