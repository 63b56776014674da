//! File-based tournament store.
//!
//! Each tournament is stored as `<dir>/<slug>.json`, where the slug is
//! derived from the tournament name.
//!
//! # Atomic Writes
//!
//! Saves use a write-to-temp-then-rename pattern:
//! 1. Write to `<slug>.json.tmp`
//! 2. fsync the file
//! 3. Rename over `<slug>.json`
//! 4. fsync the directory
//!
//! A failed save leaves the previously saved file untouched.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::error::TournamentError;
use crate::record::TournamentRecord;
use crate::tournament::{Tournament, TournamentStatus};

/// Errors that can occur while saving or loading tournaments.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The stored record failed validation.
    #[error(transparent)]
    Tournament(#[from] TournamentError),

    #[error("no stored tournament named '{0}'")]
    NotFound(String),
}

/// Summary of a stored tournament, read without resuming it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTournament {
    pub name: String,
    pub path: PathBuf,
    pub status: TournamentStatus,
    pub current_round: u32,
    pub total_rounds: u32,
    pub participants: usize,
}

/// Directory of saved tournaments.
#[derive(Debug, Clone)]
pub struct TournamentStore {
    dir: PathBuf,
}

impl TournamentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File a tournament with this name is saved to.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", slug(name)))
    }

    /// Save the tournament atomically, replacing any previous save.
    pub fn save(&self, tournament: &Tournament) -> Result<PathBuf, StoreError> {
        let path = self.path_for(tournament.name());
        let bytes = serde_json::to_vec_pretty(&tournament.to_record())?;
        write_atomic(&path, &bytes)?;
        debug!(path = %path.display(), status = %tournament.status(), "tournament saved");
        Ok(path)
    }

    /// Load and validate a saved tournament, rebuilding its pairing history.
    pub fn load(&self, name: &str) -> Result<Tournament, StoreError> {
        let path = self.path_for(name);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let record: TournamentRecord = serde_json::from_slice(&bytes)?;
        Ok(Tournament::from_record(record)?)
    }

    /// Summaries of every readable tournament in the store, sorted by name.
    ///
    /// Files that cannot be parsed are skipped with a warning.
    pub fn list(&self) -> Result<Vec<StoredTournament>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut stored = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            match read_summary(&path) {
                Ok(summary) => stored.push(summary),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable tournament"),
            }
        }
        stored.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(stored)
    }

    /// Stored tournaments that can be resumed.
    pub fn in_progress(&self) -> Result<Vec<StoredTournament>, StoreError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|t| t.status != TournamentStatus::Completed)
            .collect())
    }
}

fn read_summary(path: &Path) -> Result<StoredTournament, StoreError> {
    let record: TournamentRecord = serde_json::from_slice(&fs::read(path)?)?;
    Ok(StoredTournament {
        name: record.name,
        path: path.to_path_buf(),
        status: record.status,
        current_round: record.current_round,
        total_rounds: record.total_rounds,
        participants: record.participants.len(),
    })
}

/// Lowercase ASCII alphanumerics, with every other run of characters
/// collapsed to a single `-`.
pub fn slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("tournament");
    }
    slug
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("json.tmp");
    {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    if let Some(parent) = path.parent() {
        fsync_dir(parent)?;
    }
    Ok(())
}

#[cfg(unix)]
fn fsync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
