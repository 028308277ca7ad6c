//! On-disk layout of raw snapshots and summaries.
//!
//! ```text
//! <data dir>/
//!   json/<player>.json        raw character document snapshot
//!   summary/<player>.json     per-player summary
//!   summary/party.json        party aggregate
//! ```
//!
//! Every file is rewritten whole. JSON is pretty-printed with a trailing
//! newline so reruns with the same input are byte-identical.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Roster;
use crate::error::{TallyError, TallyResult};
use crate::party::PartySummary;
use crate::summary::PlayerSummary;

const RAW_DIR: &str = "json";
const SUMMARY_DIR: &str = "summary";
const PARTY_FILE: &str = "party.json";

/// Reads and writes the pipeline's JSON files under one data directory.
#[derive(Debug, Clone)]
pub struct SummaryStore {
    root: PathBuf,
}

impl SummaryStore {
    /// A store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The data directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a player's raw snapshot.
    pub fn raw_path(&self, player: &str) -> PathBuf {
        self.root.join(RAW_DIR).join(format!("{player}.json"))
    }

    /// Path of a player's summary.
    pub fn summary_path(&self, player: &str) -> PathBuf {
        self.root.join(SUMMARY_DIR).join(format!("{player}.json"))
    }

    /// Path of the party aggregate.
    pub fn party_path(&self) -> PathBuf {
        self.root.join(SUMMARY_DIR).join(PARTY_FILE)
    }

    /// Overwrite a player's raw snapshot.
    pub fn write_raw(&self, player: &str, document: &serde_json::Value) -> TallyResult<PathBuf> {
        let path = self.raw_path(player);
        write_json(&path, document)?;
        tracing::debug!(player, path = %path.display(), "wrote raw snapshot");
        Ok(path)
    }

    /// Read a player's raw snapshot.
    pub fn read_raw(&self, player: &str) -> TallyResult<serde_json::Value> {
        let path = self.raw_path(player);
        if !path.exists() {
            return Err(TallyError::MissingSnapshot {
                player: player.to_string(),
                path,
            });
        }
        let text = read_text(&path)?;
        tracing::debug!(player, path = %path.display(), "read raw snapshot");
        serde_json::from_str(&text).map_err(|source| TallyError::MalformedDocument {
            player: player.to_string(),
            source,
        })
    }

    /// Overwrite a player's summary.
    pub fn write_summary(&self, player: &str, summary: &PlayerSummary) -> TallyResult<PathBuf> {
        let path = self.summary_path(player);
        write_json(&path, summary)?;
        tracing::info!(player, path = %path.display(), "wrote player summary");
        Ok(path)
    }

    /// Read a player's summary.
    pub fn read_summary(&self, player: &str) -> TallyResult<PlayerSummary> {
        let path = self.summary_path(player);
        if !path.exists() {
            return Err(TallyError::MissingSummary {
                player: player.to_string(),
                path,
            });
        }
        let text = read_text(&path)?;
        serde_json::from_str(&text).map_err(|source| TallyError::InvalidSummary {
            player: player.to_string(),
            source,
        })
    }

    /// Read the summary of every rostered player, in roster order.
    pub fn read_roster_summaries(&self, roster: &Roster) -> TallyResult<Vec<PlayerSummary>> {
        roster.players().map(|p| self.read_summary(p)).collect()
    }

    /// Overwrite the party aggregate.
    pub fn write_party(&self, party: &PartySummary) -> TallyResult<PathBuf> {
        let path = self.party_path();
        write_json(&path, party)?;
        tracing::info!(path = %path.display(), "wrote party summary");
        Ok(path)
    }

    /// Read the party aggregate.
    pub fn read_party(&self) -> TallyResult<PartySummary> {
        let path = self.party_path();
        let text = read_text(&path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

fn read_text(path: &Path) -> TallyResult<String> {
    fs::read_to_string(path).map_err(|source| TallyError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> TallyResult<()> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| TallyError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, text).map_err(|source| TallyError::Io {
        path: path.to_path_buf(),
        source,
    })
}
