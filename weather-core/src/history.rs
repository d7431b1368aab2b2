//! Bounded search history persisted as a pretty-printed JSON file.
//!
//! The whole log is read at startup and rewritten on every append:
//!
//! ```json
//! {
//!   "searches": [
//!     { "time": "2026-10-19 08:15", "city": "London", "summary": "15.2°C, Clear Sky" }
//!   ]
//! }
//! ```

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::error::HistoryError;

/// Maximum number of entries kept on disk.
pub const MAX_ENTRIES: usize = 20;

/// Number of entries shown by the history view.
pub const DEFAULT_RECENT: usize = 5;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One logged search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub time: String,
    pub city: String,
    pub summary: String,
}

impl HistoryEntry {
    /// Entry stamped with the current local time, minute precision.
    pub fn now(city: &str, summary: &str) -> Self {
        Self::at(Local::now().format(TIME_FORMAT).to_string(), city, summary)
    }

    pub fn at(time: String, city: &str, summary: &str) -> Self {
        Self {
            time,
            city: city.to_string(),
            summary: summary.replace('\n', " ").trim().to_string(),
        }
    }
}

/// Chronological list of searches, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLog {
    #[serde(default)]
    searches: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.searches
    }

    pub fn len(&self) -> usize {
        self.searches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.searches.is_empty()
    }

    /// Up to `n` entries, most recent first. Empty when there is no history.
    pub fn recent(&self, n: usize) -> Vec<&HistoryEntry> {
        self.searches.iter().rev().take(n).collect()
    }

    fn push(&mut self, entry: HistoryEntry) {
        self.searches.push(entry);
        self.enforce_cap();
    }

    /// Drop the oldest entries beyond [`MAX_ENTRIES`].
    fn enforce_cap(&mut self) {
        if self.searches.len() > MAX_ENTRIES {
            let excess = self.searches.len() - MAX_ENTRIES;
            self.searches.drain(..excess);
        }
    }
}

/// Owns the history file location; the only way to read or write the log.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the log from disk. A missing file is an empty log; a file with
    /// more than [`MAX_ENTRIES`] searches keeps only the newest.
    pub fn load(&self) -> Result<HistoryLog, HistoryError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No history file yet");
                return Ok(HistoryLog::default());
            }
            Err(source) => {
                return Err(HistoryError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let mut log: HistoryLog =
            serde_json::from_str(&contents).map_err(|source| HistoryError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        log.enforce_cap();

        Ok(log)
    }

    /// Append `entry`, drop the oldest entries beyond [`MAX_ENTRIES`] and
    /// rewrite the whole file.
    ///
    /// The in-memory log is updated even when the write fails.
    pub fn append(&self, log: &mut HistoryLog, entry: HistoryEntry) -> Result<(), HistoryError> {
        log.push(entry);
        self.save(log)
    }

    fn save(&self, log: &HistoryLog) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| HistoryError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(log)?;

        fs::write(&self.path, json).map_err(|source| HistoryError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), entries = log.len(), "History saved");
        Ok(())
    }
}
