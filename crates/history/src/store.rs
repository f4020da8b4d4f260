use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dealherald_core::Result;
use thiserror::Error;

use crate::record::HistoryRecord;

/// Why a load fell back to an empty record.
#[derive(Debug, Error)]
pub enum LoadFailure {
    /// No history file yet. Normal on the first run.
    #[error("history file does not exist")]
    Missing,

    #[error("history file could not be read: {0}")]
    Unreadable(#[source] io::Error),

    #[error("history file could not be parsed: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// Result of loading the history file.
///
/// Loading never fails outright: a corrupted history must not block new
/// postings, so every failure recovers to an empty record. The cause is
/// carried so callers and tests can observe the recovery path instead of
/// relying on log output.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The file existed and parsed cleanly.
    Loaded(HistoryRecord),
    /// The file was absent, unreadable, or malformed; `record` is empty
    /// with `last_rotation` set to now.
    Recovered { record: HistoryRecord, cause: LoadFailure },
}

impl LoadOutcome {
    /// The usable record, whichever way the load went.
    #[must_use]
    pub fn into_record(self) -> HistoryRecord {
        match self {
            Self::Loaded(record) | Self::Recovered { record, .. } => record,
        }
    }

    #[must_use]
    pub fn is_recovered(&self) -> bool {
        matches!(self, Self::Recovered { .. })
    }
}

/// Handle on the single flat file holding the posted-deal history.
///
/// No locking, no atomic rename: the whole file is overwritten on save.
/// Two processes writing concurrently race with last-writer-wins.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted record. Fail-open: any failure yields an empty
    /// record stamped with `now_ms` instead of an error.
    #[must_use]
    pub fn load(&self, now_ms: i64) -> LoadOutcome {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no history file yet, starting empty");
                return LoadOutcome::Recovered {
                    record: HistoryRecord::empty(now_ms),
                    cause: LoadFailure::Missing,
                };
            },
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to read history file, starting empty"
                );
                return LoadOutcome::Recovered {
                    record: HistoryRecord::empty(now_ms),
                    cause: LoadFailure::Unreadable(e),
                };
            },
        };

        match serde_json::from_str(&data) {
            Ok(record) => LoadOutcome::Loaded(record),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "malformed history file, starting empty"
                );
                LoadOutcome::Recovered {
                    record: HistoryRecord::empty(now_ms),
                    cause: LoadFailure::Malformed(e),
                }
            },
        }
    }

    /// Serializes `record` and overwrites the backing file.
    ///
    /// # Errors
    /// Returns the serialization or IO error. Most callers want [`save`],
    /// which logs instead; this variant exists so the failure path is
    /// testable.
    ///
    /// [`save`]: HistoryStore::save
    pub fn try_save(&self, record: &HistoryRecord) -> Result<()> {
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Serializes `record` and overwrites the backing file. A write
    /// failure is logged, not propagated: the caller proceeds with an
    /// in-memory view that may not survive a restart.
    pub fn save(&self, record: &HistoryRecord) {
        match self.try_save(record) {
            Ok(()) => {
                tracing::debug!(tracked = record.posted_deals.len(), "saved deal history");
            },
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to save deal history, continuing with in-memory view"
                );
            },
        }
    }
}
