//! Store implementation
//!
//! Owns the index, the dirty flag and the backing file.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::codec::{self, RecordReader};
use crate::config::{Config, SavePolicy};
use crate::error::Result;
use crate::index::Index;

use super::{file, FileState, LoadReport, SaveOutcome};

/// A handle on an open store
///
/// ## Lifecycle
/// - `open()` loads the backing file into the index
/// - mutations mark the store dirty
/// - `save()` rewrites the whole file when dirty
/// - `close()` (or dropping the handle) performs a final save
///
/// The handle is single-owner and single-threaded: every mutation takes
/// `&mut self`.
pub struct Store {
    /// Store configuration
    config: Config,

    /// Full in-memory dataset
    index: Index,

    /// Set by successful mutations, cleared by a successful save
    dirty: bool,

    /// What the initial load saw
    load_report: LoadReport,

    /// Set once `close()` has run its final save
    closed: bool,
}

impl Store {
    /// Open the store described by `config`
    ///
    /// Only an invalid config is an error. A missing or unreadable file
    /// yields an empty index; a truncated file yields every complete record
    /// before the truncation point.
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;

        let (index, load_report) = Self::load(&config.data_file);

        info!(
            path = %config.data_file.display(),
            keys = index.len(),
            state = ?load_report.state,
            "store opened"
        );

        Ok(Self {
            config,
            index,
            dirty: false,
            load_report,
            closed: false,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified backing file
    pub fn open_path(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open(Config::builder().data_file(path).build())
    }

    /// Best-effort load of the whole backing file
    fn load(path: &Path) -> (Index, LoadReport) {
        let bytes = match file::read(path) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(path = %path.display(), "no backing file, starting empty");
                return (Index::new(), LoadReport::default());
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "backing file unreadable, starting empty");
                let report = LoadReport {
                    state: FileState::Unreadable,
                    ..LoadReport::default()
                };
                return (Index::new(), report);
            }
        };

        let mut reader = RecordReader::new(&bytes);
        let index: Index = reader.by_ref().collect();
        let summary = reader.summary();

        if summary.truncated {
            warn!(
                path = %path.display(),
                records = summary.records,
                bytes_ignored = summary.bytes_ignored,
                "backing file ends mid-record, trailing bytes ignored"
            );
        }

        let report = LoadReport {
            state: FileState::Loaded,
            entries_loaded: summary.records,
            bytes_read: bytes.len(),
            bytes_ignored: summary.bytes_ignored,
            truncated: summary.truncated,
        };

        (index, report)
    }

    // =========================================================================
    // Index Operations
    // =========================================================================

    /// Add `value` to `key`'s set. Always marks the store dirty.
    pub fn insert(&mut self, key: &[u8], value: i32) {
        self.index.insert(key, value);
        self.mark_dirty();
    }

    /// Remove `value` from `key`'s set.
    ///
    /// Marks the store dirty only when something was removed.
    pub fn remove(&mut self, key: &[u8], value: i32) -> bool {
        let removed = self.index.remove(key, value);
        if removed {
            self.mark_dirty();
        }
        removed
    }

    /// All values for `key`, ascending
    pub fn find(&self, key: &[u8]) -> Vec<i32> {
        self.index.find(key)
    }

    pub fn exists(&self, key: &[u8], value: i32) -> bool {
        self.index.exists(key, value)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
        if self.config.save_policy == SavePolicy::EveryMutation {
            self.save();
        }
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Rewrite the whole backing file if the index changed since the last save
    ///
    /// A failed write is logged and reported as `Abandoned`; the store stays
    /// dirty so the next save tries again.
    pub fn save(&mut self) -> SaveOutcome {
        if !self.dirty {
            return SaveOutcome::Clean;
        }

        let bytes = codec::encode_index(&self.index);

        match file::write(&self.config, &bytes) {
            Ok(()) => {
                self.dirty = false;
                debug!(
                    path = %self.config.data_file.display(),
                    records = self.index.len(),
                    bytes = bytes.len(),
                    "store saved"
                );
                SaveOutcome::Written {
                    records: self.index.len(),
                    bytes: bytes.len(),
                }
            }
            Err(e) => {
                warn!(
                    path = %self.config.data_file.display(),
                    error = %e,
                    "save abandoned, store stays dirty"
                );
                SaveOutcome::Abandoned { kind: e.kind() }
            }
        }
    }

    /// Release the handle, performing a final save
    pub fn close(mut self) -> SaveOutcome {
        let outcome = self.save();
        self.closed = true;
        info!(path = %self.config.data_file.display(), ?outcome, "store closed");
        outcome
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Whether the index changed since the last successful save
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read-only view of the index
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// What the initial load saw
    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.config.data_file
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Drop for Store {
    /// Handles that were not closed explicitly still get their final save,
    /// including during unwinding.
    fn drop(&mut self) {
        if self.closed {
            return;
        }

        let outcome = self.save();
        debug!(path = %self.config.data_file.display(), ?outcome, "store dropped");
    }
}
