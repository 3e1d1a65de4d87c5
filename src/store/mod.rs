//! Store Module
//!
//! Persistence manager bridging the in-memory index and the backing file.
//!
//! ## Responsibilities
//! - Load the whole file into the index on open (best-effort)
//! - Track whether the index changed since the last save
//! - Rewrite the whole file on save, only when dirty
//! - Guarantee a final save when the handle is released
//!
//! ## Failure Policy
//! Nothing here raises an error for load or save problems. A missing file is
//! an empty index, a truncated file is a partial index, and a failed write
//! leaves the store dirty so the next save retries. Callers that care can
//! inspect `LoadReport` and `SaveOutcome`.

mod file;
mod manager;

use std::io::ErrorKind;

pub use manager::Store;

/// How the backing file looked at open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileState {
    /// No file at the configured path; the index starts empty
    #[default]
    Missing,

    /// The file exists but could not be read; the index starts empty
    Unreadable,

    /// The file was read and decoded
    Loaded,
}

/// Outcome of the best-effort load performed by `Store::open`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    pub state: FileState,

    /// Complete records decoded from the file
    pub entries_loaded: usize,

    /// File size in bytes
    pub bytes_read: usize,

    /// Trailing bytes that did not form a complete record
    pub bytes_ignored: usize,

    /// Whether the file ended mid-record
    pub truncated: bool,
}

/// Outcome of a save attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing changed since the last save; no I/O was done
    Clean,

    /// The whole file was rewritten
    Written { records: usize, bytes: usize },

    /// The file could not be written; the store is still dirty
    Abandoned { kind: ErrorKind },
}

impl SaveOutcome {
    /// Whether the backing file now matches the index
    pub fn is_persisted(&self) -> bool {
        !matches!(self, SaveOutcome::Abandoned { .. })
    }
}
