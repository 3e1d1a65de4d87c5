//! Configuration for SetKV
//!
//! Centralized configuration with sensible defaults. Everything the store
//! needs is passed in here at construction; there is no process-wide path.

use std::path::PathBuf;

use crate::error::{Result, SetKvError};

/// Default backing file, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "bpt_data.dat";

/// Main configuration for a SetKV store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// The single flat file holding every record
    pub data_file: PathBuf,

    /// How a save replaces the file contents
    pub write_mode: WriteMode,

    // -------------------------------------------------------------------------
    // Save Scheduling
    // -------------------------------------------------------------------------
    /// When the store saves on its own
    pub save_policy: SavePolicy,
}

/// When the store triggers a save without being asked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SavePolicy {
    /// Save only on explicit `save()`, on `close()` and on drop
    #[default]
    OnClose,

    /// Save after every mutation that dirtied the store
    EveryMutation,
}

/// How the backing file is rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Truncate and rewrite the file directly.
    /// A crash mid-write can leave a truncated file.
    #[default]
    InPlace,

    /// Write `<file>.tmp`, fsync it, then rename it over the target
    Staged,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            write_mode: WriteMode::InPlace,
            save_policy: SavePolicy::OnClose,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject configurations the store cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(SetKvError::Config("data file path is empty".to_string()));
        }
        if self.data_file.file_name().is_none() {
            return Err(SetKvError::Config(format!(
                "data file path has no file name: {}",
                self.data_file.display()
            )));
        }
        Ok(())
    }

    /// Path of the staging file used by `WriteMode::Staged`
    pub fn staging_file(&self) -> PathBuf {
        let mut name = self.data_file.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing file path
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_file = path.into();
        self
    }

    /// Set the write mode
    pub fn write_mode(mut self, mode: WriteMode) -> Self {
        self.config.write_mode = mode;
        self
    }

    /// Set the save policy
    pub fn save_policy(mut self, policy: SavePolicy) -> Self {
        self.config.save_policy = policy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
