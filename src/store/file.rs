//! Backing file I/O
//!
//! Whole-file read and whole-file rewrite. The store decides what to do
//! with failures; these helpers just report them.

use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::config::{Config, WriteMode};

/// Read the whole backing file. `Ok(None)` means it does not exist.
pub(super) fn read(path: &Path) -> io::Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Replace the backing file contents with `bytes`
pub(super) fn write(config: &Config, bytes: &[u8]) -> io::Result<()> {
    match config.write_mode {
        WriteMode::InPlace => write_in_place(&config.data_file, bytes),
        WriteMode::Staged => write_staged(config, bytes),
    }
}

/// Truncate and rewrite. A failure part way leaves a partial file.
fn write_in_place(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;

    let mut writer = BufWriter::new(file);
    writer.write_all(bytes)?;
    writer.flush()
}

/// Write a sibling staging file, fsync it, then rename it over the target
fn write_staged(config: &Config, bytes: &[u8]) -> io::Result<()> {
    let staging = config.staging_file();

    let result = (|| {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&staging)?;

        let mut writer = BufWriter::new(file);
        writer.write_all(bytes)?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;

        fs::rename(&staging, &config.data_file)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&staging);
    }
    result
}
