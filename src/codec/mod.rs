//! Codec Module
//!
//! Binary record format for the backing file.
//!
//! ## Responsibilities
//! - Encode one key → value-set record
//! - Encode a whole index in key order
//! - Lazily decode a byte stream back into entries
//! - Stop quietly at a truncated tail (best-effort load)
//!
//! ## File Format
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ Record 1                                             │
//! │ ┌──────────┬──────────┬──────────┬─────────────────┐ │
//! │ │KeyLen (4)│   Key    │Count (4) │ Values (4×Count)│ │
//! │ └──────────┴──────────┴──────────┴─────────────────┘ │
//! ├──────────────────────────────────────────────────────┤
//! │ Record 2 ...                                         │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Every integer is a little-endian `i32`. There is no header, footer,
//! checksum or version field.

mod record;
mod reader;

use std::collections::BTreeSet;

pub use record::{encode_index, encode_record, encoded_len};
pub use reader::{decode_all, DecodeSummary, RecordReader};

/// Size of the `key_length` and `value_count` fields
pub const LENGTH_SIZE: usize = 4;

/// Size of a single encoded value
pub const VALUE_SIZE: usize = 4;

/// A key with its value set, as stored in one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: Vec<u8>,
    pub values: BTreeSet<i32>,
}

impl Entry {
    pub fn new(key: impl Into<Vec<u8>>, values: impl IntoIterator<Item = i32>) -> Self {
        Self {
            key: key.into(),
            values: values.into_iter().collect(),
        }
    }
}
