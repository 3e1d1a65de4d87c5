//! Record decoding
//!
//! Iterates records out of an in-memory byte slice.
//!
//! Decoding is best-effort: when the bytes run out mid-record, or a declared
//! `key_length` / `value_count` cannot be satisfied by what is left
//! (negative values included), iteration ends and everything decoded so far
//! stands. The reader remembers that it stopped early so callers can report it.

use bytes::Buf;

use super::{Entry, LENGTH_SIZE, VALUE_SIZE};

/// Lazy iterator over the records in a byte slice
pub struct RecordReader<'a> {
    /// Bytes not yet decoded
    buf: &'a [u8],
    /// Bytes belonging to fully decoded records
    consumed: usize,
    /// Records yielded so far
    records: usize,
    /// Set once an incomplete record is hit
    truncated: bool,
}

/// What a full decode pass saw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeSummary {
    /// Complete records decoded
    pub records: usize,

    /// Bytes covered by those records
    pub bytes_consumed: usize,

    /// Trailing bytes that did not form a complete record
    pub bytes_ignored: usize,

    /// Whether decoding stopped before the end of the input
    pub truncated: bool,
}

impl<'a> RecordReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            buf: bytes,
            consumed: 0,
            records: 0,
            truncated: false,
        }
    }

    /// Bytes consumed by complete records
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Bytes not consumed (the ignored tail once iteration has ended)
    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    /// Whether iteration stopped at an incomplete record
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn summary(&self) -> DecodeSummary {
        DecodeSummary {
            records: self.records,
            bytes_consumed: self.consumed,
            bytes_ignored: self.buf.len(),
            truncated: self.truncated,
        }
    }

    /// Decode one record from the front of `buf`.
    /// Returns the entry and its encoded size, or None if incomplete.
    fn decode_one(mut buf: &[u8]) -> Option<(Entry, usize)> {
        let start = buf.remaining();

        let key_len = read_length(&mut buf)?;
        if buf.remaining() < key_len {
            return None;
        }
        let key = buf[..key_len].to_vec();
        buf.advance(key_len);

        let count = read_length(&mut buf)?;
        if buf.remaining() / VALUE_SIZE < count {
            return None;
        }
        let values = (0..count).map(|_| buf.get_i32_le()).collect();

        Some((Entry { key, values }, start - buf.remaining()))
    }
}

impl Iterator for RecordReader<'_> {
    type Item = Entry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.truncated || self.buf.is_empty() {
            return None;
        }

        match Self::decode_one(self.buf) {
            Some((entry, size)) => {
                self.buf = &self.buf[size..];
                self.consumed += size;
                self.records += 1;
                Some(entry)
            }
            None => {
                self.truncated = true;
                None
            }
        }
    }
}

/// Read a length field; negative lengths count as unsatisfiable
fn read_length(buf: &mut &[u8]) -> Option<usize> {
    if buf.remaining() < LENGTH_SIZE {
        return None;
    }
    usize::try_from(buf.get_i32_le()).ok()
}

/// Decode every complete record and report how far decoding got
pub fn decode_all(bytes: &[u8]) -> (Vec<Entry>, DecodeSummary) {
    let mut reader = RecordReader::new(bytes);
    let entries: Vec<Entry> = reader.by_ref().collect();
    (entries, reader.summary())
}
