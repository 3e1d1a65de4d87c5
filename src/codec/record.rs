//! Record encoding
//!
//! Writes records in the order they are handed over. No deduplication or
//! validation happens here; the index already guarantees both.

use std::collections::BTreeSet;

use bytes::BufMut;

use crate::index::Index;

use super::{LENGTH_SIZE, VALUE_SIZE};

/// Number of bytes one record occupies on disk
pub fn encoded_len(key: &[u8], values: &BTreeSet<i32>) -> usize {
    LENGTH_SIZE + key.len() + LENGTH_SIZE + values.len() * VALUE_SIZE
}

/// Append one record: [key_len(4)][key][count(4)][values(4 each)]
pub fn encode_record<B: BufMut>(buf: &mut B, key: &[u8], values: &BTreeSet<i32>) {
    debug_assert!(key.len() <= i32::MAX as usize, "key too long for i32 length");
    debug_assert!(values.len() <= i32::MAX as usize, "too many values for i32 count");

    buf.put_i32_le(key.len() as i32);
    buf.put_slice(key);
    buf.put_i32_le(values.len() as i32);
    for &value in values {
        buf.put_i32_le(value);
    }
}

/// Encode every entry of the index, in ascending key order
pub fn encode_index(index: &Index) -> Vec<u8> {
    let total: usize = index
        .iter()
        .map(|(key, values)| encoded_len(key, values))
        .sum();

    let mut buf = Vec::with_capacity(total);
    for (key, values) in index.iter() {
        encode_record(&mut buf, key, values);
    }
    buf
}
