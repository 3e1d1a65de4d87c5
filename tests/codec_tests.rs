//! Tests for the record codec
//!
//! These tests verify:
//! - Exact byte layout (little-endian i32 fields)
//! - Index → bytes → Index round trip
//! - Best-effort decoding of truncated input
//! - Length fields that cannot be satisfied stop decoding

use std::collections::BTreeSet;

use setkv::codec::{decode_all, encode_index, encode_record, encoded_len, Entry, RecordReader};
use setkv::Index;

// =============================================================================
// Helper Functions
// =============================================================================

fn set(values: &[i32]) -> BTreeSet<i32> {
    values.iter().copied().collect()
}

fn record_bytes(key: &[u8], values: &[i32]) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_record(&mut buf, key, &set(values));
    buf
}

fn sample_index() -> Index {
    let mut index = Index::new();
    index.insert(b"apple", 3);
    index.insert(b"apple", 1);
    index.insert(b"banana", -7);
    index.insert(b"cherry", i32::MAX);
    index.insert(b"cherry", i32::MIN);
    index
}

// =============================================================================
// Encoding Tests
// =============================================================================

#[test]
fn test_encode_record_layout() {
    let bytes = record_bytes(b"ab", &[1, -2]);

    let expected: Vec<u8> = [
        &2i32.to_le_bytes()[..],
        &b"ab"[..],
        &2i32.to_le_bytes()[..],
        &(-2i32).to_le_bytes()[..],
        &1i32.to_le_bytes()[..],
    ]
    .concat();

    assert_eq!(bytes, expected);
    assert_eq!(bytes.len(), encoded_len(b"ab", &set(&[1, -2])));
}

#[test]
fn test_encode_empty_key() {
    let bytes = record_bytes(b"", &[9]);

    assert_eq!(&bytes[0..4], &0i32.to_le_bytes());
    assert_eq!(&bytes[4..8], &1i32.to_le_bytes());
    assert_eq!(&bytes[8..12], &9i32.to_le_bytes());

    let (entries, summary) = decode_all(&bytes);
    assert_eq!(entries, vec![Entry::new(b"".to_vec(), [9])]);
    assert!(!summary.truncated);
}

#[test]
fn test_encode_index_is_key_ordered() {
    let mut index = Index::new();
    index.insert(b"zeta", 1);
    index.insert(b"alpha", 2);
    index.insert(b"mid", 3);

    let bytes = encode_index(&index);
    let keys: Vec<Vec<u8>> = RecordReader::new(&bytes).map(|e| e.key).collect();

    assert_eq!(keys, vec![b"alpha".to_vec(), b"mid".to_vec(), b"zeta".to_vec()]);
}

#[test]
fn test_encode_empty_index() {
    let bytes = encode_index(&Index::new());
    assert!(bytes.is_empty());
}

// =============================================================================
// Round Trip Tests
// =============================================================================

#[test]
fn test_round_trip_index() {
    let index = sample_index();

    let bytes = encode_index(&index);
    let restored: Index = RecordReader::new(&bytes).collect();

    assert_eq!(restored, index);
    assert_eq!(restored.find(b"apple"), vec![1, 3]);
    assert_eq!(restored.find(b"cherry"), vec![i32::MIN, i32::MAX]);
}

#[test]
fn test_round_trip_binary_key() {
    let mut index = Index::new();
    index.insert(&[0x00, 0xff, b' ', b'\n'], 42);

    let bytes = encode_index(&index);
    let restored: Index = RecordReader::new(&bytes).collect();

    assert!(restored.exists(&[0x00, 0xff, b' ', b'\n'], 42));
}

// =============================================================================
// Best-Effort Decode Tests
// =============================================================================

#[test]
fn test_decode_empty_input() {
    let (entries, summary) = decode_all(&[]);

    assert!(entries.is_empty());
    assert_eq!(summary.records, 0);
    assert_eq!(summary.bytes_ignored, 0);
    assert!(!summary.truncated);
}

#[test]
fn test_decode_truncated_tail_keeps_complete_records() {
    let first = record_bytes(b"first", &[1, 2, 3]);
    let second = record_bytes(b"second", &[4, 5]);
    let full = [first.clone(), second.clone()].concat();

    // Cut inside the second record at every possible point
    for cut in first.len() + 1..full.len() {
        let mut reader = RecordReader::new(&full[..cut]);
        let entries: Vec<Entry> = reader.by_ref().collect();

        assert_eq!(entries, vec![Entry::new(b"first".to_vec(), [1, 2, 3])], "cut at {}", cut);
        assert!(reader.is_truncated(), "cut at {}", cut);
        assert_eq!(reader.consumed(), first.len());
        assert_eq!(reader.remaining(), cut - first.len());
    }
}

#[test]
fn test_decode_truncated_first_record() {
    let bytes = record_bytes(b"only", &[10, 20]);

    let (entries, summary) = decode_all(&bytes[..bytes.len() - 1]);

    assert!(entries.is_empty());
    assert!(summary.truncated);
    assert_eq!(summary.bytes_ignored, bytes.len() - 1);
}

#[test]
fn test_decode_stops_on_record_boundary() {
    let bytes = [record_bytes(b"a", &[1]), record_bytes(b"b", &[2])].concat();

    let (entries, summary) = decode_all(&bytes);

    assert_eq!(entries.len(), 2);
    assert_eq!(summary.records, 2);
    assert_eq!(summary.bytes_consumed, bytes.len());
    assert!(!summary.truncated);
}

#[test]
fn test_decode_key_length_beyond_data() {
    let mut bytes = record_bytes(b"ok", &[1]);
    bytes.extend_from_slice(&100i32.to_le_bytes());
    bytes.extend_from_slice(b"short");

    let (entries, summary) = decode_all(&bytes);

    assert_eq!(entries.len(), 1);
    assert!(summary.truncated);
    assert_eq!(summary.bytes_ignored, 4 + 5);
}

#[test]
fn test_decode_value_count_beyond_data() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&1i32.to_le_bytes());
    bytes.extend_from_slice(b"k");
    bytes.extend_from_slice(&3i32.to_le_bytes());
    bytes.extend_from_slice(&7i32.to_le_bytes());

    let (entries, summary) = decode_all(&bytes);

    assert!(entries.is_empty());
    assert!(summary.truncated);
}

#[test]
fn test_decode_negative_lengths_treated_as_truncation() {
    let mut negative_key = Vec::new();
    negative_key.extend_from_slice(&(-1i32).to_le_bytes());
    negative_key.extend_from_slice(&[0u8; 16]);

    let (entries, summary) = decode_all(&negative_key);
    assert!(entries.is_empty());
    assert!(summary.truncated);

    let mut negative_count = Vec::new();
    negative_count.extend_from_slice(&1i32.to_le_bytes());
    negative_count.extend_from_slice(b"k");
    negative_count.extend_from_slice(&i32::MIN.to_le_bytes());

    let (entries, summary) = decode_all(&negative_count);
    assert!(entries.is_empty());
    assert!(summary.truncated);
}

#[test]
fn test_decode_huge_value_count_does_not_allocate() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&1i32.to_le_bytes());
    bytes.extend_from_slice(b"k");
    bytes.extend_from_slice(&i32::MAX.to_le_bytes());

    let (entries, summary) = decode_all(&bytes);

    assert!(entries.is_empty());
    assert!(summary.truncated);
}

#[test]
fn test_decode_deduplicates_values_in_record() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&1i32.to_le_bytes());
    bytes.extend_from_slice(b"k");
    bytes.extend_from_slice(&3i32.to_le_bytes());
    for value in [5i32, 5, 1] {
        bytes.extend_from_slice(&value.to_le_bytes());
    }

    let (entries, _) = decode_all(&bytes);

    assert_eq!(entries, vec![Entry::new(b"k".to_vec(), [1, 5])]);
}

#[test]
fn test_reader_is_lazy() {
    let bytes = [record_bytes(b"a", &[1]), record_bytes(b"b", &[2])].concat();

    let mut reader = RecordReader::new(&bytes);
    let first = reader.next().unwrap();

    assert_eq!(first.key, b"a".to_vec());
    assert_eq!(reader.consumed(), record_bytes(b"a", &[1]).len());
    assert!(!reader.is_truncated());
}
