//! Index implementation
//!
//! BTreeMap of BTreeSets. Every operation is total.

use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};

use crate::codec::Entry;

/// Sorted associative container with a sorted member set per key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    data: BTreeMap<Vec<u8>, BTreeSet<i32>>,
}

impl Index {
    /// Create a new empty Index
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` to the set for `key`, creating the entry if absent.
    ///
    /// Returns `true` if the value was not already present.
    pub fn insert(&mut self, key: &[u8], value: i32) -> bool {
        match self.data.get_mut(key) {
            Some(values) => values.insert(value),
            None => {
                self.data.insert(key.to_vec(), BTreeSet::from([value]));
                true
            }
        }
    }

    /// Remove `value` from the set for `key`, dropping the key once empty.
    ///
    /// Returns `true` if something was removed.
    pub fn remove(&mut self, key: &[u8], value: i32) -> bool {
        let Some(values) = self.data.get_mut(key) else {
            return false;
        };

        if !values.remove(&value) {
            return false;
        }

        if values.is_empty() {
            self.data.remove(key);
        }
        true
    }

    /// All values for `key` in ascending order (empty if absent)
    pub fn find(&self, key: &[u8]) -> Vec<i32> {
        self.data
            .get(key)
            .map(|values| values.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Whether `value` is a member of `key`'s set
    pub fn exists(&self, key: &[u8], value: i32) -> bool {
        self.data
            .get(key)
            .is_some_and(|values| values.contains(&value))
    }

    /// Set a key's full value set, replacing whatever was there.
    /// An empty set removes the key.
    pub fn replace(&mut self, entry: Entry) {
        if entry.values.is_empty() {
            self.data.remove(&entry.key);
            return;
        }

        self.data.insert(entry.key, entry.values);
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Total number of (key, value) pairs
    pub fn value_count(&self) -> usize {
        self.data.values().map(BTreeSet::len).sum()
    }

    /// Iterate entries in ascending key order
    pub fn iter(&self) -> btree_map::Iter<'_, Vec<u8>, BTreeSet<i32>> {
        self.data.iter()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl FromIterator<Entry> for Index {
    /// Later entries for the same key replace earlier ones
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        let mut index = Index::new();
        for entry in iter {
            index.replace(entry);
        }
        index
    }
}

impl<'a> IntoIterator for &'a Index {
    type Item = (&'a Vec<u8>, &'a BTreeSet<i32>);
    type IntoIter = btree_map::Iter<'a, Vec<u8>, BTreeSet<i32>>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
