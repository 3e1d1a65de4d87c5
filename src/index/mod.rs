//! Index Module
//!
//! In-memory ordered mapping from key to value set.
//!
//! ## Responsibilities
//! - Sole authority for insert/remove/find/exists semantics
//! - Keep keys and each key's values in ascending order
//! - Never hold a key whose value set is empty
//!
//! ## Data Structure Choice
//! `BTreeMap<Vec<u8>, BTreeSet<i32>>`:
//! - Ordered keys give a deterministic file layout
//! - Ordered sets give ascending `find` output for free
//! - Everything is memory-resident; there is no on-disk tree

mod table;

pub use table::Index;
