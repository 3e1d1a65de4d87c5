//! Command Module
//!
//! Text command surface driving a store.
//!
//! ## Input Format
//! ```text
//! <n>
//! insert <key> <value>
//! delete <key> <value>
//! find <key>
//! ...
//! ```
//!
//! Tokens are separated by any ASCII whitespace, including newlines.
//! Each `find` prints one line: the values in ascending order separated by
//! single spaces, or `null` when the key has none.

mod parser;
mod batch;

pub use parser::{Command, Tokens};
pub use batch::{execute, format_values, run_batch, BatchStats};

/// Printed by `find` when the key has no values
pub const NULL_OUTPUT: &str = "null";
