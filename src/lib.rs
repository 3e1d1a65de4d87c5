//! # SetKV
//!
//! A persistent multi-valued key index:
//! - Byte-string keys mapped to sets of `i32` values
//! - Ascending point lookups
//! - Whole-dataset persistence in a single flat binary file
//! - Dirty tracking so unchanged data is never rewritten
//! - Best-effort recovery from truncated files
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Command Batch (stdin)                    │
//! │              insert / delete / find  →  stdout              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                          Store                              │
//! │          (dirty flag, load on open, save on close)          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Index    │          │    Codec    │
//!   │ (BTreeMap)  │          │  (records)  │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │ Backing file│
//!                           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod index;
pub mod store;
pub mod command;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, SetKvError};
pub use config::{Config, SavePolicy, WriteMode};
pub use index::Index;
pub use store::{LoadReport, SaveOutcome, Store};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of SetKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
