//! Batch execution
//!
//! Reads a command count, then runs that many commands against a store.

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::error::Result;
use crate::store::Store;

use super::{Command, Tokens, NULL_OUTPUT};

/// Counters for one batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchStats {
    pub inserts: usize,
    pub deletes: usize,
    pub finds: usize,
    pub skipped: usize,
}

impl BatchStats {
    /// Commands executed, skipped ones included
    pub fn total(&self) -> usize {
        self.inserts + self.deletes + self.finds + self.skipped
    }
}

/// Execute one command. Returns the values for `find`, `None` otherwise.
pub fn execute(store: &mut Store, command: &Command) -> Option<Vec<i32>> {
    match command {
        Command::Insert { key, value } => {
            store.insert(key, *value);
            None
        }
        Command::Delete { key, value } => {
            store.remove(key, *value);
            None
        }
        Command::Find { key } => Some(store.find(key)),
        Command::Unknown { word } => {
            warn!(word = %String::from_utf8_lossy(word), "skipping unknown command");
            None
        }
    }
}

/// Space-separated values, or `null` when there are none
pub fn format_values(values: &[i32]) -> String {
    if values.is_empty() {
        return NULL_OUTPUT.to_string();
    }

    values
        .iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run a count-prefixed batch of commands, writing one line per `find`
///
/// Empty input is an empty batch. A negative count runs nothing. Input that
/// ends before `n` commands stops the batch early.
pub fn run_batch<R: BufRead, W: Write>(
    store: &mut Store,
    input: R,
    output: &mut W,
) -> Result<BatchStats> {
    let mut tokens = Tokens::new(input);
    let mut stats = BatchStats::default();

    let Some(count) = tokens.next_int::<i64>("command count")? else {
        return Ok(stats);
    };
    let count = count.max(0);

    for _ in 0..count {
        let Some(command) = tokens.next_command()? else {
            warn!(expected = count, ran = stats.total(), "input ended before the batch did");
            break;
        };

        let values = execute(store, &command);

        match command {
            Command::Insert { .. } => stats.inserts += 1,
            Command::Delete { .. } => stats.deletes += 1,
            Command::Find { .. } => stats.finds += 1,
            Command::Unknown { .. } => stats.skipped += 1,
        }

        if let Some(values) = values {
            writeln!(output, "{}", format_values(&values))?;
        }
    }

    output.flush()?;
    debug!(?stats, "batch finished");
    Ok(stats)
}
