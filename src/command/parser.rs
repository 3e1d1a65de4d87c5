//! Command parsing
//!
//! Whitespace tokenizer plus the command grammar on top of it.

use std::collections::VecDeque;
use std::io::BufRead;

use crate::error::{Result, SetKvError};

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a value to a key's set
    Insert { key: Vec<u8>, value: i32 },

    /// Remove a value from a key's set
    Delete { key: Vec<u8>, value: i32 },

    /// Print a key's values
    Find { key: Vec<u8> },

    /// Unrecognised command word; its arguments are not consumed
    Unknown { word: Vec<u8> },
}

/// Pulls whitespace-separated tokens out of a buffered reader.
/// Keys are raw bytes, so no UTF-8 requirement is placed on the input.
pub struct Tokens<R> {
    reader: R,
    pending: VecDeque<Vec<u8>>,
    line: Vec<u8>,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            line: Vec::new(),
        }
    }

    /// Next token, or `None` at end of input
    pub fn next_token(&mut self) -> Result<Option<Vec<u8>>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }

            self.line.clear();
            if self.reader.read_until(b'\n', &mut self.line)? == 0 {
                return Ok(None);
            }

            self.pending.extend(
                self.line
                    .split(|b| b.is_ascii_whitespace())
                    .filter(|token| !token.is_empty())
                    .map(<[u8]>::to_vec),
            );
        }
    }

    /// Next token parsed as an integer
    pub fn next_int<T: std::str::FromStr>(&mut self, what: &str) -> Result<Option<T>> {
        let Some(token) = self.next_token()? else {
            return Ok(None);
        };

        std::str::from_utf8(&token)
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Some)
            .ok_or_else(|| {
                SetKvError::Command(format!(
                    "{}: not an integer: {:?}",
                    what,
                    String::from_utf8_lossy(&token)
                ))
            })
    }

    /// Next full command, or `None` at end of input
    pub fn next_command(&mut self) -> Result<Option<Command>> {
        let Some(word) = self.next_token()? else {
            return Ok(None);
        };

        let command = match word.as_slice() {
            b"insert" => {
                let (key, value) = self.key_and_value("insert")?;
                Command::Insert { key, value }
            }
            b"delete" => {
                let (key, value) = self.key_and_value("delete")?;
                Command::Delete { key, value }
            }
            b"find" => Command::Find {
                key: self.required_token("find", "key")?,
            },
            _ => Command::Unknown { word },
        };

        Ok(Some(command))
    }

    fn key_and_value(&mut self, command: &str) -> Result<(Vec<u8>, i32)> {
        let key = self.required_token(command, "key")?;
        let value = self
            .next_int(command)?
            .ok_or_else(|| missing(command, "value"))?;
        Ok((key, value))
    }

    fn required_token(&mut self, command: &str, what: &str) -> Result<Vec<u8>> {
        self.next_token()?.ok_or_else(|| missing(command, what))
    }
}

fn missing(command: &str, what: &str) -> SetKvError {
    SetKvError::Command(format!("{}: missing {}", command, what))
}
