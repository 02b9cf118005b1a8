//! NEXUS detection and `translate` block handling.
//!
//! Only the parts of NEXUS needed to read a treestream are understood: the
//! `#NEXUS` header on the first non-blank line and one `translate` block
//! mapping short tokens to leaf names. Every other block is left to the
//! fragment scanner, which treats it like any other text.

use std::collections::HashMap;
use thiserror::Error;

pub const NEXUS_HEADER: &str = "#NEXUS";

const TRANSLATE_MARKER: &str = "translate";
const BLOCK_TERMINATOR: &str = ";";
const ENTRY_SEPARATOR: char = ',';

#[derive(Debug, Error)]
pub enum NexusError {
    #[error(
        "Malformed translate entry at line {line}: expected \"<token> <name>\", found {token_count} token(s) in \"{content}\"."
    )]
    MalformedTranslateEntry { line: usize, content: String, token_count: usize },
}

pub type NexusResult<T> = Result<T, NexusError>;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    #[default]
    Plain,
    Nexus,
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                FileFormat::Plain => "plain",
                FileFormat::Nexus => "NEXUS",
            }
        )
    }
}

/// Decides the format of a file from its first non-blank line.
pub fn classify_format(first_line: &str) -> FileFormat {
    if first_line.trim() == NEXUS_HEADER {
        FileFormat::Nexus
    } else {
        FileFormat::Plain
    }
}

/// Case-insensitive check for a line that opens a `translate` block.
pub fn is_translate_marker(line: &str) -> bool {
    line.to_lowercase().contains(TRANSLATE_MARKER)
}

/// Token to leaf-name mapping read from a `translate` block.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TranslateTable {
    entries: HashMap<String, String>,
}

impl TranslateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later entries for the same token overwrite earlier ones.
    pub fn insert(&mut self, token: impl Into<String>, name: impl Into<String>) {
        let _ = self.entries.insert(token.into(), name.into());
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TranslateTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = TranslateTable::new();
        for (token, name) in iter {
            table.insert(token, name);
        }
        table
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TranslateState {
    #[default]
    NotInTranslate,
    InTranslate,
}

/// Line-by-line builder for a [TranslateTable].
///
/// The caller opens the block when it sees the `translate` marker line and
/// then feeds every following line until [TranslateBuilder::is_open] turns
/// false. A line that is exactly `;` closes the block. A line ending in `;`
/// records its entry and closes the block in the same step.
#[derive(Debug, Default)]
pub struct TranslateBuilder {
    state: TranslateState,
    table: TranslateTable,
}

impl TranslateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TranslateState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == TranslateState::InTranslate
    }

    pub fn open(&mut self) {
        self.state = TranslateState::InTranslate;
    }

    pub fn table(&self) -> &TranslateTable {
        &self.table
    }

    pub fn into_table(self) -> TranslateTable {
        self.table
    }

    /// Consumes one line of an open translate block.
    ///
    /// `line_number` is only used for error reporting. Feeding a closed
    /// builder is a no-op.
    pub fn feed(&mut self, line: &str, line_number: usize) -> NexusResult<()> {
        if !self.is_open() {
            return Ok(());
        }

        let content = line.trim();
        if content == BLOCK_TERMINATOR {
            self.state = TranslateState::NotInTranslate;
            return Ok(());
        }

        let entry = match content.strip_suffix(BLOCK_TERMINATOR) {
            Some(entry) => {
                self.state = TranslateState::NotInTranslate;
                entry
            }
            None => content,
        };

        let (token, name) = split_entry(entry).ok_or_else(|| {
            NexusError::MalformedTranslateEntry {
                line: line_number,
                content: content.to_string(),
                token_count: entry.split_whitespace().count(),
            }
        })?;

        let name = name.strip_suffix(ENTRY_SEPARATOR).unwrap_or(name);
        self.table.insert(token, name);
        Ok(())
    }
}

/// Splits a translate entry into exactly two whitespace-separated tokens.
fn split_entry(entry: &str) -> Option<(&str, &str)> {
    let mut tokens = entry.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(token), Some(name), None) => Some((token, name)),
        _ => None,
    }
}
