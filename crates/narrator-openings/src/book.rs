//! Opening book storage and prefix lookup.

use std::path::Path;

use narrator_core::Move;
use thiserror::Error;

use crate::opening::OpeningLine;

/// Openings are only reported for the first 15 full moves of a game.
/// Lookups are disabled past this window, and callers tracking an
/// opening name drop it once the game goes past it.
pub const MAX_BOOK_PLIES: usize = 30;

/// Errors that can occur when loading an opening book.
#[derive(Debug, Error)]
pub enum BookError {
    /// Failed to read the opening book file.
    #[error("failed to read opening book: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A book of named opening lines, matched by move-sequence prefix.
///
/// Lookup is longest-prefix-wins: the first line whose prefix matches the
/// played moves is selected, then its variations are searched for a more
/// specific name. Line order is significant (earlier lines shadow later
/// ones). The book is read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    lines: Vec<OpeningLine>,
}

impl OpeningBook {
    /// Creates a new empty opening book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an opening book from the given lines.
    #[must_use]
    pub fn with_lines(lines: Vec<OpeningLine>) -> Self {
        Self { lines }
    }

    /// Loads an opening book from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BookError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parses an opening book from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, BookError> {
        let lines: Vec<OpeningLine> = serde_json::from_str(json)?;
        Ok(Self { lines })
    }

    /// Returns the number of top-level lines in the book.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the book contains no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds a line to the book.
    pub fn add(&mut self, line: OpeningLine) {
        self.lines.push(line);
    }

    /// Returns all lines in the book.
    #[must_use]
    pub fn lines(&self) -> &[OpeningLine] {
        &self.lines
    }

    /// Resolves the played moves to the most specific matching opening name.
    ///
    /// Returns `None` if no line matches or the game has gone past the
    /// book window of 15 full moves.
    #[must_use]
    pub fn lookup(&self, moves: &[Move]) -> Option<&str> {
        if moves.is_empty() || moves.len() > MAX_BOOK_PLIES {
            return None;
        }
        let played: Vec<String> = moves.iter().map(|m| m.to_coord()).collect();

        for line in &self.lines {
            if !matches_prefix(&played, &line.prefix) {
                continue;
            }
            for variation in &line.variations {
                let full = format!("{} {}", line.prefix, variation.suffix);
                if matches_prefix(&played, &full) {
                    return Some(&variation.name);
                }
            }
            return Some(&line.name);
        }
        None
    }
}

/// Returns true if `pattern`'s moves are a prefix of the played moves,
/// comparing whole moves rather than raw characters.
fn matches_prefix(played: &[String], pattern: &str) -> bool {
    let pattern: Vec<&str> = pattern.split_whitespace().collect();
    pattern.len() <= played.len()
        && pattern.iter().zip(played.iter()).all(|(p, m)| *p == m)
}
