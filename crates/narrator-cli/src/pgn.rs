//! Reading of coordinate-notation game files.
//!
//! Accepts the simple PGN dialect many engine tools emit: standard
//! `[Tag "value"]` headers followed by move text in UCI coordinate
//! notation (e.g. "1. e2e4 e7e5 2. g1f3 b8c6 1-0"). SAN move text is
//! not supported.

use std::path::Path;

use narrator_core::Move;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PgnError {
    #[error("Failed to read game file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Unrecognized move token: {0}")]
    BadMove(String),
    #[error("Game file contains no moves")]
    Empty,
}

/// A parsed game: the players from the tag pairs (when present) and the
/// move list.
#[derive(Debug, Clone)]
pub struct PgnGame {
    pub white: Option<String>,
    pub black: Option<String>,
    pub moves: Vec<Move>,
}

/// Parses a game file from disk.
pub fn read_game(path: &Path) -> Result<PgnGame, PgnError> {
    parse_game(&std::fs::read_to_string(path)?)
}

/// Parses game text. Tag pair lines are scanned for White/Black names;
/// move numbers and result markers in the move text are skipped.
pub fn parse_game(text: &str) -> Result<PgnGame, PgnError> {
    let mut white = None;
    let mut black = None;
    let mut moves = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('[') {
            if let Some(value) = tag_value(line, "White") {
                white = Some(value);
            } else if let Some(value) = tag_value(line, "Black") {
                black = Some(value);
            }
            continue;
        }
        for token in line.split_whitespace() {
            if token.ends_with('.') && token[..token.len() - 1].chars().all(|c| c.is_ascii_digit())
            {
                continue;
            }
            if matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*") {
                continue;
            }
            let mov = Move::from_coord(token).ok_or_else(|| PgnError::BadMove(token.to_string()))?;
            moves.push(mov);
        }
    }

    if moves.is_empty() {
        return Err(PgnError::Empty);
    }
    Ok(PgnGame {
        white,
        black,
        moves,
    })
}

fn tag_value(line: &str, tag: &str) -> Option<String> {
    let rest = line.strip_prefix('[')?.strip_suffix(']')?;
    let rest = rest.strip_prefix(tag)?.trim_start();
    let rest = rest.strip_prefix('"')?.strip_suffix('"')?;
    Some(rest.to_string())
}
