//! Built-in opening book data.
//!
//! This module provides the opening book that is compiled into the
//! library, covering the main lines after 1.e4 and 1.d4 with their
//! common named variations.

use std::sync::OnceLock;

use crate::book::OpeningBook;
use crate::opening::OpeningLine;

/// Returns the built-in opening book, constructed once per process.
pub fn builtin_book() -> &'static OpeningBook {
    static BOOK: OnceLock<OpeningBook> = OnceLock::new();
    BOOK.get_or_init(|| OpeningBook::with_lines(builtin_lines()))
}

/// Creates the built-in opening lines.
#[must_use]
pub fn builtin_lines() -> Vec<OpeningLine> {
    vec![
        OpeningLine::new("e2e4 e7e5", "Open Game")
            .with_variation("g1f3 b8c6 f1b5", "Ruy Lopez")
            .with_variation("g1f3 b8c6 f1c4", "Italian Game")
            .with_variation("g1f3 b8c6 d2d4", "Scotch Game")
            .with_variation("f2f4", "King's Gambit")
            .with_variation("d2d4 e5d4", "Center Game"),
        OpeningLine::new("e2e4 c7c5", "Sicilian Defense")
            .with_variation("g1f3 d7d6", "Sicilian Najdorf")
            .with_variation("g1f3 b8c6", "Sicilian Open")
            .with_variation("b1c3", "Sicilian Closed")
            .with_variation("c2c3", "Sicilian Alapin"),
        OpeningLine::new("e2e4 e7e6", "French Defense")
            .with_variation("d2d4 d7d5 e4e5", "French Advance")
            .with_variation("d2d4 d7d5 e4d5", "French Exchange")
            .with_variation("d2d4 d7d5", "French Main Line"),
        OpeningLine::new("d2d4 d7d5", "Queen's Pawn Game")
            .with_variation("c2c4 d5c4", "Queen's Gambit Accepted")
            .with_variation("c2c4 e7e6", "Queen's Gambit Declined")
            .with_variation("c2c4", "Queen's Gambit")
            .with_variation("g1f3 g8f6 c2c4", "Queen's Gambit Orthodox"),
        OpeningLine::new("d2d4 g8f6", "Indian Defense")
            .with_variation("c2c4 e7e6 g1f3 b7b6", "Queen's Indian Defense")
            .with_variation("c2c4 e7e6 g1f3", "Nimzo-Indian Defense")
            .with_variation("c2c4 g7g6", "King's Indian Defense"),
    ]
}
