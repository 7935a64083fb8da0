//! Chess opening book and prefix matching.
//!
//! This crate stores opening lines keyed by coordinate-notation move
//! prefixes and resolves a game's move sequence to the most specific
//! named line. It ships a built-in book and supports loading custom
//! books from JSON.

pub mod book;
pub mod builtin;
pub mod opening;

pub use book::{BookError, OpeningBook, MAX_BOOK_PLIES};
pub use builtin::builtin_book;
pub use opening::{OpeningLine, Variation};
