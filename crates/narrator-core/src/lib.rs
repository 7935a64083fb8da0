//! Core chess types for the narrator.
//!
//! This crate provides the fundamental types the annotation pipeline works
//! with:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] for move representation in coordinate notation
//! - [`Board`] for position state, attack detection, and move application
//! - FEN parsing and serialization
//!
//! The board is a mailbox (piece-per-square) representation: the narrator
//! processes one game move at a time, so attack rays and move lists are
//! computed directly rather than through precomputed bitboard tables.

mod board;
mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use board::{Board, CastlingRights};
pub use color::Color;
pub use fen::FenError;
pub use mov::Move;
pub use piece::Piece;
pub use square::{File, Rank, Square};
