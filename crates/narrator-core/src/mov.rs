//! Move representation.
//!
//! Moves are identified throughout the narrator by coordinate notation
//! (origin square + destination square + optional promotion piece, e.g.
//! `e2e4` or `e7e8q`), which is also the lookup key for the opening table.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::{Piece, Square};

/// A chess move: from-square, to-square, and optional promotion piece.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    promotion: Option<Piece>,
}

impl Move {
    /// Creates a new move without promotion.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    /// Creates a promotion move.
    #[inline]
    pub const fn promotion(from: Square, to: Square, piece: Piece) -> Self {
        Move {
            from,
            to,
            promotion: Some(piece),
        }
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Returns the promotion piece, if any.
    #[inline]
    pub const fn promotion_piece(self) -> Option<Piece> {
        self.promotion
    }

    /// Returns the coordinate notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_coord(self) -> String {
        let promo = match self.promotion {
            Some(Piece::Knight) => "n",
            Some(Piece::Bishop) => "b",
            Some(Piece::Rook) => "r",
            Some(Piece::Queen) => "q",
            _ => "",
        };
        format!("{}{}{}", self.from, self.to, promo)
    }

    /// Parses a move from coordinate notation.
    pub fn from_coord(s: &str) -> Option<Self> {
        if s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let promotion = if s.len() == 5 {
            match s.as_bytes()[4].to_ascii_lowercase() {
                b'n' => Some(Piece::Knight),
                b'b' => Some(Piece::Bishop),
                b'r' => Some(Piece::Rook),
                b'q' => Some(Piece::Queen),
                _ => return None,
            }
        } else {
            None
        };
        Some(Move {
            from,
            to,
            promotion,
        })
    }
}

impl Serialize for Move {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_coord())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_coord())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coord())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{File, Rank};

    #[test]
    fn move_coord_roundtrip() {
        let e2 = Square::new(File::E, Rank::R2);
        let e4 = Square::new(File::E, Rank::R4);
        let m = Move::new(e2, e4);
        assert_eq!(m.to_coord(), "e2e4");
        assert_eq!(Move::from_coord("e2e4"), Some(m));
    }

    #[test]
    fn move_promotion() {
        let e7 = Square::new(File::E, Rank::R7);
        let e8 = Square::new(File::E, Rank::R8);
        let promo = Move::promotion(e7, e8, Piece::Queen);
        assert_eq!(promo.to_coord(), "e7e8q");
        assert_eq!(Move::from_coord("e7e8q"), Some(promo));
        assert_eq!(Move::from_coord("e7e8Q"), Some(promo));
        assert_eq!(
            Move::from_coord("e7e8n").unwrap().promotion_piece(),
            Some(Piece::Knight)
        );
    }

    #[test]
    fn move_from_coord_invalid() {
        assert!(Move::from_coord("e2").is_none());
        assert!(Move::from_coord("e2e").is_none());
        assert!(Move::from_coord("e2e4qq").is_none());
        assert!(Move::from_coord("e2e9").is_none());
        assert!(Move::from_coord("e7e8x").is_none());
    }

    #[test]
    fn move_debug_display() {
        let m = Move::from_coord("g1f3").unwrap();
        assert_eq!(format!("{:?}", m), "Move(g1f3)");
        assert_eq!(format!("{}", m), "g1f3");
    }
}
