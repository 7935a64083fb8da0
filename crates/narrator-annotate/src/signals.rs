//! Cheap positional signals computed directly from a board position.

use narrator_core::{Board, Color, Square};

/// Raw positional sums for a single position. Pure function of the
/// board; no engine involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionSignals {
    /// Center-square attack balance (+ for white).
    pub center_control: i32,
    /// Minor pieces moved off their home rank (+ for white).
    pub development: i32,
    /// Retained castling rights (+ for white).
    pub king_safety: i32,
}

impl PositionSignals {
    /// Maps a raw sum to a categorical leader: above +1 for white,
    /// below -1 for black, neither otherwise.
    fn leader(value: i32) -> Option<Color> {
        if value > 1 {
            Some(Color::White)
        } else if value < -1 {
            Some(Color::Black)
        } else {
            None
        }
    }

    /// Which side controls the center, if either.
    #[must_use]
    pub fn center_leader(&self) -> Option<Color> {
        Self::leader(self.center_control)
    }

    /// Which side is better developed, if either.
    #[must_use]
    pub fn development_leader(&self) -> Option<Color> {
        Self::leader(self.development)
    }

    /// Which side has the safer king, if either.
    #[must_use]
    pub fn king_safety_leader(&self) -> Option<Color> {
        Self::leader(self.king_safety)
    }
}

/// Evaluates the positional signals for a board.
///
/// Center control counts attacks on the four center squares; development
/// counts knights and bishops standing beyond their home rank; king
/// safety nets the retained castling rights.
#[must_use]
pub fn evaluate(board: &Board) -> PositionSignals {
    let mut center_control = 0;
    for sq in Square::CENTER {
        if board.is_attacked_by(Color::White, sq) {
            center_control += 1;
        }
        if board.is_attacked_by(Color::Black, sq) {
            center_control -= 1;
        }
    }

    let mut development = 0;
    for sq in Square::all() {
        let Some((piece, color)) = board.piece_at(sq) else {
            continue;
        };
        if !piece.is_minor() || sq.rank() == color.back_rank() {
            continue;
        }
        match color {
            Color::White => development += 1,
            Color::Black => development -= 1,
        }
    }

    let mut king_safety = 0;
    if board.castling().any_for(Color::White) {
        king_safety += 1;
    }
    if board.castling().any_for(Color::Black) {
        king_safety -= 1;
    }

    PositionSignals {
        center_control,
        development,
        king_safety,
    }
}
