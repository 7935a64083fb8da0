//! Checkmate pattern identification.
//!
//! Classification runs in two ordered passes: a fixed slice of named
//! rules matched against the move history and final position, then a
//! lookup of the mating side's piece combination around the mated king.
//! Rule order is significant; the first matching rule wins.

use narrator_core::{Board, Color, File, Move, Piece, Rank, Square};

/// Everything a mate rule can inspect.
pub struct MateContext<'a> {
    /// The position after the mating move; the checkmated side is to
    /// move.
    pub board: &'a Board,
    /// The mating move.
    pub mov: Move,
    /// The game's moves in order, including the mating move.
    pub history: &'a [Move],
}

impl MateContext<'_> {
    fn mated(&self) -> Color {
        self.board.side_to_move()
    }

    fn mating(&self) -> Color {
        self.board.side_to_move().opposite()
    }

    /// The piece that landed on the mating move's destination, if it
    /// belongs to the mating side.
    fn mating_piece(&self) -> Option<Piece> {
        match self.board.piece_at(self.mov.to()) {
            Some((piece, color)) if color == self.mating() => Some(piece),
            _ => None,
        }
    }
}

type MateRule = (&'static str, fn(&MateContext) -> bool);

/// Named special patterns, checked in this order before the generic
/// piece-combination pass.
const SPECIAL_RULES: &[MateRule] = &[
    ("Fool's Mate", fools_mate),
    ("Scholar's Mate", scholars_mate),
    ("Back Rank Mate", back_rank_mate),
    ("Smothered Mate", smothered_mate),
    ("Arabian Mate", arabian_mate),
];

/// Names the mating pattern of a checkmated position.
///
/// Only meaningful when `ctx.board` is checkmate; callers check that
/// first. Falls back to the generic label "Checkmate" when neither a
/// special rule nor a piece combination matches.
#[must_use]
pub fn classify(ctx: &MateContext) -> &'static str {
    for (name, rule) in SPECIAL_RULES {
        if rule(ctx) {
            return name;
        }
    }
    combination_name(ctx).unwrap_or("Checkmate")
}

/// Mate within the first two full moves, set up by the mated side
/// weakening its king with an f- or g-file pawn push.
fn fools_mate(ctx: &MateContext) -> bool {
    if ctx.history.len() > 4 {
        return false;
    }
    let mated = ctx.mated();
    let pawn_rank = match mated {
        Color::White => Rank::R2,
        Color::Black => Rank::R7,
    };
    let start = match mated {
        Color::White => 0,
        Color::Black => 1,
    };
    ctx.history.iter().skip(start).step_by(2).any(|m| {
        matches!(m.from().file(), File::F | File::G) && m.from().rank() == pawn_rank
    })
}

/// Mate within the first four full moves via the classic early queen and
/// bishop deployment.
fn scholars_mate(ctx: &MateContext) -> bool {
    if ctx.history.len() > 8 {
        return false;
    }
    let keys: &[&str] = match ctx.mating() {
        Color::White => &["f1c4", "d1h5", "d1f3"],
        Color::Black => &["f8c5", "d8h4", "d8f6"],
    };
    ctx.history
        .iter()
        .any(|m| keys.contains(&m.to_coord().as_str()))
}

/// A queen or rook delivering mate on the mated side's back rank with
/// the king trapped on that rank.
fn back_rank_mate(ctx: &MateContext) -> bool {
    let back = ctx.mated().back_rank();
    matches!(ctx.mating_piece(), Some(Piece::Queen | Piece::Rook))
        && ctx.mov.to().rank() == back
        && ctx
            .board
            .king_square(ctx.mated())
            .is_some_and(|king| king.rank() == back)
}

/// A knight delivering mate while every flight square is occupied.
fn smothered_mate(ctx: &MateContext) -> bool {
    if ctx.mating_piece() != Some(Piece::Knight) {
        return false;
    }
    let Some(king) = ctx.board.king_square(ctx.mated()) else {
        return false;
    };
    adjacent(king)
        .into_iter()
        .all(|sq| ctx.board.piece_at(sq).is_some())
}

/// A knight delivering mate with a rook standing next to the mated king.
fn arabian_mate(ctx: &MateContext) -> bool {
    if ctx.mating_piece() != Some(Piece::Knight) {
        return false;
    }
    let Some(king) = ctx.board.king_square(ctx.mated()) else {
        return false;
    };
    let rook = (Piece::Rook, ctx.mating());
    adjacent(king)
        .into_iter()
        .any(|sq| ctx.board.piece_at(sq) == Some(rook))
}

/// Looks up the sorted multiset of mating-side piece kinds attacking the
/// mated king's vicinity. Kings are excluded; a king cannot deliver
/// mate.
fn combination_name(ctx: &MateContext) -> Option<&'static str> {
    let king = ctx.board.king_square(ctx.mated())?;
    let mut vicinity = adjacent(king);
    vicinity.push(king);

    let mating = ctx.mating();
    let mut kinds: Vec<Piece> = Square::all()
        .filter_map(|sq| match ctx.board.piece_at(sq) {
            Some((piece, color)) if color == mating && piece != Piece::King => {
                Some((sq, piece))
            }
            _ => None,
        })
        .filter(|&(sq, _)| {
            ctx.board
                .attacked_squares(sq)
                .iter()
                .any(|attacked| vicinity.contains(attacked))
        })
        .map(|(_, piece)| piece)
        .collect();
    kinds.sort();

    match kinds.as_slice() {
        [Piece::Queen] => Some("Queen Checkmate"),
        [Piece::Rook] => Some("Rook Checkmate"),
        [Piece::Rook, Piece::Rook] => Some("Two-Rook Checkmate"),
        [Piece::Bishop, Piece::Bishop] => Some("Two-Bishop Checkmate"),
        [Piece::Knight, Piece::Bishop] => Some("Bishop and Knight Checkmate"),
        _ => None,
    }
}

/// The up-to-eight squares surrounding `sq`.
fn adjacent(sq: Square) -> Vec<Square> {
    let mut out = Vec::with_capacity(8);
    for dr in -1..=1 {
        for df in -1..=1 {
            if dr == 0 && df == 0 {
                continue;
            }
            if let Some(next) = sq.offset(dr, df) {
                out.push(next);
            }
        }
    }
    out
}
