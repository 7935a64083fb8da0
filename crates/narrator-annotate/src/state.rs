//! Running game state owned by the annotation engine.

use narrator_core::{Color, Move, Piece, Square};
use narrator_engine::Evaluation;
use serde::Serialize;

use crate::quality::MoveQuality;

/// A pair of values, one per side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PerSide<T> {
    pub white: T,
    pub black: T,
}

impl<T> PerSide<T> {
    /// Returns the value for the given side.
    pub fn get(&self, color: Color) -> &T {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    /// Returns a mutable reference to the value for the given side.
    pub fn get_mut(&mut self, color: Color) -> &mut T {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}

/// A move recorded in a notable-move ledger together with the engine
/// evaluation that triggered its classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NotableMove {
    #[serde(rename = "move")]
    pub mov: Move,
    pub eval: Evaluation,
}

/// Per-classification, per-side ledgers of notable moves. Ledgers are
/// append-only for the duration of a game.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NotableMoves {
    pub blunders: PerSide<Vec<NotableMove>>,
    pub mistakes: PerSide<Vec<NotableMove>>,
    pub good_moves: PerSide<Vec<NotableMove>>,
    pub missed_wins: PerSide<Vec<NotableMove>>,
}

impl NotableMoves {
    /// Returns the ledger for a classification.
    pub fn ledger(&self, quality: MoveQuality) -> &PerSide<Vec<NotableMove>> {
        match quality {
            MoveQuality::Blunder => &self.blunders,
            MoveQuality::Mistake => &self.mistakes,
            MoveQuality::Good => &self.good_moves,
            MoveQuality::MissedWin => &self.missed_wins,
        }
    }

    fn ledger_mut(&mut self, quality: MoveQuality) -> &mut PerSide<Vec<NotableMove>> {
        match quality {
            MoveQuality::Blunder => &mut self.blunders,
            MoveQuality::Mistake => &mut self.mistakes,
            MoveQuality::Good => &mut self.good_moves,
            MoveQuality::MissedWin => &mut self.missed_wins,
        }
    }
}

/// All state the annotation engine carries across a game.
///
/// Created once per game and mutated once per processed move, never
/// reset mid-game. Categorical fields change only when the newly
/// computed value differs from the stored one; the commentary reducer
/// relies on that to narrate transitions instead of restating the
/// position every move.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunningState {
    /// Which side controls the center, if either.
    pub center_control: Option<Color>,
    /// Which side is better developed, if either.
    pub development: Option<Color>,
    /// Which side has the safer king, if either. Tracked for the
    /// overlay consumer; not narrated.
    pub king_safety: Option<Color>,
    /// The most specific opening name matched so far. Forced to `None`
    /// once the game passes the book window.
    pub current_opening: Option<String>,
    /// Pieces captured by each side, in capture order.
    pub captured_pieces: PerSide<Vec<Piece>>,
    /// White piece values minus black piece values, in pawns.
    pub material_balance: i32,
    /// Performance score per side, clamped to [0, 100].
    pub player_scores: PerSide<i32>,
    /// Notable-move ledgers.
    pub notable_moves: NotableMoves,
    /// From/to squares of the last processed move, for overlays.
    pub last_move: Option<(Square, Square)>,
}

impl RunningState {
    /// Creates the state for a fresh game. Both players start at 100.
    #[must_use]
    pub fn new() -> Self {
        RunningState {
            center_control: None,
            development: None,
            king_safety: None,
            current_opening: None,
            captured_pieces: PerSide::default(),
            material_balance: 0,
            player_scores: PerSide {
                white: 100,
                black: 100,
            },
            notable_moves: NotableMoves::default(),
            last_move: None,
        }
    }

    /// Applies a score delta to one side, clamping to [0, 100].
    pub fn apply_score_delta(&mut self, side: Color, delta: i32) {
        let score = self.player_scores.get_mut(side);
        *score = (*score + delta).clamp(0, 100);
    }

    /// Appends a capture to the capturing side's ledger.
    pub fn record_capture(&mut self, by: Color, piece: Piece) {
        self.captured_pieces.get_mut(by).push(piece);
    }

    /// Appends a classified move to its notable-move ledger.
    pub fn record_notable(
        &mut self,
        side: Color,
        quality: MoveQuality,
        mov: Move,
        eval: Evaluation,
    ) {
        self.notable_moves
            .ledger_mut(quality)
            .get_mut(side)
            .push(NotableMove { mov, eval });
    }
}

impl Default for RunningState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_state_starts_at_full_score() {
        let state = RunningState::new();
        assert_eq!(*state.player_scores.get(Color::White), 100);
        assert_eq!(*state.player_scores.get(Color::Black), 100);
        assert_eq!(state.material_balance, 0);
        assert_eq!(state.current_opening, None);
        assert!(state.captured_pieces.white.is_empty());
    }

    #[test]
    fn score_clamps_at_both_ends() {
        let mut state = RunningState::new();
        state.apply_score_delta(Color::White, 5);
        assert_eq!(state.player_scores.white, 100);
        for _ in 0..10 {
            state.apply_score_delta(Color::Black, -20);
        }
        assert_eq!(state.player_scores.black, 0);
        state.apply_score_delta(Color::Black, 5);
        assert_eq!(state.player_scores.black, 5);
    }

    #[test]
    fn notable_ledger_routes_by_quality_and_side() {
        let mut state = RunningState::new();
        let mov = Move::from_coord("d1h5").unwrap();
        state.record_notable(
            Color::Black,
            MoveQuality::Blunder,
            mov,
            Evaluation::Centipawns(-350),
        );
        assert_eq!(state.notable_moves.blunders.black.len(), 1);
        assert_eq!(state.notable_moves.blunders.black[0].mov, mov);
        assert!(state.notable_moves.blunders.white.is_empty());
        assert!(state.notable_moves.mistakes.black.is_empty());
    }

    #[test]
    fn capture_ledger_is_append_only_per_side() {
        let mut state = RunningState::new();
        state.record_capture(Color::White, Piece::Pawn);
        state.record_capture(Color::White, Piece::Knight);
        state.record_capture(Color::Black, Piece::Queen);
        assert_eq!(state.captured_pieces.white, vec![Piece::Pawn, Piece::Knight]);
        assert_eq!(state.captured_pieces.black, vec![Piece::Queen]);
    }

    #[test]
    fn snapshot_serializes() {
        let mut state = RunningState::new();
        state.current_opening = Some("Open Game".to_string());
        state.last_move = Some((
            Square::from_algebraic("e2").unwrap(),
            Square::E4,
        ));
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains(r#""current_opening":"Open Game""#));
        assert!(json.contains(r#""last_move":["e2","e4"]"#));
    }

    proptest! {
        #[test]
        fn player_score_stays_in_range(
            deltas in proptest::collection::vec(
                prop_oneof![Just(-20), Just(-10), Just(0), Just(5)],
                0..200,
            )
        ) {
            let mut state = RunningState::new();
            for delta in deltas {
                state.apply_score_delta(Color::White, delta);
                prop_assert!((0..=100).contains(&state.player_scores.white));
            }
        }
    }
}
