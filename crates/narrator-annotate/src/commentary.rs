//! Commentary text assembly.
//!
//! The always-included parts of a move's narration (mover, squares,
//! capture, terminal state) are composed by the annotator; this module
//! holds the base move description and the state-diff reducer that emits
//! a sentence fragment only when a tracked aspect of the game actually
//! changes.

use narrator_core::{Board, Color, Move};

use crate::signals::PositionSignals;
use crate::state::RunningState;

/// Describes the move itself: mover's side and piece kind, origin and
/// destination, and the captured piece if any. Read from the pre-move
/// position (en passant captures a pawn that is not on the destination
/// square).
#[must_use]
pub fn describe_move(board: &Board, mov: Move) -> String {
    let Some((piece, color)) = board.piece_at(mov.from()) else {
        return format!("Move {mov}");
    };
    let mut text = format!(
        "{} {} moves from {} to {}",
        color,
        piece,
        mov.from(),
        mov.to(),
    );
    if let Some(captured) = board.captured_piece(mov) {
        text.push_str(&format!(" capturing the {captured}"));
    }
    text
}

/// Folds freshly computed signals into the running state, returning one
/// narration fragment per field that changed.
///
/// The opening and the center-control and development leaders are
/// narrated on transition only. King safety is updated for the state
/// snapshot but never narrated. `past_book` marks a game beyond the
/// opening book's ply window; the tracked opening is then dropped.
#[must_use]
pub fn reduce(
    state: &mut RunningState,
    signals: &PositionSignals,
    opening: Option<&str>,
    past_book: bool,
) -> Vec<String> {
    let mut fragments = Vec::new();

    // Within the book window the last matched name is retained when the
    // game merely deviates from book; past the window it is dropped,
    // silently.
    if past_book {
        state.current_opening = None;
    } else if let Some(name) = opening {
        if state.current_opening.as_deref() != Some(name) {
            state.current_opening = Some(name.to_string());
            fragments.push(format!("This is a {name}"));
        }
    }

    let center = signals.center_leader();
    if center != state.center_control {
        state.center_control = center;
        if let Some(side) = center {
            fragments.push(format!("{side} now controls the center"));
        }
    }

    let development = signals.development_leader();
    if development != state.development {
        state.development = development;
        if let Some(side) = development {
            fragments.push(format!("{side} now has better piece development"));
        }
    }

    // King safety transitions are tracked but not surfaced in narration.
    state.king_safety = signals.king_safety_leader();

    fragments
}
