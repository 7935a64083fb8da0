//! Best-move recommendations with human-readable reasoning.

use narrator_core::{Board, Move, Piece, Square};
use narrator_engine::{EngineSuggestion, Evaluation};
use serde::Serialize;

/// A scored alternative to the recommended move.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alternative {
    #[serde(rename = "move")]
    pub mov: Move,
    pub eval: Evaluation,
    pub reasoning: String,
    pub consequences: Vec<String>,
}

/// The engine's recommendation for one side, enriched with reasoning,
/// consequence analysis, and up to two alternatives.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    #[serde(rename = "move")]
    pub mov: Move,
    pub eval: Evaluation,
    /// Display line, e.g. "Best move: e2e4 (+0.3)".
    pub text: String,
    pub reasoning: String,
    pub consequences: Vec<String>,
    pub alternatives: Vec<Alternative>,
}

/// Builds a recommendation from a ranked suggestion list. The first
/// entry becomes the recommendation, the next two its alternatives.
/// Returns `None` for an empty list.
#[must_use]
pub fn recommend(board: &Board, suggestions: &[EngineSuggestion]) -> Option<Recommendation> {
    let best = suggestions.first()?;
    Some(Recommendation {
        mov: best.mov,
        eval: best.eval,
        text: format!("Best move: {} ({})", best.mov, best.eval),
        reasoning: move_reasoning(board, best.mov),
        consequences: move_consequences(board, best.mov),
        alternatives: suggestions
            .iter()
            .skip(1)
            .take(2)
            .map(|s| Alternative {
                mov: s.mov,
                eval: s.eval,
                reasoning: move_reasoning(board, s.mov),
                consequences: move_consequences(board, s.mov),
            })
            .collect(),
    })
}

/// Summarizes why a move is worth playing: captures, checks, center
/// control, and development, or "improves position" when none apply.
#[must_use]
pub fn move_reasoning(board: &Board, mov: Move) -> String {
    let mut reasons = Vec::new();

    if let Some(captured) = board.captured_piece(mov) {
        reasons.push(format!("captures {captured}"));
    }

    let after = board.make_move(mov);
    if after.in_check(after.side_to_move()) {
        reasons.push("gives check".to_string());
    }
    if Square::CENTER.contains(&mov.to()) {
        reasons.push("controls center".to_string());
    }
    if let Some((piece, color)) = after.piece_at(mov.to()) {
        if piece.is_minor() && mov.to().rank() != color.back_rank() {
            reasons.push("develops piece".to_string());
        }
    }

    if reasons.is_empty() {
        "improves position".to_string()
    } else {
        reasons.join(", ")
    }
}

/// Lists what a move achieves in the resulting position: tactical
/// outcomes, the moved piece's safety, square control, and pawn
/// structure effects.
#[must_use]
pub fn move_consequences(board: &Board, mov: Move) -> Vec<String> {
    let mut consequences = Vec::new();
    let Some((piece, color)) = board.piece_at(mov.from()) else {
        return consequences;
    };
    let after = board.make_move(mov);

    if after.in_check(after.side_to_move()) {
        consequences.push("Gives check".to_string());
    }
    if after.is_checkmate() {
        consequences.push("Checkmate!".to_string());
    } else if after.is_stalemate() {
        consequences.push("Forces stalemate".to_string());
    }

    if after.is_attacked_by(color, mov.to()) {
        consequences.push("Piece remains protected".to_string());
    }
    if after.is_attacked_by(color.opposite(), mov.to()) {
        consequences.push("Piece will be under attack".to_string());
    }

    if Square::CENTER.contains(&mov.to()) {
        consequences.push("Controls central square".to_string());
    }
    if after.attacked_squares(mov.to()).len() > 2 {
        consequences.push("Improves piece coordination".to_string());
    }

    if piece == Piece::Pawn {
        if mov.to().rank() == color.opposite().back_rank() {
            consequences.push("Leads to pawn promotion".to_string());
        } else if !after
            .attacked_squares(mov.to())
            .iter()
            .any(|&sq| after.piece_at(sq) == Some((Piece::Pawn, color)))
        {
            consequences.push("Creates isolated pawn".to_string());
        }
    }

    consequences
}
