//! End-of-game summary.

use narrator_core::{Color, Piece};
use serde::Serialize;
use thiserror::Error;

use crate::event::Verdict;
use crate::state::{NotableMoves, PerSide, RunningState};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to serialize report")]
    Serialize(#[from] serde_json::Error),
}

/// Final statistics for an annotated game.
#[derive(Debug, Clone, Serialize)]
pub struct GameReport {
    pub opening: Option<String>,
    pub player_scores: PerSide<i32>,
    pub notable_moves: NotableMoves,
    pub captured_pieces: PerSide<Vec<Piece>>,
    pub material_balance: i32,
    pub verdict: Option<Verdict>,
}

impl GameReport {
    #[must_use]
    pub fn new(state: &RunningState, verdict: Option<Verdict>) -> Self {
        GameReport {
            opening: state.current_opening.clone(),
            player_scores: state.player_scores,
            notable_moves: state.notable_moves.clone(),
            captured_pieces: state.captured_pieces.clone(),
            material_balance: state.material_balance,
            verdict,
        }
    }

    /// One-line statistics for a side, e.g. "2 blunders, 1 mistake".
    /// Returns "No notable statistics" when nothing was recorded.
    #[must_use]
    pub fn summary(&self, side: Color) -> String {
        let counts = [
            (self.notable_moves.blunders.get(side).len(), "blunder"),
            (self.notable_moves.mistakes.get(side).len(), "mistake"),
            (self.notable_moves.good_moves.get(side).len(), "good move"),
            (self.notable_moves.missed_wins.get(side).len(), "missed win"),
        ];
        let parts: Vec<String> = counts
            .iter()
            .filter(|(count, _)| *count > 0)
            .map(|(count, noun)| {
                if *count == 1 {
                    format!("1 {noun}")
                } else {
                    format!("{count} {noun}s")
                }
            })
            .collect();
        if parts.is_empty() {
            "No notable statistics".to_string()
        } else {
            parts.join(", ")
        }
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
