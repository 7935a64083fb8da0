//! Per-move annotation output.

use narrator_core::{Color, Move};
use serde::Serialize;

use crate::advice::Recommendation;
use crate::quality::{Highlight, MoveQuality};
use crate::state::{PerSide, RunningState};

/// How a finished game ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verdict {
    Checkmate { winner: Color, pattern: String },
    Stalemate,
    InsufficientMaterial,
    Resignation { winner: Color },
}

/// Everything produced for a single annotated move: the narration text,
/// the quality judgement, engine recommendations for both sides, and a
/// snapshot of the running game state.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotationEvent {
    /// One-based ply number of the annotated move.
    pub ply: u32,
    /// The side that played the move.
    pub side: Color,
    #[serde(rename = "move")]
    pub mov: Move,
    pub text: String,
    /// Absent when no engine was available for this move.
    pub quality: Option<MoveQuality>,
    pub highlight: Highlight,
    /// Best-move advice for the mover (pre-move) and the opponent
    /// (post-move), where the engine produced any.
    pub suggestions: PerSide<Option<Recommendation>>,
    pub state: RunningState,
    /// Set only on the final move of a decided game.
    pub verdict: Option<Verdict>,
}
