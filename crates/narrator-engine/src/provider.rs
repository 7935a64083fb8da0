//! The analysis provider seam.

use narrator_core::{Board, Move};
use serde::Serialize;

use crate::uci::EngineError;
use crate::Evaluation;

/// One ranked candidate move returned by an analysis provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EngineSuggestion {
    /// The candidate move.
    #[serde(rename = "move")]
    pub mov: Move,
    /// The evaluation of the candidate, from the side to move's
    /// perspective.
    pub eval: Evaluation,
    /// Rank among the returned candidates, 1 = best.
    pub rank: u32,
}

/// Source of engine evaluations for a position.
///
/// The annotation pipeline talks to the external engine only through this
/// trait, so tests can substitute a scripted provider. Implementations
/// return up to `candidates` suggestions ordered best-first; returning
/// fewer (or an error) means analysis is unavailable for that position.
pub trait AnalysisProvider {
    /// Analyzes `board` and returns up to `candidates` ranked suggestions.
    fn analyze(
        &mut self,
        board: &Board,
        candidates: usize,
    ) -> Result<Vec<EngineSuggestion>, EngineError>;
}
