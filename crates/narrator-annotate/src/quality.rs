//! Move quality classification.

use narrator_engine::Evaluation;
use serde::Serialize;

/// At or below this score (centipawns) a move is a blunder.
pub const BLUNDER_THRESHOLD: i32 = -200;
/// At or below this score (centipawns) a move is a mistake.
pub const MISTAKE_THRESHOLD: i32 = -100;
/// At or above this score (centipawns) the mover had a win available.
pub const MISSED_WIN_THRESHOLD: i32 = 300;

/// Classification of a played move, derived from the engine's best-line
/// score for the side to move before the move was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveQuality {
    Blunder,
    Mistake,
    Good,
    /// The position held a winning continuation; flags an opportunity,
    /// not an error already made.
    MissedWin,
}

impl MoveQuality {
    /// Classifies a pre-move evaluation from the mover's perspective.
    ///
    /// Mate scores saturate to the sentinel magnitude before comparison,
    /// so a "mated in N" signal always classifies as a blunder. Boundaries
    /// are closed on the blunder/mistake side and on the missed-win side.
    #[must_use]
    pub fn classify(eval: Evaluation) -> Self {
        let cp = eval.to_centipawns();
        if cp <= BLUNDER_THRESHOLD {
            MoveQuality::Blunder
        } else if cp <= MISTAKE_THRESHOLD {
            MoveQuality::Mistake
        } else if cp >= MISSED_WIN_THRESHOLD {
            MoveQuality::MissedWin
        } else {
            MoveQuality::Good
        }
    }

    /// Returns the delta applied to the mover's player score. A missed
    /// win carries no penalty.
    #[must_use]
    pub const fn score_delta(self) -> i32 {
        match self {
            MoveQuality::Blunder => -20,
            MoveQuality::Mistake => -10,
            MoveQuality::Good => 5,
            MoveQuality::MissedWin => 0,
        }
    }

    /// Returns the highlight color key for the overlay consumer.
    #[must_use]
    pub const fn highlight(self) -> Highlight {
        match self {
            MoveQuality::Blunder => Highlight::Blunder,
            MoveQuality::Mistake => Highlight::Mistake,
            MoveQuality::Good => Highlight::GoodMove,
            MoveQuality::MissedWin => Highlight::MissedWin,
        }
    }
}

/// Classification-driven highlight color key. [`Highlight::Neutral`] is
/// used when a move carries no classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    Blunder,
    Mistake,
    MissedWin,
    GoodMove,
    Neutral,
}
