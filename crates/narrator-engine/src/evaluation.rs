//! Chess position evaluation types.

use serde::Serialize;

/// Sentinel centipawn magnitude used when a mate score is compared
/// against centipawn thresholds.
pub const MATE_SCORE: i32 = 10_000;

/// Represents a chess position evaluation.
///
/// Evaluations can be either centipawn scores (for normal positions)
/// or mate scores (when a forced mate is found). Both are reported from
/// the perspective of the side to move in the analyzed position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Evaluation {
    /// Centipawn evaluation (positive = side-to-move advantage).
    Centipawns(i32),
    /// Mate in N moves (positive = side to move wins).
    Mate(i32),
}

impl Evaluation {
    /// Builds an evaluation from the two mutually exclusive UCI score
    /// fields. A mate score takes precedence when both are present.
    pub fn from_uci_score(cp: Option<i32>, mate: Option<i32>) -> Option<Self> {
        match (cp, mate) {
            (_, Some(n)) => Some(Evaluation::Mate(n)),
            (Some(cp), None) => Some(Evaluation::Centipawns(cp)),
            (None, None) => None,
        }
    }

    /// Converts to centipawns, saturating mate scores to ±[`MATE_SCORE`].
    #[must_use]
    pub const fn to_centipawns(self) -> i32 {
        match self {
            Evaluation::Centipawns(cp) => cp,
            Evaluation::Mate(n) => {
                if n > 0 {
                    MATE_SCORE
                } else {
                    -MATE_SCORE
                }
            }
        }
    }

    /// Returns the evaluation seen from the other side's perspective.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Evaluation::Centipawns(cp) => Evaluation::Centipawns(-cp),
            Evaluation::Mate(n) => Evaluation::Mate(-n),
        }
    }

    /// Returns true if this is a mate score.
    #[must_use]
    pub const fn is_mate(self) -> bool {
        matches!(self, Evaluation::Mate(_))
    }

    /// Returns the evaluation in pawns, saturating mates.
    #[must_use]
    pub fn to_pawns(self) -> f64 {
        f64::from(self.to_centipawns()) / 100.0
    }
}

impl std::fmt::Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Evaluation::Centipawns(cp) => write!(f, "{:+.1}", f64::from(cp) / 100.0),
            Evaluation::Mate(n) if n >= 0 => write!(f, "Mate in {n}"),
            Evaluation::Mate(n) => write!(f, "Mated in {}", -n),
        }
    }
}
