//! Core opening types.

use serde::{Deserialize, Serialize};

/// A named opening line keyed by a coordinate-notation move prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningLine {
    /// The move prefix in coordinate notation (e.g., "e2e4 e7e5").
    pub prefix: String,
    /// The name of the opening.
    pub name: String,
    /// More specific named continuations of this line.
    #[serde(default)]
    pub variations: Vec<Variation>,
}

/// A named variation within an opening line.
///
/// The variation's moves continue from the parent line's prefix; its
/// `suffix` holds only the additional moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    /// The continuation moves in coordinate notation (e.g., "g1f3 b8c6 f1b5").
    pub suffix: String,
    /// The name of the variation.
    pub name: String,
}

impl OpeningLine {
    /// Creates a new opening line with the given prefix and name.
    #[must_use]
    pub fn new(prefix: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            name: name.into(),
            variations: Vec::new(),
        }
    }

    /// Adds a named variation to this line.
    #[must_use]
    pub fn with_variation(mut self, suffix: impl Into<String>, name: impl Into<String>) -> Self {
        self.variations.push(Variation {
            suffix: suffix.into(),
            name: name.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_line_new() {
        let line = OpeningLine::new("e2e4 e7e5", "Open Game");
        assert_eq!(line.prefix, "e2e4 e7e5");
        assert_eq!(line.name, "Open Game");
        assert!(line.variations.is_empty());
    }

    #[test]
    fn test_with_variation() {
        let line = OpeningLine::new("e2e4 e7e5", "Open Game")
            .with_variation("g1f3 b8c6 f1b5", "Ruy Lopez")
            .with_variation("f2f4", "King's Gambit");
        assert_eq!(line.variations.len(), 2);
        assert_eq!(line.variations[0].name, "Ruy Lopez");
    }

    #[test]
    fn test_serde_roundtrip() {
        let line = OpeningLine::new("e2e4 c7c5", "Sicilian Defense")
            .with_variation("g1f3 d7d6", "Sicilian Najdorf");
        let json = serde_json::to_string(&line).unwrap();
        let back: OpeningLine = serde_json::from_str(&json).unwrap();
        assert_eq!(line, back);
    }
}
