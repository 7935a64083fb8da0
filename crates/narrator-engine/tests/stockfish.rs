//! Integration tests against a real Stockfish binary.
//!
//! These tests require Stockfish to be installed and available in PATH.
//! Run with: `cargo test -p narrator-engine --test stockfish -- --ignored`

use narrator_core::Board;
use narrator_engine::{AnalysisProvider, EngineConfig, Evaluation, UciEngine};

/// Check if Stockfish is available in PATH.
fn stockfish_available() -> bool {
    std::process::Command::new("stockfish")
        .arg("--version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .is_ok()
}

fn test_config() -> EngineConfig {
    EngineConfig {
        depth: 10,
        ..EngineConfig::default()
    }
}

#[test]
#[ignore = "requires Stockfish"]
fn analyzes_the_starting_position() {
    if !stockfish_available() {
        eprintln!("Skipping test: Stockfish not available");
        return;
    }

    let mut engine = UciEngine::spawn(test_config()).expect("Failed to spawn engine");
    assert!(
        engine.name().to_lowercase().contains("stockfish"),
        "Engine name should contain 'Stockfish', got: {}",
        engine.name()
    );

    let board = Board::startpos();
    let suggestions = engine
        .analyze(&board, 3)
        .expect("Failed to analyze starting position");

    assert!(!suggestions.is_empty(), "Expected at least one suggestion");
    assert_eq!(suggestions[0].rank, 1);
    assert!(
        board.legal_moves().contains(&suggestions[0].mov),
        "Best move {} should be legal from the starting position",
        suggestions[0].mov
    );
}

#[test]
#[ignore = "requires Stockfish"]
fn reports_a_mate_in_one() {
    if !stockfish_available() {
        eprintln!("Skipping test: Stockfish not available");
        return;
    }

    let mut engine = UciEngine::spawn(test_config()).expect("Failed to spawn engine");

    // White mates with Qg7.
    let board = Board::from_fen("6k1/8/5K1Q/8/8/8/8/8 w - - 0 1").expect("valid FEN");
    let suggestions = engine.analyze(&board, 1).expect("Failed to analyze");

    assert_eq!(
        suggestions[0].eval,
        Evaluation::Mate(1),
        "Expected a mate-in-one score, got {}",
        suggestions[0].eval
    );
}

#[test]
#[ignore = "requires Stockfish"]
fn checkmated_position_yields_no_suggestions() {
    if !stockfish_available() {
        eprintln!("Skipping test: Stockfish not available");
        return;
    }

    let mut engine = UciEngine::spawn(test_config()).expect("Failed to spawn engine");

    // Fool's mate final position, white to move and mated.
    let board = Board::from_fen(
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
    )
    .expect("valid FEN");
    let suggestions = engine.analyze(&board, 3).expect("Failed to analyze");
    assert!(suggestions.is_empty());
}
