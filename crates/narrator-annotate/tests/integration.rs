//! End-to-end annotation runs over full games.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use narrator_annotate::{Annotator, Highlight, MoveQuality, Verdict};
use narrator_core::{Board, Color, Move, Piece};
use narrator_engine::{AnalysisProvider, EngineError, EngineSuggestion, Evaluation};

fn moves(s: &str) -> Vec<Move> {
    s.split_whitespace()
        .map(|m| Move::from_coord(m).unwrap())
        .collect()
}

/// Replays scripted responses, one per `analyze` call.
struct ScriptedProvider {
    responses: VecDeque<Vec<EngineSuggestion>>,
}

impl ScriptedProvider {
    fn new(responses: Vec<Vec<EngineSuggestion>>) -> Self {
        ScriptedProvider {
            responses: responses.into(),
        }
    }
}

impl AnalysisProvider for ScriptedProvider {
    fn analyze(
        &mut self,
        _board: &Board,
        _candidates: usize,
    ) -> Result<Vec<EngineSuggestion>, EngineError> {
        Ok(self.responses.pop_front().unwrap_or_default())
    }
}

/// Counts calls through a shared counter; always suggests the first
/// legal move at a flat score.
struct CountingProvider {
    calls: Arc<AtomicUsize>,
}

impl AnalysisProvider for CountingProvider {
    fn analyze(
        &mut self,
        board: &Board,
        _candidates: usize,
    ) -> Result<Vec<EngineSuggestion>, EngineError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(board
            .legal_moves()
            .first()
            .map(|&mov| EngineSuggestion {
                mov,
                eval: Evaluation::Centipawns(0),
                rank: 1,
            })
            .into_iter()
            .collect())
    }
}

struct FailingProvider;

impl AnalysisProvider for FailingProvider {
    fn analyze(
        &mut self,
        _board: &Board,
        _candidates: usize,
    ) -> Result<Vec<EngineSuggestion>, EngineError> {
        Err(EngineError::InitFailed)
    }
}

fn suggestion(mov: &str, cp: i32) -> Vec<EngineSuggestion> {
    vec![EngineSuggestion {
        mov: Move::from_coord(mov).unwrap(),
        eval: Evaluation::Centipawns(cp),
        rank: 1,
    }]
}

#[test]
fn scholars_mate_without_engine() {
    let mut annotator = Annotator::new(None);
    let game = moves("e2e4 e7e5 f1c4 b8c6 d1h5 g8f6 h5f7");
    let cancel = AtomicBool::new(false);
    let events = annotator.run(&game, &cancel).unwrap();

    assert_eq!(events.len(), 7);
    assert!(events.iter().all(|e| e.quality.is_none()));
    assert!(events.iter().all(|e| e.highlight == Highlight::Neutral));

    assert_eq!(events[0].text, "White pawn moves from e2 to e4");
    assert!(events[1].text.contains("This is a Open Game"));
    assert_eq!(events[1].state.current_opening.as_deref(), Some("Open Game"));

    let last = &events[6];
    assert!(last
        .text
        .ends_with("capturing the pawn. Checkmate! White wins with a Scholar's Mate!"));
    assert_eq!(
        last.verdict,
        Some(Verdict::Checkmate {
            winner: Color::White,
            pattern: "Scholar's Mate".to_string(),
        })
    );
    assert_eq!(last.state.captured_pieces.white, vec![Piece::Pawn]);
    assert_eq!(last.state.material_balance, 1);

    let report = annotator.report();
    assert_eq!(report.opening.as_deref(), Some("Open Game"));
    assert!(matches!(
        report.verdict,
        Some(Verdict::Checkmate { winner: Color::White, .. })
    ));
    assert_eq!(report.summary(Color::White), "No notable statistics");
}

#[test]
fn opening_dropped_after_fifteen_full_moves() {
    let mut annotator = Annotator::new(None);
    // 1. e4 e5 followed by knight shuffling: 31 plies in total.
    let mut game = String::from("e2e4 e7e5");
    for _ in 0..7 {
        game.push_str(" g1f3 g8f6 f3g1 f6g8");
    }
    game.push_str(" g1f3");
    let game = moves(&game);
    assert_eq!(game.len(), 31);

    let cancel = AtomicBool::new(false);
    let events = annotator.run(&game, &cancel).unwrap();

    assert_eq!(events[1].state.current_opening.as_deref(), Some("Open Game"));
    // Still within the book window at ply 30.
    assert_eq!(events[29].state.current_opening.as_deref(), Some("Open Game"));
    // Past fifteen full moves the tracked opening is gone, and no
    // fragment marks the transition.
    let last = events.last().unwrap();
    assert_eq!(last.state.current_opening, None);
    assert!(!last.text.contains("This is a"));
}

#[test]
fn center_control_announced_once() {
    let mut annotator = Annotator::new(None);
    let game = moves("e2e4 e7e5 g1f3 a7a6 b1c3");
    let cancel = AtomicBool::new(false);
    let events = annotator.run(&game, &cancel).unwrap();

    let mentions = events
        .iter()
        .filter(|e| e.text.contains("controls the center"))
        .count();
    assert_eq!(mentions, 1);
    assert!(events[2].text.contains("White now controls the center"));
}

#[test]
fn scripted_evaluations_drive_quality_and_scores() {
    // Two calls per move: the mover's position, then the null-move flip.
    let provider = ScriptedProvider::new(vec![
        suggestion("e2e4", 35),
        suggestion("e7e5", -10),
        suggestion("e7e5", -250),
        suggestion("d2d4", 240),
    ]);
    let mut annotator = Annotator::new(Some(Box::new(provider)));

    let first = annotator.annotate(Move::from_coord("e2e4").unwrap()).unwrap();
    assert_eq!(first.quality, Some(MoveQuality::Good));
    assert_eq!(first.highlight, Highlight::GoodMove);
    assert_eq!(*first.state.player_scores.get(Color::White), 100);
    assert!(first.suggestions.white.is_some());
    assert!(first.suggestions.black.is_some());

    let second = annotator.annotate(Move::from_coord("e7e5").unwrap()).unwrap();
    assert_eq!(second.quality, Some(MoveQuality::Blunder));
    assert_eq!(second.highlight, Highlight::Blunder);
    assert_eq!(*second.state.player_scores.get(Color::Black), 80);
    assert_eq!(second.state.notable_moves.blunders.black.len(), 1);
    assert_eq!(
        second.state.notable_moves.blunders.black[0].eval,
        Evaluation::Centipawns(-250)
    );

    let report = annotator.report();
    assert_eq!(report.summary(Color::Black), "1 blunder");
    assert_eq!(*report.player_scores.get(Color::Black), 80);
}

#[test]
fn engine_failure_degrades_to_plain_commentary() {
    let mut annotator = Annotator::new(Some(Box::new(FailingProvider)));
    let game = moves("e2e4 e7e5");
    let cancel = AtomicBool::new(false);
    let events = annotator.run(&game, &cancel).unwrap();

    assert_eq!(events.len(), 2);
    for event in &events {
        assert!(event.quality.is_none());
        assert!(event.suggestions.white.is_none());
        assert!(event.suggestions.black.is_none());
    }
    assert_eq!(events[1].state.current_opening.as_deref(), Some("Open Game"));
}

#[test]
fn exhausted_move_list_scores_resignation() {
    let mut annotator = Annotator::new(None).with_total_plies(3);
    let game = moves("e2e4 e7e5 g1f3");
    let cancel = AtomicBool::new(false);
    let events = annotator.run(&game, &cancel).unwrap();

    assert!(events[0].verdict.is_none());
    assert!(events[1].verdict.is_none());
    let last = &events[2];
    assert!(last.text.ends_with("White wins by resignation"));
    assert_eq!(
        last.verdict,
        Some(Verdict::Resignation {
            winner: Color::White
        })
    );
}

#[test]
fn opponent_probe_skipped_while_in_check() {
    let calls = Arc::new(AtomicUsize::new(0));
    let provider = CountingProvider {
        calls: Arc::clone(&calls),
    };
    let mut annotator = Annotator::new(Some(Box::new(provider)));
    // Bb5+ forces black to answer a check, so the ply after it gets a
    // single probe instead of two.
    let game = moves("e2e4 d7d5 f1b5 c7c6");
    let cancel = AtomicBool::new(false);
    let events = annotator.run(&game, &cancel).unwrap();

    assert!(events[2].text.ends_with(", putting the king in check"));
    assert!(events[3].suggestions.white.is_none());
    assert_eq!(calls.load(Ordering::Relaxed), 7);
}

#[test]
fn illegal_move_is_rejected() {
    let mut annotator = Annotator::new(None);
    let err = annotator
        .annotate(Move::from_coord("e2e5").unwrap())
        .unwrap_err();
    assert!(err.to_string().contains("illegal move e2e5"));

    // The position is untouched; a legal move still goes through.
    let event = annotator.annotate(Move::from_coord("e2e4").unwrap()).unwrap();
    assert_eq!(event.ply, 1);
}

#[test]
fn cancelled_run_returns_partial_events() {
    let mut annotator = Annotator::new(None);
    let cancel = AtomicBool::new(true);
    cancel.store(true, Ordering::Relaxed);
    let events = annotator.run(&moves("e2e4 e7e5"), &cancel).unwrap();
    assert!(events.is_empty());
}

#[test]
fn shortest_stalemate_game_is_drawn() {
    let mut annotator = Annotator::new(None);
    // Sam Loyd's ten-move stalemate.
    let game = moves(
        "e2e3 a7a5 d1h5 a8a6 h5a5 h7h5 a5c7 a6h6 h2h4 f7f6 c7d7 e8f7 \
         d7b7 d8d3 b7b8 d3h7 b8c8 f7g6 c8e6",
    );
    let cancel = AtomicBool::new(false);
    let events = annotator.run(&game, &cancel).unwrap();
    let last = events.last().unwrap();
    assert!(last.text.ends_with("The game is a draw by stalemate"));
    assert_eq!(last.verdict, Some(Verdict::Stalemate));
}

#[test]
fn capturing_the_last_pawn_draws_by_insufficient_material() {
    let board = Board::from_fen("7k/8/8/8/8/8/p7/K7 w - - 0 1").unwrap();
    let mut annotator = Annotator::from_position(board, None);
    let event = annotator.annotate(Move::from_coord("a1a2").unwrap()).unwrap();
    assert!(event
        .text
        .ends_with("The game is a draw due to insufficient material"));
    assert_eq!(event.verdict, Some(Verdict::InsufficientMaterial));
    assert_eq!(event.state.captured_pieces.white, vec![Piece::Pawn]);
}
