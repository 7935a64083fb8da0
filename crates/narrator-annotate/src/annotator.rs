//! The annotation pipeline: validates moves, probes the engine for both
//! sides, classifies move quality, and narrates the game as it unfolds.

use std::sync::atomic::{AtomicBool, Ordering};

use narrator_core::{Board, Color, Move};
use narrator_engine::{AnalysisProvider, EngineSuggestion};
use narrator_openings::{builtin_book, OpeningBook, MAX_BOOK_PLIES};
use thiserror::Error;
use tracing::{debug, warn};

use crate::advice::{recommend, Recommendation};
use crate::commentary;
use crate::event::{AnnotationEvent, Verdict};
use crate::patterns::{self, MateContext};
use crate::quality::{Highlight, MoveQuality};
use crate::report::GameReport;
use crate::signals;
use crate::state::{PerSide, RunningState};

/// Number of ranked candidate moves requested per engine probe.
pub const DEFAULT_CANDIDATES: usize = 3;

#[derive(Debug, Error)]
pub enum AnnotateError {
    #[error("illegal move {mov} in position {fen}")]
    IllegalMove { mov: Move, fen: String },
}

/// Feeds a game through the annotation pipeline move by move, keeping
/// the running narrative state between calls.
pub struct Annotator {
    board: Board,
    history: Vec<Move>,
    state: RunningState,
    book: OpeningBook,
    provider: Option<Box<dyn AnalysisProvider>>,
    candidates: usize,
    ply: u32,
    total_plies: Option<u32>,
    last_verdict: Option<Verdict>,
}

impl Annotator {
    /// Starts an annotator from the initial position. Pass `None` to
    /// annotate without engine evaluation; move quality and
    /// recommendations are then omitted.
    #[must_use]
    pub fn new(provider: Option<Box<dyn AnalysisProvider>>) -> Self {
        Annotator {
            board: Board::startpos(),
            history: Vec::new(),
            state: RunningState::new(),
            book: builtin_book().clone(),
            provider,
            candidates: DEFAULT_CANDIDATES,
            ply: 0,
            total_plies: None,
            last_verdict: None,
        }
    }

    /// Starts an annotator from an arbitrary position. The opening book
    /// matches move sequences from the initial position, so it is of
    /// little use here.
    #[must_use]
    pub fn from_position(board: Board, provider: Option<Box<dyn AnalysisProvider>>) -> Self {
        Annotator {
            board,
            ..Annotator::new(provider)
        }
    }

    #[must_use]
    pub fn with_book(mut self, book: OpeningBook) -> Self {
        self.book = book;
        self
    }

    /// Declares the total game length up front. When the last move is
    /// reached without a terminal position, the game is scored as a
    /// resignation by the side that did not move last.
    #[must_use]
    pub fn with_total_plies(mut self, total: u32) -> Self {
        self.total_plies = Some(total);
        self
    }

    #[must_use]
    pub fn with_candidates(mut self, candidates: usize) -> Self {
        self.candidates = candidates.max(1);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &RunningState {
        &self.state
    }

    /// Annotates one move. Probes the engine for the mover before the
    /// move is made, and for the opponent via a null-move flip of the
    /// same position (skipped when the mover is in check, since a null
    /// move from check is not a position the engine can evaluate).
    pub fn annotate(&mut self, mov: Move) -> Result<AnnotationEvent, AnnotateError> {
        if !self.board.legal_moves().contains(&mov) {
            return Err(AnnotateError::IllegalMove {
                mov,
                fen: self.board.to_fen(),
            });
        }

        let before = self.board.clone();
        let side = before.side_to_move();
        let mover_suggestions = self.probe(&before);
        let opponent_suggestions = if before.in_check(side) {
            None
        } else {
            self.probe(&before.null_move())
        };

        let quality = mover_suggestions
            .as_deref()
            .and_then(<[_]>::first)
            .map(|best| {
                let quality = MoveQuality::classify(best.eval);
                debug!(%mov, eval = %best.eval, ?quality, "classified move");
                self.state.record_notable(side, quality, mov, best.eval);
                self.state.apply_score_delta(side, quality.score_delta());
                quality
            });

        if let Some(captured) = before.captured_piece(mov) {
            self.state.record_capture(side, captured);
        }

        let mut text = commentary::describe_move(&before, mov);
        let after = before.make_move(mov);
        self.history.push(mov);
        self.ply += 1;

        self.state.material_balance = after.material_balance();
        self.state.last_move = Some((mov.from(), mov.to()));

        let opening = self.book.lookup(&self.history).map(str::to_string);
        let past_book = self.history.len() > MAX_BOOK_PLIES;
        let sigs = signals::evaluate(&after);
        for fragment in commentary::reduce(&mut self.state, &sigs, opening.as_deref(), past_book) {
            text.push_str(". ");
            text.push_str(&fragment);
        }

        let verdict = self.finish_text(&mut text, &after, mov, side);
        self.last_verdict = verdict.clone();
        self.board = after;

        Ok(AnnotationEvent {
            ply: self.ply,
            side,
            mov,
            text,
            quality,
            highlight: quality.map_or(Highlight::Neutral, MoveQuality::highlight),
            suggestions: self.build_suggestions(
                side,
                &before,
                mover_suggestions,
                opponent_suggestions,
            ),
            state: self.state.clone(),
            verdict,
        })
    }

    /// Annotates a full move list, checking the cancel flag between
    /// moves. Returns the events accumulated so far when cancelled.
    pub fn run(
        &mut self,
        moves: &[Move],
        cancel: &AtomicBool,
    ) -> Result<Vec<AnnotationEvent>, AnnotateError> {
        let mut events = Vec::with_capacity(moves.len());
        for &mov in moves {
            if cancel.load(Ordering::Relaxed) {
                debug!(annotated = events.len(), "annotation cancelled");
                break;
            }
            events.push(self.annotate(mov)?);
        }
        Ok(events)
    }

    /// Summarizes the game annotated so far.
    #[must_use]
    pub fn report(&self) -> GameReport {
        GameReport::new(&self.state, self.last_verdict.clone())
    }

    fn probe(&mut self, board: &Board) -> Option<Vec<EngineSuggestion>> {
        let provider = self.provider.as_mut()?;
        match provider.analyze(board, self.candidates) {
            Ok(suggestions) => Some(suggestions),
            Err(err) => {
                warn!(%err, fen = %board.to_fen(), "engine probe failed");
                None
            }
        }
    }

    fn build_suggestions(
        &self,
        side: Color,
        before: &Board,
        mover: Option<Vec<EngineSuggestion>>,
        opponent: Option<Vec<EngineSuggestion>>,
    ) -> PerSide<Option<Recommendation>> {
        let mut suggestions = PerSide::<Option<Recommendation>>::default();
        if let Some(list) = mover {
            *suggestions.get_mut(side) = recommend(before, &list);
        }
        if let Some(list) = opponent {
            *suggestions.get_mut(side.opposite()) = recommend(&before.null_move(), &list);
        }
        suggestions
    }

    fn finish_text(
        &self,
        text: &mut String,
        after: &Board,
        mov: Move,
        side: Color,
    ) -> Option<Verdict> {
        if after.is_checkmate() {
            let ctx = MateContext {
                board: after,
                mov,
                history: &self.history,
            };
            let pattern = patterns::classify(&ctx);
            if pattern == "Checkmate" {
                text.push_str(&format!(". Checkmate! {side} wins!"));
            } else {
                text.push_str(&format!(". Checkmate! {side} wins with a {pattern}!"));
            }
            return Some(Verdict::Checkmate {
                winner: side,
                pattern: pattern.to_string(),
            });
        }
        if after.is_stalemate() {
            text.push_str(". The game is a draw by stalemate");
            return Some(Verdict::Stalemate);
        }
        if after.is_insufficient_material() {
            text.push_str(". The game is a draw due to insufficient material");
            return Some(Verdict::InsufficientMaterial);
        }
        if after.in_check(after.side_to_move()) {
            text.push_str(", putting the king in check");
        }
        if self.total_plies == Some(self.ply) {
            text.push_str(&format!(". {side} wins by resignation"));
            return Some(Verdict::Resignation { winner: side });
        }
        None
    }
}
