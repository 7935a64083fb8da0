//! Move-by-move game annotation.
//!
//! This crate turns a sequence of chess moves into natural-language
//! commentary: what each move does, how the engine rates it, which
//! opening the game follows, and how a decisive game ended.
//!
//! # Overview
//!
//! - [`Annotator`] - Drives the per-move annotation pipeline
//! - [`AnnotationEvent`] - The narration and state snapshot for one move
//! - [`MoveQuality`] - Engine-based classification (blunder, mistake, ...)
//! - [`Recommendation`] - Best-move advice with reasoning and alternatives
//! - [`GameReport`] - End-of-game statistics
//!
//! # Example
//!
//! ```ignore
//! use narrator_annotate::Annotator;
//! use narrator_core::Move;
//!
//! let mut annotator = Annotator::new(None);
//! let event = annotator.annotate(Move::from_coord("e2e4").unwrap())?;
//! println!("{}", event.text);
//! ```

pub mod advice;
pub mod annotator;
pub mod commentary;
pub mod event;
pub mod patterns;
pub mod quality;
pub mod report;
pub mod signals;
pub mod state;

pub use advice::{Alternative, Recommendation};
pub use annotator::{AnnotateError, Annotator, DEFAULT_CANDIDATES};
pub use event::{AnnotationEvent, Verdict};
pub use quality::{Highlight, MoveQuality};
pub use report::{GameReport, ReportError};
pub use signals::PositionSignals;
pub use state::{NotableMove, NotableMoves, PerSide, RunningState};
