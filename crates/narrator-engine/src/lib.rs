//! Engine analysis for the narrator.
//!
//! This crate defines the [`Evaluation`] type shared by every component
//! that reads engine scores, the [`AnalysisProvider`] trait the annotation
//! pipeline depends on, and a bundled [`UciEngine`] implementation that
//! speaks UCI (with MultiPV) to a Stockfish-compatible binary.
//!
//! Provider failure is never fatal to the caller: the annotator treats any
//! [`EngineError`] as "analysis unavailable" and carries on.

pub mod evaluation;
pub mod provider;
pub mod uci;

pub use evaluation::Evaluation;
pub use provider::{AnalysisProvider, EngineSuggestion};
pub use uci::{EngineConfig, EngineError, UciEngine};
