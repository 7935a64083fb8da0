//! UCI engine wrapper for position analysis.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use narrator_core::{Board, Move};
use thiserror::Error;
use tracing::debug;

use crate::provider::{AnalysisProvider, EngineSuggestion};
use crate::Evaluation;

/// Maximum number of lines to read before giving up on a UCI response.
pub const MAX_UCI_LINES: usize = 1000;

/// Errors that can occur when working with UCI engines.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to spawn the engine process.
    #[error("failed to spawn engine: {0}")]
    Spawn(#[from] std::io::Error),
    /// Engine executable was not found at the specified path.
    #[error("engine not found at path: {0}")]
    NotFound(String),
    /// Engine failed to initialize properly (UCI handshake failed).
    #[error("engine initialization failed")]
    InitFailed,
    /// Engine returned an invalid or unexpected response.
    #[error("invalid engine response: {0}")]
    InvalidResponse(String),
}

/// Configuration for the bundled UCI engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Path to the UCI engine executable.
    pub path: String,
    /// Maximum search depth per position.
    pub depth: u32,
    /// Number of principal variations to request (candidate count).
    pub multipv: u32,
    /// Hash table size in megabytes.
    pub hash_mb: u32,
    /// Number of search threads.
    pub threads: u32,
    /// Engine skill level (0-20).
    pub skill_level: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            path: "stockfish".to_string(),
            depth: 20,
            multipv: 3,
            hash_mb: 128,
            threads: 4,
            skill_level: 20,
        }
    }
}

/// Wrapper for UCI-compatible analysis engines like Stockfish.
///
/// Spawns the engine process, performs the UCI handshake, and configures
/// MultiPV so a single search yields a ranked candidate list. Positions
/// are sent by FEN, since the annotator also probes null-move positions
/// that have no move-list representation.
pub struct UciEngine {
    process: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    name: String,
    config: EngineConfig,
}

impl UciEngine {
    /// Spawns and initializes a UCI engine.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] if an explicit path doesn't exist
    /// - [`EngineError::Spawn`] if the process fails to start
    /// - [`EngineError::InitFailed`] if the UCI handshake fails
    pub fn spawn(config: EngineConfig) -> Result<Self, EngineError> {
        // Bare command names are resolved via PATH by the OS; only check
        // existence when the config names an actual filesystem path.
        if config.path.contains(std::path::MAIN_SEPARATOR)
            && !std::path::Path::new(&config.path).exists()
        {
            return Err(EngineError::NotFound(config.path.clone()));
        }

        let mut process = Command::new(&config.path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let stdin = process.stdin.take().ok_or(EngineError::InitFailed)?;
        let stdout = process.stdout.take().ok_or(EngineError::InitFailed)?;
        let stdout = BufReader::new(stdout);

        let mut engine = Self {
            process,
            stdin,
            stdout,
            name: String::new(),
            config,
        };

        engine.init_uci()?;
        Ok(engine)
    }

    /// Performs the UCI handshake and applies the configured options.
    fn init_uci(&mut self) -> Result<(), EngineError> {
        self.send_command("uci")?;

        let mut name = String::new();
        let mut lines_read = 0;
        loop {
            if lines_read > MAX_UCI_LINES {
                return Err(EngineError::InitFailed);
            }
            lines_read += 1;
            let line = self.read_line()?;
            if let Some(id) = line.strip_prefix("id name ") {
                name = id.to_string();
            } else if line == "uciok" {
                break;
            }
        }

        self.name = if name.is_empty() {
            "Unknown Engine".to_string()
        } else {
            name
        };

        let options = [
            ("MultiPV", self.config.multipv),
            ("Hash", self.config.hash_mb),
            ("Threads", self.config.threads),
            ("Skill Level", self.config.skill_level),
        ];
        for (option, value) in options {
            self.send_command(&format!("setoption name {option} value {value}"))?;
        }

        self.wait_ready()
    }

    /// Sends `isready` and waits for `readyok`.
    fn wait_ready(&mut self) -> Result<(), EngineError> {
        self.send_command("isready")?;
        let mut lines_read = 0;
        loop {
            if lines_read > MAX_UCI_LINES {
                return Err(EngineError::InitFailed);
            }
            lines_read += 1;
            if self.read_line()? == "readyok" {
                break;
            }
        }
        Ok(())
    }

    /// Returns the engine's name as reported via the UCI protocol.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Clears the engine's hash tables and prepares for a new game.
    pub fn new_game(&mut self) -> Result<(), EngineError> {
        self.send_command("ucinewgame")?;
        self.wait_ready()
    }

    /// Analyzes a position given in FEN notation.
    ///
    /// Returns the engine's ranked candidate list, best first. The list
    /// is empty for positions with no legal moves.
    pub fn analyze_fen(&mut self, fen: &str) -> Result<Vec<EngineSuggestion>, EngineError> {
        self.send_command(&format!("position fen {fen}"))?;
        self.send_command(&format!("go depth {}", self.config.depth))?;

        // One slot per MultiPV index; later (deeper) info lines overwrite
        // earlier ones, so at "bestmove" each slot holds the final answer.
        let mut slots: Vec<Option<(Move, Evaluation)>> =
            vec![None; self.config.multipv as usize];

        let mut lines_read = 0;
        loop {
            if lines_read > MAX_UCI_LINES {
                return Err(EngineError::InvalidResponse(
                    "too many lines without bestmove".to_string(),
                ));
            }
            lines_read += 1;
            let line = self.read_line()?;

            if line.starts_with("info ") {
                if let Some((rank, mov, eval)) = parse_info_line(&line) {
                    let idx = rank.saturating_sub(1) as usize;
                    if idx < slots.len() {
                        slots[idx] = Some((mov, eval));
                    }
                }
            } else if let Some(best) = line.strip_prefix("bestmove ") {
                // "bestmove (none)" means no legal moves.
                if best.starts_with("(none)") {
                    return Ok(Vec::new());
                }
                break;
            }
        }

        let suggestions: Vec<EngineSuggestion> = slots
            .into_iter()
            .flatten()
            .enumerate()
            .map(|(i, (mov, eval))| EngineSuggestion {
                mov,
                eval,
                rank: i as u32 + 1,
            })
            .collect();

        if suggestions.is_empty() {
            return Err(EngineError::InvalidResponse(
                "no scored candidates received".to_string(),
            ));
        }
        Ok(suggestions)
    }

    fn send_command(&mut self, command: &str) -> Result<(), EngineError> {
        debug!(command, "uci send");
        writeln!(self.stdin, "{command}")?;
        self.stdin.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, EngineError> {
        let mut line = String::new();
        let bytes = self.stdout.read_line(&mut line)?;
        if bytes == 0 {
            return Err(EngineError::InvalidResponse(
                "engine closed unexpectedly".to_string(),
            ));
        }
        Ok(line.trim().to_string())
    }
}

impl AnalysisProvider for UciEngine {
    fn analyze(
        &mut self,
        board: &Board,
        candidates: usize,
    ) -> Result<Vec<EngineSuggestion>, EngineError> {
        let mut suggestions = self.analyze_fen(&board.to_fen())?;
        suggestions.truncate(candidates);
        Ok(suggestions)
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        let _ = self.send_command("quit");
        let _ = self.process.wait();
    }
}

/// Parses a UCI info line into (multipv rank, first PV move, evaluation).
///
/// Format: "info depth X multipv R score cp Y ... pv move1 move2 ...".
/// Lines without a score or a PV (e.g. currmove reports) yield `None`.
/// A missing `multipv` token means rank 1, as engines omit it when
/// MultiPV is 1.
fn parse_info_line(line: &str) -> Option<(u32, Move, Evaluation)> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    let mut rank: u32 = 1;
    let mut cp: Option<i32> = None;
    let mut mate: Option<i32> = None;
    let mut first_pv: Option<&str> = None;
    let mut has_depth = false;

    let mut i = 0;
    while i < parts.len() {
        match parts[i] {
            "depth" => {
                has_depth = true;
                i += 1;
            }
            "multipv" => {
                if i + 1 < parts.len() {
                    rank = parts[i + 1].parse().ok()?;
                    i += 1;
                }
            }
            "score" => {
                if i + 2 < parts.len() {
                    match parts[i + 1] {
                        "cp" => {
                            cp = parts[i + 2].parse().ok();
                            i += 2;
                        }
                        "mate" => {
                            mate = parts[i + 2].parse().ok();
                            i += 2;
                        }
                        _ => {}
                    }
                }
            }
            "pv" => {
                if i + 1 < parts.len() {
                    first_pv = Some(parts[i + 1]);
                }
                break;
            }
            _ => {}
        }
        i += 1;
    }

    if !has_depth {
        return None;
    }
    let eval = Evaluation::from_uci_score(cp, mate)?;
    let mov = Move::from_coord(first_pv?)?;
    Some((rank, mov, eval))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_with_explicit_path() {
        let config = EngineConfig {
            path: "/nonexistent/path/to/stockfish".to_string(),
            ..EngineConfig::default()
        };
        match UciEngine::spawn(config) {
            Err(EngineError::NotFound(path)) => {
                assert_eq!(path, "/nonexistent/path/to/stockfish");
            }
            _ => panic!("expected NotFound error"),
        }
    }

    #[test]
    fn default_config_mirrors_analysis_settings() {
        let config = EngineConfig::default();
        assert_eq!(config.path, "stockfish");
        assert_eq!(config.depth, 20);
        assert_eq!(config.multipv, 3);
        assert_eq!(config.hash_mb, 128);
        assert_eq!(config.threads, 4);
        assert_eq!(config.skill_level, 20);
    }

    #[test]
    fn parse_info_line_centipawn() {
        let line = "info depth 15 multipv 2 score cp 35 nodes 50000 pv e2e4 e7e5";
        let (rank, mov, eval) = parse_info_line(line).unwrap();
        assert_eq!(rank, 2);
        assert_eq!(mov, Move::from_coord("e2e4").unwrap());
        assert_eq!(eval, Evaluation::Centipawns(35));
    }

    #[test]
    fn parse_info_line_mate() {
        let line = "info depth 12 multipv 1 score mate -3 nodes 10000 pv d1h5";
        let (rank, mov, eval) = parse_info_line(line).unwrap();
        assert_eq!(rank, 1);
        assert_eq!(mov, Move::from_coord("d1h5").unwrap());
        assert_eq!(eval, Evaluation::Mate(-3));
    }

    #[test]
    fn parse_info_line_defaults_to_rank_one() {
        let line = "info depth 10 score cp -150 nodes 25000 pv e7e5 g1f3";
        let (rank, _, eval) = parse_info_line(line).unwrap();
        assert_eq!(rank, 1);
        assert_eq!(eval, Evaluation::Centipawns(-150));
    }

    #[test]
    fn parse_info_line_rejects_incomplete_lines() {
        // No PV (currmove progress report).
        assert!(parse_info_line("info depth 15 currmove e2e4 currmovenumber 1").is_none());
        // No score.
        assert!(parse_info_line("info depth 15 nodes 50000 pv e2e4").is_none());
        // No depth (handshake chatter).
        assert!(parse_info_line("info string NNUE evaluation enabled").is_none());
    }

    #[test]
    fn error_display() {
        let not_found = EngineError::NotFound("/path/to/engine".to_string());
        assert!(not_found.to_string().contains("/path/to/engine"));
        assert_eq!(
            EngineError::InitFailed.to_string(),
            "engine initialization failed"
        );
    }
}
