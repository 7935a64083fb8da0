mod config;
mod pgn;

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;

use clap::{Parser, Subcommand};
use narrator_annotate::Annotator;
use narrator_core::Color;
use narrator_engine::{AnalysisProvider, EngineConfig, UciEngine};
use narrator_openings::OpeningBook;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::NarratorConfig;

#[derive(Parser)]
#[command(name = "narrator")]
#[command(about = "Annotates chess games with commentary and engine analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate a game file in coordinate notation
    Annotate {
        /// Path to the game file
        game: PathBuf,
        /// Write the final report as JSON to this path
        #[arg(short, long)]
        report: Option<PathBuf>,
        /// UCI engine executable (overrides the config file)
        #[arg(short, long)]
        engine: Option<String>,
        /// Engine search depth (overrides the config file)
        #[arg(short, long)]
        depth: Option<u32>,
        /// Annotate without engine analysis
        #[arg(long)]
        no_engine: bool,
        /// Custom opening book (JSON, overrides the config file)
        #[arg(short, long)]
        book: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = NarratorConfig::load()?;

    match cli.command {
        Commands::Annotate {
            game,
            report,
            engine,
            depth,
            no_engine,
            book,
        } => {
            let parsed = pgn::read_game(&game)?;
            info!(moves = parsed.moves.len(), "loaded game");

            let provider = if no_engine {
                None
            } else {
                let mut engine_config = config.engine.to_engine_config();
                if let Some(path) = engine {
                    engine_config.path = path;
                }
                if let Some(depth) = depth {
                    engine_config.depth = depth;
                }
                spawn_engine(engine_config)
            };

            let mut annotator = Annotator::new(provider)
                .with_total_plies(parsed.moves.len() as u32);
            if let Some(path) = book.or(config.opening_book) {
                annotator = annotator.with_book(OpeningBook::load(&path)?);
            }

            let cancel = AtomicBool::new(false);
            let events = annotator.run(&parsed.moves, &cancel)?;
            for event in &events {
                println!("{}. {}", event.ply, event.text);
            }

            let game_report = annotator.report();
            println!();
            if let Some(opening) = &game_report.opening {
                println!("Opening: {opening}");
            }
            for side in [Color::White, Color::Black] {
                let name = match side {
                    Color::White => parsed.white.as_deref().unwrap_or("White"),
                    Color::Black => parsed.black.as_deref().unwrap_or("Black"),
                };
                println!(
                    "{name}: score {}, {}",
                    game_report.player_scores.get(side),
                    game_report.summary(side)
                );
            }

            if let Some(path) = report {
                std::fs::write(&path, game_report.to_json()?)?;
                info!(path = %path.display(), "wrote report");
            }
        }
    }

    Ok(())
}

/// Spawns the configured engine, degrading to engine-free annotation
/// when it is unavailable.
fn spawn_engine(engine_config: EngineConfig) -> Option<Box<dyn AnalysisProvider>> {
    match UciEngine::spawn(engine_config) {
        Ok(engine) => {
            info!(name = engine.name(), "engine ready");
            Some(Box::new(engine))
        }
        Err(err) => {
            warn!(%err, "engine unavailable, annotating without analysis");
            None
        }
    }
}
