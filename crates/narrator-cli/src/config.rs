//! Configuration file loading for the annotator CLI.
//!
//! Settings are read from `narrator.toml` in the working directory when
//! present; every field has a sensible default.

use std::path::{Path, PathBuf};

use narrator_engine::EngineConfig;
use serde::Deserialize;
use thiserror::Error;

/// Default configuration file name.
pub const CONFIG_FILE: &str = "narrator.toml";

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Engine settings from the configuration file.
#[derive(Debug, Deserialize, Clone)]
pub struct EngineSettings {
    /// Path to the UCI engine executable. Defaults to "stockfish".
    #[serde(default = "default_engine_path")]
    pub path: String,
    /// Maximum search depth per position. Defaults to 20.
    #[serde(default = "default_depth")]
    pub depth: u32,
    /// Number of candidate moves to request. Defaults to 3.
    #[serde(default = "default_multipv")]
    pub multipv: u32,
    /// Hash table size in megabytes. Defaults to 128.
    #[serde(default = "default_hash_mb")]
    pub hash_mb: u32,
    /// Number of search threads. Defaults to 4.
    #[serde(default = "default_threads")]
    pub threads: u32,
    /// Engine skill level (0-20). Defaults to 20.
    #[serde(default = "default_skill_level")]
    pub skill_level: u32,
}

fn default_engine_path() -> String {
    "stockfish".to_string()
}

fn default_depth() -> u32 {
    20
}

fn default_multipv() -> u32 {
    3
}

fn default_hash_mb() -> u32 {
    128
}

fn default_threads() -> u32 {
    4
}

fn default_skill_level() -> u32 {
    20
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            path: default_engine_path(),
            depth: default_depth(),
            multipv: default_multipv(),
            hash_mb: default_hash_mb(),
            threads: default_threads(),
            skill_level: default_skill_level(),
        }
    }
}

impl EngineSettings {
    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig {
            path: self.path.clone(),
            depth: self.depth,
            multipv: self.multipv,
            hash_mb: self.hash_mb,
            threads: self.threads,
            skill_level: self.skill_level,
        }
    }
}

/// Top-level CLI configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct NarratorConfig {
    /// UCI engine settings.
    #[serde(default)]
    pub engine: EngineSettings,
    /// Optional path to a custom opening book (JSON).
    #[serde(default)]
    pub opening_book: Option<PathBuf>,
}

impl NarratorConfig {
    /// Loads `narrator.toml` from the working directory, falling back
    /// to defaults when the file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(NarratorConfig::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}
