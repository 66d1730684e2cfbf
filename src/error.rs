//! Error types
//!
//! Only programmatic misuse is reported. Opposite-direction turns and other
//! normalizable input are ignored by the engine rather than surfaced here.

use std::path::PathBuf;

use thiserror::Error;

/// Rejected explicit placement through the debug setters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("snake must have at least one segment")]
    EmptySnake,

    #[error("snake segment ({x}, {y}) is outside the {width}x{height} grid")]
    SnakeOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("food position ({x}, {y}) is outside the {width}x{height} grid")]
    FoodOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

/// Failure to load or validate a [`GameConfig`](crate::config::GameConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
