//! Snek - a snake game journeying through themed symbol worlds
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, food, progression)
//! - `config`: Tunable game settings, persisted as JSON
//! - `autopilot`: Demo-mode steering
//!
//! Rendering, input mapping and timers belong to the caller. The engine is
//! advanced one step at a time and queried through [`sim::Game::snapshot`].

pub mod autopilot;
pub mod config;
pub mod error;
pub mod sim;

pub use autopilot::Autopilot;
pub use config::{GameConfig, ProgressionMode};
pub use error::{ConfigError, EngineError};
pub use sim::{Direction, Game, GameEvent, Position, Snapshot, StepOutcome};

/// Game configuration constants
pub mod consts {
    /// Default grid when the caller gives no size
    pub const DEFAULT_GRID_WIDTH: u32 = 20;
    pub const DEFAULT_GRID_HEIGHT: u32 = 10;

    /// Smallest playable grid
    pub const MIN_GAME_WIDTH: u32 = 10;
    pub const MIN_GAME_HEIGHT: u32 = 10;

    /// Width of the stats side panel in terminal columns
    pub const SIDE_PANEL_WIDTH: u32 = 25;

    /// Seconds per step at the start of a run (10 moves/s)
    pub const INITIAL_SPEED_INTERVAL: f64 = 0.1;
    /// Interval multiplier per food eaten (2% faster each time)
    pub const SPEED_INCREASE_FACTOR: f64 = 0.98;
    /// Fastest allowed pace (50 moves/s)
    pub const MIN_SPEED_INTERVAL: f64 = 0.02;

    pub const DEFAULT_SYMBOLS_PER_LEVEL: u32 = 5;
    pub const DEFAULT_SYMBOLS_PER_WORLD: u32 = 10;
    pub const DEFAULT_LEVELS_PER_WORLD: u32 = 2;
}
