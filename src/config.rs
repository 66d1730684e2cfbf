//! Game configuration
//!
//! Persisted as JSON. Every field has a default so partial files load.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::world::WORLD_COUNT;

/// How eaten symbols advance the journey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ProgressionMode {
    /// Level up every `symbols_per_level` symbols; each level-up picks a new
    /// random palette color and worlds rotate every `levels_per_world` levels
    Level { symbols_per_level: u32 },
    /// Move to the next world after `symbols_per_world` symbols eaten in the
    /// current one
    World { symbols_per_world: u32 },
}

impl Default for ProgressionMode {
    fn default() -> Self {
        ProgressionMode::World {
            symbols_per_world: DEFAULT_SYMBOLS_PER_WORLD,
        }
    }
}

impl ProgressionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressionMode::Level { .. } => "level",
            ProgressionMode::World { .. } => "world",
        }
    }

    /// Symbols needed to clear one stage (level or world)
    pub fn threshold(&self) -> u32 {
        match *self {
            ProgressionMode::Level { symbols_per_level } => symbols_per_level,
            ProgressionMode::World { symbols_per_world } => symbols_per_world,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Grid ===
    pub default_grid_width: u32,
    pub default_grid_height: u32,
    /// Smallest grid the caller layer should resize to
    pub min_grid_width: u32,
    pub min_grid_height: u32,

    // === Speed ===
    /// Seconds per step after a reset
    pub initial_speed_interval: f64,
    /// Interval multiplier applied per food eaten (below 1.0 speeds up)
    pub speed_increase_factor: f64,
    /// The interval never drops below this
    pub min_speed_interval: f64,

    // === Progression ===
    pub progression: ProgressionMode,
    /// Levels spent in each world under the level model
    pub levels_per_world: u32,

    // === Colors ===
    pub default_color: String,
    /// Palette the level model draws from on level-up
    pub level_colors: Vec<String>,

    // === Glyphs ===
    /// Replacement glyph sets keyed by world index
    pub glyph_overrides: BTreeMap<usize, Vec<String>>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            default_grid_width: DEFAULT_GRID_WIDTH,
            default_grid_height: DEFAULT_GRID_HEIGHT,
            min_grid_width: MIN_GAME_WIDTH,
            min_grid_height: MIN_GAME_HEIGHT,

            initial_speed_interval: INITIAL_SPEED_INTERVAL,
            speed_increase_factor: SPEED_INCREASE_FACTOR,
            min_speed_interval: MIN_SPEED_INTERVAL,

            progression: ProgressionMode::default(),
            levels_per_world: DEFAULT_LEVELS_PER_WORLD,

            default_color: "green".to_string(),
            level_colors: ["green", "blue", "cyan", "magenta", "yellow", "red", "white"]
                .into_iter()
                .map(String::from)
                .collect(),

            glyph_overrides: BTreeMap::new(),
        }
    }
}

impl GameConfig {
    /// Default config with the given progression model
    pub fn with_progression(progression: ProgressionMode) -> Self {
        Self {
            progression,
            ..Self::default()
        }
    }

    /// Check every field is usable by the engine
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_grid_width == 0 || self.min_grid_height == 0 {
            return Err(ConfigError::Invalid(
                "minimum grid dimensions must be positive".into(),
            ));
        }
        if self.default_grid_width < self.min_grid_width
            || self.default_grid_height < self.min_grid_height
        {
            return Err(ConfigError::Invalid(format!(
                "default grid {}x{} is smaller than the minimum {}x{}",
                self.default_grid_width,
                self.default_grid_height,
                self.min_grid_width,
                self.min_grid_height
            )));
        }
        if !self.initial_speed_interval.is_finite() || self.initial_speed_interval <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "initial_speed_interval must be positive, got {}",
                self.initial_speed_interval
            )));
        }
        if self.speed_increase_factor.is_nan()
            || self.speed_increase_factor <= 0.0
            || self.speed_increase_factor > 1.0
        {
            return Err(ConfigError::Invalid(format!(
                "speed_increase_factor must be in (0, 1], got {}",
                self.speed_increase_factor
            )));
        }
        if self.min_speed_interval.is_nan()
            || self.min_speed_interval <= 0.0
            || self.min_speed_interval > self.initial_speed_interval
        {
            return Err(ConfigError::Invalid(format!(
                "min_speed_interval must be in (0, {}], got {}",
                self.initial_speed_interval, self.min_speed_interval
            )));
        }
        if self.progression.threshold() == 0 {
            return Err(ConfigError::Invalid(format!(
                "{} progression threshold must be at least 1",
                self.progression.as_str()
            )));
        }
        if self.levels_per_world == 0 {
            return Err(ConfigError::Invalid(
                "levels_per_world must be at least 1".into(),
            ));
        }
        if self.level_colors.is_empty() {
            return Err(ConfigError::Invalid("level_colors is empty".into()));
        }
        for (index, glyphs) in &self.glyph_overrides {
            if *index >= WORLD_COUNT {
                return Err(ConfigError::Invalid(format!(
                    "glyph override for world {index}, but only {WORLD_COUNT} worlds exist"
                )));
            }
            if glyphs.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "glyph override for world {index} is empty"
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load a config file, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using default config");
                Self::default()
            }
        }
    }

    /// Write the config as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Config saved to {}", path.display());
        Ok(())
    }

    /// Raise degenerate resize targets to the configured minimum
    pub fn clamp_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        (
            width.max(self.min_grid_width),
            height.max(self.min_grid_height),
        )
    }

    /// Grid that fits a terminal viewport, two columns per cell
    pub fn grid_for_viewport(&self, cols: u32, rows: u32, sidebar_cols: u32) -> (u32, u32) {
        self.clamp_dimensions(cols.saturating_sub(sidebar_cols) / 2, rows)
    }
}
