//! Game state and the engine's query surface
//!
//! `Game` is the single mutable aggregate. It is driven one step at a time by
//! an external clock; see `tick.rs` for the step itself.

use std::collections::{HashSet, VecDeque};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::progression::Progression;
use super::rules::{Direction, Position, is_valid_turn, scale_position};
use super::world::{World, WorldPath};
use crate::config::GameConfig;
use crate::error::EngineError;

/// The food cell and the glyph shown there
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub position: Position,
    pub glyph: String,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// The head moved onto the body
    SelfCollision,
    /// The snake covers every cell, so no food can be placed
    BoardFilled,
}

/// State changes for the presentation layer, drained once per tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    FoodEaten { glyph: String, position: Position },
    LevelUp { level: u32, color: String },
    WorldEntered { index: usize, name: String },
    SpeedChanged { interval: f64 },
    Paused,
    Resumed,
    GameOver { cause: GameOverCause },
}

/// Progress readout for the side panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// `None` under the world model
    pub level: Option<u32>,
    pub world_index: usize,
    pub world_name: String,
    pub symbols_in_stage: u32,
    pub stage_threshold: u32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: u32,
    pub height: u32,
    /// Head first
    pub snake: Vec<Position>,
    pub direction: Direction,
    pub food: Food,
    pub symbols_consumed: u32,
    pub progress: Progress,
    pub color: String,
    pub speed_interval: f64,
    pub moves_per_second: f64,
    pub paused: bool,
    pub game_over: Option<GameOverCause>,
    pub steps: u64,
}

/// Events kept for a caller that never drains; older ones are dropped first
pub const MAX_PENDING_EVENTS: usize = 256;

/// The game aggregate.
///
/// State changes are queued as [`GameEvent`]s. Callers that react to them are
/// expected to call [`Game::drain_events`] once per tick; the queue is capped
/// at [`MAX_PENDING_EVENTS`] so a caller that only polls snapshots does not
/// grow it without bound.
#[derive(Debug, Clone)]
pub struct Game {
    pub(crate) config: GameConfig,
    pub(crate) width: u32,
    pub(crate) height: u32,
    /// Head at the front
    pub(crate) snake: VecDeque<Position>,
    pub(crate) direction: Direction,
    pub(crate) food: Food,
    pub(crate) symbols_consumed: u32,
    pub(crate) progression: Progression,
    pub(crate) color: String,
    /// Seconds per step
    pub(crate) interval: f64,
    pub(crate) game_over: Option<GameOverCause>,
    pub(crate) paused: bool,
    /// Accepted steps since reset
    pub(crate) steps: u64,
    pub(crate) world_path: WorldPath,
    pub(crate) seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
}

impl Game {
    /// New game on a `width` x `height` grid with a random seed
    pub fn new(width: u32, height: u32, config: GameConfig) -> Self {
        Self::with_seed(width, height, config, rand::random())
    }

    /// New game whose food placement and glyph order are reproducible
    pub fn with_seed(width: u32, height: u32, config: GameConfig, seed: u64) -> Self {
        debug_assert!(width > 0 && height > 0, "grid must be non-empty");

        let world_path = WorldPath::with_overrides(&config.glyph_overrides);
        let progression = Progression::new(config.progression);
        let mut game = Self {
            width,
            height,
            snake: VecDeque::new(),
            direction: Direction::Right,
            food: Food {
                position: Position::new(0, 0),
                glyph: String::new(),
            },
            symbols_consumed: 0,
            progression,
            color: config.default_color.clone(),
            interval: config.initial_speed_interval,
            game_over: None,
            paused: false,
            steps: 0,
            world_path,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            config,
        };
        game.reset();
        game
    }

    /// New game on the config's default grid
    pub fn from_config(config: GameConfig) -> Self {
        let (width, height) = (config.default_grid_width, config.default_grid_height);
        Self::new(width, height, config)
    }

    /// Back to a length-1 snake in the middle of the grid heading right.
    ///
    /// Counters, speed and flags are cleared and fresh food is placed. The grid
    /// size, RNG stream and glyph pools carry over.
    pub fn reset(&mut self) {
        self.snake.clear();
        self.snake.push_back(Position::new(self.width / 2, self.height / 2));
        self.direction = Direction::Right;
        self.symbols_consumed = 0;
        self.progression = Progression::new(self.config.progression);
        self.color = self.stage_color();
        self.interval = self.config.initial_speed_interval;
        self.game_over = None;
        self.paused = false;
        self.steps = 0;
        self.events.clear();
        self.place_food();

        log::info!(
            "Game reset: {}x{} grid, {} progression, seed {}",
            self.width,
            self.height,
            self.config.progression.as_str(),
            self.seed
        );
    }

    /// Color for the current stage: the world theme under the world model,
    /// the configured default under the level model
    fn stage_color(&self) -> String {
        match self.progression {
            Progression::Level { .. } => self.config.default_color.clone(),
            Progression::World { .. } => self.world().theme.clone(),
        }
    }

    /// Change heading. Reversals are ignored silently.
    pub fn turn(&mut self, direction: Direction) {
        if is_valid_turn(self.direction, direction) {
            self.direction = direction;
        }
    }

    /// Put food on a random free cell with a glyph from the current world.
    ///
    /// Returns false and ends the game when the snake covers the whole grid.
    pub fn place_food(&mut self) -> bool {
        let occupied: HashSet<Position> = self.snake.iter().copied().collect();
        let cells = u64::from(self.width) * u64::from(self.height);
        if occupied.len() as u64 >= cells {
            log::info!("Snake fills the {}x{} grid", self.width, self.height);
            self.end_game(GameOverCause::BoardFilled);
            return false;
        }

        let position = loop {
            let candidate = Position::new(
                self.rng.random_range(0..self.width),
                self.rng.random_range(0..self.height),
            );
            if !occupied.contains(&candidate) {
                break candidate;
            }
        };
        let glyph = self.progression.draw_glyph(
            &mut self.world_path,
            self.config.levels_per_world,
            &mut self.rng,
        );

        log::debug!("Food {glyph} placed at ({}, {})", position.x, position.y);
        self.food = Food { position, glyph };
        true
    }

    pub(crate) fn end_game(&mut self, cause: GameOverCause) {
        if self.game_over.is_none() {
            self.game_over = Some(cause);
            self.emit(GameEvent::GameOver { cause });
        }
    }

    /// Queue an event, dropping the oldest one when the queue is full
    pub(crate) fn emit(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            let dropped = self.events.remove(0);
            log::trace!("Event queue full, dropped {dropped:?}");
        }
        self.events.push(event);
    }

    /// Rescale the snake and food onto a new grid.
    ///
    /// Counters and flags are untouched. Rounding may merge segments or land a
    /// segment on the food; that is left as is (see [`Game::has_overlaps`]).
    pub fn resize(&mut self, width: u32, height: u32) {
        debug_assert!(width > 0 && height > 0, "grid must be non-empty");
        let (old_w, old_h) = (self.width, self.height);

        for segment in self.snake.iter_mut() {
            *segment = scale_position(*segment, old_w, old_h, width, height);
        }
        self.food.position = scale_position(self.food.position, old_w, old_h, width, height);
        self.width = width;
        self.height = height;

        log::debug!("Resized grid {old_w}x{old_h} -> {width}x{height}");
        if self.has_overlaps() {
            log::debug!("Resize left overlapping cells");
        }
    }

    /// True if two segments share a cell or a segment sits on the food
    pub fn has_overlaps(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.snake.len());
        let duplicate = self.snake.iter().any(|segment| !seen.insert(*segment));
        duplicate || seen.contains(&self.food.position)
    }

    pub fn pause(&mut self) {
        if self.game_over.is_none() && !self.paused {
            self.paused = true;
            self.emit(GameEvent::Paused);
            log::debug!("Paused");
        }
    }

    pub fn unpause(&mut self) {
        if self.paused {
            self.paused = false;
            self.emit(GameEvent::Resumed);
            log::debug!("Resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.unpause();
        } else {
            self.pause();
        }
    }

    /// Store a new step interval. Scheduling ticks stays with the caller.
    pub fn update_speed(&mut self, interval: f64) {
        self.interval = interval;
        log::debug!("Speed interval set to {interval:.4}s");
    }

    // === Debug setters ===

    /// Replace the snake body (head first)
    pub fn set_snake_position(
        &mut self,
        positions: impl IntoIterator<Item = Position>,
    ) -> Result<(), EngineError> {
        let body: VecDeque<Position> = positions.into_iter().collect();
        if body.is_empty() {
            return Err(EngineError::EmptySnake);
        }
        if let Some(p) = body.iter().find(|p| !p.in_bounds(self.width, self.height)) {
            return Err(EngineError::SnakeOutOfBounds {
                x: p.x,
                y: p.y,
                width: self.width,
                height: self.height,
            });
        }
        self.snake = body;
        Ok(())
    }

    /// Move the food. Without a glyph, one is drawn from the current world.
    pub fn set_food_position(
        &mut self,
        position: Position,
        glyph: Option<&str>,
    ) -> Result<(), EngineError> {
        if !position.in_bounds(self.width, self.height) {
            return Err(EngineError::FoodOutOfBounds {
                x: position.x,
                y: position.y,
                width: self.width,
                height: self.height,
            });
        }
        let glyph = match glyph {
            Some(glyph) => glyph.to_string(),
            None => self.progression.draw_glyph(
                &mut self.world_path,
                self.config.levels_per_world,
                &mut self.rng,
            ),
        };
        self.food = Food { position, glyph };
        Ok(())
    }

    /// Force the heading, bypassing the reversal rule
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    // === Queries ===

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn snake(&self) -> &VecDeque<Position> {
        &self.snake
    }

    pub fn head(&self) -> Position {
        // reset() and the setters keep at least one segment
        self.snake[0]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn symbols_consumed(&self) -> u32 {
        self.symbols_consumed
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    /// True under the level model
    pub fn uses_levels(&self) -> bool {
        matches!(self.progression, Progression::Level { .. })
    }

    pub fn level(&self) -> Option<u32> {
        self.progression.level()
    }

    pub fn world_index(&self) -> usize {
        self.progression
            .world_index(&self.world_path, self.config.levels_per_world)
    }

    pub fn world(&self) -> &World {
        self.world_path.world(self.world_index())
    }

    pub fn world_name(&self) -> &str {
        &self.world().name
    }

    pub fn world_path(&self) -> &WorldPath {
        &self.world_path
    }

    pub fn progress(&self) -> Progress {
        Progress {
            level: self.level(),
            world_index: self.world_index(),
            world_name: self.world_name().to_string(),
            symbols_in_stage: self.progression.symbols_in_stage(self.symbols_consumed),
            stage_threshold: self.progression.stage_threshold(),
        }
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Seconds per step
    pub fn speed_interval(&self) -> f64 {
        self.interval
    }

    pub fn moves_per_second(&self) -> f64 {
        1.0 / self.interval
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over.is_some()
    }

    pub fn game_over_cause(&self) -> Option<GameOverCause> {
        self.game_over
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_running(&self) -> bool {
        self.game_over.is_none() && !self.paused
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Take the events queued since the last drain, oldest first.
    ///
    /// Only the latest [`MAX_PENDING_EVENTS`] are kept between drains.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.width,
            height: self.height,
            snake: self.snake.iter().copied().collect(),
            direction: self.direction,
            food: self.food.clone(),
            symbols_consumed: self.symbols_consumed,
            progress: self.progress(),
            color: self.color.clone(),
            speed_interval: self.interval,
            moves_per_second: self.moves_per_second(),
            paused: self.paused,
            game_over: self.game_over,
            steps: self.steps,
        }
    }
}
