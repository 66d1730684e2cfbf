//! One simulation step
//!
//! The engine owns no clock. The caller invokes `step()` (or `tick()` with the
//! frame's input) once per timer period and reschedules the timer when a
//! `SpeedChanged` event comes out.

use rand::seq::IndexedRandom;

use super::progression::Advance;
use super::rules::{Direction, is_food_collision, is_self_collision, next_position};
use super::state::{Game, GameEvent, GameOverCause};

/// Input gathered between two ticks
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Requested heading (reversals are ignored)
    pub turn: Option<Direction>,
    /// Pause/resume toggle
    pub toggle_pause: bool,
}

/// What a single step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Paused or already over; nothing changed
    Idle,
    /// Moved one cell without eating
    Moved,
    /// Ate the food and grew by one segment
    Ate,
    /// The run ended this step
    Died(GameOverCause),
}

/// Apply one frame of input, then advance the game one step
pub fn tick(game: &mut Game, input: &TickInput) -> StepOutcome {
    if input.toggle_pause {
        game.toggle_pause();
    }
    if let Some(direction) = input.turn {
        game.turn(direction);
    }
    game.step()
}

impl Game {
    /// Advance the snake one cell.
    ///
    /// Order matters: the collision check runs against the untouched body,
    /// then the new head is pushed, and the tail is dropped only when nothing
    /// was eaten. A fatal move is never applied.
    pub fn step(&mut self) -> StepOutcome {
        if !self.is_running() {
            return StepOutcome::Idle;
        }

        let candidate = next_position(self.head(), self.direction, self.width, self.height);

        if is_self_collision(candidate, &self.snake) {
            log::info!(
                "Self collision at ({}, {}) after {} symbols",
                candidate.x,
                candidate.y,
                self.symbols_consumed
            );
            self.end_game(GameOverCause::SelfCollision);
            return StepOutcome::Died(GameOverCause::SelfCollision);
        }

        self.snake.push_front(candidate);
        self.steps += 1;
        log::trace!("Head -> ({}, {})", candidate.x, candidate.y);

        if !is_food_collision(candidate, self.food.position) {
            self.snake.pop_back();
            return StepOutcome::Moved;
        }

        self.consume_food();
        if self.place_food() {
            StepOutcome::Ate
        } else {
            StepOutcome::Died(GameOverCause::BoardFilled)
        }
    }

    /// Count the eaten symbol, advance progression and speed up
    fn consume_food(&mut self) {
        self.symbols_consumed += 1;
        self.emit(GameEvent::FoodEaten {
            glyph: self.food.glyph.clone(),
            position: self.food.position,
        });

        if let Some(advance) = self.progression.record_symbol(self.symbols_consumed) {
            self.apply_advance(advance);
        }
        self.accelerate();
    }

    fn apply_advance(&mut self, advance: Advance) {
        match advance {
            Advance::LevelUp { level } => {
                self.color = self.pick_level_color();
                log::info!("Level {level} reached ({})", self.color);
                self.emit(GameEvent::LevelUp {
                    level,
                    color: self.color.clone(),
                });

                if self
                    .world_path
                    .is_new_world(level, self.config.levels_per_world)
                {
                    self.announce_world();
                }
            }
            Advance::WorldEntered { .. } => {
                self.color = self.world().theme.clone();
                self.announce_world();
            }
        }
    }

    fn announce_world(&mut self) {
        let index = self.world_index();
        let name = self.world_name().to_string();
        log::info!("Entering world {index}: {name}");
        self.emit(GameEvent::WorldEntered { index, name });
    }

    /// Random palette color, different from the current one when possible
    fn pick_level_color(&mut self) -> String {
        let fresh: Vec<&String> = self
            .config
            .level_colors
            .iter()
            .filter(|color| **color != self.color)
            .collect();

        match fresh.choose(&mut self.rng) {
            Some(color) => (*color).clone(),
            None => self.color.clone(),
        }
    }

    /// Shrink the step interval by the configured factor, down to the floor
    fn accelerate(&mut self) {
        let floor = self.config.min_speed_interval;
        if self.interval <= floor {
            return;
        }
        self.interval = (self.interval * self.config.speed_increase_factor).max(floor);
        log::debug!("Speed now {:.2} moves/s", self.moves_per_second());
        self.emit(GameEvent::SpeedChanged {
            interval: self.interval,
        });
    }
}
