//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - No clock: the caller drives every step
//! - No rendering or terminal dependencies

pub mod progression;
pub mod rules;
pub mod state;
pub mod tick;
pub mod world;

pub use progression::{Advance, Progression};
pub use rules::{
    Direction, Position, is_food_collision, is_self_collision, is_valid_turn, next_position,
    scale_position, wrapped_distance,
};
pub use state::{Food, Game, GameEvent, GameOverCause, MAX_PENDING_EVENTS, Progress, Snapshot};
pub use tick::{StepOutcome, TickInput, tick};
pub use world::{WORLD_COUNT, World, WorldPath};
