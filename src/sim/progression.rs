//! Progression strategies
//!
//! Eaten symbols advance the game through one of two models, picked once when
//! the game is built:
//! - level: a level-up every `symbols_per_level` symbols, worlds rotating every
//!   `levels_per_world` levels
//! - world: a world transition every `symbols_per_world` symbols eaten inside
//!   the current world, with no level counter

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::world::WorldPath;
use crate::config::ProgressionMode;

/// Live progression counters for the chosen model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Progression {
    Level {
        symbols_per_level: u32,
        /// 1-indexed
        level: u32,
    },
    World {
        symbols_per_world: u32,
        /// Worlds completed so far (not wrapped)
        worlds_cleared: u32,
        symbols_in_world: u32,
    },
}

/// A stage boundary crossed by eating a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    LevelUp { level: u32 },
    WorldEntered { worlds_cleared: u32 },
}

impl Progression {
    /// Fresh counters at the start of the journey
    pub fn new(mode: ProgressionMode) -> Self {
        match mode {
            ProgressionMode::Level { symbols_per_level } => Progression::Level {
                symbols_per_level: symbols_per_level.max(1),
                level: 1,
            },
            ProgressionMode::World { symbols_per_world } => Progression::World {
                symbols_per_world: symbols_per_world.max(1),
                worlds_cleared: 0,
                symbols_in_world: 0,
            },
        }
    }

    pub fn mode(&self) -> ProgressionMode {
        match *self {
            Progression::Level {
                symbols_per_level, ..
            } => ProgressionMode::Level { symbols_per_level },
            Progression::World {
                symbols_per_world, ..
            } => ProgressionMode::World { symbols_per_world },
        }
    }

    /// Count one eaten symbol. `total_consumed` already includes it.
    pub fn record_symbol(&mut self, total_consumed: u32) -> Option<Advance> {
        match self {
            Progression::Level {
                symbols_per_level,
                level,
            } => {
                let reached = total_consumed / *symbols_per_level + 1;
                if reached > *level {
                    *level = reached;
                    Some(Advance::LevelUp { level: reached })
                } else {
                    None
                }
            }
            Progression::World {
                symbols_per_world,
                worlds_cleared,
                symbols_in_world,
            } => {
                *symbols_in_world += 1;
                if *symbols_in_world >= *symbols_per_world {
                    *worlds_cleared += 1;
                    *symbols_in_world = 0;
                    Some(Advance::WorldEntered {
                        worlds_cleared: *worlds_cleared,
                    })
                } else {
                    None
                }
            }
        }
    }

    /// Current level; the world model has none
    pub fn level(&self) -> Option<u32> {
        match *self {
            Progression::Level { level, .. } => Some(level),
            Progression::World { .. } => None,
        }
    }

    /// Catalog index of the current world
    pub fn world_index(&self, path: &WorldPath, levels_per_world: u32) -> usize {
        match *self {
            Progression::Level { level, .. } => path.world_index_for_level(level, levels_per_world),
            Progression::World { worlds_cleared, .. } => worlds_cleared as usize % path.len(),
        }
    }

    /// Symbols eaten toward the next stage boundary
    pub fn symbols_in_stage(&self, total_consumed: u32) -> u32 {
        match *self {
            Progression::Level {
                symbols_per_level, ..
            } => total_consumed % symbols_per_level,
            Progression::World {
                symbols_in_world, ..
            } => symbols_in_world,
        }
    }

    pub fn stage_threshold(&self) -> u32 {
        self.mode().threshold()
    }

    /// Food glyph for the current stage
    pub fn draw_glyph<R: Rng + ?Sized>(
        &self,
        path: &mut WorldPath,
        levels_per_world: u32,
        rng: &mut R,
    ) -> String {
        match *self {
            Progression::Level { level, .. } => path.food_glyph(level, levels_per_world, rng),
            Progression::World { worlds_cleared, .. } => {
                path.glyph_for_world(worlds_cleared as usize, rng)
            }
        }
    }
}
