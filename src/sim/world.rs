//! The world path: themed glyph sets the snake journeys through
//!
//! Worlds are visited in a fixed cyclic order. Each world serves food glyphs
//! from its own shuffled pool so no glyph repeats until the whole set has been
//! eaten once.

use std::collections::{BTreeMap, HashMap};

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Number of worlds in the built-in catalog
pub const WORLD_COUNT: usize = 8;

/// Built-in catalog: (name, description, theme color, glyphs)
const CATALOG: [(&str, &str, &str, [&str; 10]); WORLD_COUNT] = [
    (
        "Basic Symbols",
        "Simple geometric shapes to begin our journey",
        "green",
        ["●", "○", "■", "□", "▲", "▼", "◆", "◇", "★", "☆"],
    ),
    (
        "Ancient Egypt",
        "Hieroglyphic symbols from the land of pharaohs",
        "yellow",
        ["𓀀", "𓂀", "𓃀", "𓆣", "𓅱", "𓊖", "𓊗", "𓊘", "𓊙", "𓊚"],
    ),
    (
        "Classical Greece",
        "Letters and symbols from ancient Greek civilization",
        "blue",
        ["Α", "Β", "Γ", "Δ", "Θ", "Λ", "Ξ", "Π", "Σ", "Ω"],
    ),
    (
        "Norse Runes",
        "Mystical runes from the Viking age",
        "cyan",
        ["ᚠ", "ᚢ", "ᚦ", "ᚨ", "ᚱ", "ᚲ", "ᚷ", "ᚹ", "ᚺ", "ᚾ"],
    ),
    (
        "Alchemical Mysteries",
        "Symbols from medieval alchemy and mysticism",
        "magenta",
        ["🜁", "🜄", "🜍", "🜔", "🜛", "🜠", "🜨", "🜩", "🜪", "🜫"],
    ),
    (
        "Mathematical Realm",
        "Logic and mathematical symbols",
        "white",
        ["∴", "∵", "∞", "∇", "∂", "∫", "∑", "∏", "√", "∛"],
    ),
    (
        "Global Currencies",
        "Currency symbols from around the world",
        "red",
        ["₹", "₽", "₩", "₪", "₫", "₦", "₨", "₱", "₡", "₵"],
    ),
    (
        "Digital Age",
        "Modern symbols and special characters",
        "cyan",
        ["◉", "◈", "◊", "◌", "◍", "◎", "◐", "◑", "◒", "◓"],
    ),
];

/// A themed stage of the journey (immutable once built)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    pub name: String,
    pub description: String,
    /// Color theme shown while the snake is in this world
    pub theme: String,
    /// Candidate food glyphs, in catalog order
    pub glyphs: Vec<String>,
}

/// Ordered world catalog plus the per-world glyph pools
#[derive(Debug, Clone)]
pub struct WorldPath {
    worlds: Vec<World>,
    /// Glyphs not yet served in the current shuffle cycle, keyed by world index
    pools: HashMap<usize, Vec<String>>,
}

impl Default for WorldPath {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldPath {
    /// The built-in eight-world journey
    pub fn new() -> Self {
        let worlds = CATALOG
            .iter()
            .map(|(name, description, theme, glyphs)| World {
                name: (*name).to_string(),
                description: (*description).to_string(),
                theme: (*theme).to_string(),
                glyphs: glyphs.iter().map(|g| (*g).to_string()).collect(),
            })
            .collect();

        Self {
            worlds,
            pools: HashMap::new(),
        }
    }

    /// Built-in catalog with some worlds' glyph sets replaced.
    /// Overrides for indices outside the catalog or with no glyphs are skipped.
    pub fn with_overrides(overrides: &BTreeMap<usize, Vec<String>>) -> Self {
        let mut path = Self::new();
        for (&index, glyphs) in overrides {
            match path.worlds.get_mut(index) {
                Some(world) if !glyphs.is_empty() => world.glyphs = glyphs.clone(),
                _ => log::warn!("Ignoring glyph override for world {index}"),
            }
        }
        path
    }

    pub fn len(&self) -> usize {
        self.worlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }

    pub fn worlds(&self) -> &[World] {
        &self.worlds
    }

    /// World by index, wrapping past the end of the catalog
    pub fn world(&self, index: usize) -> &World {
        &self.worlds[index % self.worlds.len()]
    }

    /// Index of the world a 1-indexed level belongs to.
    ///
    /// Level 0 counts as level 1 and `levels_per_world` 0 as 1.
    pub fn world_index_for_level(&self, level: u32, levels_per_world: u32) -> usize {
        let stage = level.saturating_sub(1) / levels_per_world.max(1);
        stage as usize % self.worlds.len()
    }

    pub fn world_for_level(&self, level: u32, levels_per_world: u32) -> &World {
        &self.worlds[self.world_index_for_level(level, levels_per_world)]
    }

    /// Next food glyph for a level, drawn from its world's pool
    pub fn food_glyph<R: Rng + ?Sized>(
        &mut self,
        level: u32,
        levels_per_world: u32,
        rng: &mut R,
    ) -> String {
        let index = self.world_index_for_level(level, levels_per_world);
        self.glyph_for_world(index, rng)
    }

    /// Pop the next glyph from a world's pool.
    ///
    /// An empty pool is refilled with a fresh shuffle of the world's full
    /// glyph set first, so glyphs never repeat within a cycle.
    pub fn glyph_for_world<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) -> String {
        let index = index % self.worlds.len();
        let pool = self.pools.entry(index).or_default();

        if pool.is_empty() {
            pool.extend(self.worlds[index].glyphs.iter().cloned());
            pool.shuffle(rng);
            log::trace!("Refilled glyph pool for world {index}");
        }

        // The refill above guarantees a glyph unless the world has none.
        pool.pop().unwrap_or_default()
    }

    /// Glyphs still waiting in a world's current cycle
    pub fn remaining_in_pool(&self, index: usize) -> usize {
        self.pools
            .get(&(index % self.worlds.len()))
            .map_or(0, Vec::len)
    }

    pub fn world_name(&self, level: u32, levels_per_world: u32) -> &str {
        &self.world_for_level(level, levels_per_world).name
    }

    pub fn world_description(&self, level: u32, levels_per_world: u32) -> &str {
        &self.world_for_level(level, levels_per_world).description
    }

    /// True if `level` is the first level of a world other than the first
    pub fn is_new_world(&self, level: u32, levels_per_world: u32) -> bool {
        level > 1 && (level - 1) % levels_per_world.max(1) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_shape() {
        let path = WorldPath::new();
        assert_eq!(path.len(), WORLD_COUNT);
        for world in path.worlds() {
            assert_eq!(world.glyphs.len(), 10, "{}", world.name);
            let unique: HashSet<_> = world.glyphs.iter().collect();
            assert_eq!(unique.len(), 10, "{} has duplicate glyphs", world.name);
        }
        assert_eq!(path.worlds()[0].name, "Basic Symbols");
        assert_eq!(path.worlds()[7].name, "Digital Age");
    }

    #[test]
    fn test_world_names_by_level() {
        let path = WorldPath::new();
        assert_eq!(path.world_name(1, 2), "Basic Symbols");
        assert_eq!(path.world_name(2, 2), "Basic Symbols");
        assert_eq!(path.world_name(3, 2), "Ancient Egypt");
        assert_eq!(path.world_name(5, 2), "Classical Greece");

        // Eight worlds, one level each: level 9 is back at the start
        assert_eq!(path.world_name(8, 1), "Digital Age");
        assert_eq!(path.world_name(9, 1), "Basic Symbols");
    }

    #[test]
    fn test_world_description() {
        let path = WorldPath::new();
        assert_eq!(
            path.world_description(3, 2),
            "Hieroglyphic symbols from the land of pharaohs"
        );
    }

    #[test]
    fn test_degenerate_levels() {
        let path = WorldPath::new();
        assert_eq!(path.world_index_for_level(0, 2), 0);
        assert_eq!(path.world_index_for_level(3, 0), 2);
    }

    #[test]
    fn test_is_new_world() {
        let path = WorldPath::new();
        assert!(!path.is_new_world(1, 2));
        assert!(!path.is_new_world(2, 2));
        assert!(path.is_new_world(3, 2));
        assert!(!path.is_new_world(4, 2));
        assert!(path.is_new_world(5, 2));
        assert!(path.is_new_world(2, 1));
    }

    #[test]
    fn test_pool_serves_every_glyph_once() {
        let mut path = WorldPath::new();
        let mut rng = Pcg32::seed_from_u64(7);

        let served: Vec<String> = (0..10).map(|_| path.food_glyph(3, 2, &mut rng)).collect();
        let served_set: HashSet<_> = served.iter().cloned().collect();
        let expected: HashSet<_> = path.world(1).glyphs.iter().cloned().collect();

        assert_eq!(served_set, expected);
        assert_eq!(path.remaining_in_pool(1), 0);

        // Next draw starts a new cycle
        let next = path.food_glyph(3, 2, &mut rng);
        assert!(expected.contains(&next));
        assert_eq!(path.remaining_in_pool(1), 9);
    }

    #[test]
    fn test_pools_are_independent_per_world() {
        let mut path = WorldPath::new();
        let mut rng = Pcg32::seed_from_u64(11);

        path.glyph_for_world(0, &mut rng);
        path.glyph_for_world(0, &mut rng);
        path.glyph_for_world(4, &mut rng);

        assert_eq!(path.remaining_in_pool(0), 8);
        assert_eq!(path.remaining_in_pool(4), 9);
        assert_eq!(path.remaining_in_pool(2), 0);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = WorldPath::new();
        let mut b = WorldPath::new();
        let mut rng_a = Pcg32::seed_from_u64(42);
        let mut rng_b = Pcg32::seed_from_u64(42);

        for _ in 0..25 {
            assert_eq!(
                a.glyph_for_world(5, &mut rng_a),
                b.glyph_for_world(5, &mut rng_b)
            );
        }
    }

    #[test]
    fn test_overrides_replace_glyphs() {
        let mut overrides = BTreeMap::new();
        overrides.insert(0, vec!["*".to_string(), "@".to_string()]);
        overrides.insert(99, vec!["x".to_string()]);
        let mut path = WorldPath::with_overrides(&overrides);
        let mut rng = Pcg32::seed_from_u64(3);

        let drawn: HashSet<String> = (0..2).map(|_| path.glyph_for_world(0, &mut rng)).collect();
        let expected: HashSet<String> = ["*", "@"].iter().map(|s| s.to_string()).collect();
        assert_eq!(drawn, expected);
        assert_eq!(path.world(1).glyphs.len(), 10);
    }

    proptest! {
        #[test]
        fn prop_pool_cycle_is_a_permutation(world in 0usize..WORLD_COUNT, seed in any::<u64>()) {
            let mut path = WorldPath::new();
            let mut rng = Pcg32::seed_from_u64(seed);

            let mut served: Vec<String> =
                (0..10).map(|_| path.glyph_for_world(world, &mut rng)).collect();
            let mut expected = path.world(world).glyphs.clone();
            served.sort();
            expected.sort();
            prop_assert_eq!(served, expected);
        }
    }
}
