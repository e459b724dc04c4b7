//! Tunable game rules
//!
//! Every field has a default, so a `rules.ron` only needs the keys it
//! overrides.

use serde::{Deserialize, Serialize};

use crate::entities::PlayerTemplate;

/// World generation and combat constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Width and height of the square world
    pub world_size: i32,
    /// Forest draws (misses on non-empty cells are not retried)
    pub forest_count: u32,
    /// Regular enemies to place (the boss is extra)
    pub enemy_count: u32,
    pub treasure_count: u32,
    /// Rejection sampling budget per placement
    pub placement_attempts: u32,
    /// Treasure gold, half-open range `[min, max)`
    pub treasure_gold: (u32, u32),
    /// Top-left corners of the 3x3 town blocks are one cell up-left of these
    pub town_anchors: Vec<(i32, i32)>,
    pub magic_cost: i32,
    /// Probability a non-boss escape succeeds
    pub flee_chance: f64,
    pub player: PlayerTemplate,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            world_size: 32,
            forest_count: 20,
            enemy_count: 8,
            treasure_count: 3,
            placement_attempts: 100,
            treasure_gold: (50, 150),
            town_anchors: vec![(5, 5), (25, 20)],
            magic_cost: 10,
            flee_chance: 0.7,
            player: PlayerTemplate::default(),
        }
    }
}
