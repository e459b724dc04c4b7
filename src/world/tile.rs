//! Tile definitions
//!
//! Terrain and entity markers stored in the world grid.

use serde::{Deserialize, Serialize};

/// Types of tiles in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileType {
    #[default]
    Empty,
    Town,
    Forest,
    Water,
    Mountain,

    // Entity markers
    Treasure,
    Enemy,
    Boss,
}

impl TileType {
    pub fn is_walkable(&self) -> bool {
        !matches!(self, TileType::Water | TileType::Mountain)
    }

    /// Marks a cell owned by a consumable entity
    pub fn is_marker(&self) -> bool {
        matches!(self, TileType::Treasure | TileType::Enemy | TileType::Boss)
    }

    pub fn glyph(&self) -> char {
        match self {
            TileType::Empty => ' ',
            TileType::Town => '▒',
            TileType::Forest => '♣',
            TileType::Water => '≈',
            TileType::Mountain => '▲',
            TileType::Treasure => '$',
            TileType::Enemy => '●',
            TileType::Boss => '◆',
        }
    }

    pub fn fg_color(&self) -> (u8, u8, u8) {
        match self {
            TileType::Empty => (10, 10, 15),
            TileType::Town => (68, 255, 68),
            TileType::Forest => (34, 170, 85),
            TileType::Water => (51, 136, 255),
            TileType::Mountain => (102, 102, 102),
            TileType::Treasure => (255, 221, 0),
            TileType::Enemy => (255, 68, 68),
            TileType::Boss => (255, 0, 255),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walkability() {
        assert!(!TileType::Water.is_walkable());
        assert!(!TileType::Mountain.is_walkable());
        for tile in [
            TileType::Empty,
            TileType::Town,
            TileType::Forest,
            TileType::Treasure,
            TileType::Enemy,
            TileType::Boss,
        ] {
            assert!(tile.is_walkable(), "{:?} should be walkable", tile);
        }
    }
}
