//! Map data structure
//!
//! The 2D grid of the overworld.

use super::tile::TileType;
use crate::ecs::Position;

/// The overworld grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    pub width: i32,
    pub height: i32,
    pub tiles: Vec<TileType>,
    /// Where the player starts and respawns after defeat
    pub start_pos: Position,
}

impl Map {
    /// Create a new map filled with empty tiles
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            tiles: vec![TileType::Empty; (width * height) as usize],
            start_pos: Position::new(width / 2, height / 2),
        }
    }

    /// Middle cell of the grid
    pub fn centre(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    pub fn xy_to_idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Convert 1D index to 2D coordinates
    #[inline]
    pub fn idx_to_xy(&self, idx: usize) -> (i32, i32) {
        let idx = idx as i32;
        (idx % self.width, idx / self.width)
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Get tile at position
    pub fn get_tile(&self, x: i32, y: i32) -> Option<TileType> {
        if self.in_bounds(x, y) {
            Some(self.tiles[self.xy_to_idx(x, y)])
        } else {
            None
        }
    }

    /// Set tile type at position; out-of-bounds writes are dropped
    pub fn set_tile(&mut self, x: i32, y: i32, tile_type: TileType) {
        if self.in_bounds(x, y) {
            let idx = self.xy_to_idx(x, y);
            self.tiles[idx] = tile_type;
        }
    }

    /// Overwrite a rectangle, clipped to the map
    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, tile_type: TileType) {
        for ty in y..y + height {
            for tx in x..x + width {
                self.set_tile(tx, ty, tile_type);
            }
        }
    }

    /// Check if a position is walkable
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).map_or(false, |t| t.is_walkable())
    }

    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y) == Some(TileType::Empty)
    }

    /// All cells holding `tile_type`
    pub fn positions_of(&self, tile_type: TileType) -> Vec<Position> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == tile_type)
            .map(|(idx, _)| {
                let (x, y) = self.idx_to_xy(idx);
                Position::new(x, y)
            })
            .collect()
    }
}
