//! World module
//!
//! Contains the overworld grid, tiles, and procedural generation.

pub mod generation;
pub mod map;
pub mod tile;

pub use generation::generate_world;
pub use map::Map;
pub use tile::TileType;
