//! One Pixel - A minimal tile-grid RPG
//!
//! Wander a small procedurally generated world as a single pixel,
//! fight monsters, rest in towns and defeat the Lord of Darkness.

pub mod audio;
pub mod combat;
pub mod data;
pub mod ecs;
pub mod entities;
pub mod game;
pub mod progression;
pub mod render;
pub mod town;
pub mod ui;
pub mod world;

// Re-export commonly used types
pub use data::DataManager;
pub use ecs::components::*;
pub use game::{Game, GameState, Screen};
pub use world::map::Map;
