//! Rendering abstraction layer
//!
//! The core hands the world and the player to a `Renderer`; the terminal
//! front end in `ui` is one implementation.

pub mod colors;

pub use colors::Rgb;

use hecs::World;

use crate::ecs::{Position, StatusEffects};
use crate::world::Map;

/// Draws the overworld
pub trait Renderer {
    /// Terrain, towns, enemies and treasure
    fn draw_world(&mut self, map: &Map, entities: &World);
    /// The player on top of the world
    fn draw_player(&mut self, position: Position, hp_ratio: f32, status: &StatusEffects);
}
