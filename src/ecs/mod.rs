//! Entity Component System
//!
//! World entities (towns, enemies, treasure) live in a `hecs::World` as
//! `(Position, EntityKind)` rows.

pub mod components;

pub use components::*;
