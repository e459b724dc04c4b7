//! Progression systems

pub mod xp;

pub use xp::{check_level_ups, level_title, LevelUp};
