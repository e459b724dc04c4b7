//! Data loading and external game content
//!
//! Enemy tiers, towns, story text and rules. Built-in defaults can be
//! overridden by RON files.

pub mod enemies;
pub mod loader;
pub mod rules;
pub mod stories;
pub mod towns;

pub use enemies::{EnemyTemplate, EnemyTemplates};
pub use loader::{export_default_data, DataError, DataManager};
pub use rules::Rules;
pub use towns::{ItemEffect, ShopItem, TownTemplate, TownTemplates};
