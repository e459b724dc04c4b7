//! Entity creation and management

pub mod player;
pub mod spawner;
pub mod treasure;

pub use player::{Player, PlayerTemplate};
pub use spawner::{
    check_consistency, get_entity_at, get_town_near, kind_of, remove_entity, spawn_enemy,
    spawn_town, spawn_treasure, ConsistencyError,
};
pub use treasure::{adjacent_treasure, collect_treasure};
