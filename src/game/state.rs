//! Canonical game model
//!
//! Everything a battle, a town visit or a step on the map reads or mutates.

use hecs::World;
use rand::Rng;

use crate::combat::BattleContext;
use crate::data::DataManager;
use crate::entities::Player;
use crate::town::TownContext;
use crate::world::{generate_world, Map};

/// Player, world grid, entities and the active battle/town context
pub struct GameState {
    pub player: Player,
    pub map: Map,
    /// World-placed entities as `(Position, EntityKind)` rows
    pub entities: World,
    pub battle: Option<BattleContext>,
    pub town: Option<TownContext>,
    pub move_count: u32,
}

impl GameState {
    pub fn new(player: Player, map: Map, entities: World) -> Self {
        Self {
            player,
            map,
            entities,
            battle: None,
            town: None,
            move_count: 0,
        }
    }

    /// Fresh world and fresh player
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, data: &DataManager) -> Self {
        let (map, entities) = generate_world(rng, data);
        let mut player = Player::from_template(&data.rules.player);
        player.position = map.start_pos;
        Self::new(player, map, entities)
    }
}
