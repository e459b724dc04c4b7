//! Treasure pickup

use hecs::World;

use super::spawner::{get_entity_at, remove_entity};
use super::Player;
use crate::ecs::{Direction, EntityKind, Position};
use crate::world::{Map, TileType};

/// Pick up the treasure at `pos`, if any. Returns the gold gained.
pub fn collect_treasure(map: &mut Map, world: &mut World, player: &mut Player, pos: Position) -> Option<u32> {
    let entity = get_entity_at(world, pos)?;
    let is_treasure = world
        .get::<&EntityKind>(entity)
        .map(|k| matches!(*k, EntityKind::Treasure(_)))
        .unwrap_or(false);
    if !is_treasure {
        return None;
    }

    match remove_entity(map, world, entity)? {
        EntityKind::Treasure(treasure) => {
            player.add_gold(treasure.gold);
            log::debug!("Collected {} gold at ({}, {})", treasure.gold, pos.x, pos.y);
            Some(treasure.gold)
        }
        _ => None,
    }
}

/// First adjacent cell (cardinal) holding treasure
pub fn adjacent_treasure(map: &Map, pos: Position) -> Option<Position> {
    Direction::ALL
        .iter()
        .map(|dir| pos.step(*dir))
        .find(|p| map.get_tile(p.x, p.y) == Some(TileType::Treasure))
}
