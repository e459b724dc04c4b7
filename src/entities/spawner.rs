//! Spawning and looking up world entities
//!
//! Every world entity is a `(Position, EntityKind)` row. Enemies and
//! treasure also own a marker tile; the helpers here keep the two in step.

use hecs::{Entity, World};
use thiserror::Error;

use crate::data::{EnemyTemplate, TownTemplate};
use crate::ecs::{EntityKind, Position, Treasure};
use crate::world::{Map, TileType};

/// Marker tile an entity of this kind owns, if any
pub fn marker_for(kind: &EntityKind) -> Option<TileType> {
    match kind {
        EntityKind::Town(_) => None,
        EntityKind::Enemy(e) if e.is_boss => Some(TileType::Boss),
        EntityKind::Enemy(_) => Some(TileType::Enemy),
        EntityKind::Treasure(_) => Some(TileType::Treasure),
    }
}

/// Register an entity and paint its marker tile
pub fn spawn_entity(map: &mut Map, world: &mut World, pos: Position, kind: EntityKind) -> Entity {
    if let Some(marker) = marker_for(&kind) {
        map.set_tile(pos.x, pos.y, marker);
    }
    log::debug!("Spawned {} at ({}, {})", kind.label(), pos.x, pos.y);
    world.spawn((pos, kind))
}

pub fn spawn_town(map: &mut Map, world: &mut World, pos: Position, town: TownTemplate) -> Entity {
    spawn_entity(map, world, pos, EntityKind::Town(town))
}

pub fn spawn_enemy(map: &mut Map, world: &mut World, pos: Position, enemy: EnemyTemplate) -> Entity {
    spawn_entity(map, world, pos, EntityKind::Enemy(enemy))
}

pub fn spawn_treasure(map: &mut Map, world: &mut World, pos: Position, gold: u32) -> Entity {
    spawn_entity(map, world, pos, EntityKind::Treasure(Treasure { gold }))
}

/// Get the entity standing exactly at a position
pub fn get_entity_at(world: &World, pos: Position) -> Option<Entity> {
    world
        .query::<&Position>()
        .iter()
        .find(|(_, p)| **p == pos)
        .map(|(entity, _)| entity)
}

/// Clone the payload of an entity
pub fn kind_of(world: &World, entity: Entity) -> Option<EntityKind> {
    world.get::<&EntityKind>(entity).ok().map(|k| (*k).clone())
}

pub fn position_of(world: &World, entity: Entity) -> Option<Position> {
    world.get::<&Position>(entity).ok().map(|p| *p)
}

/// Town whose anchor is within one cell of `pos` in both axes
pub fn get_town_near(world: &World, pos: Position) -> Option<Entity> {
    world
        .query::<(&Position, &EntityKind)>()
        .iter()
        .find(|(_, (p, kind))| {
            matches!(kind, EntityKind::Town(_)) && p.chebyshev_distance(&pos) <= 1
        })
        .map(|(entity, _)| entity)
}

/// Enemies strictly closer than `radius` with their distance. An enemy on
/// `pos` itself is not counted.
pub fn enemies_within(world: &World, pos: Position, radius: f64) -> Vec<(Entity, f64)> {
    world
        .query::<(&Position, &EntityKind)>()
        .iter()
        .filter(|(_, (_, kind))| matches!(kind, EntityKind::Enemy(_)))
        .map(|(entity, (p, _))| (entity, p.euclidean_distance(&pos)))
        .filter(|(_, d)| *d > 0.0 && *d < radius)
        .collect()
}

/// Remove an entity and reset its marker tile in one step
pub fn remove_entity(map: &mut Map, world: &mut World, entity: Entity) -> Option<EntityKind> {
    let (pos, kind) = world.remove::<(Position, EntityKind)>(entity).ok()?;
    let _ = world.despawn(entity);
    if marker_for(&kind).is_some() {
        map.set_tile(pos.x, pos.y, TileType::Empty);
    }
    log::debug!("Removed {} at ({}, {})", kind.label(), pos.x, pos.y);
    Some(kind)
}

/// Count entities of each kind: (towns, enemies, bosses, treasures)
pub fn census(world: &World) -> (usize, usize, usize, usize) {
    let mut counts = (0, 0, 0, 0);
    for (_, kind) in world.query::<&EntityKind>().iter() {
        match kind {
            EntityKind::Town(_) => counts.0 += 1,
            EntityKind::Enemy(e) if e.is_boss => counts.2 += 1,
            EntityKind::Enemy(_) => counts.1 += 1,
            EntityKind::Treasure(_) => counts.3 += 1,
        }
    }
    counts
}

/// Grid and entity collection disagree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    #[error("marker {tile:?} at ({x}, {y}) has {count} matching entities")]
    MarkerMismatch { tile: TileType, x: i32, y: i32, count: usize },
    #[error("{label} at ({x}, {y}) sits on {tile:?}")]
    EntityOffMarker { label: &'static str, x: i32, y: i32, tile: Option<TileType> },
    #[error("town tile at ({x}, {y}) is not next to any town")]
    StrayTownTile { x: i32, y: i32 },
}

/// Verify the grid/entity invariant
pub fn check_consistency(map: &Map, world: &World) -> Result<(), ConsistencyError> {
    let rows: Vec<(Position, EntityKind)> = world
        .query::<(&Position, &EntityKind)>()
        .iter()
        .map(|(_, (p, k))| (*p, k.clone()))
        .collect();

    for (pos, kind) in &rows {
        let tile = map.get_tile(pos.x, pos.y);
        let expected = marker_for(kind).unwrap_or(TileType::Town);
        if tile != Some(expected) {
            return Err(ConsistencyError::EntityOffMarker {
                label: kind.label(),
                x: pos.x,
                y: pos.y,
                tile,
            });
        }
    }

    for (idx, &tile) in map.tiles.iter().enumerate().filter(|(_, t)| t.is_marker()) {
        let (x, y) = map.idx_to_xy(idx);
        let count = rows
            .iter()
            .filter(|(p, k)| *p == Position::new(x, y) && marker_for(k) == Some(tile))
            .count();
        if count != 1 {
            return Err(ConsistencyError::MarkerMismatch { tile, x, y, count });
        }
    }

    for cell in map.positions_of(TileType::Town) {
        let near_town = rows
            .iter()
            .any(|(p, k)| matches!(k, EntityKind::Town(_)) && p.chebyshev_distance(&cell) <= 1);
        if !near_town {
            return Err(ConsistencyError::StrayTownTile { x: cell.x, y: cell.y });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::enemies::default_enemy_templates;
    use crate::data::towns::default_town_templates;

    fn slime() -> EnemyTemplate {
        default_enemy_templates().templates[0].clone()
    }

    #[test]
    fn test_spawn_paints_marker() {
        let mut map = Map::new(10, 10);
        let mut world = World::new();
        let e = spawn_enemy(&mut map, &mut world, Position::new(3, 4), slime());

        assert_eq!(map.get_tile(3, 4), Some(TileType::Enemy));
        assert_eq!(get_entity_at(&world, Position::new(3, 4)), Some(e));
        assert!(check_consistency(&map, &world).is_ok());
    }

    #[test]
    fn test_remove_entity_resets_tile() {
        let mut map = Map::new(10, 10);
        let mut world = World::new();
        let e = spawn_treasure(&mut map, &mut world, Position::new(1, 1), 70);

        let kind = remove_entity(&mut map, &mut world, e);
        assert!(matches!(kind, Some(EntityKind::Treasure(Treasure { gold: 70 }))));
        assert_eq!(map.get_tile(1, 1), Some(TileType::Empty));
        assert_eq!(world.len(), 0);
        assert!(remove_entity(&mut map, &mut world, e).is_none());
    }

    #[test]
    fn test_town_near() {
        let mut map = Map::new(10, 10);
        let mut world = World::new();
        map.fill_rect(4, 4, 3, 3, TileType::Town);
        let town = default_town_templates().templates[0].clone();
        let e = spawn_town(&mut map, &mut world, Position::new(5, 5), town);

        assert_eq!(get_town_near(&world, Position::new(4, 6)), Some(e));
        assert_eq!(get_town_near(&world, Position::new(7, 5)), None);
        assert!(check_consistency(&map, &world).is_ok());
    }

    #[test]
    fn test_consistency_detects_orphan_marker() {
        let mut map = Map::new(10, 10);
        let world = World::new();
        map.set_tile(2, 2, TileType::Treasure);
        assert_eq!(
            check_consistency(&map, &world),
            Err(ConsistencyError::MarkerMismatch { tile: TileType::Treasure, x: 2, y: 2, count: 0 })
        );

        map.set_tile(2, 2, TileType::Town);
        assert_eq!(
            check_consistency(&map, &world),
            Err(ConsistencyError::StrayTownTile { x: 2, y: 2 })
        );
    }

    #[test]
    fn test_enemies_within() {
        let mut map = Map::new(32, 32);
        let mut world = World::new();
        spawn_enemy(&mut map, &mut world, Position::new(10, 10), slime());
        spawn_enemy(&mut map, &mut world, Position::new(30, 30), slime());

        let near = enemies_within(&world, Position::new(13, 14), 8.0);
        assert_eq!(near.len(), 1);
        assert!((near[0].1 - 5.0).abs() < 1e-9);

        assert!(enemies_within(&world, Position::new(10, 10), 8.0).is_empty());
    }
}
