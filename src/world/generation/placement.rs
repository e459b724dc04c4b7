//! Placement of towns, enemies, the boss and treasure

use hecs::World;
use rand::Rng;

use crate::data::{EnemyTemplates, Rules, TownTemplates};
use crate::ecs::Position;
use crate::entities::{get_entity_at, remove_entity, spawn_enemy, spawn_town, spawn_treasure};
use crate::world::{Map, TileType};

/// Pick a uniformly random empty cell, giving up after `attempts` draws
pub fn random_empty_cell<R: Rng + ?Sized>(rng: &mut R, map: &Map, attempts: u32) -> Option<Position> {
    (0..attempts).find_map(|_| {
        let x = rng.gen_range(0..map.width);
        let y = rng.gen_range(0..map.height);
        map.is_empty(x, y).then(|| Position::new(x, y))
    })
}

/// Paint a 3x3 town block around each anchor and register the towns
pub fn place_towns(map: &mut Map, world: &mut World, anchors: &[(i32, i32)], towns: &TownTemplates) {
    for (i, &(x, y)) in anchors.iter().enumerate() {
        let Some(template) = towns.for_anchor(i) else {
            log::warn!("No town templates; skipping anchor ({}, {})", x, y);
            continue;
        };
        if !map.in_bounds(x, y) {
            log::warn!("Town anchor ({}, {}) is off the map", x, y);
            continue;
        }
        map.fill_rect(x - 1, y - 1, 3, 3, TileType::Town);
        spawn_town(map, world, Position::new(x, y), template.clone());
    }
}

/// Place regular enemies, tiered by distance from the world centre
pub fn place_enemies<R: Rng + ?Sized>(
    rng: &mut R,
    map: &mut Map,
    world: &mut World,
    rules: &Rules,
    enemies: &EnemyTemplates,
) {
    let centre = map.centre();
    for _ in 0..rules.enemy_count {
        let Some(pos) = random_empty_cell(rng, map, rules.placement_attempts) else {
            log::debug!("No empty cell for enemy after {} attempts", rules.placement_attempts);
            continue;
        };
        let distance = pos.euclidean_distance(&centre);
        let Some(template) = enemies.tier_for_distance(distance) else {
            log::warn!("No regular enemy templates");
            return;
        };
        spawn_enemy(map, world, pos, template.clone());
    }
}

/// Place the boss near the top-right corner, replacing anything there
pub fn place_boss(map: &mut Map, world: &mut World, enemies: &EnemyTemplates) {
    let Some(boss) = enemies.boss() else {
        log::warn!("No boss template; the world has no boss");
        return;
    };
    let pos = Position::new(map.width - 3, 3);
    if !map.in_bounds(pos.x, pos.y) {
        log::warn!("Map too small for the boss");
        return;
    }
    if let Some(existing) = get_entity_at(world, pos) {
        remove_entity(map, world, existing);
    }
    spawn_enemy(map, world, pos, boss.clone());
}

pub fn place_treasures<R: Rng + ?Sized>(rng: &mut R, map: &mut Map, world: &mut World, rules: &Rules) {
    let (min_gold, max_gold) = rules.treasure_gold;
    for _ in 0..rules.treasure_count {
        let Some(pos) = random_empty_cell(rng, map, rules.placement_attempts) else {
            log::debug!("No empty cell for treasure after {} attempts", rules.placement_attempts);
            continue;
        };
        let gold = if max_gold > min_gold {
            rng.gen_range(min_gold..max_gold)
        } else {
            min_gold
        };
        spawn_treasure(map, world, pos, gold);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::enemies::default_enemy_templates;
    use crate::data::towns::default_town_templates;
    use crate::ecs::EntityKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_empty_cell_exhaustion() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut map = Map::new(4, 4);
        map.fill_rect(0, 0, 4, 4, TileType::Forest);
        assert_eq!(random_empty_cell(&mut rng, &map, 100), None);

        map.set_tile(2, 1, TileType::Empty);
        assert_eq!(random_empty_cell(&mut rng, &map, 10_000), Some(Position::new(2, 1)));
    }

    #[test]
    fn test_towns_cycle_templates() {
        let mut map = Map::new(32, 32);
        let mut world = World::new();
        let anchors = [(5, 5), (25, 20), (15, 28)];
        place_towns(&mut map, &mut world, &anchors, &default_town_templates());

        assert_eq!(map.positions_of(TileType::Town).len(), 27);
        let third = get_entity_at(&world, Position::new(15, 28)).unwrap();
        let name = world.get::<&EntityKind>(third).unwrap().as_town().unwrap().name.clone();
        assert_eq!(name, "Village of Beginnings");
    }

    #[test]
    fn test_boss_replaces_existing_entity() {
        let mut map = Map::new(32, 32);
        let mut world = World::new();
        let templates = default_enemy_templates();
        spawn_treasure(&mut map, &mut world, Position::new(29, 3), 80);

        place_boss(&mut map, &mut world, &templates);

        assert_eq!(world.len(), 1);
        assert_eq!(map.get_tile(29, 3), Some(TileType::Boss));
        let boss = get_entity_at(&world, Position::new(29, 3)).unwrap();
        assert!(world.get::<&EntityKind>(boss).unwrap().as_enemy().unwrap().is_boss);
    }

    #[test]
    fn test_enemies_never_use_boss_tier() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut map = Map::new(32, 32);
        map.start_pos = Position::new(16, 16);
        let mut world = World::new();
        let rules = Rules { enemy_count: 40, ..Rules::default() };

        place_enemies(&mut rng, &mut map, &mut world, &rules, &default_enemy_templates());

        assert_eq!(world.len(), 40);
        for (_, (pos, kind)) in world.query::<(&Position, &EntityKind)>().iter() {
            let enemy = kind.as_enemy().unwrap();
            assert!(!enemy.is_boss);
            let tier = ((pos.euclidean_distance(&map.centre()) / 8.0).floor() as usize).min(3);
            assert_eq!(enemy.name, default_enemy_templates().templates[tier].name);
        }
    }

    #[test]
    fn test_enemy_tiers_follow_centre_not_start() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut map = Map::new(48, 48);
        map.start_pos = Position::new(16, 16);
        let mut world = World::new();
        let rules = Rules { world_size: 48, enemy_count: 60, ..Rules::default() };
        let templates = default_enemy_templates();

        place_enemies(&mut rng, &mut map, &mut world, &rules, &templates);

        assert_eq!(map.centre(), Position::new(24, 24));
        for (_, (pos, kind)) in world.query::<(&Position, &EntityKind)>().iter() {
            let tier = ((pos.euclidean_distance(&Position::new(24, 24)) / 8.0).floor() as usize).min(3);
            assert_eq!(kind.as_enemy().unwrap().name, templates.templates[tier].name, "at {:?}", pos);
        }
    }

    #[test]
    fn test_treasure_gold_range() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut map = Map::new(32, 32);
        let mut world = World::new();
        let rules = Rules { treasure_count: 50, ..Rules::default() };

        place_treasures(&mut rng, &mut map, &mut world, &rules);

        assert_eq!(world.len(), 50);
        for (_, kind) in world.query::<&EntityKind>().iter() {
            match kind {
                EntityKind::Treasure(t) => assert!((50..150).contains(&t.gold)),
                other => panic!("unexpected {}", other.label()),
            }
        }
    }
}
