//! Experience and leveling
//!
//! Level-up resolution and stat growth.

use crate::entities::Player;

/// Max HP gained per level
pub const HP_PER_LEVEL: i32 = 20;
/// Max MP gained per level
pub const MP_PER_LEVEL: i32 = 10;
/// Attack gained per level
pub const ATTACK_PER_LEVEL: i32 = 5;
/// Defense gained per level
pub const DEFENSE_PER_LEVEL: i32 = 3;

/// One level gained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
    pub max_hp: i32,
    pub max_mp: i32,
    pub attack: i32,
    pub defense: i32,
}

/// XP requirement for the level after one that needed `xp_to_next`
pub fn next_requirement(xp_to_next: u32) -> u32 {
    (xp_to_next.saturating_mul(3) / 2).max(1)
}

/// Resolve every level-up the banked XP pays for.
///
/// A single award can cross several thresholds, so this loops until
/// `current_xp < xp_to_next`.
pub fn check_level_ups(player: &mut Player) -> Vec<LevelUp> {
    let mut gained = Vec::new();

    player.experience.xp_to_next = player.experience.xp_to_next.max(1);
    while player.experience.can_level_up() {
        let exp = &mut player.experience;
        exp.level += 1;
        exp.current_xp -= exp.xp_to_next;
        exp.xp_to_next = next_requirement(exp.xp_to_next);

        player.health.max += HP_PER_LEVEL;
        player.mana.max += MP_PER_LEVEL;
        player.attack += ATTACK_PER_LEVEL;
        player.defense += DEFENSE_PER_LEVEL;
        player.restore_full();

        log::debug!("Player reached level {}", player.experience.level);
        gained.push(LevelUp {
            level: player.experience.level,
            max_hp: player.health.max,
            max_mp: player.mana.max,
            attack: player.attack,
            defense: player.defense,
        });
    }

    gained
}

/// Get a title/rank based on level
pub fn level_title(level: u32) -> &'static str {
    match level {
        0..=2 => "Spark",
        3..=4 => "Glimmer",
        5..=7 => "Beacon",
        8..=10 => "Radiance",
        11..=14 => "Lodestar",
        _ => "Legend",
    }
}
