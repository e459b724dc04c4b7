//! Damage calculation
//!
//! All battle math: player strikes, magic, and the enemy counterattack.

use rand::Rng;

/// Variance range for a physical attack
pub const ATTACK_VARIANCE: i32 = 5;
/// Variance range for a magic attack
pub const MAGIC_VARIANCE: i32 = 10;
/// Variance range for the enemy's attack
pub const ENEMY_VARIANCE: i32 = 3;
/// Floor for the enemy's hit before defending is applied
pub const ENEMY_MIN_DAMAGE: i32 = 5;

/// Source of combat randomness
pub trait Dice {
    /// Uniform integer in `[-range, range]`
    fn variance(&mut self, range: i32) -> i32;
    /// `true` with probability `p`
    fn chance(&mut self, p: f64) -> bool;
}

impl<R: Rng + ?Sized> Dice for R {
    fn variance(&mut self, range: i32) -> i32 {
        if range <= 0 {
            return 0;
        }
        self.gen_range(-range..=range)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.gen_bool(p.clamp(0.0, 1.0))
    }
}

/// Physical attack: `max(1, attack - defense + variance(5))`
pub fn attack_damage(attack: i32, enemy_defense: i32, dice: &mut impl Dice) -> i32 {
    (attack - enemy_defense + dice.variance(ATTACK_VARIANCE)).max(1)
}

/// Magic attack ignores defense: `max(1, floor(attack * 1.5) + variance(10))`
pub fn magic_damage(attack: i32, dice: &mut impl Dice) -> i32 {
    ((attack * 3).div_euclid(2) + dice.variance(MAGIC_VARIANCE)).max(1)
}

/// Extra enemy attack granted per player level above 1 (2.5 per level, floored)
pub fn level_bonus(player_level: u32) -> i32 {
    let levels = player_level.saturating_sub(1) as i32;
    (levels * 5) / 2
}

/// Minimum damage an enemy deals regardless of player defense
pub fn enemy_min_damage(enemy_attack: i32) -> i32 {
    ENEMY_MIN_DAMAGE.max(enemy_attack.div_euclid(4))
}

/// Roll the enemy's hit before any guard is applied.
///
/// Enemies scale with the player's level so defense growth from level-ups
/// never makes a fight free.
pub fn enemy_damage(
    enemy_attack: i32,
    player_level: u32,
    player_defense: i32,
    dice: &mut impl Dice,
) -> i32 {
    let base = enemy_attack + level_bonus(player_level) - player_defense;
    (base + dice.variance(ENEMY_VARIANCE)).max(enemy_min_damage(enemy_attack))
}
