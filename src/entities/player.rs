//! Player record
//!
//! The player is not a world entity; `GameState` owns it directly.

use serde::{Deserialize, Serialize};

use crate::ecs::{Experience, Health, Mana, Position, StatusEffects};

/// Starting values for a fresh player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTemplate {
    pub start: (i32, i32),
    pub hp: i32,
    pub mp: i32,
    pub attack: i32,
    pub defense: i32,
    pub gold: u32,
    pub exp_to_next: u32,
}

impl Default for PlayerTemplate {
    fn default() -> Self {
        Self {
            start: (16, 16),
            hp: 100,
            mp: 50,
            attack: 10,
            defense: 5,
            gold: 100,
            exp_to_next: 100,
        }
    }
}

/// The hero
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub position: Position,
    pub health: Health,
    pub mana: Mana,
    pub experience: Experience,
    pub attack: i32,
    pub defense: i32,
    pub gold: u32,
    pub status: StatusEffects,
}

impl Player {
    /// Create a player from a template
    pub fn from_template(template: &PlayerTemplate) -> Self {
        Self {
            position: Position::new(template.start.0, template.start.1),
            health: Health::new(template.hp),
            mana: Mana::new(template.mp),
            experience: Experience::new(template.exp_to_next),
            attack: template.attack,
            defense: template.defense,
            gold: template.gold,
            status: StatusEffects::default(),
        }
    }

    pub fn level(&self) -> u32 {
        self.experience.level
    }

    /// Spend gold if the player can afford it
    pub fn spend_gold(&mut self, amount: u32) -> bool {
        if self.gold >= amount {
            self.gold -= amount;
            true
        } else {
            false
        }
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Restore hp and mp to their maxima
    pub fn restore_full(&mut self) {
        self.health.restore_full();
        self.mana.restore_full();
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::from_template(&PlayerTemplate::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_player() {
        let player = Player::default();
        assert_eq!(player.position, Position::new(16, 16));
        assert_eq!(player.health, Health::new(100));
        assert_eq!(player.mana, Mana::new(50));
        assert_eq!(player.level(), 1);
        assert_eq!(player.experience.xp_to_next, 100);
        assert_eq!(player.gold, 100);
    }

    #[test]
    fn test_spend_gold() {
        let mut player = Player::default();
        assert!(!player.spend_gold(101));
        assert_eq!(player.gold, 100);
        assert!(player.spend_gold(100));
        assert_eq!(player.gold, 0);
    }
}
