//! Enemy templates for data-driven enemy creation
//!
//! Templates are ordered weakest first. Non-boss templates form the regular
//! tiers the world generator picks from by distance; the boss template is
//! placed exactly once.

use serde::{Deserialize, Serialize};

/// A template for creating enemies from external data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    /// Display name
    pub name: String,
    /// Base HP
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    /// XP reward for killing
    pub exp: u32,
    /// Gold reward for killing
    pub gold: u32,
    /// Display color as `#rgb` or `#rrggbb`
    pub color: String,
    #[serde(default)]
    pub is_boss: bool,
}

/// Collection of enemy templates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnemyTemplates {
    pub templates: Vec<EnemyTemplate>,
}

impl EnemyTemplates {
    /// Find a template by name
    pub fn find(&self, name: &str) -> Option<&EnemyTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Regular (non-boss) tiers, weakest first
    pub fn regular(&self) -> Vec<&EnemyTemplate> {
        self.templates.iter().filter(|t| !t.is_boss).collect()
    }

    /// The boss template: the last one flagged as a boss
    pub fn boss(&self) -> Option<&EnemyTemplate> {
        self.templates.iter().rev().find(|t| t.is_boss)
    }

    /// Regular tier for a distance from the world centre.
    /// Every 8 cells is one tier, clamped to the strongest regular tier.
    pub fn tier_for_distance(&self, distance: f64) -> Option<&EnemyTemplate> {
        let regular = self.regular();
        let last = regular.len().checked_sub(1)?;
        let tier = ((distance.max(0.0) / 8.0).floor() as usize).min(last);
        regular.get(tier).copied()
    }
}

fn enemy(name: &str, hp: i32, attack: i32, defense: i32, exp: u32, gold: u32, color: &str) -> EnemyTemplate {
    EnemyTemplate {
        name: name.to_string(),
        hp,
        attack,
        defense,
        exp,
        gold,
        color: color.to_string(),
        is_boss: false,
    }
}

/// Create default enemy templates (hardcoded fallback)
pub fn default_enemy_templates() -> EnemyTemplates {
    EnemyTemplates {
        templates: vec![
            enemy("Slime", 30, 5, 2, 20, 15, "#f66"),
            enemy("Goblin", 50, 8, 4, 35, 25, "#f44"),
            enemy("Orc", 80, 12, 6, 60, 40, "#c33"),
            enemy("Dark Knight", 120, 18, 10, 100, 60, "#922"),
            EnemyTemplate {
                is_boss: true,
                ..enemy("Lord of Darkness", 200, 25, 15, 300, 500, "#f0f")
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tiers() {
        let templates = default_enemy_templates();
        assert_eq!(templates.regular().len(), 4);
        assert_eq!(templates.boss().map(|b| b.name.as_str()), Some("Lord of Darkness"));
    }

    #[test]
    fn test_tier_for_distance() {
        let templates = default_enemy_templates();
        let name = |d: f64| templates.tier_for_distance(d).map(|t| t.name.clone());

        assert_eq!(name(0.0).as_deref(), Some("Slime"));
        assert_eq!(name(7.9).as_deref(), Some("Slime"));
        assert_eq!(name(8.0).as_deref(), Some("Goblin"));
        assert_eq!(name(22.6).as_deref(), Some("Orc"));
        // Far beyond the map never reaches the boss tier
        assert_eq!(name(500.0).as_deref(), Some("Dark Knight"));
    }

    #[test]
    fn test_tier_clamp_with_few_templates() {
        let templates = EnemyTemplates {
            templates: vec![
                enemy("Rat", 10, 2, 0, 5, 1, "#888"),
                EnemyTemplate { is_boss: true, ..enemy("King", 99, 9, 9, 99, 99, "#fff") },
            ],
        };
        assert_eq!(templates.tier_for_distance(40.0).map(|t| t.name.as_str()), Some("Rat"));
    }

    #[test]
    fn test_no_regular_tiers() {
        let templates = EnemyTemplates::default();
        assert!(templates.tier_for_distance(3.0).is_none());
        assert!(templates.boss().is_none());
    }
}
