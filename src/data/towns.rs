//! Town templates: inns, shops and townsfolk

use serde::{Deserialize, Serialize};

/// What a shop item does when bought
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemEffect {
    /// Restore HP, capped at max
    Heal,
    /// Restore MP, capped at max
    Mana,
    /// Permanent attack increase
    BuffAttack,
    /// Permanent defense increase
    BuffDefense,
}

/// Item for sale in a town shop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopItem {
    pub name: String,
    pub price: u32,
    pub effect: ItemEffect,
    pub value: i32,
}

/// A town and everything it offers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TownTemplate {
    pub name: String,
    pub description: String,
    pub inn_cost: u32,
    /// Percentage of max HP/MP restored by the inn
    pub inn_heal_percent: u32,
    pub shop_items: Vec<ShopItem>,
    pub dialogue: Vec<String>,
}

/// Collection of town templates, in anchor order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TownTemplates {
    pub templates: Vec<TownTemplate>,
}

impl TownTemplates {
    /// Template for the `index`-th town anchor, falling back to the first
    pub fn for_anchor(&self, index: usize) -> Option<&TownTemplate> {
        self.templates.get(index).or_else(|| self.templates.first())
    }
}

fn item(name: &str, price: u32, effect: ItemEffect, value: i32) -> ShopItem {
    ShopItem {
        name: name.to_string(),
        price,
        effect,
        value,
    }
}

/// Create default town templates (hardcoded fallback)
pub fn default_town_templates() -> TownTemplates {
    TownTemplates {
        templates: vec![
            TownTemplate {
                name: "Village of Beginnings".to_string(),
                description: "A place where small lights gather. Travellers rest here.".to_string(),
                inn_cost: 30,
                inn_heal_percent: 100,
                shop_items: vec![
                    item("Potion", 15, ItemEffect::Heal, 30),
                    item("Magic Dust", 20, ItemEffect::Mana, 20),
                    item("Crystal of Might", 50, ItemEffect::BuffAttack, 5),
                ],
                dialogue: vec![
                    "\"Welcome, traveller. Dangerous lights lurk in the eastern woods...\"".to_string(),
                    "\"This world grows one pixel at a time. Imagine it and you will see.\"".to_string(),
                    "\"They say a legendary light waits beyond the northern mountains...\"".to_string(),
                ],
            },
            TownTemplate {
                name: "Waterside Town".to_string(),
                description: "A quiet place wrapped in a blue glow.".to_string(),
                inn_cost: 50,
                inn_heal_percent: 100,
                shop_items: vec![
                    item("Hi-Potion", 40, ItemEffect::Heal, 80),
                    item("Ether", 50, ItemEffect::Mana, 50),
                    item("Crystal of Iron", 60, ItemEffect::BuffDefense, 5),
                ],
                dialogue: vec![
                    "\"This water reflects everything. Even your true colour.\"".to_string(),
                    "\"An ancient light sleeps in the abyss... it must not wake.\"".to_string(),
                ],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_anchor_falls_back_to_first() {
        let towns = default_town_templates();
        assert_eq!(towns.for_anchor(1).map(|t| t.name.as_str()), Some("Waterside Town"));
        assert_eq!(towns.for_anchor(5).map(|t| t.name.as_str()), Some("Village of Beginnings"));
        assert!(TownTemplates::default().for_anchor(0).is_none());
    }
}
