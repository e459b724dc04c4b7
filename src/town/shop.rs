//! Town shops

use super::TownError;
use crate::data::{ItemEffect, ShopItem, TownTemplate};
use crate::entities::Player;

/// A completed purchase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    pub item: ShopItem,
    /// Amount actually applied (heals are capped at max)
    pub applied: i32,
}

impl Purchase {
    pub fn describe(&self) -> String {
        let what = match self.item.effect {
            ItemEffect::Heal => format!("Recovered {} HP", self.applied),
            ItemEffect::Mana => format!("Recovered {} MP", self.applied),
            ItemEffect::BuffAttack => format!("Attack +{}", self.applied),
            ItemEffect::BuffDefense => format!("Defense +{}", self.applied),
        };
        format!("Bought {}! {}.", self.item.name, what)
    }
}

/// Buy the `index`-th item and apply it immediately
pub fn buy(player: &mut Player, town: &TownTemplate, index: usize) -> Result<Purchase, TownError> {
    let item = town.shop_items.get(index).ok_or(TownError::NoSuchItem(index))?;
    if !player.spend_gold(item.price) {
        return Err(TownError::InsufficientGold {
            needed: item.price,
            available: player.gold,
        });
    }

    let applied = match item.effect {
        ItemEffect::Heal => player.health.heal(item.value),
        ItemEffect::Mana => player.mana.restore(item.value),
        ItemEffect::BuffAttack => {
            player.attack += item.value;
            item.value
        }
        ItemEffect::BuffDefense => {
            player.defense += item.value;
            item.value
        }
    };
    log::debug!("Bought {} for {} G", item.name, item.price);

    Ok(Purchase {
        item: item.clone(),
        applied,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::towns::default_town_templates;

    #[test]
    fn test_potion_heal_is_capped() {
        let towns = default_town_templates();
        let mut player = Player::default();
        player.health.current = 90;

        let purchase = buy(&mut player, &towns.templates[0], 0).unwrap();
        assert_eq!(purchase.applied, 10);
        assert_eq!(player.health.current, 100);
        assert_eq!(player.gold, 85);
        assert_eq!(purchase.describe(), "Bought Potion! Recovered 10 HP.");
    }

    #[test]
    fn test_crystal_buffs_are_permanent() {
        let towns = default_town_templates();
        let mut player = Player::default();
        player.gold = 200;

        buy(&mut player, &towns.templates[0], 2).unwrap();
        buy(&mut player, &towns.templates[1], 2).unwrap();
        assert_eq!(player.attack, 15);
        assert_eq!(player.defense, 10);
        assert_eq!(player.gold, 90);
    }

    #[test]
    fn test_too_expensive_changes_nothing() {
        let towns = default_town_templates();
        let mut player = Player::default();
        player.gold = 45;
        let before = player.clone();

        let result = buy(&mut player, &towns.templates[1], 2);
        assert_eq!(result, Err(TownError::InsufficientGold { needed: 60, available: 45 }));
        assert_eq!(player, before);
    }

    #[test]
    fn test_bad_index() {
        let towns = default_town_templates();
        let mut player = Player::default();
        assert_eq!(buy(&mut player, &towns.templates[0], 9), Err(TownError::NoSuchItem(9)));
        assert_eq!(player.gold, 100);
    }
}
