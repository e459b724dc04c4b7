//! Status effects system
//!
//! Battle statuses on the player and how they interact with incoming hits.

use crate::ecs::{StatusEffect, StatusEffects};

impl StatusEffects {
    /// Add a status effect. Re-adding an active status does not stack.
    pub fn add_effect(&mut self, effect: StatusEffect) {
        if !self.has_effect(effect) {
            self.effects.push(effect);
        }
    }

    /// Remove a status effect if present
    pub fn remove_effect(&mut self, effect: StatusEffect) {
        self.effects.retain(|e| *e != effect);
    }

    /// Check if an effect is active
    pub fn has_effect(&self, effect: StatusEffect) -> bool {
        self.effects.contains(&effect)
    }

    /// Consume `Defending` against an incoming hit.
    /// Returns the damage to apply and whether the guard absorbed it.
    pub fn absorb_hit(&mut self, damage: i32) -> (i32, bool) {
        if self.has_effect(StatusEffect::Defending) {
            self.remove_effect(StatusEffect::Defending);
            ((damage / 2).max(2), true)
        } else {
            (damage, false)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    /// Clear all effects
    pub fn clear(&mut self) {
        self.effects.clear();
    }
}

impl StatusEffect {
    /// Get display name for this effect
    pub fn name(&self) -> &'static str {
        match self {
            StatusEffect::Defending => "Defending",
        }
    }

    /// Get display color for this effect (RGB)
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            StatusEffect::Defending => (100, 200, 255),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defending_does_not_stack() {
        let mut status = StatusEffects::default();
        status.add_effect(StatusEffect::Defending);
        status.add_effect(StatusEffect::Defending);
        assert_eq!(status.effects.len(), 1);
    }

    #[test]
    fn test_absorb_hit_halves_once() {
        let mut status = StatusEffects::default();
        status.add_effect(StatusEffect::Defending);

        assert_eq!(status.absorb_hit(15), (7, true));
        assert!(status.is_empty());
        assert_eq!(status.absorb_hit(15), (15, false));
    }

    #[test]
    fn test_absorb_hit_minimum_two() {
        let mut status = StatusEffects::default();
        status.add_effect(StatusEffect::Defending);
        assert_eq!(status.absorb_hit(3), (2, true));
    }
}
