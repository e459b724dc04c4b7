//! Town interaction: inn, shop and townsfolk

pub mod shop;

pub use shop::{buy, Purchase};

use hecs::Entity;
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::data::TownTemplate;
use crate::ecs::EntityKind;
use crate::entities::{kind_of, Player};
use crate::game::GameState;

/// Commands available inside a town
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TownAction {
    Rest,
    Shop,
    Talk,
    Leave,
}

impl TownAction {
    pub const ALL: [TownAction; 4] = [TownAction::Rest, TownAction::Shop, TownAction::Talk, TownAction::Leave];

    pub fn label(&self) -> &'static str {
        match self {
            TownAction::Rest => "Inn",
            TownAction::Shop => "Shop",
            TownAction::Talk => "Talk",
            TownAction::Leave => "Leave",
        }
    }
}

/// A refused town command; nothing changed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TownError {
    #[error("There is no town here.")]
    NotATown,
    #[error("You are not in a town.")]
    NotInTown,
    #[error("Not enough gold... (need {needed} G, have {available} G)")]
    InsufficientGold { needed: u32, available: u32 },
    #[error("That item is not for sale.")]
    NoSuchItem(usize),
}

/// The town the player is currently inside
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TownContext {
    pub entity: Entity,
    pub town: TownTemplate,
}

/// Result of a night at the inn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestReport {
    pub cost: u32,
    pub hp_restored: i32,
    pub mp_restored: i32,
}

/// Bind the town context to a town entity
pub fn enter_town(state: &mut GameState, entity: Entity) -> Result<&TownTemplate, TownError> {
    let Some(EntityKind::Town(town)) = kind_of(&state.entities, entity) else {
        return Err(TownError::NotATown);
    };
    log::debug!("Entered {}", town.name);
    let ctx = state.town.insert(TownContext { entity, town });
    Ok(&ctx.town)
}

pub fn leave(state: &mut GameState) -> Result<(), TownError> {
    let ctx = state.town.take().ok_or(TownError::NotInTown)?;
    log::debug!("Left {}", ctx.town.name);
    Ok(())
}

/// Pay for the inn and recover `inn_heal_percent`% of max hp and mp
pub fn rest(player: &mut Player, town: &TownTemplate) -> Result<RestReport, TownError> {
    if !player.spend_gold(town.inn_cost) {
        return Err(TownError::InsufficientGold {
            needed: town.inn_cost,
            available: player.gold,
        });
    }

    let percent = town.inn_heal_percent.min(100) as i32;
    let hp_restored = player.health.heal(player.health.max * percent / 100);
    let mp_restored = player.mana.restore(player.mana.max * percent / 100);
    log::debug!("Rested at {} for {} G", town.name, town.inn_cost);

    Ok(RestReport {
        cost: town.inn_cost,
        hp_restored,
        mp_restored,
    })
}

/// A random line from the townsfolk
pub fn talk<'a, R: Rng + ?Sized>(town: &'a TownTemplate, rng: &mut R) -> Option<&'a str> {
    town.dialogue.choose(rng).map(String::as_str)
}
