//! Combat system

pub mod battle;
pub mod damage;
pub mod status;

pub use battle::{
    end_battle, handle_action, start_battle, BattleAction, BattleContext, BattleError,
    BattleEvent, BattleOutcome, TurnReport,
};
pub use damage::Dice;
