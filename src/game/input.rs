//! Discrete input events

use super::session::Screen;
use crate::combat::BattleAction;
use crate::ecs::Direction;
use crate::town::TownAction;

/// One player command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    Move(Direction),
    Interact,
    Battle(BattleAction),
    Town(TownAction),
    Buy(usize),
    /// Close a finished battle, the shop, or the clear screen
    Dismiss,
    Start,
    ToggleMute,
    Quit,
}

/// Something that yields player commands
pub trait InputSource {
    type Error;

    /// Next command, or `None` if nothing is pending. `screen` lets the
    /// source map the same key to different commands.
    fn next_input(&mut self, screen: &Screen) -> Result<Option<GameInput>, Self::Error>;
}
