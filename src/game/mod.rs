//! Game module - Core game logic and state management

mod input;
mod session;
mod state;

pub use input::{GameInput, InputSource};
pub use session::{
    ActionError, Game, GameMessage, MessageCategory, MoveError, PlayingState, Screen, TileEvent,
};
pub use state::GameState;
