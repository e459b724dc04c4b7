//! Keyboard input
//!
//! Maps crossterm key presses to `GameInput` depending on the screen.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::combat::BattleAction;
use crate::ecs::Direction;
use crate::game::{GameInput, InputSource, PlayingState, Screen};
use crate::town::TownAction;

/// Polls the terminal for key presses
#[derive(Debug, Clone)]
pub struct KeyboardInput {
    timeout: Duration,
}

impl KeyboardInput {
    /// `timeout` is how long one poll may block
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for KeyboardInput {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl InputSource for KeyboardInput {
    type Error = anyhow::Error;

    fn next_input(&mut self, screen: &Screen) -> Result<Option<GameInput>, Self::Error> {
        if !event::poll(self.timeout)? {
            return Ok(None);
        }
        match event::read()? {
            // Only handle key press events, not releases
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(map_key(key, screen)),
            _ => Ok(None),
        }
    }
}

fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Some(Direction::North),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Some(Direction::South),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Some(Direction::West),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Some(Direction::East),
        _ => None,
    }
}

/// `'1'` is index 0
fn digit_index(code: KeyCode) -> Option<usize> {
    match code {
        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| d as usize - 1),
        _ => None,
    }
}

/// Translate one key press for the given screen
pub fn map_key(key: KeyEvent, screen: &Screen) -> Option<GameInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return Some(GameInput::Quit),
        KeyCode::Char('m') | KeyCode::Char('M') => return Some(GameInput::ToggleMute),
        _ => {}
    }

    match screen {
        Screen::Title => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(GameInput::Start),
            _ => None,
        },
        Screen::Playing(PlayingState::Exploring) => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('e') => Some(GameInput::Interact),
            code => direction_for(code).map(GameInput::Move),
        },
        Screen::Playing(PlayingState::Battle) => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Esc => Some(GameInput::Dismiss),
            code => digit_index(code)
                .and_then(|i| BattleAction::ALL.get(i).copied())
                .map(GameInput::Battle),
        },
        Screen::Playing(PlayingState::Town) => match key.code {
            KeyCode::Esc => Some(GameInput::Town(TownAction::Leave)),
            code => digit_index(code)
                .and_then(|i| TownAction::ALL.get(i).copied())
                .map(GameInput::Town),
        },
        Screen::Playing(PlayingState::Shop) => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') => Some(GameInput::Dismiss),
            code => digit_index(code).map(GameInput::Buy),
        },
        Screen::GameClear { .. } => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(GameInput::Dismiss),
            _ => None,
        },
        Screen::Quit => None,
    }
}
