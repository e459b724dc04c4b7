//! Session controller
//!
//! Owns the game model, the content, the random source and the
//! presentation collaborators, and routes each input to whichever
//! component currently holds control.

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use super::input::{GameInput, InputSource};
use super::state::GameState;
use crate::audio::{AudioCue, BattleSound, Surface, UiSound};
use crate::combat::damage::Dice;
use crate::combat::{self, BattleAction, BattleError, BattleEvent, BattleOutcome, TurnReport};
use crate::data::{stories, DataManager, ItemEffect};
use crate::ecs::{Direction, EntityKind, Position};
use crate::entities::spawner::enemies_within;
use crate::entities::{adjacent_treasure, collect_treasure, get_entity_at, get_town_near, kind_of};
use crate::render::Renderer;
use crate::town::{self, Purchase, TownAction, TownError};
use crate::world::TileType;

/// Keep only this many log messages
pub const MAX_MESSAGES: usize = 100;
/// Enemies closer than this can be heard
pub const PROXIMITY_RADIUS: f64 = 8.0;
/// Chance of a growl at intensity 1
pub const PROXIMITY_CHANCE: f64 = 0.3;

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Title,
    Playing(PlayingState),
    GameClear { level: u32, gold: u32 },
    Quit,
}

/// Sub-states while playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayingState {
    Exploring,
    Battle,
    Town,
    /// Shop overlay on top of a town
    Shop,
}

/// A message to display in the game log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMessage {
    pub text: String,
    pub category: MessageCategory,
}

/// Categories for message coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageCategory {
    Story,
    Combat,
    Town,
    Item,
    System,
    Warning,
}

/// A refused move; the player did not move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("You can't move right now.")]
    NotExploring,
    #[error("The water is too deep to cross...")]
    Water,
    #[error("The mountain is too steep...")]
    Mountain,
}

/// What happened after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileEvent {
    /// Bumped into the edge of the world
    Stayed,
    Moved,
    Battle,
    Town,
    Treasure(u32),
}

/// Any refused command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error(transparent)]
    Battle(#[from] BattleError),
    #[error(transparent)]
    Town(#[from] TownError),
    #[error("Nothing here.")]
    NothingHere,
    #[error("That does nothing here.")]
    WrongScreen,
}

/// The main game struct that holds all session data
pub struct Game {
    screen: Screen,
    state: GameState,
    data: DataManager,
    rng: StdRng,
    messages: Vec<GameMessage>,
    audio: Box<dyn AudioCue>,
    muted: bool,
    /// Set when the current battle raised the player's level
    leveled_in_battle: bool,
}

impl Game {
    /// Create a session with a freshly generated world
    pub fn new(data: DataManager, audio: Box<dyn AudioCue>, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = GameState::generate(&mut rng, &data);
        log::info!("New session (seed: {:?})", seed);

        Self {
            screen: Screen::Title,
            state,
            data,
            rng,
            messages: Vec::new(),
            audio,
            muted: false,
            leveled_in_battle: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn data(&self) -> &DataManager {
        &self.data
    }

    pub fn messages(&self) -> &[GameMessage] {
        &self.messages
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_running(&self) -> bool {
        self.screen != Screen::Quit
    }

    fn set_screen(&mut self, screen: Screen) {
        log::debug!("Screen transition: {:?} -> {:?}", self.screen, screen);
        self.screen = screen;
    }

    /// Add a message to the log
    pub fn add_message(&mut self, text: impl Into<String>, category: MessageCategory) {
        self.messages.push(GameMessage {
            text: text.into(),
            category,
        });
        if self.messages.len() > MAX_MESSAGES {
            let excess = self.messages.len() - MAX_MESSAGES;
            self.messages.drain(..excess);
        }
    }

    fn add_story(&mut self, lines: &[&str]) {
        for line in lines {
            self.add_message(*line, MessageCategory::Story);
        }
    }

    fn ui_cue(&mut self, sound: UiSound) {
        if !self.muted {
            self.audio.on_ui_event(sound);
        }
    }

    fn battle_cue(&mut self, sound: BattleSound) {
        if !self.muted {
            self.audio.on_battle_event(sound);
        }
    }

    /// Leave the title screen
    pub fn start(&mut self) -> Result<(), ActionError> {
        if self.screen != Screen::Title {
            return Err(ActionError::WrongScreen);
        }
        self.ui_cue(UiSound::Confirm);
        self.set_screen(Screen::Playing(PlayingState::Exploring));
        self.add_story(stories::INTRO);
        Ok(())
    }

    /// New world, new player, back to the title
    pub fn reset(&mut self) {
        self.state = GameState::generate(&mut self.rng, &self.data);
        self.messages.clear();
        self.leveled_in_battle = false;
        self.set_screen(Screen::Title);
        log::info!("Game reset");
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.audio.set_enabled(!self.muted);
        let text = if self.muted { "Sound off" } else { "Sound on" };
        self.add_message(text, MessageCategory::System);
        self.muted
    }

    /// Step one cell and run whatever waits there
    pub fn try_move(&mut self, dir: Direction) -> Result<TileEvent, MoveError> {
        if self.screen != Screen::Playing(PlayingState::Exploring) {
            return Err(MoveError::NotExploring);
        }

        let target = self.state.player.position.step(dir);
        let Some(tile) = self.state.map.get_tile(target.x, target.y) else {
            return Ok(TileEvent::Stayed);
        };
        let blocked = match tile {
            TileType::Water => Some(MoveError::Water),
            TileType::Mountain => Some(MoveError::Mountain),
            _ => None,
        };
        if let Some(err) = blocked {
            self.ui_cue(UiSound::Cancel);
            return Err(err);
        }

        self.state.player.position = target;
        self.state.move_count += 1;

        if !self.muted {
            let surface = if tile == TileType::Town { Surface::Stone } else { Surface::Grass };
            self.audio.on_footstep(surface);
            self.roll_proximity_cues();
        }

        Ok(match tile {
            TileType::Enemy | TileType::Boss => self.begin_battle_at_player(),
            TileType::Town => self.enter_town_near_player(),
            TileType::Treasure => self.collect_at(target),
            _ => TileEvent::Moved,
        })
    }

    fn roll_proximity_cues(&mut self) {
        let pos = self.state.player.position;
        for (entity, distance) in enemies_within(&self.state.entities, pos, PROXIMITY_RADIUS) {
            let intensity = 1.0 - distance / PROXIMITY_RADIUS;
            if !self.rng.chance(intensity * PROXIMITY_CHANCE) {
                continue;
            }
            if let Some(EntityKind::Enemy(enemy)) = kind_of(&self.state.entities, entity) {
                self.audio.on_enemy_proximity(&enemy, intensity);
            }
        }
    }

    fn begin_battle_at_player(&mut self) -> TileEvent {
        let pos = self.state.player.position;
        let Some(entity) = get_entity_at(&self.state.entities, pos) else {
            log::warn!("Enemy marker at ({}, {}) without an entity", pos.x, pos.y);
            return TileEvent::Moved;
        };
        let line = stories::pick(stories::ENCOUNTER, &mut self.rng);
        match combat::start_battle(&mut self.state, entity, line) {
            Ok(()) => {
                self.leveled_in_battle = false;
                self.set_screen(Screen::Playing(PlayingState::Battle));
                TileEvent::Battle
            }
            Err(e) => {
                log::warn!("Could not start battle: {}", e);
                TileEvent::Moved
            }
        }
    }

    fn enter_town_near_player(&mut self) -> TileEvent {
        let pos = self.state.player.position;
        let Some(entity) = get_town_near(&self.state.entities, pos) else {
            return TileEvent::Moved;
        };
        let (name, description) = match town::enter_town(&mut self.state, entity) {
            Ok(t) => (t.name.clone(), t.description.clone()),
            Err(e) => {
                log::warn!("Could not enter town: {}", e);
                return TileEvent::Moved;
            }
        };
        self.set_screen(Screen::Playing(PlayingState::Town));
        self.add_message(format!("{}: {}", name, description), MessageCategory::Town);
        let line = stories::pick(stories::TOWN_ENTER, &mut self.rng);
        self.add_message(line, MessageCategory::Story);
        TileEvent::Town
    }

    fn collect_at(&mut self, pos: Position) -> TileEvent {
        let GameState { map, entities, player, .. } = &mut self.state;
        match collect_treasure(map, entities, player, pos) {
            Some(gold) => {
                self.battle_cue(BattleSound::Victory);
                self.add_message(format!("Found a treasure chest! Got {} G!", gold), MessageCategory::Item);
                TileEvent::Treasure(gold)
            }
            None => TileEvent::Moved,
        }
    }

    /// Search the four neighbouring cells for treasure
    pub fn interact(&mut self) -> Result<u32, ActionError> {
        if self.screen != Screen::Playing(PlayingState::Exploring) {
            return Err(ActionError::WrongScreen);
        }
        let found = adjacent_treasure(&self.state.map, self.state.player.position);
        match found.map(|pos| self.collect_at(pos)) {
            Some(TileEvent::Treasure(gold)) => Ok(gold),
            _ => Err(ActionError::NothingHere),
        }
    }

    /// Resolve one battle round
    pub fn battle_action(&mut self, action: BattleAction) -> Result<TurnReport, BattleError> {
        let rules = self.data.rules.clone();
        let report = combat::handle_action(&mut self.state, action, &rules, &mut self.rng)?;

        for event in &report.events {
            match event {
                BattleEvent::PlayerAttack { .. } => {
                    self.battle_cue(BattleSound::Attack);
                    self.battle_cue(BattleSound::Hit);
                }
                BattleEvent::PlayerMagic { .. } => self.battle_cue(BattleSound::Magic),
                BattleEvent::Defended => self.ui_cue(UiSound::Select),
                BattleEvent::Fled => self.ui_cue(UiSound::Confirm),
                BattleEvent::FleeFailed => {}
                BattleEvent::EnemyAttack { .. } => self.battle_cue(BattleSound::Hit),
                BattleEvent::EnemyDefeated { .. } => self.battle_cue(BattleSound::Victory),
                BattleEvent::LevelUp(_) => {
                    self.leveled_in_battle = true;
                    self.battle_cue(BattleSound::Heal);
                }
                BattleEvent::PlayerDefeated => self.battle_cue(BattleSound::Defeat),
            }
        }
        Ok(report)
    }

    /// Close a finished battle, the shop overlay, or the clear screen
    pub fn dismiss(&mut self) -> Result<(), ActionError> {
        match self.screen {
            Screen::Playing(PlayingState::Battle) => {
                let outcome = combat::end_battle(&mut self.state)?;
                let story = combat::battle::closing_story(outcome, self.leveled_in_battle);
                self.add_story(&story);
                self.leveled_in_battle = false;

                match outcome {
                    BattleOutcome::Victory { game_clear: true } => {
                        let player = &self.state.player;
                        let (level, gold) = (player.level(), player.gold);
                        log::info!("Game clear at level {} with {} G", level, gold);
                        self.set_screen(Screen::GameClear { level, gold });
                    }
                    _ => self.set_screen(Screen::Playing(PlayingState::Exploring)),
                }
                Ok(())
            }
            Screen::Playing(PlayingState::Shop) => {
                self.set_screen(Screen::Playing(PlayingState::Town));
                Ok(())
            }
            Screen::GameClear { .. } => {
                self.ui_cue(UiSound::Confirm);
                self.reset();
                Ok(())
            }
            _ => Err(ActionError::WrongScreen),
        }
    }

    /// Run a town command
    pub fn town_action(&mut self, action: TownAction) -> Result<(), ActionError> {
        if self.screen != Screen::Playing(PlayingState::Town) {
            return Err(ActionError::WrongScreen);
        }
        let town = self.state.town.as_ref().ok_or(TownError::NotInTown)?.town.clone();

        match action {
            TownAction::Rest => {
                let report = town::rest(&mut self.state.player, &town)?;
                self.battle_cue(BattleSound::Heal);
                self.add_message(
                    format!("You rested at the inn for {} G. HP and MP recovered!", report.cost),
                    MessageCategory::Town,
                );
            }
            TownAction::Shop => {
                self.ui_cue(UiSound::Select);
                self.set_screen(Screen::Playing(PlayingState::Shop));
            }
            TownAction::Talk => {
                let line = town::talk(&town, &mut self.rng)
                    .unwrap_or("The townsfolk have nothing to say.")
                    .to_string();
                self.ui_cue(UiSound::Select);
                self.add_message(line, MessageCategory::Town);
            }
            TownAction::Leave => {
                town::leave(&mut self.state)?;
                self.ui_cue(UiSound::Cancel);
                self.set_screen(Screen::Playing(PlayingState::Exploring));
            }
        }
        Ok(())
    }

    /// Buy from the open shop
    pub fn buy(&mut self, index: usize) -> Result<Purchase, ActionError> {
        if self.screen != Screen::Playing(PlayingState::Shop) {
            return Err(ActionError::WrongScreen);
        }
        let ctx = self.state.town.as_ref().ok_or(TownError::NotInTown)?;
        let purchase = town::buy(&mut self.state.player, &ctx.town, index)?;
        let sound = match purchase.item.effect {
            ItemEffect::Heal => BattleSound::Heal,
            ItemEffect::Mana | ItemEffect::BuffAttack | ItemEffect::BuffDefense => BattleSound::Magic,
        };
        self.battle_cue(sound);
        self.add_message(purchase.describe(), MessageCategory::Item);
        Ok(purchase)
    }

    /// Apply one input. Refusals become warnings in the log.
    pub fn handle_input(&mut self, input: GameInput) {
        let result = match input {
            GameInput::Quit => {
                self.set_screen(Screen::Quit);
                Ok(())
            }
            GameInput::ToggleMute => {
                self.toggle_mute();
                Ok(())
            }
            GameInput::Start => self.start(),
            GameInput::Move(dir) => self.try_move(dir).map(|_| ()).map_err(ActionError::from),
            GameInput::Interact => self.interact().map(|_| ()),
            GameInput::Battle(action) => self.battle_action(action).map(|_| ()).map_err(ActionError::from),
            GameInput::Town(action) => self.town_action(action),
            GameInput::Buy(index) => self.buy(index).map(|_| ()),
            GameInput::Dismiss => self.dismiss(),
        };

        if let Err(e) = result {
            log::debug!("Rejected {:?}: {}", input, e);
            match e {
                // Already reported with a cue or in the battle log
                ActionError::Move(_) | ActionError::Battle(_) => {}
                _ => self.ui_cue(UiSound::Cancel),
            }
            // Mana and flee refusals are already in the battle log
            let in_battle_log = matches!(
                e,
                ActionError::Battle(BattleError::InsufficientMana { .. } | BattleError::CannotFlee)
            );
            if !in_battle_log {
                self.add_message(e.to_string(), MessageCategory::Warning);
            }
        }
    }

    /// Pull one input from `source` and apply it. Returns whether one was pending.
    pub fn pump<I: InputSource>(&mut self, source: &mut I) -> Result<bool, I::Error> {
        match source.next_input(&self.screen)? {
            Some(input) => {
                self.handle_input(input);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Draw the overworld through any renderer
    pub fn render_with<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let player = &self.state.player;
        renderer.draw_world(&self.state.map, &self.state.entities);
        renderer.draw_player(player.position, player.health.percentage(), &player.status);
    }
}
