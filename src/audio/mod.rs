//! Audio system
//!
//! Game logic raises cues through `AudioCue`; the Kira-backed manager turns
//! them into sound. Playback is fire-and-forget.

pub mod manager;
pub mod sounds;

pub use manager::AudioManager;
pub use sounds::SoundId;

use crate::data::EnemyTemplate;

/// Ground under a footstep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Grass,
    Stone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BattleSound {
    Attack,
    Hit,
    Magic,
    Heal,
    Victory,
    Defeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiSound {
    Select,
    Confirm,
    Cancel,
}

/// Receiver for audio cues
pub trait AudioCue {
    fn on_footstep(&mut self, surface: Surface);
    /// `intensity` is in `(0, 1]`, louder when closer
    fn on_enemy_proximity(&mut self, enemy: &EnemyTemplate, intensity: f64);
    fn on_battle_event(&mut self, sound: BattleSound);
    fn on_ui_event(&mut self, sound: UiSound);
    fn set_enabled(&mut self, _enabled: bool) {}
}

/// Audio sink that drops every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioCue for SilentAudio {
    fn on_footstep(&mut self, _surface: Surface) {}
    fn on_enemy_proximity(&mut self, _enemy: &EnemyTemplate, _intensity: f64) {}
    fn on_battle_event(&mut self, _sound: BattleSound) {}
    fn on_ui_event(&mut self, _sound: UiSound) {}
}
