//! Audio manager using Kira
//!
//! Handles loading and playing sound effects.

use std::collections::HashMap;

use kira::{
    manager::{backend::DefaultBackend, AudioManager as KiraManager, AudioManagerSettings},
    sound::static_sound::{StaticSoundData, StaticSoundSettings},
    Volume,
};
use thiserror::Error;

use super::sounds::SoundId;
use super::{AudioCue, BattleSound, Surface, UiSound};
use crate::data::EnemyTemplate;

#[derive(Debug, Error)]
pub enum SoundLoadError {
    #[error("sound file not found: {0}")]
    Missing(&'static str),
    #[error("failed to load sound {path}: {reason}")]
    Decode { path: &'static str, reason: String },
}

/// Audio manager that handles all sound playback
pub struct AudioManager {
    /// Kira audio manager
    manager: Option<KiraManager>,
    /// Loaded sound data
    sounds: HashMap<SoundId, StaticSoundData>,
    /// Master volume (0.0 - 1.0)
    master_volume: f64,
    enabled: bool,
}

impl AudioManager {
    /// Create a new audio manager
    pub fn new() -> Self {
        let manager = match KiraManager::<DefaultBackend>::new(AudioManagerSettings::default()) {
            Ok(m) => {
                log::info!("Audio manager initialized successfully");
                Some(m)
            }
            Err(e) => {
                log::warn!("Failed to initialize audio manager: {}. Audio disabled.", e);
                None
            }
        };

        let mut audio = Self {
            manager,
            sounds: HashMap::new(),
            master_volume: 0.8,
            enabled: true,
        };

        if audio.manager.is_some() {
            for sound_id in SoundId::ALL {
                if let Err(e) = audio.load_sound(sound_id) {
                    log::debug!("Could not preload sound {:?}: {}", sound_id, e);
                }
            }
        }

        audio
    }

    /// Load a sound from file
    fn load_sound(&mut self, sound_id: SoundId) -> Result<(), SoundLoadError> {
        if self.sounds.contains_key(&sound_id) {
            return Ok(());
        }

        let path = sound_id.file_path();
        if !sound_id.exists() {
            return Err(SoundLoadError::Missing(path));
        }

        let data = StaticSoundData::from_file(path).map_err(|e| SoundLoadError::Decode {
            path,
            reason: format!("{:?}", e),
        })?;
        self.sounds.insert(sound_id, data);
        Ok(())
    }

    /// Play a sound with a volume multiplier
    pub fn play_with_volume(&mut self, sound_id: SoundId, volume_multiplier: f64) {
        if !self.enabled || self.manager.is_none() {
            return;
        }

        let sound_data = match self.sounds.get(&sound_id) {
            Some(data) => data.clone(),
            None => return,
        };

        let final_volume = sound_id.default_volume() * self.master_volume * volume_multiplier.clamp(0.0, 1.0);
        let settings = StaticSoundSettings::new().volume(Volume::Amplitude(final_volume));

        if let Some(manager) = &mut self.manager {
            if let Err(e) = manager.play(sound_data.with_settings(settings)) {
                log::debug!("Failed to play sound {:?}: {:?}", sound_id, e);
            }
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, sound_id: SoundId) {
        self.play_with_volume(sound_id, 1.0);
    }

    pub fn is_available(&self) -> bool {
        self.manager.is_some()
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioCue for AudioManager {
    fn on_footstep(&mut self, surface: Surface) {
        self.play(surface.into());
    }

    fn on_enemy_proximity(&mut self, enemy: &EnemyTemplate, intensity: f64) {
        let id = if enemy.is_boss { SoundId::BossGrowl } else { SoundId::EnemyGrowl };
        self.play_with_volume(id, intensity);
    }

    fn on_battle_event(&mut self, sound: BattleSound) {
        self.play(sound.into());
    }

    fn on_ui_event(&mut self, sound: UiSound) {
        self.play(sound.into());
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
