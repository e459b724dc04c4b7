//! Sound definitions and mappings
//!
//! Maps game cues to sound files.

use std::path::Path;

use super::{BattleSound, Surface, UiSound};

/// Sound event identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    // === Overworld ===
    FootstepGrass,
    FootstepStone,
    /// A nearby enemy stirs
    EnemyGrowl,
    BossGrowl,

    // === Battle ===
    Attack,
    Hit,
    Magic,
    Heal,
    Victory,
    Defeat,

    // === UI ===
    Select,
    Confirm,
    Cancel,
}

impl SoundId {
    pub const ALL: [SoundId; 13] = [
        SoundId::FootstepGrass,
        SoundId::FootstepStone,
        SoundId::EnemyGrowl,
        SoundId::BossGrowl,
        SoundId::Attack,
        SoundId::Hit,
        SoundId::Magic,
        SoundId::Heal,
        SoundId::Victory,
        SoundId::Defeat,
        SoundId::Select,
        SoundId::Confirm,
        SoundId::Cancel,
    ];

    /// Get the file path for this sound
    pub fn file_path(&self) -> &'static str {
        match self {
            SoundId::FootstepGrass => "assets/sounds/world/step_grass.ogg",
            SoundId::FootstepStone => "assets/sounds/world/step_stone.ogg",
            SoundId::EnemyGrowl => "assets/sounds/world/growl.ogg",
            SoundId::BossGrowl => "assets/sounds/world/growl_boss.ogg",

            SoundId::Attack => "assets/sounds/battle/attack.ogg",
            SoundId::Hit => "assets/sounds/battle/hit.ogg",
            SoundId::Magic => "assets/sounds/battle/magic.ogg",
            SoundId::Heal => "assets/sounds/battle/heal.ogg",
            SoundId::Victory => "assets/sounds/battle/victory.ogg",
            SoundId::Defeat => "assets/sounds/battle/defeat.ogg",

            SoundId::Select => "assets/sounds/ui/select.ogg",
            SoundId::Confirm => "assets/sounds/ui/confirm.ogg",
            SoundId::Cancel => "assets/sounds/ui/cancel.ogg",
        }
    }

    /// Get the default volume for this sound (0.0 - 1.0)
    pub fn default_volume(&self) -> f64 {
        match self {
            SoundId::FootstepGrass | SoundId::FootstepStone => 0.3,
            SoundId::EnemyGrowl => 0.5,
            SoundId::Select => 0.4,
            SoundId::Victory | SoundId::Defeat | SoundId::BossGrowl => 0.8,
            _ => 0.6,
        }
    }

    /// Check if the sound file exists
    pub fn exists(&self) -> bool {
        Path::new(self.file_path()).exists()
    }
}

impl From<Surface> for SoundId {
    fn from(surface: Surface) -> Self {
        match surface {
            Surface::Grass => SoundId::FootstepGrass,
            Surface::Stone => SoundId::FootstepStone,
        }
    }
}

impl From<BattleSound> for SoundId {
    fn from(sound: BattleSound) -> Self {
        match sound {
            BattleSound::Attack => SoundId::Attack,
            BattleSound::Hit => SoundId::Hit,
            BattleSound::Magic => SoundId::Magic,
            BattleSound::Heal => SoundId::Heal,
            BattleSound::Victory => SoundId::Victory,
            BattleSound::Defeat => SoundId::Defeat,
        }
    }
}

impl From<UiSound> for SoundId {
    fn from(sound: UiSound) -> Self {
        match sound {
            UiSound::Select => SoundId::Select,
            UiSound::Confirm => SoundId::Confirm,
            UiSound::Cancel => SoundId::Cancel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_paths_are_unique() {
        let paths: HashSet<_> = SoundId::ALL.iter().map(|s| s.file_path()).collect();
        assert_eq!(paths.len(), SoundId::ALL.len());
        assert!(SoundId::ALL.iter().all(|s| s.file_path().ends_with(".ogg")));
    }
}
