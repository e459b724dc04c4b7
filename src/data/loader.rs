//! RON data loader
//!
//! Loads game content from external RON files, with fallback to hardcoded defaults.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::enemies::{default_enemy_templates, EnemyTemplates};
use super::rules::Rules;
use super::towns::{default_town_templates, TownTemplates};

const ENEMIES_FILE: &str = "enemies.ron";
const TOWNS_FILE: &str = "towns.ron";
const RULES_FILE: &str = "rules.ron";

/// Content loading failure
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("failed to serialize {name}: {source}")]
    Serialize {
        name: &'static str,
        #[source]
        source: ron::Error,
    },
}

/// Manages all external game content
#[derive(Debug, Clone)]
pub struct DataManager {
    pub enemies: EnemyTemplates,
    pub towns: TownTemplates,
    pub rules: Rules,
}

impl DataManager {
    /// Load from the first existing data directory, or use defaults
    pub fn new() -> Self {
        match Self::search_dirs().into_iter().find(|dir| dir.is_dir()) {
            Some(dir) => {
                log::info!("Loading game data from {}", dir.display());
                Self::load_from_dir(&dir)
            }
            None => {
                log::info!("No data directory found, using built-in content");
                Self::default()
            }
        }
    }

    /// Directories checked for content, in priority order
    pub fn search_dirs() -> Vec<PathBuf> {
        let mut dirs = vec![PathBuf::from("assets/data")];
        if let Some(project) = ProjectDirs::from("com", "onepixel", "OnePixel") {
            dirs.push(project.config_dir().to_path_buf());
        }
        dirs
    }

    /// Load every file in `dir`; each missing or broken file falls back on its own
    pub fn load_from_dir(dir: &Path) -> Self {
        Self {
            enemies: load_or_default(dir, ENEMIES_FILE, default_enemy_templates),
            towns: load_or_default(dir, TOWNS_FILE, default_town_templates),
            rules: load_or_default(dir, RULES_FILE, Rules::default),
        }
    }
}

impl Default for DataManager {
    fn default() -> Self {
        Self {
            enemies: default_enemy_templates(),
            towns: default_town_templates(),
            rules: Rules::default(),
        }
    }
}

/// Read and parse one RON file. `Ok(None)` when the file does not exist.
pub fn load_file<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, DataError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&content)
        .map(Some)
        .map_err(|source| DataError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

fn load_or_default<T: DeserializeOwned>(dir: &Path, name: &str, fallback: fn() -> T) -> T {
    match load_file(&dir.join(name)) {
        Ok(Some(value)) => value,
        Ok(None) => fallback(),
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            fallback()
        }
    }
}

fn write_pretty<T: Serialize>(dir: &Path, name: &'static str, value: &T) -> Result<(), DataError> {
    let text = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
        .map_err(|source| DataError::Serialize { name, source })?;
    let path = dir.join(name);
    fs::write(&path, text).map_err(|source| DataError::Io { path, source })
}

/// Export all default content to RON files for easy editing
pub fn export_default_data(dir: &Path) -> Result<(), DataError> {
    fs::create_dir_all(dir).map_err(|source| DataError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    write_pretty(dir, ENEMIES_FILE, &default_enemy_templates())?;
    write_pretty(dir, TOWNS_FILE, &default_town_templates())?;
    write_pretty(dir, RULES_FILE, &Rules::default())?;

    log::info!("Exported default data to {}", dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("onepixel-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_export_and_reload() {
        let dir = scratch_dir("export");
        let result = export_default_data(&dir);
        assert!(result.is_ok(), "Failed to export default data: {:?}", result.err());

        assert!(dir.join(ENEMIES_FILE).exists(), "enemies.ron not created");
        assert!(dir.join(TOWNS_FILE).exists(), "towns.ron not created");
        assert!(dir.join(RULES_FILE).exists(), "rules.ron not created");

        let manager = DataManager::load_from_dir(&dir);
        let defaults = DataManager::default();
        assert_eq!(manager.enemies.templates, defaults.enemies.templates);
        assert_eq!(manager.towns.templates, defaults.towns.templates);
        assert_eq!(manager.rules, defaults.rules);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_broken_file_falls_back() {
        let dir = scratch_dir("broken");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(ENEMIES_FILE), "(templates: [ oops").unwrap();
        fs::write(dir.join(RULES_FILE), "(enemy_count: 3)").unwrap();

        assert!(matches!(
            load_file::<EnemyTemplates>(&dir.join(ENEMIES_FILE)),
            Err(DataError::Parse { .. })
        ));

        let manager = DataManager::load_from_dir(&dir);
        assert_eq!(manager.enemies.templates.len(), 5);
        assert_eq!(manager.rules.enemy_count, 3);
        assert_eq!(manager.towns.templates.len(), 2);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = scratch_dir("missing");
        assert!(matches!(load_file::<Rules>(&dir.join(RULES_FILE)), Ok(None)));
    }
}
