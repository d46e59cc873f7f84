//! Content factory for loading everything a battle needs from a data directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use battle_core::{BattleConfig, DatabaseSnapshot};
use tracing::info;

use crate::loaders::{
    ConfigLoader, DatabaseLoader, Encounter, EncounterLoader, LoadResult, TagMode,
};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── battle.toml
/// ├── encounters.ron
/// ├── skills.ron
/// ├── states.ron
/// ├── equipment.ron
/// ├── classes.ron
/// ├── actors.ron
/// └── enemies.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
    tag_mode: TagMode,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            tag_mode: TagMode::default(),
        }
    }

    pub fn with_tag_mode(mut self, mode: TagMode) -> Self {
        self.tag_mode = mode;
        self
    }

    /// Load battle configuration from `battle.toml`, or defaults if absent.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("battle.toml");
        if !path.exists() {
            info!(target: "content::loader", "no battle.toml, using defaults");
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load every definition file.
    pub fn load_database(&self) -> LoadResult<DatabaseSnapshot> {
        DatabaseLoader::new(self.tag_mode)
            .load(&self.data_dir)
            .with_context(|| format!("loading database from {}", self.data_dir.display()))
    }

    /// Load encounters from `encounters.ron`.
    pub fn load_encounters(&self) -> LoadResult<Vec<Encounter>> {
        EncounterLoader::load(&self.data_dir.join("encounters.ron"))
    }

    /// Look up one encounter by name, case-insensitively.
    pub fn load_encounter(&self, name: &str) -> LoadResult<Encounter> {
        self.load_encounters()?
            .into_iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow::anyhow!("encounter '{}' not found", name))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
