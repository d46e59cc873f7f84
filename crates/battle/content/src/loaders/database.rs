//! Definition database loader.

use std::path::Path;

use anyhow::Context;
use battle_core::rules::RawTags;
use battle_core::{DatabaseSnapshot, Tags};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::definitions::{ActorDef, ClassDef, EnemyDef, EquipmentDef, SkillDef, StateDef};
use crate::loaders::{LoadResult, read_file};

/// How malformed tag values are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TagMode {
    /// Malformed tags are logged and dropped.
    #[default]
    Lenient,
    /// Any malformed tag fails the load.
    Strict,
}

/// Loads every definition file in a directory into a [`DatabaseSnapshot`].
///
/// Expected files:
/// ```text
/// data_dir/
/// ├── skills.ron
/// ├── states.ron
/// ├── equipment.ron
/// ├── classes.ron
/// ├── actors.ron
/// └── enemies.ron
/// ```
/// Each file holds a RON list of records. Missing files count as empty.
#[derive(Clone, Copy, Debug, Default)]
pub struct DatabaseLoader {
    mode: TagMode,
}

impl DatabaseLoader {
    pub fn new(mode: TagMode) -> Self {
        Self { mode }
    }

    pub fn load(&self, data_dir: &Path) -> LoadResult<DatabaseSnapshot> {
        let mut db = DatabaseSnapshot::new();

        for def in load_list::<SkillDef>(&data_dir.join("skills.ron"))? {
            let tags = self.tags("skill", &def.name, &def.tags)?;
            db = db.with_skill(def.into_data(tags));
        }
        for def in load_list::<StateDef>(&data_dir.join("states.ron"))? {
            let tags = self.tags("state", &def.name, &def.tags)?;
            db = db.with_state(def.into_data(tags));
        }
        for def in load_list::<EquipmentDef>(&data_dir.join("equipment.ron"))? {
            let tags = self.tags("equipment", &def.name, &def.tags)?;
            db = db.with_equipment(def.into_data(tags));
        }
        for def in load_list::<ClassDef>(&data_dir.join("classes.ron"))? {
            let tags = self.tags("class", &def.name, &def.tags)?;
            db = db.with_class(def.into_data(tags));
        }
        for def in load_list::<ActorDef>(&data_dir.join("actors.ron"))? {
            let tags = self.tags("actor", &def.name, &def.tags)?;
            db = db.with_actor(def.into_data(tags));
        }
        for def in load_list::<EnemyDef>(&data_dir.join("enemies.ron"))? {
            let tags = self.tags("enemy", &def.name, &def.tags)?;
            db = db.with_enemy(def.into_data(tags));
        }

        debug!(target: "content::loader", dir = %data_dir.display(), records = db.len(), "database loaded");
        Ok(db)
    }

    /// Parses one record's tag map according to the mode.
    pub fn tags(&self, kind: &str, name: &str, raw: &RawTags) -> LoadResult<Tags> {
        match self.mode {
            TagMode::Strict => Tags::parse(raw)
                .with_context(|| format!("invalid tags on {kind} '{name}'")),
            TagMode::Lenient => {
                let (tags, rejected) = Tags::parse_lenient(raw);
                for (key, error) in rejected {
                    warn!(
                        target: "content::loader",
                        kind,
                        name,
                        key = %key,
                        error = %error,
                        "dropping malformed tag",
                    );
                }
                Ok(tags)
            }
        }
    }
}

fn load_list<T: DeserializeOwned>(path: &Path) -> LoadResult<Vec<T>> {
    if !path.exists() {
        debug!(target: "content::loader", path = %path.display(), "no file, skipping");
        return Ok(Vec::new());
    }
    let content = read_file(path)?;
    ron::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse RON at {}: {}", path.display(), e))
}
