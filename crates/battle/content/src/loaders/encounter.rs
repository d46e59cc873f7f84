//! Encounter loader.

use std::path::Path;

use battle_core::{ActorId, EnemyId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Who starts a battle, plus the seed its rolls derive from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    pub name: String,
    pub party: Vec<ActorId>,
    pub troop: Vec<EnemyId>,
    #[serde(default)]
    pub seed: u64,
}

/// Loader for encounter definitions from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    /// Load every encounter in a RON list.
    pub fn load(path: &Path) -> LoadResult<Vec<Encounter>> {
        let content = read_file(path)?;
        let encounters: Vec<Encounter> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter RON: {}", e))?;
        Ok(encounters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_party_and_troop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("encounters.ron");
        std::fs::write(
            &path,
            r#"[(name: "Cave", party: [1, 2], troop: [1, 1, 2], seed: 42)]"#,
        )
        .unwrap();

        let encounters = EncounterLoader::load(&path).unwrap();
        assert_eq!(encounters.len(), 1);
        assert_eq!(encounters[0].party, vec![ActorId(1), ActorId(2)]);
        assert_eq!(encounters[0].troop.len(), 3);
        assert_eq!(encounters[0].seed, 42);
    }
}
