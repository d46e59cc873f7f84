//! In-memory database implementing every data oracle.

use std::collections::BTreeMap;

use super::{
    ActorData, BattlerOracle, ClassData, EnemyData, EquipmentData, ItemOracle, SkillData,
    SkillOracle, StateData, StateOracle,
};
use crate::state::{ActorId, ClassId, EnemyId, ItemId, SkillId, StateId};

/// Complete definition database for one battle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DatabaseSnapshot {
    pub skills: BTreeMap<SkillId, SkillData>,
    pub states: BTreeMap<StateId, StateData>,
    pub equipment: BTreeMap<ItemId, EquipmentData>,
    pub classes: BTreeMap<ClassId, ClassData>,
    pub actors: BTreeMap<ActorId, ActorData>,
    pub enemies: BTreeMap<EnemyId, EnemyData>,
}

impl DatabaseSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_skill(mut self, skill: SkillData) -> Self {
        self.skills.insert(skill.id, skill);
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: StateData) -> Self {
        self.states.insert(state.id, state);
        self
    }

    #[must_use]
    pub fn with_equipment(mut self, equipment: EquipmentData) -> Self {
        self.equipment.insert(equipment.id, equipment);
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: ClassData) -> Self {
        self.classes.insert(class.id, class);
        self
    }

    #[must_use]
    pub fn with_actor(mut self, actor: ActorData) -> Self {
        self.actors.insert(actor.id, actor);
        self
    }

    #[must_use]
    pub fn with_enemy(mut self, enemy: EnemyData) -> Self {
        self.enemies.insert(enemy.id, enemy);
        self
    }

    /// Total number of definitions across all tables.
    pub fn len(&self) -> usize {
        self.skills.len()
            + self.states.len()
            + self.equipment.len()
            + self.classes.len()
            + self.actors.len()
            + self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SkillOracle for DatabaseSnapshot {
    fn skill(&self, id: SkillId) -> Option<&SkillData> {
        self.skills.get(&id)
    }
}

impl StateOracle for DatabaseSnapshot {
    fn state(&self, id: StateId) -> Option<&StateData> {
        self.states.get(&id)
    }
}

impl ItemOracle for DatabaseSnapshot {
    fn equipment(&self, id: ItemId) -> Option<&EquipmentData> {
        self.equipment.get(&id)
    }
}

impl BattlerOracle for DatabaseSnapshot {
    fn actor(&self, id: ActorId) -> Option<&ActorData> {
        self.actors.get(&id)
    }

    fn class(&self, id: ClassId) -> Option<&ClassData> {
        self.classes.get(&id)
    }

    fn enemy(&self, id: EnemyId) -> Option<&EnemyData> {
        self.enemies.get(&id)
    }
}
