//! On-disk definition records.
//!
//! Each record mirrors its `battle-core` counterpart but keeps tags as a raw
//! string map. [`super::DatabaseLoader`] parses the tags and converts records
//! into the core types.

use battle_core::env::{
    ActorData, ClassData, DamageKind, DamageSpec, EnemyData, EquipSlot, EquipmentData, HitType,
    StateChance,
};
use battle_core::rules::RawTags;
use battle_core::stats::{ParamTable, XParamTable};
use battle_core::{
    ActorId, AnimationId, ClassId, EnemyId, ItemId, ParamId, Scope, SkillData, SkillId, StateData,
    StateId, Tags, XParamId,
};
use serde::{Deserialize, Serialize};

/// Damage formula with physical defaults for omitted fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageDef {
    pub kind: DamageKind,
    pub power: i32,
    pub attack: ParamId,
    pub attack_rate: i32,
    pub defense: ParamId,
    pub defense_rate: i32,
    pub variance: i32,
    pub critical: bool,
}

impl Default for DamageDef {
    fn default() -> Self {
        let spec = DamageSpec::physical(0);
        Self {
            kind: spec.kind,
            power: spec.power,
            attack: spec.attack,
            attack_rate: spec.attack_rate,
            defense: spec.defense,
            defense_rate: spec.defense_rate,
            variance: 20,
            critical: spec.critical,
        }
    }
}

impl From<DamageDef> for DamageSpec {
    fn from(def: DamageDef) -> Self {
        DamageSpec {
            kind: def.kind,
            power: def.power,
            attack: def.attack,
            attack_rate: def.attack_rate,
            defense: def.defense,
            defense_rate: def.defense_rate,
            variance: def.variance,
            critical: def.critical,
        }
    }
}

fn default_success_rate() -> i32 {
    100
}

fn default_level() -> u32 {
    1
}

fn default_remove_chance() -> i32 {
    100
}

fn default_hit_type() -> HitType {
    HitType::Physical
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDef {
    pub id: SkillId,
    pub name: String,
    #[serde(default)]
    pub mp_cost: i32,
    #[serde(default)]
    pub tp_cost: i32,
    pub scope: Scope,
    #[serde(default = "default_hit_type")]
    pub hit_type: HitType,
    #[serde(default)]
    pub damage: Option<DamageDef>,
    #[serde(default = "default_success_rate")]
    pub success_rate: i32,
    #[serde(default)]
    pub animation: Option<AnimationId>,
    #[serde(default)]
    pub add_states: Vec<(StateId, i32)>,
    #[serde(default)]
    pub tp_gain: i32,
    #[serde(default)]
    pub tags: RawTags,
}

impl SkillDef {
    pub fn into_data(self, tags: Tags) -> SkillData {
        SkillData {
            id: self.id,
            name: self.name,
            mp_cost: self.mp_cost,
            tp_cost: self.tp_cost,
            scope: self.scope,
            hit_type: self.hit_type,
            damage: self.damage.map(DamageSpec::from),
            success_rate: self.success_rate,
            animation: self.animation,
            add_states: self
                .add_states
                .into_iter()
                .map(|(state, chance)| StateChance { state, chance })
                .collect(),
            tp_gain: self.tp_gain,
            tags,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateDef {
    pub id: StateId,
    pub name: String,
    #[serde(default)]
    pub cannot_act: bool,
    #[serde(default)]
    pub remove_by_damage: bool,
    #[serde(default = "default_remove_chance")]
    pub remove_by_damage_chance: i32,
    #[serde(default)]
    pub param_rates: Vec<(ParamId, i32)>,
    #[serde(default)]
    pub xparam_offsets: Vec<(XParamId, i32)>,
    #[serde(default)]
    pub tags: RawTags,
}

impl StateDef {
    pub fn into_data(self, tags: Tags) -> StateData {
        StateData {
            id: self.id,
            name: self.name,
            cannot_act: self.cannot_act,
            remove_by_damage: self.remove_by_damage,
            remove_by_damage_chance: self.remove_by_damage_chance,
            param_rates: self.param_rates,
            xparam_offsets: self.xparam_offsets,
            tags,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentDef {
    pub id: ItemId,
    pub name: String,
    pub slot: EquipSlot,
    #[serde(default)]
    pub params: [i32; 8],
    #[serde(default)]
    pub xparams: [i32; 10],
    #[serde(default)]
    pub tags: RawTags,
}

impl EquipmentDef {
    pub fn into_data(self, tags: Tags) -> EquipmentData {
        EquipmentData {
            id: self.id,
            name: self.name,
            slot: self.slot,
            params: ParamTable::new(self.params),
            xparams: XParamTable::new(self.xparams),
            tags,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDef {
    pub id: ClassId,
    pub name: String,
    pub params: [i32; 8],
    #[serde(default)]
    pub growth: [i32; 8],
    #[serde(default)]
    pub xparams: [i32; 10],
    #[serde(default)]
    pub tags: RawTags,
}

impl ClassDef {
    pub fn into_data(self, tags: Tags) -> ClassData {
        ClassData {
            id: self.id,
            name: self.name,
            base_params: ParamTable::new(self.params),
            growth: ParamTable::new(self.growth),
            xparams: XParamTable::new(self.xparams),
            tags,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorDef {
    pub id: ActorId,
    pub name: String,
    pub class: ClassId,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub equipment: Vec<ItemId>,
    #[serde(default)]
    pub tags: RawTags,
}

impl ActorDef {
    pub fn into_data(self, tags: Tags) -> ActorData {
        ActorData {
            id: self.id,
            name: self.name,
            class: self.class,
            level: self.level,
            equipment: self.equipment,
            tags,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyDef {
    pub id: EnemyId,
    pub name: String,
    pub params: [i32; 8],
    #[serde(default)]
    pub xparams: [i32; 10],
    #[serde(default)]
    pub skills: Vec<SkillId>,
    #[serde(default)]
    pub tags: RawTags,
}

impl EnemyDef {
    pub fn into_data(self, tags: Tags) -> EnemyData {
        EnemyData {
            id: self.id,
            name: self.name,
            params: ParamTable::new(self.params),
            xparams: XParamTable::new(self.xparams),
            skills: self.skills,
            tags,
        }
    }
}
