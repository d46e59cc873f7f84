use crate::rules::Tags;
use crate::state::{AnimationId, SkillId, StateId};
use crate::stats::ParamId;

pub trait SkillOracle: Send + Sync {
    fn skill(&self, id: SkillId) -> Option<&SkillData>;
}

/// Who a skill may be aimed at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scope {
    #[default]
    None,
    OneEnemy,
    AllEnemies,
    RandomEnemies(u8),
    OneAlly,
    AllAllies,
    OneDeadAlly,
    AllDeadAllies,
    User,
}

impl Scope {
    pub const fn is_for_opponent(self) -> bool {
        matches!(
            self,
            Scope::OneEnemy | Scope::AllEnemies | Scope::RandomEnemies(_)
        )
    }

    pub const fn is_for_friend(self) -> bool {
        matches!(
            self,
            Scope::OneAlly
                | Scope::AllAllies
                | Scope::OneDeadAlly
                | Scope::AllDeadAllies
                | Scope::User
        )
    }

    pub const fn is_for_dead_friend(self) -> bool {
        matches!(self, Scope::OneDeadAlly | Scope::AllDeadAllies)
    }

    /// Scopes that require the player to pick a target.
    pub const fn needs_selection(self) -> bool {
        matches!(self, Scope::OneEnemy | Scope::OneAlly | Scope::OneDeadAlly)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitType {
    /// Always hits; never evaded.
    #[default]
    Certain,
    /// Rolled against hit rate and evasion.
    Physical,
    /// Rolled against magic evasion.
    Magical,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageKind {
    #[default]
    HpDamage,
    HpRecover,
    MpDamage,
    MpRecover,
}

impl DamageKind {
    pub const fn is_recover(self) -> bool {
        matches!(self, DamageKind::HpRecover | DamageKind::MpRecover)
    }

    pub const fn targets_hp(self) -> bool {
        matches!(self, DamageKind::HpDamage | DamageKind::HpRecover)
    }
}

/// Linear damage formula.
///
/// `power + attacker[attack] × attack_rate / 100 - target[defense] × defense_rate / 100`,
/// then varied by ±`variance` percent and tripled on critical hits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageSpec {
    pub kind: DamageKind,
    pub power: i32,
    pub attack: ParamId,
    pub attack_rate: i32,
    pub defense: ParamId,
    pub defense_rate: i32,
    pub variance: i32,
    pub critical: bool,
}

impl DamageSpec {
    pub fn physical(power: i32) -> Self {
        Self {
            kind: DamageKind::HpDamage,
            power,
            attack: ParamId::Attack,
            attack_rate: 400,
            defense: ParamId::Defense,
            defense_rate: 200,
            variance: 0,
            critical: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateChance {
    pub state: StateId,
    pub chance: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillData {
    pub id: SkillId,
    pub name: String,
    pub mp_cost: i32,
    pub tp_cost: i32,
    pub scope: Scope,
    pub hit_type: HitType,
    pub damage: Option<DamageSpec>,
    /// Percent chance the skill lands at all.
    pub success_rate: i32,
    pub animation: Option<AnimationId>,
    pub add_states: Vec<StateChance>,
    pub tp_gain: i32,
    pub tags: Tags,
}

impl SkillData {
    pub fn new(id: SkillId, name: impl Into<String>, scope: Scope) -> Self {
        Self {
            id,
            name: name.into(),
            mp_cost: 0,
            tp_cost: 0,
            scope,
            hit_type: HitType::Certain,
            damage: None,
            success_rate: 100,
            animation: None,
            add_states: Vec::new(),
            tp_gain: 0,
            tags: Tags::default(),
        }
    }

    #[must_use]
    pub fn with_cost(mut self, mp: i32, tp: i32) -> Self {
        self.mp_cost = mp;
        self.tp_cost = tp;
        self
    }

    #[must_use]
    pub fn with_hit_type(mut self, hit_type: HitType) -> Self {
        self.hit_type = hit_type;
        self
    }

    #[must_use]
    pub fn with_damage(mut self, damage: DamageSpec) -> Self {
        self.damage = Some(damage);
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: AnimationId) -> Self {
        self.animation = Some(animation);
        self
    }

    #[must_use]
    pub fn with_added_state(mut self, state: StateId, chance: i32) -> Self {
        self.add_states.push(StateChance { state, chance });
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// Maximum number of hand-picked targets, if the skill is multi-select.
    pub fn multi_target(&self) -> Option<usize> {
        self.tags.multi_target.map(usize::from)
    }
}
