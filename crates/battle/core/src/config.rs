//! Battle configuration constants and tunable parameters.

use crate::state::SkillId;
use crate::stats::ParamId;

/// Per-param minimum overrides.
///
/// `None` keeps the engine default (1 for every param except max MP, which
/// defaults to 0). `Some(0)` is distinct from `None`: it lets a param be fully
/// zero, which is how a stat is made to depend only on linked stats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParamFloors {
    pub mhp: Option<i32>,
    pub mmp: Option<i32>,
    pub atk: Option<i32>,
    pub def: Option<i32>,
    pub mat: Option<i32>,
    pub mdf: Option<i32>,
    pub agi: Option<i32>,
    pub luk: Option<i32>,
}

impl ParamFloors {
    /// Returns the configured override for a param, if any.
    pub fn get(&self, param: ParamId) -> Option<i32> {
        match param {
            ParamId::MaxHp => self.mhp,
            ParamId::MaxMp => self.mmp,
            ParamId::Attack => self.atk,
            ParamId::Defense => self.def,
            ParamId::MagicAttack => self.mat,
            ParamId::MagicDefense => self.mdf,
            ParamId::Agility => self.agi,
            ParamId::Luck => self.luk,
        }
    }

    /// Sets an override (builder pattern).
    #[must_use]
    pub fn with(mut self, param: ParamId, floor: i32) -> Self {
        let slot = match param {
            ParamId::MaxHp => &mut self.mhp,
            ParamId::MaxMp => &mut self.mmp,
            ParamId::Attack => &mut self.atk,
            ParamId::Defense => &mut self.def,
            ParamId::MagicAttack => &mut self.mat,
            ParamId::MagicDefense => &mut self.mdf,
            ParamId::Agility => &mut self.agi,
            ParamId::Luck => &mut self.luk,
        };
        *slot = Some(floor);
        self
    }

    /// Effective floor for a param: the override, or the engine default.
    pub fn floor(&self, param: ParamId) -> i32 {
        self.get(param).unwrap_or(match param {
            ParamId::MaxMp => 0,
            _ => 1,
        })
    }
}

/// Battle configuration: capacities and the tunable rule surface.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// When applying a state to a random member, skip members that already
    /// carry it. If every living member is afflicted nothing happens.
    pub exclude_afflicted_on_random_state: bool,

    /// Minimum values for the eight params.
    pub param_floors: ParamFloors,

    /// Emit numbered selection indicators while choosing multiple targets.
    pub selection_indicators: bool,

    /// Text shown after the defender's name when a first strike triggers.
    pub first_strike_message: String,

    /// Honour attack-type filters on first strike directives. When disabled
    /// every directive is treated as `all`.
    pub attack_type_filtering: bool,

    /// Skill used for basic attacks and as the fallback counter skill.
    pub attack_skill_id: SkillId,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_STATES: usize = 16;
    pub const MAX_PARTY: usize = 4;
    pub const MAX_TROOP: usize = 8;
    pub const MAX_MULTI_TARGETS: usize = 8;
    pub const MAX_EQUIPMENT: usize = 5;

    // ===== rule constants =====
    pub const MAX_TP: i32 = 100;
    pub const PARAM_MAX: i32 = 999_999;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_FIRST_STRIKE_MESSAGE: &'static str = "strikes first!";
    pub const DEFAULT_ATTACK_SKILL: SkillId = SkillId(1);

    pub fn new() -> Self {
        Self {
            exclude_afflicted_on_random_state: true,
            param_floors: ParamFloors::default(),
            selection_indicators: false,
            first_strike_message: Self::DEFAULT_FIRST_STRIKE_MESSAGE.to_string(),
            attack_type_filtering: true,
            attack_skill_id: Self::DEFAULT_ATTACK_SKILL,
        }
    }

    #[must_use]
    pub fn with_param_floors(mut self, param_floors: ParamFloors) -> Self {
        self.param_floors = param_floors;
        self
    }

    #[must_use]
    pub fn with_selection_indicators(mut self, enabled: bool) -> Self {
        self.selection_indicators = enabled;
        self
    }

    #[must_use]
    pub fn with_attack_type_filtering(mut self, enabled: bool) -> Self {
        self.attack_type_filtering = enabled;
        self
    }

    #[must_use]
    pub fn with_exclude_afflicted(mut self, enabled: bool) -> Self {
        self.exclude_afflicted_on_random_state = enabled;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_floor_is_distinct_from_unset() {
        let floors = ParamFloors::default().with(ParamId::MaxHp, 0);
        assert_eq!(floors.get(ParamId::MaxHp), Some(0));
        assert_eq!(floors.floor(ParamId::MaxHp), 0);
        assert_eq!(floors.get(ParamId::Attack), None);
        assert_eq!(floors.floor(ParamId::Attack), 1);
        assert_eq!(floors.floor(ParamId::MaxMp), 0);
    }
}
