use crate::rules::Tags;
use crate::state::StateId;
use crate::stats::{ParamId, XParamId};

pub trait StateOracle: Send + Sync {
    fn state(&self, id: StateId) -> Option<&StateData>;
}

/// Status effect definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateData {
    pub id: StateId,
    pub name: String,
    /// The carrier skips its turns and cannot strike first.
    pub cannot_act: bool,
    pub remove_by_damage: bool,
    /// Percent chance to be removed when hit, if `remove_by_damage` is set.
    pub remove_by_damage_chance: i32,
    /// Param multipliers as absolute rates (`150` = ×1.5).
    pub param_rates: Vec<(ParamId, i32)>,
    /// Ex-param offsets in percentage points.
    pub xparam_offsets: Vec<(XParamId, i32)>,
    pub tags: Tags,
}

impl StateData {
    pub fn new(id: StateId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            cannot_act: false,
            remove_by_damage: false,
            remove_by_damage_chance: 100,
            param_rates: Vec::new(),
            xparam_offsets: Vec::new(),
            tags: Tags::default(),
        }
    }

    #[must_use]
    pub fn cannot_act(mut self) -> Self {
        self.cannot_act = true;
        self
    }

    #[must_use]
    pub fn removed_by_damage(mut self, chance: i32) -> Self {
        self.remove_by_damage = true;
        self.remove_by_damage_chance = chance;
        self
    }

    #[must_use]
    pub fn with_param_rate(mut self, param: ParamId, rate: i32) -> Self {
        self.param_rates.push((param, rate));
        self
    }

    #[must_use]
    pub fn with_xparam_offset(mut self, xparam: XParamId, offset: i32) -> Self {
        self.xparam_offsets.push((xparam, offset));
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }
}
