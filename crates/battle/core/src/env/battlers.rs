use crate::rules::Tags;
use crate::state::{ActorId, ClassId, EnemyId, ItemId, SkillId};
use crate::stats::{ParamTable, XParamTable};

/// Lookup for ally definitions, their classes, and enemy species.
pub trait BattlerOracle: Send + Sync {
    fn actor(&self, id: ActorId) -> Option<&ActorData>;
    fn class(&self, id: ClassId) -> Option<&ClassData>;
    fn enemy(&self, id: EnemyId) -> Option<&EnemyData>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassData {
    pub id: ClassId,
    pub name: String,
    /// Params at level 1.
    pub base_params: ParamTable,
    /// Param gain per level above 1.
    pub growth: ParamTable,
    pub xparams: XParamTable,
    pub tags: Tags,
}

impl ClassData {
    pub fn new(id: ClassId, name: impl Into<String>, base_params: ParamTable) -> Self {
        Self {
            id,
            name: name.into(),
            base_params,
            growth: ParamTable::default(),
            xparams: XParamTable::default(),
            tags: Tags::default(),
        }
    }

    pub fn params_at(&self, level: u32) -> ParamTable {
        let steps = level.saturating_sub(1) as i32;
        let mut params = self.base_params;
        for (value, gain) in params.0.iter_mut().zip(self.growth.0.iter()) {
            *value += gain * steps;
        }
        params
    }

    #[must_use]
    pub fn with_growth(mut self, growth: ParamTable) -> Self {
        self.growth = growth;
        self
    }

    #[must_use]
    pub fn with_xparams(mut self, xparams: XParamTable) -> Self {
        self.xparams = xparams;
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorData {
    pub id: ActorId,
    pub name: String,
    pub class: ClassId,
    pub level: u32,
    pub equipment: Vec<ItemId>,
    pub tags: Tags,
}

impl ActorData {
    pub fn new(id: ActorId, name: impl Into<String>, class: ClassId) -> Self {
        Self {
            id,
            name: name.into(),
            class,
            level: 1,
            equipment: Vec::new(),
            tags: Tags::default(),
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_equipment(mut self, item: ItemId) -> Self {
        self.equipment.push(item);
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }
}

/// Enemy species template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyData {
    pub id: EnemyId,
    pub name: String,
    pub params: ParamTable,
    pub xparams: XParamTable,
    pub skills: Vec<SkillId>,
    pub tags: Tags,
}

impl EnemyData {
    pub fn new(id: EnemyId, name: impl Into<String>, params: ParamTable) -> Self {
        Self {
            id,
            name: name.into(),
            params,
            xparams: XParamTable::default(),
            skills: Vec::new(),
            tags: Tags::default(),
        }
    }

    #[must_use]
    pub fn with_xparams(mut self, xparams: XParamTable) -> Self {
        self.xparams = xparams;
        self
    }

    #[must_use]
    pub fn with_skill(mut self, skill: SkillId) -> Self {
        self.skills.push(skill);
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }
}
