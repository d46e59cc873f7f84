use crate::rules::Tags;
use crate::state::ItemId;
use crate::stats::{ParamTable, XParamTable};

/// Equipment lookup. Weapons and armor share an id space but are resolved
/// separately, mirroring how they are equipped.
pub trait ItemOracle: Send + Sync {
    fn equipment(&self, id: ItemId) -> Option<&EquipmentData>;

    fn weapon(&self, id: ItemId) -> Option<&EquipmentData> {
        self.equipment(id).filter(|e| e.slot == EquipSlot::Weapon)
    }

    fn armor(&self, id: ItemId) -> Option<&EquipmentData> {
        self.equipment(id).filter(|e| e.slot == EquipSlot::Armor)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EquipSlot {
    Weapon,
    Armor,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentData {
    pub id: ItemId,
    pub name: String,
    pub slot: EquipSlot,
    pub params: ParamTable,
    pub xparams: XParamTable,
    pub tags: Tags,
}

impl EquipmentData {
    pub fn new(id: ItemId, name: impl Into<String>, slot: EquipSlot) -> Self {
        Self {
            id,
            name: name.into(),
            slot,
            params: ParamTable::default(),
            xparams: XParamTable::default(),
            tags: Tags::default(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: ParamTable) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }
}
