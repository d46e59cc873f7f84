//! Param and ex-param identifiers plus their value tables.
//!
//! Params (`mhp` .. `luk`) are whole-number primary stats that compose
//! multiplicatively. Ex-params (`hit` .. `trg`) are rates stored as integer
//! percentage points that compose additively.

use core::ops::{Index, IndexMut};
use core::str::FromStr;

/// The eight primary params.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum ParamId {
    #[strum(serialize = "mhp")]
    MaxHp,
    #[strum(serialize = "mmp")]
    MaxMp,
    #[strum(serialize = "atk")]
    Attack,
    #[strum(serialize = "def")]
    Defense,
    #[strum(serialize = "mat")]
    MagicAttack,
    #[strum(serialize = "mdf")]
    MagicDefense,
    #[strum(serialize = "agi")]
    Agility,
    #[strum(serialize = "luk")]
    Luck,
}

impl ParamId {
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// The ten ex-params (rates, in percentage points).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum XParamId {
    /// Hit rate.
    #[strum(serialize = "hit")]
    Hit,
    /// Evasion rate.
    #[strum(serialize = "eva")]
    Evasion,
    /// Critical rate.
    #[strum(serialize = "cri")]
    Critical,
    /// Critical evasion rate.
    #[strum(serialize = "cev")]
    CriticalEvasion,
    /// Magic evasion rate.
    #[strum(serialize = "mev")]
    MagicEvasion,
    /// Magic reflection rate.
    #[strum(serialize = "mrf")]
    MagicReflection,
    /// Counter attack rate.
    #[strum(serialize = "cnt")]
    Counter,
    /// HP regeneration rate.
    #[strum(serialize = "hrg")]
    HpRegen,
    /// MP regeneration rate.
    #[strum(serialize = "mrg")]
    MpRegen,
    /// TP regeneration rate.
    #[strum(serialize = "trg")]
    TpRegen,
}

impl XParamId {
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Either kind of stat, as named by tag grammars (`eva`, `mhp`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKey {
    Param(ParamId),
    XParam(XParamId),
}

impl StatKey {
    /// Params compose multiplicatively, ex-params additively.
    pub const fn is_multiplicative(self) -> bool {
        matches!(self, StatKey::Param(_))
    }
}

impl FromStr for StatKey {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ParamId::from_str(s)
            .map(StatKey::Param)
            .or_else(|_| XParamId::from_str(s).map(StatKey::XParam))
    }
}

impl core::fmt::Display for StatKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StatKey::Param(p) => p.fmt(f),
            StatKey::XParam(x) => x.fmt(f),
        }
    }
}

/// Values for all eight params, indexed by [`ParamId`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParamTable(pub [i32; 8]);

impl ParamTable {
    pub const fn new(values: [i32; 8]) -> Self {
        Self(values)
    }

    /// Element-wise sum, used to fold equipment bonuses and growth together.
    #[must_use]
    pub fn plus(mut self, other: &ParamTable) -> Self {
        for (a, b) in self.0.iter_mut().zip(other.0.iter()) {
            *a += *b;
        }
        self
    }
}

impl Index<ParamId> for ParamTable {
    type Output = i32;

    fn index(&self, id: ParamId) -> &i32 {
        &self.0[id.index()]
    }
}

impl IndexMut<ParamId> for ParamTable {
    fn index_mut(&mut self, id: ParamId) -> &mut i32 {
        &mut self.0[id.index()]
    }
}

/// Values for all ten ex-params, indexed by [`XParamId`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct XParamTable(pub [i32; 10]);

impl XParamTable {
    pub const fn new(values: [i32; 10]) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn plus(mut self, other: &XParamTable) -> Self {
        for (a, b) in self.0.iter_mut().zip(other.0.iter()) {
            *a += *b;
        }
        self
    }
}

impl Index<XParamId> for XParamTable {
    type Output = i32;

    fn index(&self, id: XParamId) -> &i32 {
        &self.0[id.index()]
    }
}

impl IndexMut<XParamId> for XParamTable {
    fn index_mut(&mut self, id: XParamId) -> &mut i32 {
        &mut self.0[id.index()]
    }
}
