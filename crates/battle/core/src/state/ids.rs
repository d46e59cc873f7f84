use std::fmt;

macro_rules! definition_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }
    };
}

definition_id!(
    /// Identifier of a skill definition in the database.
    SkillId,
    "skill"
);
definition_id!(
    /// Identifier of a status effect (state) definition.
    StateId,
    "state"
);
definition_id!(
    /// Identifier of a weapon or armor definition.
    ItemId,
    "item"
);
definition_id!(
    /// Identifier of a class definition (allies only).
    ClassId,
    "class"
);
definition_id!(
    /// Identifier of an ally definition.
    ActorId,
    "actor"
);
definition_id!(
    /// Identifier of an enemy species template.
    EnemyId,
    "enemy"
);
definition_id!(
    /// Identifier of an animation played by the presentation layer.
    AnimationId,
    "anim"
);

/// Identifier of a combatant participating in the current battle.
///
/// Ids are assigned by [`crate::BattleState`] when members join and are never
/// reused within a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which side of the battle a combatant fights on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Party,
    Troop,
}

impl Side {
    /// Returns the opposing side.
    pub const fn opponent(self) -> Self {
        match self {
            Side::Party => Side::Troop,
            Side::Troop => Side::Party,
        }
    }
}
