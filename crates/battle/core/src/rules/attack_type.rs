//! Attack-type tag sets.

use core::str::FromStr;

use super::RuleError;

/// Lower-cased attack-type tags (`fire`, `slash`, ...).
///
/// An attacker's composed set is the union of the tags on the combatant, its
/// class or species, its equipment, its active states and the skill in use.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackTypes(Vec<String>);

impl AttackTypes {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn insert(&mut self, tag: &str) {
        let tag = tag.trim().to_ascii_lowercase();
        if !tag.is_empty() && !self.0.contains(&tag) {
            self.0.push(tag);
        }
    }

    /// Union with another set, keeping first-seen order.
    pub fn merge(&mut self, other: &AttackTypes) {
        for tag in other.iter() {
            self.insert(tag);
        }
    }

    /// True when any tag contains `filter` (case-insensitive).
    pub fn matches(&self, filter: &str) -> bool {
        let filter = filter.to_ascii_lowercase();
        self.0.iter().any(|tag| tag.contains(filter.as_str()))
    }
}

impl FromStr for AttackTypes {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut types = AttackTypes::new();
        for tag in s.split(',') {
            types.insert(tag);
        }
        if types.is_empty() {
            return Err(RuleError::Empty {
                tag: "attack_types".into(),
            });
        }
        Ok(types)
    }
}

impl<'a> FromIterator<&'a str> for AttackTypes {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut types = AttackTypes::new();
        for tag in iter {
            types.insert(tag);
        }
        types
    }
}
