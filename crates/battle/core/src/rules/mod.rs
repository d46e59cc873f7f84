//! Typed rules parsed from free-form definition tags.
//!
//! Definitions in the database carry string tags. They are parsed exactly once
//! when the database is built, so combat code only ever sees typed records.
//!
//! | key                | grammar                        |
//! |--------------------|--------------------------------|
//! | `first_strike`     | `filter[, filter]*, skillId`   |
//! | `attack_types`     | `tag[, tag]*`                  |
//! | `multiple_targets` | first run of digits            |
//! | `state_combo`      | `stat, delta[%], stateId`      |
//! | `link <stat>`      | `<percent> <sourceStat>`       |
mod attack_type;
mod combo;
mod error;
mod link;
mod strike;

use std::collections::BTreeMap;

pub use attack_type::AttackTypes;
pub use combo::{ComboDelta, ComboRule};
pub use error::RuleError;
pub use link::LinkRule;
pub use strike::StrikeDirective;

use crate::config::BattleConfig;

pub const FIRST_STRIKE_KEY: &str = "first_strike";
pub const ATTACK_TYPES_KEY: &str = "attack_types";
pub const MULTIPLE_TARGETS_KEY: &str = "multiple_targets";
pub const STATE_COMBO_KEY: &str = "state_combo";

/// Raw tag map as stored in data files.
pub type RawTags = BTreeMap<String, String>;

/// Parsed rules attached to a definition record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Tags {
    pub first_strike: Option<StrikeDirective>,
    pub attack_types: AttackTypes,
    pub multi_target: Option<u8>,
    pub combo: Option<ComboRule>,
    pub links: Vec<LinkRule>,
}

impl Tags {
    /// Parses every recognised key, failing on the first malformed value.
    pub fn parse(raw: &RawTags) -> Result<Self, RuleError> {
        let mut tags = Tags::default();
        for (key, value) in raw {
            tags.apply(key, value)?;
        }
        Ok(tags)
    }

    /// Parses every recognised key, dropping malformed values.
    ///
    /// Returns the dropped keys with their errors so callers can report them.
    pub fn parse_lenient(raw: &RawTags) -> (Self, Vec<(String, RuleError)>) {
        let mut tags = Tags::default();
        let mut rejected = Vec::new();
        for (key, value) in raw {
            if let Err(error) = tags.apply(key, value) {
                rejected.push((key.clone(), error));
            }
        }
        (tags, rejected)
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), RuleError> {
        match key.trim().to_ascii_lowercase().as_str() {
            FIRST_STRIKE_KEY => self.first_strike = Some(value.parse()?),
            ATTACK_TYPES_KEY => self.attack_types = value.parse()?,
            MULTIPLE_TARGETS_KEY => self.multi_target = Some(parse_multi_target(value)?),
            STATE_COMBO_KEY => self.combo = Some(value.parse()?),
            _ => {
                if let Some(link) = LinkRule::parse(key, value)? {
                    self.links.push(link);
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn with_first_strike(mut self, directive: StrikeDirective) -> Self {
        self.first_strike = Some(directive);
        self
    }

    #[must_use]
    pub fn with_attack_types(mut self, types: AttackTypes) -> Self {
        self.attack_types = types;
        self
    }

    #[must_use]
    pub fn with_multi_target(mut self, count: u8) -> Self {
        self.multi_target = Some(count);
        self
    }

    #[must_use]
    pub fn with_combo(mut self, combo: ComboRule) -> Self {
        self.combo = Some(combo);
        self
    }

    #[must_use]
    pub fn with_link(mut self, link: LinkRule) -> Self {
        self.links.push(link);
        self
    }
}

/// Extracts the maximum target count from values such as `4` or `x4`.
pub fn parse_multi_target(value: &str) -> Result<u8, RuleError> {
    let digits: String = value
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    let count = digits
        .parse::<u32>()
        .map_err(|_| RuleError::InvalidCount(value.to_string()))?;
    if count == 0 || count as usize > BattleConfig::MAX_MULTI_TARGETS {
        return Err(RuleError::CountOutOfRange {
            count,
            max: BattleConfig::MAX_MULTI_TARGETS,
        });
    }
    Ok(count as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SkillId;
    use crate::stats::ParamId;

    fn raw(pairs: &[(&str, &str)]) -> RawTags {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_all_recognised_keys() {
        let tags = Tags::parse(&raw(&[
            ("first_strike", "fire, 9"),
            ("attack_types", "slash"),
            ("multiple_targets", "x3"),
            ("state_combo", "eva, -50%, 4"),
            ("link mhp", "50 def"),
            ("link atk", "10 agi"),
            ("flavor", "ignored"),
        ]))
        .unwrap();
        assert_eq!(tags.first_strike.map(|d| d.skill), Some(SkillId(9)));
        assert!(tags.attack_types.matches("slash"));
        assert_eq!(tags.multi_target, Some(3));
        assert!(tags.combo.is_some());
        assert_eq!(tags.links.len(), 2);
        assert_eq!(tags.links[0].target, ParamId::Attack);
    }

    #[test]
    fn strict_parse_fails_on_malformed_value() {
        let result = Tags::parse(&raw(&[("state_combo", "eva,-50")]));
        assert!(result.is_err());
    }

    #[test]
    fn lenient_parse_treats_malformed_as_absent() {
        let (tags, rejected) = Tags::parse_lenient(&raw(&[
            ("state_combo", "eva,-50"),
            ("first_strike", "all, 5"),
        ]));
        assert!(tags.combo.is_none());
        assert!(tags.first_strike.is_some());
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].0, "state_combo");
    }

    #[test]
    fn multi_target_count_bounds() {
        assert_eq!(parse_multi_target("4"), Ok(4));
        assert!(parse_multi_target("none").is_err());
        assert!(parse_multi_target("0").is_err());
        assert!(parse_multi_target("99").is_err());
    }
}
