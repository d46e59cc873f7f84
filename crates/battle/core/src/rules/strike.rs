//! First strike directives.
//!
//! Grammar: `filter[, filter]*, skillId`. The last token is always the skill
//! to cast. The remaining tokens are attack-type filters; `all` matches any
//! attacker, and a directive with no filter tokens is unfiltered.

use core::str::FromStr;

use super::{AttackTypes, RuleError};
use crate::state::SkillId;

const WILDCARD: &str = "all";

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrikeDirective {
    filters: Vec<String>,
    pub skill: SkillId,
}

impl StrikeDirective {
    pub fn new(skill: SkillId) -> Self {
        Self {
            filters: Vec::new(),
            skill,
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: &str) -> Self {
        self.filters.push(filter.trim().to_ascii_lowercase());
        self
    }

    pub fn filters(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().map(String::as_str)
    }

    /// True when the directive fires regardless of the attacker's tags.
    pub fn is_unfiltered(&self) -> bool {
        self.filters.is_empty() || self.filters.iter().any(|f| f == WILDCARD)
    }

    /// Whether an attacker with the given composed tags triggers this directive.
    pub fn triggers_against(&self, attacker: &AttackTypes) -> bool {
        self.is_unfiltered() || self.filters.iter().any(|f| attacker.matches(f))
    }
}

impl FromStr for StrikeDirective {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens: Vec<&str> = s.split(',').map(str::trim).collect();
        let last = tokens.pop().filter(|t| !t.is_empty()).ok_or(RuleError::Empty {
            tag: "first_strike".into(),
        })?;
        let skill = last
            .parse::<u32>()
            .map(SkillId)
            .map_err(|_| RuleError::InvalidSkillId(last.to_string()))?;

        let mut directive = StrikeDirective::new(skill);
        for filter in tokens.into_iter().filter(|t| !t.is_empty()) {
            directive = directive.with_filter(filter);
        }
        Ok(directive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_token_is_the_skill() {
        let directive: StrikeDirective = "fire, ice, 7".parse().unwrap();
        assert_eq!(directive.skill, SkillId(7));
        assert_eq!(directive.filters().collect::<Vec<_>>(), vec!["fire", "ice"]);
        assert!(!directive.is_unfiltered());
    }

    #[test]
    fn bare_skill_id_is_unfiltered() {
        let directive: StrikeDirective = "12".parse().unwrap();
        assert!(directive.is_unfiltered());
        assert!(directive.triggers_against(&AttackTypes::new()));
    }

    #[test]
    fn wildcard_matches_any_attacker() {
        let directive: StrikeDirective = "ALL, 5".parse().unwrap();
        assert!(directive.triggers_against(&AttackTypes::new()));
    }

    #[test]
    fn filter_requires_matching_attack_type() {
        let directive: StrikeDirective = "fire, 5".parse().unwrap();
        assert!(directive.triggers_against(&"Fire".parse().unwrap()));
        assert!(!directive.triggers_against(&"ice, slash".parse().unwrap()));
    }

    #[test]
    fn rejects_missing_or_non_numeric_skill() {
        assert!(matches!("".parse::<StrikeDirective>(), Err(RuleError::Empty { .. })));
        assert!(matches!(
            "all, fire".parse::<StrikeDirective>(),
            Err(RuleError::InvalidSkillId(_))
        ));
    }
}
