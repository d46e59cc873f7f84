//! State combo rules.
//!
//! Grammar: `stat, delta[%], stateId`. A combo modifies `stat` on the carrier
//! while it is being targeted by an opponent that carries `stateId`.

use core::str::FromStr;

use super::RuleError;
use crate::state::StateId;
use crate::stats::{Bonus, StatKey};

/// How a combo delta composes with other modifiers on the same stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComboDelta {
    /// Bare number: composes by the stat's natural kind.
    Natural(i32),
    /// `%` suffix: always a multiplier relative to 100.
    Percent(i32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComboRule {
    pub stat: StatKey,
    pub delta: ComboDelta,
    pub required_state: StateId,
}

impl ComboRule {
    /// The modifier this rule contributes once its condition holds.
    pub fn bonus(&self) -> Bonus {
        match self.delta {
            ComboDelta::Percent(p) => Bonus::more(p),
            ComboDelta::Natural(d) if self.stat.is_multiplicative() => Bonus::more(d),
            ComboDelta::Natural(d) => Bonus::flat(d),
        }
    }
}

impl FromStr for ComboRule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [stat, delta, state] = parts.as_slice() else {
            return Err(RuleError::Malformed {
                value: s.to_string(),
                expected: "stat, delta[%], stateId",
            });
        };

        let stat = stat
            .parse::<StatKey>()
            .map_err(|_| RuleError::UnknownStat(stat.to_string()))?;

        let (number, percent) = match delta.strip_suffix('%') {
            Some(rest) => (rest.trim(), true),
            None => (*delta, false),
        };
        let value = number
            .trim_start_matches('+')
            .parse::<i32>()
            .map_err(|_| RuleError::InvalidDelta(delta.to_string()))?;
        let delta = if percent {
            ComboDelta::Percent(value)
        } else {
            ComboDelta::Natural(value)
        };

        let required_state = state
            .parse::<u32>()
            .map(StateId)
            .map_err(|_| RuleError::InvalidStateId(state.to_string()))?;

        Ok(ComboRule {
            stat,
            delta,
            required_state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{ParamId, XParamId};

    #[test]
    fn parses_percent_and_natural_deltas() {
        let rule: ComboRule = "eva, -50%, 4".parse().unwrap();
        assert_eq!(rule.stat, StatKey::XParam(XParamId::Evasion));
        assert_eq!(rule.delta, ComboDelta::Percent(-50));
        assert_eq!(rule.required_state, StateId(4));
        assert_eq!(rule.bonus(), Bonus::More(-50));

        let rule: ComboRule = "HIT,+10,4".parse().unwrap();
        assert_eq!(rule.delta, ComboDelta::Natural(10));
        assert_eq!(rule.bonus(), Bonus::Flat(10));
    }

    #[test]
    fn natural_delta_on_param_is_a_multiplier() {
        let rule: ComboRule = "atk, -25, 2".parse().unwrap();
        assert_eq!(rule.stat, StatKey::Param(ParamId::Attack));
        assert_eq!(rule.bonus(), Bonus::More(-25));
    }

    #[test]
    fn rejects_wrong_arity_and_bad_fields() {
        assert!(matches!(
            "eva, -50".parse::<ComboRule>(),
            Err(RuleError::Malformed { .. })
        ));
        assert!(matches!(
            "speed, 5, 1".parse::<ComboRule>(),
            Err(RuleError::UnknownStat(_))
        ));
        assert!(matches!(
            "eva, lots, 1".parse::<ComboRule>(),
            Err(RuleError::InvalidDelta(_))
        ));
        assert!(matches!(
            "eva, 5, poison".parse::<ComboRule>(),
            Err(RuleError::InvalidStateId(_))
        ));
    }
}
