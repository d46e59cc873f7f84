//! Linked stat rules: `link <stat>` → `<percent> <sourceStat>`.

use super::RuleError;
use crate::stats::{ParamId, StatKey};

const KEY_PREFIX: &str = "link";

/// Adds `round(source × percent / 100)` to `target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkRule {
    pub target: ParamId,
    pub percent: i32,
    pub source: ParamId,
}

impl LinkRule {
    /// Returns the target param if `key` names a link (`link mhp`).
    pub fn target_of(key: &str) -> Option<Result<ParamId, RuleError>> {
        let key = key.trim();
        let head = key.get(..KEY_PREFIX.len())?;
        if !head.eq_ignore_ascii_case(KEY_PREFIX) {
            return None;
        }
        let rest = &key[KEY_PREFIX.len()..];
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        Some(parse_param(rest.trim()))
    }

    /// Parses a link from its tag key and value.
    pub fn parse(key: &str, value: &str) -> Result<Option<Self>, RuleError> {
        let Some(target) = Self::target_of(key) else {
            return Ok(None);
        };
        let target = target?;

        let mut parts = value.split_whitespace();
        let (Some(percent), Some(source), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(RuleError::Malformed {
                value: value.to_string(),
                expected: "<percent> <stat>",
            });
        };
        let percent = percent
            .trim_end_matches('%')
            .parse::<i32>()
            .map_err(|_| RuleError::InvalidDelta(percent.to_string()))?;
        let source = parse_param(source)?;

        Ok(Some(LinkRule {
            target,
            percent,
            source,
        }))
    }

    /// Contribution for a given source value, rounded half away from zero.
    pub fn contribution(&self, source_value: i32) -> i32 {
        let scaled = i64::from(source_value) * i64::from(self.percent);
        let rounded = if scaled >= 0 {
            (scaled + 50) / 100
        } else {
            (scaled - 50) / 100
        };
        rounded as i32
    }
}

fn parse_param(name: &str) -> Result<ParamId, RuleError> {
    match name.parse::<StatKey>() {
        Ok(StatKey::Param(param)) => Ok(param),
        Ok(StatKey::XParam(_)) => Err(RuleError::NotAParam(name.to_string())),
        Err(_) => Err(RuleError::UnknownStat(name.to_string())),
    }
}
