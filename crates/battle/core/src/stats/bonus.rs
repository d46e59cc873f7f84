//! Modifier composition for params and ex-params.
//!
//! Every stat value is resolved through the same order:
//! `(base + Σflat) × Π(100 + pct) / 100`, then clamped.
//! Multipliers are applied one at a time with integer truncation, so two
//! `-50` multipliers on a base of 40 yield `40 → 20 → 10`.

/// A single modifier contributed by equipment, a state or a combo rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bonus {
    /// Additive offset, applied before any multiplier.
    Flat(i32),

    /// Multiplier in percent relative to 100 (`-50` = ×0.5, `50` = ×1.5).
    More(i32),
}

impl Bonus {
    pub fn flat(value: i32) -> Self {
        Bonus::Flat(value)
    }

    pub fn more(percent: i32) -> Self {
        Bonus::More(percent)
    }

    /// Multiplier expressed as an absolute rate (`150` = ×1.5).
    pub fn rate(rate: i32) -> Self {
        Bonus::More(rate - 100)
    }
}

/// Ordered collection of modifiers for one stat.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BonusStack {
    bonuses: Vec<Bonus>,
}

impl BonusStack {
    pub fn new() -> Self {
        Self {
            bonuses: Vec::new(),
        }
    }

    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    pub fn extend(&mut self, bonuses: impl IntoIterator<Item = Bonus>) {
        self.bonuses.extend(bonuses);
    }

    /// Apply the stack to `base` and clamp to `[min, max]`.
    pub fn apply(&self, base: i32, min: i32, max: i32) -> i32 {
        let flat_sum: i64 = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Flat(v) => Some(i64::from(*v)),
                _ => None,
            })
            .sum();

        let product = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::More(p) => Some(i64::from(*p)),
                _ => None,
            })
            .fold(i64::from(base) + flat_sum, |acc, percent| {
                (acc * (100 + percent)) / 100
            });

        product.clamp(i64::from(min), i64::from(max)) as i32
    }

    pub fn apply_unclamped(&self, base: i32) -> i32 {
        self.apply(base, i32::MIN, i32::MAX)
    }
}
