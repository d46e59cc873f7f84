//! Seeded randomness for hit rolls, variance and re-targeting.
//!
//! Every random decision derives its own seed with [`compute_seed`], so a
//! battle replays identically from the same battle seed.

pub trait RngOracle: Send + Sync {
    fn next_u32(&self, seed: u64) -> u32;

    /// 1..=100 inclusive.
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Uniform value in `[min, max]`.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        min + (self.next_u32(seed) % (max - min + 1))
    }

    /// Uniform index into a pool of `len` candidates; `None` when empty.
    fn pick_index(&self, seed: u64, len: usize) -> Option<usize> {
        match len {
            0 => None,
            1 => Some(0),
            n => Some(self.next_u32(seed) as usize % n),
        }
    }
}

/// PCG-XSH-RR: one LCG step followed by an xorshift and a random rotation.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = seed
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        xorshifted.rotate_right((state >> 59) as u32)
    }
}

/// Roll purposes, mixed into the seed so one action's rolls stay independent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum RollContext {
    Hit = 0,
    Evasion = 1,
    Critical = 2,
    Variance = 3,
    AddState = 4,
    RemoveByDamage = 5,
    Retarget = 6,
    RandomState = 7,
    RandomTarget = 8,
}

/// Derive a seed for one roll.
///
/// * `battle_seed` - fixed for the whole battle
/// * `nonce` - incremented for every action application
/// * `actor` - combatant performing or suffering the roll
/// * `context` - roll purpose plus an optional slot offset
pub fn compute_seed(battle_seed: u64, nonce: u64, actor: u32, context: u32) -> u64 {
    let mut hash = battle_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(actor).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}
