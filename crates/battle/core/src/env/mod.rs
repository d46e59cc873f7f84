//! Read-only definition data consumed by the rules.
//!
//! Each data family is exposed through an oracle trait. [`Env`] bundles them so
//! rule code can reach what it needs without depending on a concrete database.
mod battlers;
mod error;
mod items;
mod rng;
mod skills;
mod snapshot;
mod states;

pub use battlers::{ActorData, BattlerOracle, ClassData, EnemyData};
pub use error::OracleError;
pub use items::{EquipSlot, EquipmentData, ItemOracle};
pub use rng::{PcgRng, RngOracle, RollContext, compute_seed};
pub use skills::{DamageKind, DamageSpec, HitType, Scope, SkillData, SkillOracle, StateChance};
pub use snapshot::DatabaseSnapshot;
pub use states::{StateData, StateOracle};

use crate::state::{SkillId, StateId};

/// Aggregates the oracles required by targeting, stat resolution and
/// action application.
pub struct Env<'a, S, T, I, B, R>
where
    S: SkillOracle + ?Sized,
    T: StateOracle + ?Sized,
    I: ItemOracle + ?Sized,
    B: BattlerOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    skills: Option<&'a S>,
    states: Option<&'a T>,
    items: Option<&'a I>,
    battlers: Option<&'a B>,
    rng: Option<&'a R>,
}

impl<S, T, I, B, R> Clone for Env<'_, S, T, I, B, R>
where
    S: SkillOracle + ?Sized,
    T: StateOracle + ?Sized,
    I: ItemOracle + ?Sized,
    B: BattlerOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, T, I, B, R> Copy for Env<'_, S, T, I, B, R>
where
    S: SkillOracle + ?Sized,
    T: StateOracle + ?Sized,
    I: ItemOracle + ?Sized,
    B: BattlerOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type BattleEnv<'a> = Env<
    'a,
    dyn SkillOracle + 'a,
    dyn StateOracle + 'a,
    dyn ItemOracle + 'a,
    dyn BattlerOracle + 'a,
    dyn RngOracle + 'a,
>;

impl<'a, S, T, I, B, R> Env<'a, S, T, I, B, R>
where
    S: SkillOracle + ?Sized,
    T: StateOracle + ?Sized,
    I: ItemOracle + ?Sized,
    B: BattlerOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(
        skills: Option<&'a S>,
        states: Option<&'a T>,
        items: Option<&'a I>,
        battlers: Option<&'a B>,
        rng: Option<&'a R>,
    ) -> Self {
        Self {
            skills,
            states,
            items,
            battlers,
            rng,
        }
    }

    pub fn with_all(
        skills: &'a S,
        states: &'a T,
        items: &'a I,
        battlers: &'a B,
        rng: &'a R,
    ) -> Self {
        Self::new(
            Some(skills),
            Some(states),
            Some(items),
            Some(battlers),
            Some(rng),
        )
    }

    pub fn empty() -> Self {
        Self {
            skills: None,
            states: None,
            items: None,
            battlers: None,
            rng: None,
        }
    }

    /// # Errors
    ///
    /// Returns `OracleError::SkillsNotAvailable` if no skill oracle was provided.
    pub fn skills(&self) -> Result<&'a S, OracleError> {
        self.skills.ok_or(OracleError::SkillsNotAvailable)
    }

    /// # Errors
    ///
    /// Returns `OracleError::StatesNotAvailable` if no state oracle was provided.
    pub fn states(&self) -> Result<&'a T, OracleError> {
        self.states.ok_or(OracleError::StatesNotAvailable)
    }

    /// # Errors
    ///
    /// Returns `OracleError::ItemsNotAvailable` if no item oracle was provided.
    pub fn items(&self) -> Result<&'a I, OracleError> {
        self.items.ok_or(OracleError::ItemsNotAvailable)
    }

    /// # Errors
    ///
    /// Returns `OracleError::BattlersNotAvailable` if no battler oracle was provided.
    pub fn battlers(&self) -> Result<&'a B, OracleError> {
        self.battlers.ok_or(OracleError::BattlersNotAvailable)
    }

    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    /// Looks up a skill definition, treating an unknown id as an error.
    pub fn skill(&self, id: SkillId) -> Result<&'a SkillData, OracleError> {
        self.skills()?.skill(id).ok_or(OracleError::SkillNotFound(id))
    }

    /// Looks up a state definition, treating an unknown id as an error.
    pub fn state(&self, id: StateId) -> Result<&'a StateData, OracleError> {
        self.states()?.state(id).ok_or(OracleError::StateNotFound(id))
    }
}

impl<'a, S, T, I, B, R> Env<'a, S, T, I, B, R>
where
    S: SkillOracle + 'a,
    T: StateOracle + 'a,
    I: ItemOracle + 'a,
    B: BattlerOracle + 'a,
    R: RngOracle + 'a,
{
    /// Erases the concrete oracle types.
    pub fn as_battle_env(&self) -> BattleEnv<'a> {
        let skills: Option<&'a dyn SkillOracle> = self.skills.map(|s| s as _);
        let states: Option<&'a dyn StateOracle> = self.states.map(|s| s as _);
        let items: Option<&'a dyn ItemOracle> = self.items.map(|i| i as _);
        let battlers: Option<&'a dyn BattlerOracle> = self.battlers.map(|b| b as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|r| r as _);
        Env::new(skills, states, items, battlers, rng)
    }
}

impl<'a> BattleEnv<'a> {
    /// Environment backed by a single database snapshot.
    pub fn from_database(db: &'a DatabaseSnapshot, rng: &'a dyn RngOracle) -> Self {
        Env::new(
            Some(db as &dyn SkillOracle),
            Some(db as &dyn StateOracle),
            Some(db as &dyn ItemOracle),
            Some(db as &dyn BattlerOracle),
            Some(rng),
        )
    }
}
