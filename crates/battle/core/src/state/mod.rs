//! Battle state: both sides and the per-battle counters.
mod combatant;
mod error;
mod ids;
mod spawn;
mod status;

use arrayvec::ArrayVec;

pub use combatant::{Combatant, CombatantKind, Scratch};
pub use error::StateError;
pub use ids::{ActorId, AnimationId, ClassId, CombatantId, EnemyId, ItemId, Side, SkillId, StateId};
pub use status::StatusList;

use crate::config::BattleConfig;

/// Everything that changes during a battle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    party: ArrayVec<Combatant, { BattleConfig::MAX_PARTY }>,
    troop: ArrayVec<Combatant, { BattleConfig::MAX_TROOP }>,
    next_id: u32,
    /// Seed every roll in this battle derives from.
    pub seed: u64,
    /// Incremented per action application so rolls never repeat.
    pub nonce: u64,
    pub turn: u32,
}

impl BattleState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Adds a combatant to its side, assigning a fresh id.
    ///
    /// The id on `combatant` is overwritten.
    pub fn join(&mut self, mut combatant: Combatant) -> Result<CombatantId, StateError> {
        let id = CombatantId(self.next_id);
        combatant.id = id;
        let side = combatant.side;
        let pushed = match side {
            Side::Party => self.party.try_push(combatant).is_ok(),
            Side::Troop => self.troop.try_push(combatant).is_ok(),
        };
        if !pushed {
            return Err(StateError::SideFull {
                side,
                capacity: Self::capacity(side),
            });
        }
        self.next_id += 1;
        Ok(id)
    }

    pub const fn capacity(side: Side) -> usize {
        match side {
            Side::Party => BattleConfig::MAX_PARTY,
            Side::Troop => BattleConfig::MAX_TROOP,
        }
    }

    pub fn members(&self, side: Side) -> &[Combatant] {
        match side {
            Side::Party => &self.party,
            Side::Troop => &self.troop,
        }
    }

    fn members_mut(&mut self, side: Side) -> &mut [Combatant] {
        match side {
            Side::Party => &mut self.party,
            Side::Troop => &mut self.troop,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.party.iter().chain(self.troop.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Combatant> {
        self.party.iter_mut().chain(self.troop.iter_mut())
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.iter().find(|c| c.id == id)
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.iter_mut().find(|c| c.id == id)
    }

    /// Like [`Self::combatant`], but a missing id is an error.
    pub fn get(&self, id: CombatantId) -> Result<&Combatant, StateError> {
        self.combatant(id).ok_or(StateError::UnknownCombatant(id))
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Result<&mut Combatant, StateError> {
        self.combatant_mut(id).ok_or(StateError::UnknownCombatant(id))
    }

    /// Member at a position within its side.
    pub fn member_at(&self, side: Side, index: usize) -> Option<&Combatant> {
        self.members(side).get(index)
    }

    /// Position of a combatant within its side.
    pub fn index_of(&self, id: CombatantId) -> Option<(Side, usize)> {
        [Side::Party, Side::Troop].into_iter().find_map(|side| {
            self.members(side)
                .iter()
                .position(|c| c.id == id)
                .map(|index| (side, index))
        })
    }

    pub fn alive(&self, side: Side) -> impl Iterator<Item = &Combatant> {
        self.members(side).iter().filter(|c| c.is_alive())
    }

    pub fn dead(&self, side: Side) -> impl Iterator<Item = &Combatant> {
        self.members(side).iter().filter(|c| c.is_dead())
    }

    pub fn alive_ids(&self, side: Side) -> Vec<CombatantId> {
        self.alive(side).map(|c| c.id).collect()
    }

    pub fn dead_ids(&self, side: Side) -> Vec<CombatantId> {
        self.dead(side).map(|c| c.id).collect()
    }

    pub fn is_side_defeated(&self, side: Side) -> bool {
        self.alive(side).next().is_none()
    }

    /// Wipes per-action transient fields on every member of both sides.
    pub fn reset_scratch(&mut self) {
        for side in [Side::Party, Side::Troop] {
            for member in self.members_mut(side) {
                member.scratch.reset();
            }
        }
    }

    /// Consumes a nonce for one action application.
    pub fn next_nonce(&mut self) -> u64 {
        self.nonce = self.nonce.wrapping_add(1);
        self.nonce
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slime(name: &str) -> Combatant {
        let mut c = Combatant::new(
            CombatantId(0),
            name,
            Side::Troop,
            CombatantKind::Enemy { enemy: EnemyId(1) },
        );
        c.hp = 10;
        c
    }

    #[test]
    fn join_assigns_unique_ids_and_positions() {
        let mut battle = BattleState::new(7);
        let a = battle.join(slime("A")).unwrap();
        let b = battle.join(slime("B")).unwrap();
        assert_ne!(a, b);
        assert_eq!(battle.index_of(b), Some((Side::Troop, 1)));
        assert_eq!(battle.get(a).unwrap().name, "A");
    }

    #[test]
    fn join_rejects_full_side() {
        let mut battle = BattleState::new(7);
        for _ in 0..BattleConfig::MAX_TROOP {
            battle.join(slime("S")).unwrap();
        }
        assert!(matches!(
            battle.join(slime("Extra")),
            Err(StateError::SideFull { side: Side::Troop, .. })
        ));
    }

    #[test]
    fn alive_and_dead_partitions() {
        let mut battle = BattleState::new(7);
        let a = battle.join(slime("A")).unwrap();
        battle.join(slime("B")).unwrap();
        battle.get_mut(a).unwrap().die();
        assert_eq!(battle.alive(Side::Troop).count(), 1);
        assert_eq!(battle.dead_ids(Side::Troop), vec![a]);
        assert!(!battle.is_side_defeated(Side::Troop));
    }

    #[test]
    fn reset_scratch_clears_all_members() {
        let mut battle = BattleState::new(7);
        let a = battle.join(slime("A")).unwrap();
        let b = battle.join(slime("B")).unwrap();
        battle.get_mut(a).unwrap().scratch.paired_opponent = Some(b);
        battle.reset_scratch();
        assert!(battle.iter().all(|c| c.scratch.is_clear()));
    }
}
