//! Active status effects on a combatant.
//!
//! Order is the order states were added. It matters: the first state that
//! defines a first strike directive wins.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::state::StateId;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusList {
    states: ArrayVec<StateId, { BattleConfig::MAX_STATES }>,
}

impl StatusList {
    pub fn empty() -> Self {
        Self {
            states: ArrayVec::new(),
        }
    }

    pub fn contains(&self, state: StateId) -> bool {
        self.states.contains(&state)
    }

    /// Adds a state. Returns `false` if already present or the list is full.
    pub fn add(&mut self, state: StateId) -> bool {
        if self.contains(state) {
            return false;
        }
        self.states.try_push(state).is_ok()
    }

    /// Removes a state. Returns `false` if it was not present.
    pub fn remove(&mut self, state: StateId) -> bool {
        match self.states.iter().position(|s| *s == state) {
            Some(index) => {
                self.states.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent_and_ordered() {
        let mut list = StatusList::empty();
        assert!(list.add(StateId(3)));
        assert!(list.add(StateId(1)));
        assert!(!list.add(StateId(3)));
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![StateId(3), StateId(1)]);
    }

    #[test]
    fn remove_reports_presence() {
        let mut list = StatusList::empty();
        list.add(StateId(2));
        assert!(list.remove(StateId(2)));
        assert!(!list.remove(StateId(2)));
        assert!(list.is_empty());
    }

    #[test]
    fn full_list_rejects_new_states() {
        let mut list = StatusList::empty();
        for id in 0..BattleConfig::MAX_STATES as u32 {
            assert!(list.add(StateId(id)));
        }
        assert!(!list.add(StateId(999)));
    }
}
