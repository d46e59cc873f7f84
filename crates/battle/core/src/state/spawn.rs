//! Building combatants from their definitions.

use arrayvec::ArrayVec;

use super::{BattleState, Combatant, CombatantId, CombatantKind, Side, StateError};
use crate::config::BattleConfig;
use crate::env::{BattleEnv, OracleError};
use crate::state::{ActorId, EnemyId};
use crate::stats::{ParamId, StatResolver};

impl BattleState {
    /// Adds an ally built from its actor definition, at full HP and MP.
    pub fn join_actor(
        &mut self,
        env: &BattleEnv<'_>,
        config: &BattleConfig,
        actor: ActorId,
    ) -> Result<CombatantId, StateError> {
        let data = env
            .battlers()?
            .actor(actor)
            .ok_or(OracleError::ActorNotFound(actor))?;
        let equipment: ArrayVec<_, { BattleConfig::MAX_EQUIPMENT }> =
            data.equipment.iter().copied().take(BattleConfig::MAX_EQUIPMENT).collect();
        let mut combatant = Combatant::new(
            CombatantId(0),
            data.name.clone(),
            Side::Party,
            CombatantKind::Ally {
                actor,
                class: data.class,
                equipment,
            },
        );
        combatant.level = data.level.max(1);
        let id = self.join(combatant)?;
        self.recover_all(env, config, id)?;
        Ok(id)
    }

    /// Adds an enemy built from its species template, at full HP and MP.
    pub fn join_enemy(
        &mut self,
        env: &BattleEnv<'_>,
        config: &BattleConfig,
        enemy: EnemyId,
    ) -> Result<CombatantId, StateError> {
        let data = env
            .battlers()?
            .enemy(enemy)
            .ok_or(OracleError::EnemyNotFound(enemy))?;
        let combatant = Combatant::new(
            CombatantId(0),
            data.name.clone(),
            Side::Troop,
            CombatantKind::Enemy { enemy },
        );
        let id = self.join(combatant)?;
        self.recover_all(env, config, id)?;
        Ok(id)
    }

    /// Restores HP and MP to their effective maximums and clears states.
    pub fn recover_all(
        &mut self,
        env: &BattleEnv<'_>,
        config: &BattleConfig,
        id: CombatantId,
    ) -> Result<(), StateError> {
        let (max_hp, max_mp) = {
            let stats = StatResolver::new(*env, config, self);
            let who = self.get(id)?;
            (
                stats.param(who, ParamId::MaxHp)?,
                stats.param(who, ParamId::MaxMp)?,
            )
        };
        let who = self.get_mut(id)?;
        who.states.clear();
        who.hp = max_hp;
        who.mp = max_mp;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ActorData, ClassData, DatabaseSnapshot, EnemyData, PcgRng};
    use crate::state::ClassId;
    use crate::stats::ParamTable;

    #[test]
    fn joined_members_start_at_full_resources() {
        let db = DatabaseSnapshot::new()
            .with_class(ClassData::new(ClassId(1), "Mage", ParamTable::new([80, 40, 5, 5, 20, 20, 7, 7])))
            .with_actor(ActorData::new(ActorId(1), "Ilse", ClassId(1)))
            .with_enemy(EnemyData::new(EnemyId(1), "Wisp", ParamTable::new([30, 10, 4, 4, 4, 4, 4, 4])));
        let env = BattleEnv::from_database(&db, &PcgRng);
        let config = BattleConfig::default();
        let mut battle = BattleState::new(0);

        let ilse = battle.join_actor(&env, &config, ActorId(1)).unwrap();
        let wisp = battle.join_enemy(&env, &config, EnemyId(1)).unwrap();
        assert_eq!(battle.get(ilse).unwrap().hp, 80);
        assert_eq!(battle.get(ilse).unwrap().mp, 40);
        assert_eq!(battle.get(wisp).unwrap().hp, 30);
        assert_eq!(battle.get(wisp).unwrap().side, Side::Troop);
    }

    #[test]
    fn unknown_definition_is_an_error() {
        let db = DatabaseSnapshot::new();
        let env = BattleEnv::from_database(&db, &PcgRng);
        let mut battle = BattleState::new(0);
        assert!(matches!(
            battle.join_enemy(&env, &BattleConfig::default(), EnemyId(9)),
            Err(StateError::Oracle(OracleError::EnemyNotFound(_)))
        ));
    }
}
