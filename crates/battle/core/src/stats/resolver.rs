//! Effective stat resolution.
//!
//! ```text
//! param  = clamp((base + equipment) × state rates × combos, floor, PARAM_MAX) + links
//! xparam = (base + equipment + state offsets + flat combos) × percent combos
//! ```
//!
//! Combo rules only contribute while the combatant has a paired opponent and
//! that opponent carries the rule's required state. Link sources are read
//! without their own links, so mutually linked params cannot recurse.

use super::{Bonus, BonusStack, ParamId, ParamTable, StatKey, XParamId, XParamTable};
use crate::config::BattleConfig;
use crate::env::{BattleEnv, OracleError};
use crate::rules::{LinkRule, Tags};
use crate::state::{BattleState, Combatant, CombatantKind};

/// Resolves stats for combatants of one battle.
pub struct StatResolver<'a> {
    env: BattleEnv<'a>,
    config: &'a BattleConfig,
    battle: &'a BattleState,
}

impl<'a> StatResolver<'a> {
    pub fn new(env: BattleEnv<'a>, config: &'a BattleConfig, battle: &'a BattleState) -> Self {
        Self {
            env,
            config,
            battle,
        }
    }

    /// Effective value of a primary param, links included.
    pub fn param(&self, who: &Combatant, param: ParamId) -> Result<i32, OracleError> {
        let value = self.param_without_links(who, param)?;
        let links = self.links(who)?;
        let mut bonus = 0;
        for link in links.iter().filter(|l| l.target == param) {
            bonus += link.contribution(self.param_without_links(who, link.source)?);
        }
        Ok(value + bonus)
    }

    /// Param value before link bonuses are added.
    pub fn param_without_links(&self, who: &Combatant, param: ParamId) -> Result<i32, OracleError> {
        let floor = self.config.param_floors.floor(param);
        let (base, equipment) = self.param_base(who)?;
        let mut base = base[param];
        if base == 1 && floor == 0 {
            base = 0;
        }

        let mut stack = BonusStack::new();
        stack.add(Bonus::flat(equipment[param]));
        for state in who.states.iter() {
            let data = self.env.state(state)?;
            stack.extend(
                data.param_rates
                    .iter()
                    .filter(|(p, _)| *p == param)
                    .map(|(_, rate)| Bonus::rate(*rate)),
            );
        }
        stack.extend(self.combo_bonuses(who, StatKey::Param(param))?);

        Ok(stack.apply(base, floor, BattleConfig::PARAM_MAX))
    }

    /// Effective value of an ex-param, in percentage points.
    pub fn xparam(&self, who: &Combatant, xparam: XParamId) -> Result<i32, OracleError> {
        let base = self.xparam_base(who)?;

        let mut stack = BonusStack::new();
        for state in who.states.iter() {
            let data = self.env.state(state)?;
            stack.extend(
                data.xparam_offsets
                    .iter()
                    .filter(|(x, _)| *x == xparam)
                    .map(|(_, offset)| Bonus::flat(*offset)),
            );
        }
        stack.extend(self.combo_bonuses(who, StatKey::XParam(xparam))?);

        Ok(stack.apply_unclamped(base[xparam]))
    }

    /// Combo modifiers on `stat` that currently apply to `who`.
    pub fn combo_bonuses(&self, who: &Combatant, stat: StatKey) -> Result<Vec<Bonus>, OracleError> {
        let Some(opponent) = who
            .scratch
            .paired_opponent
            .and_then(|id| self.battle.combatant(id))
        else {
            return Ok(Vec::new());
        };

        let mut bonuses = Vec::new();
        for state in who.states.iter() {
            let data = self.env.state(state)?;
            if let Some(rule) = data.tags.combo
                && rule.stat == stat
                && opponent.has_state(rule.required_state)
            {
                bonuses.push(rule.bonus());
            }
        }
        Ok(bonuses)
    }

    /// (definition params, equipment flat bonuses)
    fn param_base(&self, who: &Combatant) -> Result<(ParamTable, ParamTable), OracleError> {
        let battlers = self.env.battlers()?;
        match &who.kind {
            CombatantKind::Ally {
                class, equipment, ..
            } => {
                let class = battlers.class(*class).ok_or(OracleError::ClassNotFound(*class))?;
                let items = self.env.items()?;
                let bonus = equipment
                    .iter()
                    .filter_map(|id| items.equipment(*id))
                    .fold(ParamTable::default(), |acc, e| acc.plus(&e.params));
                Ok((class.params_at(who.level), bonus))
            }
            CombatantKind::Enemy { enemy } => {
                let enemy = battlers.enemy(*enemy).ok_or(OracleError::EnemyNotFound(*enemy))?;
                Ok((enemy.params, ParamTable::default()))
            }
        }
    }

    fn xparam_base(&self, who: &Combatant) -> Result<XParamTable, OracleError> {
        let battlers = self.env.battlers()?;
        match &who.kind {
            CombatantKind::Ally {
                class, equipment, ..
            } => {
                let class = battlers.class(*class).ok_or(OracleError::ClassNotFound(*class))?;
                let items = self.env.items()?;
                Ok(equipment
                    .iter()
                    .filter_map(|id| items.equipment(*id))
                    .fold(class.xparams, |acc, e| acc.plus(&e.xparams)))
            }
            CombatantKind::Enemy { enemy } => battlers
                .enemy(*enemy)
                .map(|e| e.xparams)
                .ok_or(OracleError::EnemyNotFound(*enemy)),
        }
    }

    /// Link rules come from the class (allies) or the species (enemies).
    fn links(&self, who: &Combatant) -> Result<&'a [LinkRule], OracleError> {
        Ok(&self.definition_tags(who)?.links)
    }

    fn definition_tags(&self, who: &Combatant) -> Result<&'a Tags, OracleError> {
        let battlers = self.env.battlers()?;
        match &who.kind {
            CombatantKind::Ally { class, .. } => battlers
                .class(*class)
                .map(|c| &c.tags)
                .ok_or(OracleError::ClassNotFound(*class)),
            CombatantKind::Enemy { enemy } => battlers
                .enemy(*enemy)
                .map(|e| &e.tags)
                .ok_or(OracleError::EnemyNotFound(*enemy)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParamFloors;
    use crate::env::{ClassData, DatabaseSnapshot, EnemyData, PcgRng, StateData};
    use crate::rules::{ComboRule, LinkRule, Tags};
    use crate::state::{ClassId, CombatantId, EnemyId, Side, StateId};

    const STUNNED: StateId = StateId(4);
    const EVASIVE: StateId = StateId(10);
    const FOCUSED: StateId = StateId(11);

    fn database() -> DatabaseSnapshot {
        let links = Tags::default()
            .with_link(LinkRule::parse("link mhp", "50 def").unwrap().unwrap())
            .with_link(LinkRule::parse("link mhp", "100 agi").unwrap().unwrap());
        DatabaseSnapshot::new()
            .with_enemy(
                EnemyData::new(EnemyId(1), "Imp", ParamTable::new([100, 1, 10, 20, 5, 5, 8, 1]))
                    .with_xparams(XParamTable::new([95, 40, 4, 0, 0, 0, 0, 0, 0, 0])),
            )
            .with_class(
                ClassData::new(ClassId(1), "Monk", ParamTable::new([1, 1, 12, 10, 4, 4, 6, 3]))
                    .with_growth(ParamTable::new([0, 0, 2, 0, 0, 0, 0, 0]))
                    .with_tags(links),
            )
            .with_state(StateData::new(STUNNED, "Stunned"))
            .with_state(
                StateData::new(EVASIVE, "Evasive")
                    .with_tags(Tags::default().with_combo("eva, -50%, 4".parse::<ComboRule>().unwrap())),
            )
            .with_state(
                StateData::new(FOCUSED, "Focused")
                    .with_tags(Tags::default().with_combo("hit, +10, 4".parse::<ComboRule>().unwrap())),
            )
            .with_state(
                StateData::new(StateId(12), "Sharp")
                    .with_tags(Tags::default().with_combo("hit, +20, 4".parse::<ComboRule>().unwrap())),
            )
            .with_state(StateData::new(StateId(13), "Blurred").with_tags(
                Tags::default().with_combo("eva, -50%, 4".parse::<ComboRule>().unwrap()),
            ))
    }

    fn imp(battle: &mut BattleState) -> CombatantId {
        let mut c = Combatant::new(
            CombatantId(0),
            "Imp",
            Side::Troop,
            CombatantKind::Enemy { enemy: EnemyId(1) },
        );
        c.hp = 100;
        battle.join(c).unwrap()
    }

    fn monk(battle: &mut BattleState, level: u32) -> CombatantId {
        let mut c = Combatant::new(
            CombatantId(0),
            "Monk",
            Side::Party,
            CombatantKind::Ally {
                actor: crate::state::ActorId(1),
                class: ClassId(1),
                equipment: Default::default(),
            },
        );
        c.level = level;
        c.hp = 10;
        battle.join(c).unwrap()
    }

    #[test]
    fn combos_need_a_paired_opponent_with_the_required_state() {
        let db = database();
        let config = BattleConfig::default();
        let mut battle = BattleState::new(1);
        let target = imp(&mut battle);
        let subject = monk(&mut battle, 1);
        {
            let t = battle.get_mut(target).unwrap();
            t.add_state(EVASIVE);
            t.add_state(StateId(13));
        }

        let env = BattleEnv::from_database(&db, &PcgRng);
        let resolver = StatResolver::new(env, &config, &battle);
        let t = battle.get(target).unwrap();
        assert_eq!(resolver.xparam(t, XParamId::Evasion).unwrap(), 40);

        // Paired, but the opponent lacks the required state.
        battle.get_mut(target).unwrap().scratch.paired_opponent = Some(subject);
        let resolver = StatResolver::new(env, &config, &battle);
        let t = battle.get(target).unwrap();
        assert_eq!(resolver.xparam(t, XParamId::Evasion).unwrap(), 40);

        battle.get_mut(subject).unwrap().add_state(STUNNED);
        let resolver = StatResolver::new(env, &config, &battle);
        let t = battle.get(target).unwrap();
        assert_eq!(resolver.xparam(t, XParamId::Evasion).unwrap(), 40 / 2 / 2);
    }

    #[test]
    fn additive_combos_sum_from_base() {
        let db = database();
        let config = BattleConfig::default();
        let mut battle = BattleState::new(1);
        let target = imp(&mut battle);
        let subject = monk(&mut battle, 1);
        battle.get_mut(subject).unwrap().add_state(STUNNED);
        {
            let t = battle.get_mut(target).unwrap();
            t.add_state(FOCUSED);
            t.add_state(StateId(12));
            t.scratch.paired_opponent = Some(subject);
        }
        let env = BattleEnv::from_database(&db, &PcgRng);
        let resolver = StatResolver::new(env, &config, &battle);
        let t = battle.get(target).unwrap();
        assert_eq!(resolver.xparam(t, XParamId::Hit).unwrap(), 95 + 10 + 20);
    }

    #[test]
    fn class_growth_and_default_floor() {
        let db = database();
        let config = BattleConfig::default();
        let mut battle = BattleState::new(1);
        let id = monk(&mut battle, 3);
        let env = BattleEnv::from_database(&db, &PcgRng);
        let resolver = StatResolver::new(env, &config, &battle);
        let m = battle.get(id).unwrap();
        assert_eq!(resolver.param(m, ParamId::Attack).unwrap(), 16);
        // Base 1 with the default floor of 1 stays 1.
        assert_eq!(resolver.param_without_links(m, ParamId::MaxHp).unwrap(), 1);
    }

    #[test]
    fn zero_floor_makes_a_stat_fully_derived() {
        let db = database();
        let config =
            BattleConfig::default().with_param_floors(ParamFloors::default().with(ParamId::MaxHp, 0));
        let mut battle = BattleState::new(1);
        let id = monk(&mut battle, 1);
        let env = BattleEnv::from_database(&db, &PcgRng);
        let resolver = StatResolver::new(env, &config, &battle);
        let m = battle.get(id).unwrap();
        // 0 + round(10 × 50%) + round(6 × 100%)
        assert_eq!(resolver.param(m, ParamId::MaxHp).unwrap(), 11);
    }

    #[test]
    fn max_mp_defaults_to_zero_floor() {
        let db = database();
        let config = BattleConfig::default();
        let mut battle = BattleState::new(1);
        let id = imp(&mut battle);
        let env = BattleEnv::from_database(&db, &PcgRng);
        let resolver = StatResolver::new(env, &config, &battle);
        let i = battle.get(id).unwrap();
        assert_eq!(resolver.param(i, ParamId::MaxMp).unwrap(), 0);
        assert_eq!(resolver.param(i, ParamId::Luck).unwrap(), 1);
    }
}
