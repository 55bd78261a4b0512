//src/combat/src/engine.rs
//! 回合制遭遇引擎
//!
//! 单线程同步推进：调用方每回合送入一个行动，引擎按固定顺序结算
//! 并返回事件流。一场遭遇必然走到终态，中途不等待、不超时。

use hero::{Character, SkillEffect, SkillId};
use items::Modifier;
use stats::StatsRecorder;

use crate::action::PlayerAction;
use crate::event::{CombatEvent, Target};
use crate::monster::{BossSkillKind, EncounterKind, Monster};

/// 中毒每回合的固定伤害
pub const POISON_TICK_DAMAGE: u32 = 5;

/// 普通怪物命中后施加异常状态的概率
const ABILITY_PROC_CHANCE: f64 = 0.25;

/// Boss脚本技能的施放节奏（每第N回合）
const BOSS_SKILL_CADENCE: u32 = 3;

/// 遭遇状态机
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EncounterState {
    #[default]
    Active,
    HeroVictory,
    HeroDefeat,
}

/// 一场从接敌到分出胜负的完整战斗
///
/// 只在遭遇期间借用角色；战斗产生的金币、经验、状态直接写回角色。
pub struct Encounter<'a> {
    pub hero: &'a mut Character,
    pub monster: Monster,
    pub kind: EncounterKind,
    round: u32,
    state: EncounterState,
    // 限时增益计数器，回合末递减
    berserk_turns: u32,
    berserk_bonus: f64,
    frost_armor_turns: u32,
    frost_armor_bonus: f64,
    boss_skill_cursor: usize,
}

impl<'a> Encounter<'a> {
    /// 生成对手并开始遭遇
    pub fn start(
        hero: &'a mut Character,
        kind: EncounterKind,
        stats: &mut impl StatsRecorder,
    ) -> Self {
        stats.record_battle_start();
        let monster = Monster::generate(kind, hero.level, &mut hero.rng);
        Self::with_monster(hero, monster, kind)
    }

    /// 用现成的对手开始遭遇（测试和剧情战用）
    pub fn with_monster(hero: &'a mut Character, monster: Monster, kind: EncounterKind) -> Self {
        Self {
            hero,
            monster,
            kind,
            round: 0,
            state: EncounterState::Active,
            berserk_turns: 0,
            berserk_bonus: 0.0,
            frost_armor_turns: 0,
            frost_armor_bonus: 0.0,
            boss_skill_cursor: 0,
        }
    }

    pub fn state(&self) -> EncounterState {
        self.state
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// 推进一个回合
    ///
    /// 固定顺序：回合常驻效果 → 玩家行动 → 对手行动 → 双方状态结算
    /// → 限时计数器递减。每一步之后都检查终态。
    pub fn play_round(
        &mut self,
        action: PlayerAction,
        stats: &mut impl StatsRecorder,
    ) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        if self.state != EncounterState::Active {
            return events;
        }

        self.round += 1;
        events.push(CombatEvent::RoundStarted { round: self.round });

        // (a) 每回合生命恢复（饰品词条、秘法套装等折算而来）
        let regen = self.hero.modifier(Modifier::HpRegen) as u32;
        if regen > 0 && self.hero.current_hp < self.hero.effective().max_hp {
            self.hero.heal(regen);
            events.push(CombatEvent::Regen { amount: regen });
        }

        // (b) 玩家行动
        self.resolve_player_action(action, stats, &mut events);
        if !self.monster.is_alive() {
            self.finish_victory(stats, &mut events);
            return events;
        }

        // (c) 对手行动
        self.resolve_monster_action(&mut events);
        if !self.hero.is_alive() {
            self.finish_defeat(stats, &mut events);
            return events;
        }

        // (d) 双方状态结算
        self.tick_statuses(&mut events);
        if !self.monster.is_alive() {
            self.finish_victory(stats, &mut events);
            return events;
        }
        if !self.hero.is_alive() {
            self.finish_defeat(stats, &mut events);
            return events;
        }

        // (e) 限时计数器递减
        if self.berserk_turns > 0 {
            self.berserk_turns -= 1;
        }
        if self.frost_armor_turns > 0 {
            self.frost_armor_turns -= 1;
        }

        events
    }

    fn resolve_player_action(
        &mut self,
        action: PlayerAction,
        stats: &mut impl StatsRecorder,
        events: &mut Vec<CombatEvent>,
    ) {
        match action {
            PlayerAction::Attack => self.hero_basic_attack(stats, events),
            PlayerAction::Potion => {
                let before = self.hero.current_hp;
                if self.hero.drink_potion() {
                    events.push(CombatEvent::PotionDrunk {
                        amount: self.hero.current_hp - before,
                        remaining: self.hero.potions,
                    });
                } else {
                    // 没有药水：不报错，退化为普通攻击
                    events.push(CombatEvent::PotionEmpty);
                    self.hero_basic_attack(stats, events);
                }
            }
            PlayerAction::Skill(id) => self.hero_skill(id, stats, events),
        }
    }

    fn hero_basic_attack(&mut self, stats: &mut impl StatsRecorder, events: &mut Vec<CombatEvent>) {
        if self.monster_dodges() {
            events.push(CombatEvent::MonsterDodged);
            return;
        }

        let (damage, crit) = self.roll_hero_damage(0.0, 0.0, true);
        self.monster.take_damage(damage);
        stats.record_damage_dealt(damage);
        events.push(CombatEvent::HeroAttack { damage, crit });
        self.apply_lifesteal(damage, events);
    }

    fn hero_skill(
        &mut self,
        id: SkillId,
        stats: &mut impl StatsRecorder,
        events: &mut Vec<CombatEvent>,
    ) {
        let tree = self.hero.skill_tree();
        let learned = self.hero.skills.get(&id).copied().unwrap_or(0);
        let Some(node) = tree.node(id) else {
            // 非本职业技能：退化为普通攻击
            self.hero_basic_attack(stats, events);
            return;
        };
        if learned == 0 {
            self.hero_basic_attack(stats, events);
            return;
        }

        let value = tree.effect(id, 0, &self.hero.skills);
        let effect = node.effect;
        if !matches!(effect, SkillEffect::Passive { .. }) {
            stats.record_skill_used(&id.to_string());
        }

        match effect {
            SkillEffect::Strike => {
                if self.monster_dodges() {
                    events.push(CombatEvent::MonsterDodged);
                    return;
                }
                let (damage, crit) = self.roll_hero_damage(value, 0.0, true);
                self.monster.take_damage(damage);
                stats.record_damage_dealt(damage);
                events.push(CombatEvent::HeroSkill {
                    skill: id,
                    damage,
                    crit,
                    hits: 1,
                });
                self.apply_lifesteal(damage, events);
            }
            SkillEffect::MultiHit { hits } => {
                if self.monster_dodges() {
                    events.push(CombatEvent::MonsterDodged);
                    return;
                }
                // 连击每段按原始值保底，不减防御
                let mut total = 0;
                let mut any_crit = false;
                for _ in 0..hits {
                    let (damage, crit) = self.roll_hero_damage(value, 0.0, false);
                    total += damage;
                    any_crit |= crit;
                }
                self.monster.take_damage(total);
                stats.record_damage_dealt(total);
                events.push(CombatEvent::HeroSkill {
                    skill: id,
                    damage: total,
                    crit: any_crit,
                    hits,
                });
                self.apply_lifesteal(total, events);
            }
            SkillEffect::Heal => {
                let amount = value as u32;
                self.hero.heal(amount);
                events.push(CombatEvent::Healed {
                    target: Target::Hero,
                    amount,
                });
            }
            SkillEffect::Afflict { status, duration } => {
                if self.monster_dodges() {
                    events.push(CombatEvent::MonsterDodged);
                    return;
                }
                // 效果值作为本次打击的固定附加伤害
                let (damage, crit) = self.roll_hero_damage(0.0, value, true);
                self.monster.take_damage(damage);
                stats.record_damage_dealt(damage);
                self.monster.statuses.add(status, duration);
                events.push(CombatEvent::HeroSkill {
                    skill: id,
                    damage,
                    crit,
                    hits: 1,
                });
                events.push(CombatEvent::StatusApplied {
                    target: Target::Monster,
                    status,
                    duration,
                });
                self.apply_lifesteal(damage, events);
            }
            SkillEffect::Rally { offensive, turns } => {
                if offensive {
                    self.berserk_turns = turns;
                    self.berserk_bonus = value;
                } else {
                    self.frost_armor_turns = turns;
                    self.frost_armor_bonus = value;
                }
                events.push(CombatEvent::RallyRaised { offensive, turns });
            }
            SkillEffect::Passive { .. } => {
                // 被动技能无法主动施放
                self.hero_basic_attack(stats, events);
            }
        }
    }

    /// 玩家侧伤害掷骰
    ///
    /// 顺序固定：基础掷骰 → 首回合加成 → 技能倍率 → 暴击判定与倍率
    /// → 固定元素/背刺附加 → 减防御（或按原始值）保底1。
    fn roll_hero_damage(
        &mut self,
        skill_multiplier: f64,
        flat_bonus: f64,
        subtract_defense: bool,
    ) -> (u32, bool) {
        let mut attack =
            self.hero.effective().attack as f64 * self.hero.status_effects.attack_multiplier();
        if self.berserk_turns > 0 {
            attack *= 1.0 + self.berserk_bonus;
        }
        let attack = (attack as u32).max(1);

        let mut base = self.hero.rng.random_range(attack / 2..=attack) as f64;
        if self.round == 1 {
            base += self.hero.modifier(Modifier::FirstTurnDamage);
        }
        base *= 1.0 + skill_multiplier;

        // 暴击判定先于固定附加伤害
        let crit = self.hero.rng.random_bool(self.hero.modifier(Modifier::CritRate));
        if crit {
            base *= 1.5 + self.hero.modifier(Modifier::CritDamage);
        }

        base += self.hero.modifier(Modifier::FlameDamage)
            + self.hero.modifier(Modifier::FrostDamage)
            + self.hero.modifier(Modifier::Backstab)
            + flat_bonus;

        let damage = if subtract_defense {
            (base - self.monster.effective_defense() as f64).max(1.0)
        } else {
            base.max(1.0)
        };
        (damage as u32, crit)
    }

    fn monster_dodges(&mut self) -> bool {
        self.monster.dodge > 0.0 && self.hero.rng.random_bool(self.monster.dodge)
    }

    fn apply_lifesteal(&mut self, damage: u32, events: &mut Vec<CombatEvent>) {
        let rate = self.hero.modifier(Modifier::Lifesteal);
        if rate <= 0.0 {
            return;
        }
        let amount = (damage as f64 * rate) as u32;
        if amount > 0 {
            self.hero.heal(amount);
            events.push(CombatEvent::Lifesteal { amount });
        }
    }

    fn resolve_monster_action(&mut self, events: &mut Vec<CombatEvent>) {
        // 狂暴只在首次过半血时触发，攻击永久提升
        if self.monster.check_enrage() {
            events.push(CombatEvent::Enraged);
        }

        if self.kind == EncounterKind::Boss
            && self.round % BOSS_SKILL_CADENCE == 0
            && !self.monster.boss_skills.is_empty()
        {
            self.resolve_boss_skill(events);
            return;
        }

        if self.hero.rng.random_bool(self.hero.modifier(Modifier::Dodge)) {
            events.push(CombatEvent::HeroDodged);
            return;
        }

        let damage = self.monster_hit_damage(1.0);
        self.hero.take_damage(damage);
        events.push(CombatEvent::MonsterAttack { damage });

        // 命中后附带能力判定
        if let Some(ability) = self.monster.ability {
            if self.hero.rng.random_bool(ABILITY_PROC_CHANCE) {
                let (status, duration) = ability.status();
                self.hero.status_effects.add(status, duration);
                events.push(CombatEvent::StatusApplied {
                    target: Target::Hero,
                    status,
                    duration,
                });
            }
        }
    }

    /// Boss脚本技能：按固定节奏循环施放，不受闪避影响
    fn resolve_boss_skill(&mut self, events: &mut Vec<CombatEvent>) {
        let skill = self.monster.boss_skills[self.boss_skill_cursor % self.monster.boss_skills.len()];
        self.boss_skill_cursor += 1;

        match skill {
            BossSkillKind::Smash => {
                let damage = self.monster_hit_damage(1.5);
                self.hero.take_damage(damage);
                events.push(CombatEvent::BossSkill {
                    kind: skill,
                    damage,
                });
            }
            BossSkillKind::Venom => {
                self.hero
                    .status_effects
                    .add(hero::StatusKind::Poison, 3);
                events.push(CombatEvent::BossSkill {
                    kind: skill,
                    damage: 0,
                });
                events.push(CombatEvent::StatusApplied {
                    target: Target::Hero,
                    status: hero::StatusKind::Poison,
                    duration: 3,
                });
            }
            BossSkillKind::Drain => {
                let damage = self.monster_hit_damage(1.0);
                self.hero.take_damage(damage);
                self.monster.heal(damage);
                events.push(CombatEvent::BossSkill {
                    kind: skill,
                    damage,
                });
                events.push(CombatEvent::Healed {
                    target: Target::Monster,
                    amount: damage,
                });
            }
        }
    }

    /// 对手侧伤害：减防御后保底1，再按伤害减免比例折减
    fn monster_hit_damage(&mut self, multiplier: f64) -> u32 {
        let attack = self.monster.effective_attack().max(1);
        let base = self.hero.rng.random_range(attack / 2..=attack) as f64 * multiplier;

        let mut defense =
            self.hero.effective().defense as f64 * self.hero.status_effects.defense_multiplier();
        if self.frost_armor_turns > 0 {
            defense *= 1.0 + self.frost_armor_bonus;
        }

        let mut damage = (base - defense).max(1.0);
        let reduction = self.hero.modifier(Modifier::DamageReduction).clamp(0.0, 0.9);
        damage *= 1.0 - reduction;
        (damage as u32).max(1)
    }

    fn tick_statuses(&mut self, events: &mut Vec<CombatEvent>) {
        let hero_tick = self.hero.status_effects.tick(POISON_TICK_DAMAGE);
        if hero_tick.damage > 0 {
            self.hero.take_damage(hero_tick.damage);
            events.push(CombatEvent::StatusDamage {
                target: Target::Hero,
                status: hero::StatusKind::Poison,
                damage: hero_tick.damage,
            });
        }
        for status in hero_tick.expired {
            events.push(CombatEvent::StatusExpired {
                target: Target::Hero,
                status,
            });
        }

        let monster_tick = self.monster.statuses.tick(POISON_TICK_DAMAGE);
        if monster_tick.damage > 0 {
            self.monster.take_damage(monster_tick.damage);
            events.push(CombatEvent::StatusDamage {
                target: Target::Monster,
                status: hero::StatusKind::Poison,
                damage: monster_tick.damage,
            });
        }
        for status in monster_tick.expired {
            events.push(CombatEvent::StatusExpired {
                target: Target::Monster,
                status,
            });
        }
    }

    fn finish_victory(&mut self, stats: &mut impl StatsRecorder, events: &mut Vec<CombatEvent>) {
        self.state = EncounterState::HeroVictory;

        let gold = self.monster.gold_reward;
        let exp = self.monster.exp_reward;
        self.hero.gold += gold;
        stats.record_gold_earned(gold);
        let levels_gained = self.hero.gain_exp(exp);
        stats.record_battle_victory(&self.monster.name, self.kind == EncounterKind::Boss);

        events.push(CombatEvent::Victory {
            gold,
            exp,
            levels_gained,
        });
    }

    fn finish_defeat(&mut self, stats: &mut impl StatsRecorder, events: &mut Vec<CombatEvent>) {
        self.state = EncounterState::HeroDefeat;
        stats.record_battle_defeat();
        events.push(CombatEvent::Defeat);
    }
}
