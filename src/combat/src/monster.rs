//src/combat/src/monster.rs
//! 怪物与Boss生成
//!
//! 怪物是战斗的临时产物，不持久化；从模板掷定属性，随角色等级缩放。

use std::ops::RangeInclusive;

use hero::{GameRng, StatusEffects, StatusKind};
use serde::{Deserialize, Serialize};

/// 每个角色等级带来的怪物属性缩放比例
const LEVEL_SCALING: f64 = 0.15;

/// 遭遇类型
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterKind {
    #[default]
    Normal,
    Boss,
    Ghost, // 幽灵变体：低属性高闪避
}

/// 普通怪物的命中附带能力
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialAbility {
    Poison, // 命中概率施加中毒
    Frost,  // 命中概率施加冻伤（削减攻击）
}

impl SpecialAbility {
    pub fn status(&self) -> (StatusKind, u32) {
        match self {
            SpecialAbility::Poison => (StatusKind::Poison, 3),
            SpecialAbility::Frost => (StatusKind::Frostbite, 2),
        }
    }
}

/// Boss的脚本技能种类
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossSkillKind {
    Smash, // 重压：1.5倍攻击
    Venom, // 毒息：施加中毒
    Drain, // 汲取：造成伤害并回复自身
}

/// 怪物模板（属性范围，生成时掷定）
struct MonsterTemplate {
    name: &'static str,
    hp: RangeInclusive<u32>,
    attack: RangeInclusive<u32>,
    defense: RangeInclusive<u32>,
    gold: RangeInclusive<u32>,
    exp: RangeInclusive<u32>,
    dodge: f64,
    ability: Option<SpecialAbility>,
    boss_skills: &'static [BossSkillKind],
}

const NORMAL_TEMPLATES: &[MonsterTemplate] = &[
    MonsterTemplate {
        name: "哥布林",
        hp: 40..=60,
        attack: 10..=16,
        defense: 2..=5,
        gold: 15..=30,
        exp: 25..=40,
        dodge: 0.0,
        ability: None,
        boss_skills: &[],
    },
    MonsterTemplate {
        name: "毒蛇",
        hp: 30..=45,
        attack: 12..=18,
        defense: 1..=3,
        gold: 18..=35,
        exp: 30..=45,
        dodge: 0.05,
        ability: Some(SpecialAbility::Poison),
        boss_skills: &[],
    },
    MonsterTemplate {
        name: "冰霜野狼",
        hp: 45..=65,
        attack: 11..=17,
        defense: 3..=6,
        gold: 18..=35,
        exp: 30..=45,
        dodge: 0.0,
        ability: Some(SpecialAbility::Frost),
        boss_skills: &[],
    },
];

const GHOST_TEMPLATE: MonsterTemplate = MonsterTemplate {
    name: "幽灵",
    hp: 25..=40,
    attack: 9..=14,
    defense: 0..=2,
    gold: 25..=45,
    exp: 40..=60,
    dodge: 0.30,
    ability: None,
    boss_skills: &[],
};

const BOSS_TEMPLATE: MonsterTemplate = MonsterTemplate {
    name: "深渊巨龙",
    hp: 180..=220,
    attack: 20..=28,
    defense: 8..=12,
    gold: 150..=250,
    exp: 200..=300,
    dodge: 0.0,
    ability: None,
    boss_skills: &[BossSkillKind::Smash, BossSkillKind::Venom, BossSkillKind::Drain],
};

/// 一场遭遇中的对手
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Monster {
    pub name: String,
    pub max_hp: u32,
    pub current_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub dodge: f64,
    pub gold_reward: u32,
    pub exp_reward: u32,
    pub ability: Option<SpecialAbility>,
    pub boss_skills: Vec<BossSkillKind>,
    pub statuses: StatusEffects,
    pub enraged: bool,
}

impl Monster {
    /// 按遭遇类型和角色等级生成对手
    pub fn generate(kind: EncounterKind, hero_level: u32, rng: &mut GameRng) -> Self {
        let template = match kind {
            EncounterKind::Normal => {
                let idx = rng.random_range(0..NORMAL_TEMPLATES.len());
                &NORMAL_TEMPLATES[idx]
            }
            EncounterKind::Ghost => &GHOST_TEMPLATE,
            EncounterKind::Boss => &BOSS_TEMPLATE,
        };
        Self::from_template(template, hero_level, rng)
    }

    fn from_template(template: &MonsterTemplate, hero_level: u32, rng: &mut GameRng) -> Self {
        let scale = 1.0 + LEVEL_SCALING * hero_level.saturating_sub(1) as f64;
        let roll = |rng: &mut GameRng, range: &RangeInclusive<u32>| {
            (rng.random_range(range.clone()) as f64 * scale) as u32
        };

        let max_hp = roll(rng, &template.hp);
        Self {
            name: template.name.to_string(),
            max_hp,
            current_hp: max_hp,
            attack: roll(rng, &template.attack),
            defense: roll(rng, &template.defense),
            dodge: template.dodge,
            gold_reward: roll(rng, &template.gold),
            exp_reward: roll(rng, &template.exp),
            ability: template.ability,
            boss_skills: template.boss_skills.to_vec(),
            statuses: StatusEffects::new(),
            enraged: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn take_damage(&mut self, damage: u32) {
        self.current_hp = self.current_hp.saturating_sub(damage);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current_hp = (self.current_hp + amount).min(self.max_hp);
    }

    /// 狂暴判定：首次血量跌到一半及以下时攻击永久+30%
    ///
    /// 仅触发一次，返回是否本次进入狂暴。
    pub fn check_enrage(&mut self) -> bool {
        if self.enraged || self.current_hp > self.max_hp / 2 {
            return false;
        }
        self.enraged = true;
        self.attack = (self.attack as f64 * 1.3) as u32;
        true
    }

    /// 当前有效攻击（含冻伤减益）
    pub fn effective_attack(&self) -> u32 {
        (self.attack as f64 * self.statuses.attack_multiplier()) as u32
    }

    /// 当前有效防御（含冰冻减益）
    pub fn effective_defense(&self) -> u32 {
        (self.defense as f64 * self.statuses.defense_multiplier()) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ghost_variant_keeps_its_dodge() {
        let mut rng = GameRng::new(5);
        let ghost = Monster::generate(EncounterKind::Ghost, 1, &mut rng);
        assert_eq!(ghost.name, "幽灵");
        assert!((ghost.dodge - 0.30).abs() < 1e-9);
    }

    #[test]
    fn boss_carries_a_skill_script() {
        let mut rng = GameRng::new(5);
        let boss = Monster::generate(EncounterKind::Boss, 1, &mut rng);
        assert_eq!(boss.boss_skills.len(), 3);
    }

    #[test]
    fn stats_scale_with_hero_level() {
        let mut rng1 = GameRng::new(9);
        let mut rng2 = GameRng::new(9);
        let low = Monster::generate(EncounterKind::Boss, 1, &mut rng1);
        let high = Monster::generate(EncounterKind::Boss, 10, &mut rng2);

        // 同种子同模板，仅等级缩放不同
        assert!(high.max_hp > low.max_hp);
        assert!(high.attack > low.attack);
    }

    #[test]
    fn enrage_fires_exactly_once() {
        let mut rng = GameRng::new(1);
        let mut boss = Monster::generate(EncounterKind::Boss, 1, &mut rng);
        let attack_before = boss.attack;

        boss.current_hp = boss.max_hp / 2;
        assert!(boss.check_enrage());
        let enraged_attack = boss.attack;
        assert!(enraged_attack > attack_before);

        boss.current_hp = 1;
        assert!(!boss.check_enrage());
        assert_eq!(boss.attack, enraged_attack);
    }
}
