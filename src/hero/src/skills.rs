//src/hero/src/skills.rs
//! 职业技能树
//!
//! 技能树本身是静态定义（每个职业一棵），已学习等级保存在角色的
//! skills映射里。升级校验基于前置技能DAG和可用技能点。

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use strum_macros::{EnumIter, EnumString};

use items::Modifier;

use crate::class::Class;
use crate::status::StatusKind;

/// 技能标识
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize, EnumIter,
    EnumString,
)]
pub enum SkillId {
    // 战士
    HeavyBlow,
    Cleave,
    IronSkin,
    BattleCry,
    Rampage,
    // 法师
    Fireball,
    FrostNova,
    ArcaneMind,
    ManaShield,
    Meteor,
    // 盗贼
    ShadowStrike,
    PoisonBlade,
    Evasion,
    TwinStrike,
    Assassinate,
    // 游侠
    AimedShot,
    Volley,
    EagleEye,
    FirstAid,
    ArrowStorm,
}

/// 技能分类（仅影响菜单排序，不影响机制）
#[derive(Copy, Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize, EnumIter)]
pub enum SkillCategory {
    Core,
    Combat,
    Passive,
    Ultimate,
}

/// 技能效果种类（封闭集合，引擎按变体分派）
#[derive(Copy, Clone, Debug, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub enum SkillEffect {
    /// 单体强击：效果值0为伤害倍率加成
    Strike,
    /// 连击：每段伤害不减防御，按原始值保底
    MultiHit { hits: u32 },
    /// 治疗：效果值0为回复量
    Heal,
    /// 施加异常状态：效果值0为附加伤害
    Afflict { status: StatusKind, duration: u32 },
    /// 限时增益：攻击或防御按效果值0的比例提升
    Rally { offensive: bool, turns: u32 },
    /// 被动：效果值0并入角色修饰符表
    Passive { modifier: Modifier },
}

/// 技能树节点
#[derive(Clone, Debug, PartialEq)]
pub struct SkillNode {
    pub id: SkillId,
    pub category: SkillCategory,
    pub effect: SkillEffect,
    pub max_level: u32,
    pub cost_per_level: u32,
    /// (前置技能, 所需等级)
    pub prerequisites: Vec<(SkillId, u32)>,
    /// 每级效果系数，按索引访问
    pub effects_per_level: Vec<f64>,
}

/// 某职业的完整技能树
#[derive(Clone, Debug)]
pub struct SkillTree {
    pub class: Class,
    nodes: Vec<SkillNode>,
}

fn node(
    id: SkillId,
    category: SkillCategory,
    effect: SkillEffect,
    max_level: u32,
    cost_per_level: u32,
    prerequisites: Vec<(SkillId, u32)>,
    effects_per_level: Vec<f64>,
) -> SkillNode {
    SkillNode {
        id,
        category,
        effect,
        max_level,
        cost_per_level,
        prerequisites,
        effects_per_level,
    }
}

impl SkillTree {
    /// 构建指定职业的技能树
    pub fn for_class(class: Class) -> Self {
        use SkillCategory::*;
        use SkillEffect::*;
        use SkillId::*;

        let nodes = match class {
            Class::Warrior => vec![
                node(HeavyBlow, Core, Strike, 5, 1, vec![], vec![0.20]),
                node(
                    Cleave,
                    Combat,
                    MultiHit { hits: 2 },
                    3,
                    1,
                    vec![(HeavyBlow, 2)],
                    vec![0.10],
                ),
                node(
                    IronSkin,
                    SkillCategory::Passive,
                    SkillEffect::Passive {
                        modifier: Modifier::DamageReduction,
                    },
                    5,
                    1,
                    vec![],
                    vec![0.03],
                ),
                node(
                    BattleCry,
                    Combat,
                    Rally {
                        offensive: true,
                        turns: 3,
                    },
                    3,
                    1,
                    vec![],
                    vec![0.10],
                ),
                node(
                    Rampage,
                    Ultimate,
                    Strike,
                    3,
                    2,
                    vec![(Cleave, 2), (BattleCry, 2)],
                    vec![0.50],
                ),
            ],
            Class::Mage => vec![
                node(Fireball, Core, Strike, 5, 1, vec![], vec![0.25]),
                node(
                    FrostNova,
                    Combat,
                    Afflict {
                        status: StatusKind::Frost,
                        duration: 2,
                    },
                    3,
                    1,
                    vec![],
                    vec![4.0],
                ),
                node(
                    ArcaneMind,
                    SkillCategory::Passive,
                    SkillEffect::Passive {
                        modifier: Modifier::CritDamage,
                    },
                    5,
                    1,
                    vec![],
                    vec![0.10],
                ),
                node(
                    ManaShield,
                    Combat,
                    Rally {
                        offensive: false,
                        turns: 3,
                    },
                    3,
                    1,
                    vec![(Fireball, 1)],
                    vec![0.15],
                ),
                node(
                    Meteor,
                    Ultimate,
                    Strike,
                    3,
                    2,
                    vec![(Fireball, 3), (FrostNova, 2)],
                    vec![0.60],
                ),
            ],
            Class::Rogue => vec![
                node(ShadowStrike, Core, Strike, 5, 1, vec![], vec![0.22]),
                node(
                    PoisonBlade,
                    Combat,
                    Afflict {
                        status: StatusKind::Poison,
                        duration: 3,
                    },
                    3,
                    1,
                    vec![],
                    vec![3.0],
                ),
                node(
                    Evasion,
                    SkillCategory::Passive,
                    SkillEffect::Passive {
                        modifier: Modifier::Dodge,
                    },
                    5,
                    1,
                    vec![],
                    vec![0.02],
                ),
                node(
                    TwinStrike,
                    Combat,
                    MultiHit { hits: 2 },
                    3,
                    1,
                    vec![(ShadowStrike, 2)],
                    vec![0.12],
                ),
                node(
                    Assassinate,
                    Ultimate,
                    Strike,
                    3,
                    2,
                    vec![(TwinStrike, 2), (PoisonBlade, 2)],
                    vec![0.55],
                ),
            ],
            Class::Ranger => vec![
                node(AimedShot, Core, Strike, 5, 1, vec![], vec![0.20]),
                node(
                    Volley,
                    Combat,
                    MultiHit { hits: 3 },
                    3,
                    1,
                    vec![(AimedShot, 2)],
                    vec![0.08],
                ),
                node(
                    EagleEye,
                    SkillCategory::Passive,
                    SkillEffect::Passive {
                        modifier: Modifier::CritRate,
                    },
                    5,
                    1,
                    vec![],
                    vec![0.03],
                ),
                node(FirstAid, Combat, Heal, 3, 1, vec![], vec![20.0]),
                node(
                    ArrowStorm,
                    Ultimate,
                    Strike,
                    3,
                    2,
                    vec![(Volley, 2), (EagleEye, 1)],
                    vec![0.50],
                ),
            ],
        };

        Self { class, nodes }
    }

    pub fn nodes(&self) -> &[SkillNode] {
        &self.nodes
    }

    pub fn node(&self, id: SkillId) -> Option<&SkillNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// 校验一次升级是否可行
    ///
    /// 条件：节点属于本树、未到上限、所有前置满足、技能点足够。
    pub fn can_upgrade(
        &self,
        id: SkillId,
        learned: &HashMap<SkillId, u32>,
        skill_points: u32,
    ) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };

        let current = learned.get(&id).copied().unwrap_or(0);
        if current >= node.max_level {
            return false;
        }

        if skill_points < node.cost_per_level {
            return false;
        }

        node.prerequisites
            .iter()
            .all(|(prereq, required)| learned.get(prereq).copied().unwrap_or(0) >= *required)
    }

    /// 执行升级
    ///
    /// 成功时等级+1并返回(true, 扣费后剩余点数)；失败不做任何修改。
    pub fn upgrade(
        &self,
        id: SkillId,
        learned: &mut HashMap<SkillId, u32>,
        skill_points: u32,
    ) -> (bool, u32) {
        if !self.can_upgrade(id, learned, skill_points) {
            return (false, skill_points);
        }

        // can_upgrade已确认节点存在且费用足额
        let cost = self.node(id).map(|n| n.cost_per_level).unwrap_or(0);
        *learned.entry(id).or_insert(0) += 1;
        (true, skill_points - cost)
    }

    /// 按已学等级取效果值：effects_per_level[index] × 当前等级
    ///
    /// 未学习、索引越界均返回0。
    pub fn effect(&self, id: SkillId, index: usize, learned: &HashMap<SkillId, u32>) -> f64 {
        let level = learned.get(&id).copied().unwrap_or(0);
        if level == 0 {
            return 0.0;
        }

        self.node(id)
            .and_then(|n| n.effects_per_level.get(index))
            .map(|coeff| coeff * level as f64)
            .unwrap_or(0.0)
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SkillId::HeavyBlow => "重击",
            SkillId::Cleave => "横扫",
            SkillId::IronSkin => "铁壁",
            SkillId::BattleCry => "战吼",
            SkillId::Rampage => "狂暴冲锋",
            SkillId::Fireball => "火球术",
            SkillId::FrostNova => "冰霜新星",
            SkillId::ArcaneMind => "奥术心智",
            SkillId::ManaShield => "法力护盾",
            SkillId::Meteor => "陨石术",
            SkillId::ShadowStrike => "暗影突袭",
            SkillId::PoisonBlade => "淬毒之刃",
            SkillId::Evasion => "闪避精通",
            SkillId::TwinStrike => "双重打击",
            SkillId::Assassinate => "刺杀",
            SkillId::AimedShot => "瞄准射击",
            SkillId::Volley => "齐射",
            SkillId::EagleEye => "鹰眼",
            SkillId::FirstAid => "急救",
            SkillId::ArrowStorm => "箭雨风暴",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upgrade_respects_prerequisites_regardless_of_points() {
        let tree = SkillTree::for_class(Class::Warrior);
        let mut learned = HashMap::new();
        learned.insert(SkillId::HeavyBlow, 1);

        // 前置不足时即使点数充裕也失败
        assert!(!tree.can_upgrade(SkillId::Cleave, &learned, 5));
        let (success, remaining) = tree.upgrade(SkillId::Cleave, &mut learned, 5);
        assert!(!success);
        assert_eq!(remaining, 5);

        learned.insert(SkillId::HeavyBlow, 2);
        let (success, remaining) = tree.upgrade(SkillId::Cleave, &mut learned, 1);
        assert!(success);
        assert_eq!(remaining, 0);
        assert_eq!(learned[&SkillId::Cleave], 1);
    }

    #[test]
    fn upgrade_caps_at_max_level() {
        let tree = SkillTree::for_class(Class::Mage);
        let mut learned = HashMap::new();

        for _ in 0..5 {
            let (success, _) = tree.upgrade(SkillId::Fireball, &mut learned, 10);
            assert!(success);
        }
        assert_eq!(learned[&SkillId::Fireball], 5);

        let (success, remaining) = tree.upgrade(SkillId::Fireball, &mut learned, 10);
        assert!(!success);
        assert_eq!(remaining, 10);
        assert_eq!(learned[&SkillId::Fireball], 5);
    }

    #[test]
    fn upgrade_rejects_skills_from_other_classes() {
        let tree = SkillTree::for_class(Class::Warrior);
        let mut learned = HashMap::new();
        assert!(!tree.can_upgrade(SkillId::Fireball, &learned, 10));
        let (success, _) = tree.upgrade(SkillId::Fireball, &mut learned, 10);
        assert!(!success);
    }

    #[test]
    fn effect_scales_linearly_with_level() {
        let tree = SkillTree::for_class(Class::Warrior);
        let mut learned = HashMap::new();

        assert_eq!(tree.effect(SkillId::HeavyBlow, 0, &learned), 0.0);

        learned.insert(SkillId::HeavyBlow, 3);
        let effect = tree.effect(SkillId::HeavyBlow, 0, &learned);
        assert!((effect - 0.60).abs() < 1e-9);

        // 越界索引返回0
        assert_eq!(tree.effect(SkillId::HeavyBlow, 7, &learned), 0.0);
    }

    #[test]
    fn ultimate_needs_two_prerequisite_lines() {
        let tree = SkillTree::for_class(Class::Warrior);
        let mut learned = HashMap::new();
        learned.insert(SkillId::Cleave, 2);

        assert!(!tree.can_upgrade(SkillId::Rampage, &learned, 10));

        learned.insert(SkillId::BattleCry, 2);
        assert!(tree.can_upgrade(SkillId::Rampage, &learned, 10));
    }
}
