//src/hero/src/class.rs
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString};

use items::Modifier;

/// 职业被动修饰符（固定数值，升级不变）
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClassPassive {
    pub modifier: Modifier,
    pub value: f64,
}

/// 角色职业枚举
#[derive(
    Default, Copy, Clone, Debug, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize,
    EnumIter, EnumString,
)]
pub enum Class {
    #[default]
    Warrior, // 战士（高生命值高防御，被动伤害减免）

    Mage,   // 法师（低生命值高攻击，被动火焰附伤）
    Rogue,  // 盗贼（中等属性，被动暴击率）
    Ranger, // 游侠（中等属性，被动闪避+首回合伤害）
}

impl Class {
    /// 1级基础攻击力
    pub fn base_attack(&self) -> u32 {
        match self {
            Class::Warrior => 18,
            Class::Mage => 24,
            Class::Rogue => 20,
            Class::Ranger => 20,
        }
    }

    /// 1级基础防御力
    pub fn base_defense(&self) -> u32 {
        match self {
            Class::Warrior => 12,
            Class::Mage => 5,
            Class::Rogue => 8,
            Class::Ranger => 8,
        }
    }

    /// 1级基础生命上限
    pub fn base_max_hp(&self) -> u32 {
        match self {
            Class::Warrior => 150,
            Class::Mage => 100,
            Class::Rogue => 120,
            Class::Ranger => 120,
        }
    }

    /// 升级时的属性成长：(攻击, 防御, 生命上限)
    pub fn growth(&self) -> (u32, u32, u32) {
        match self {
            Class::Warrior => (3, 2, 15),
            Class::Mage => (5, 1, 8),
            Class::Rogue => (4, 1, 10),
            Class::Ranger => (4, 1, 10),
        }
    }

    /// 职业被动修饰符表
    pub fn passives(&self) -> Vec<ClassPassive> {
        match self {
            Class::Warrior => vec![ClassPassive {
                modifier: Modifier::DamageReduction,
                value: 0.05,
            }],
            Class::Mage => vec![ClassPassive {
                modifier: Modifier::FlameDamage,
                value: 3.0,
            }],
            Class::Rogue => vec![ClassPassive {
                modifier: Modifier::CritRate,
                value: 0.10,
            }],
            Class::Ranger => vec![
                ClassPassive {
                    modifier: Modifier::Dodge,
                    value: 0.08,
                },
                ClassPassive {
                    modifier: Modifier::FirstTurnDamage,
                    value: 5.0,
                },
            ],
        }
    }
}

impl std::fmt::Display for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Class::Warrior => "战士",
                Class::Mage => "法师",
                Class::Rogue => "盗贼",
                Class::Ranger => "游侠",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_class_has_at_least_one_passive() {
        for class in Class::iter() {
            assert!(!class.passives().is_empty());
        }
    }

    #[test]
    fn ranger_passive_includes_first_turn_damage() {
        let passives = Class::Ranger.passives();
        assert!(
            passives
                .iter()
                .any(|p| p.modifier == Modifier::FirstTurnDamage)
        );
    }
}
