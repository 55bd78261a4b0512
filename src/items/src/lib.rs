// src/items/src/lib.rs

pub mod enchant;
pub mod equipment;
pub mod generator;

pub use crate::enchant::{EnchantOutcome, Enchantment};
pub use crate::equipment::{
    EffectTag, EnhanceOutcome, Equipment, LegendaryAttribute, MAX_ENHANCEMENT_LEVEL, SetBonus,
};
pub use crate::generator::create_random;

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{EnumIter, EnumString};

/// 装备部位
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Encode, Decode, Serialize, Deserialize,
    EnumIter,
)]
pub enum EquipmentKind {
    #[default]
    Weapon, // 武器：主要提供攻击力
    Armor,     // 护甲：主要提供防御力和生命值
    Accessory, // 饰品：少量全属性
}

/// 装备稀有度（驱动属性倍率和掉落概率）
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Encode, Decode, Serialize,
    Deserialize, EnumIter,
)]
pub enum Rarity {
    #[default]
    Common, // 普通（白色）
    Uncommon,  // 精良（绿色）
    Rare,      // 稀有（蓝色）
    Epic,      // 史诗（紫色）
    Legendary, // 传说（橙色）
}

impl Rarity {
    /// 属性倍率表
    pub fn stat_multiplier(&self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Uncommon => 1.5,
            Rarity::Rare => 2.0,
            Rarity::Epic => 3.0,
            Rarity::Legendary => 5.0,
        }
    }

    /// 套装标签出现概率（随稀有度提升）
    pub fn set_bonus_chance(&self) -> f64 {
        match self {
            Rarity::Common => 0.05,
            Rarity::Uncommon => 0.10,
            Rarity::Rare => 0.20,
            Rarity::Epic => 0.35,
            Rarity::Legendary => 0.60,
        }
    }

    /// 特效标签的(单次概率, 最大数量)
    pub fn special_effect_odds(&self) -> (f64, usize) {
        match self {
            Rarity::Common => (0.20, 1),
            Rarity::Uncommon => (0.35, 1),
            Rarity::Rare => (0.50, 2),
            Rarity::Epic => (0.70, 2),
            Rarity::Legendary => (0.90, 3),
        }
    }

    /// 附魔成功率加成表
    pub fn enchant_bonus_rate(&self) -> f64 {
        match self {
            Rarity::Common => 0.0,
            Rarity::Uncommon => 0.05,
            Rarity::Rare => 0.10,
            Rarity::Epic => 0.15,
            Rarity::Legendary => 0.25,
        }
    }
}

/// 命名数值修饰符
///
/// 角色的special_effects表以它为键；装备标签、附魔、传说词条和被动技能
/// 都折算成这些修饰符，由角色在装备/技能变化时重新汇总。
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize, EnumIter,
    EnumString, strum_macros::Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum Modifier {
    CritRate,        // 暴击率（概率）
    CritDamage,      // 暴击伤害加成（乘区为1.5+该值）
    Dodge,           // 闪避率（概率）
    Lifesteal,       // 吸血比例
    FlameDamage,     // 固定火焰附加伤害
    FrostDamage,     // 固定冰霜附加伤害
    Backstab,        // 固定背刺附加伤害
    FirstTurnDamage, // 首回合附加伤害
    HpRegen,         // 每回合生命恢复
    DamageReduction, // 受到伤害减免比例
}

impl fmt::Display for EquipmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EquipmentKind::Weapon => "武器",
            EquipmentKind::Armor => "护甲",
            EquipmentKind::Accessory => "饰品",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rarity::Common => "普通",
            Rarity::Uncommon => "精良",
            Rarity::Rare => "稀有",
            Rarity::Epic => "史诗",
            Rarity::Legendary => "传说",
        };
        write!(f, "{}", name)
    }
}
