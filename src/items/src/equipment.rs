//src/items/src/equipment.rs
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{EquipmentKind, Modifier, Rarity};

/// 强化等级上限
pub const MAX_ENHANCEMENT_LEVEL: u8 = 15;

/// 传说词条解锁所需的强化等级
pub const LEGENDARY_UNLOCK_LEVEL: u8 = 10;

/// 装备特效标签（创建时随机0~3个，附魔也可能追加）
#[derive(Copy, Clone, Debug, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct EffectTag {
    pub modifier: Modifier,
    pub value: f64,
}

/// 套装标签
///
/// 同时装备两件及以上相同套装的装备时，套装效果生效一次。
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize,
    strum_macros::EnumIter,
)]
pub enum SetBonus {
    Berserker, // 狂战士套装：暴击率+10%
    Guardian,  // 守护者套装：伤害减免+8%
    Mystic,    // 秘法师套装：每回合恢复4点生命
}

impl SetBonus {
    pub fn effect(&self) -> EffectTag {
        match self {
            SetBonus::Berserker => EffectTag {
                modifier: Modifier::CritRate,
                value: 0.10,
            },
            SetBonus::Guardian => EffectTag {
                modifier: Modifier::DamageReduction,
                value: 0.08,
            },
            SetBonus::Mystic => EffectTag {
                modifier: Modifier::HpRegen,
                value: 4.0,
            },
        }
    }
}

/// 传说词条（强化等级首次到达10级时授予，每件装备仅一次）
#[derive(Copy, Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub enum LegendaryAttribute {
    FlameDamage,     // 武器：火焰附加伤害
    DamageReduction, // 护甲：伤害减免
    HpRegen,         // 饰品：每回合生命恢复
}

impl LegendaryAttribute {
    /// 词条类型由装备部位唯一确定
    pub fn for_kind(kind: EquipmentKind) -> Self {
        match kind {
            EquipmentKind::Weapon => LegendaryAttribute::FlameDamage,
            EquipmentKind::Armor => LegendaryAttribute::DamageReduction,
            EquipmentKind::Accessory => LegendaryAttribute::HpRegen,
        }
    }

    pub fn effect(&self) -> EffectTag {
        match self {
            LegendaryAttribute::FlameDamage => EffectTag {
                modifier: Modifier::FlameDamage,
                value: 8.0,
            },
            LegendaryAttribute::DamageReduction => EffectTag {
                modifier: Modifier::DamageReduction,
                value: 0.10,
            },
            LegendaryAttribute::HpRegen => EffectTag {
                modifier: Modifier::HpRegen,
                value: 5.0,
            },
        }
    }
}

/// 强化操作结果（不抛出错误，由调用方决定如何提示）
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EnhanceOutcome {
    pub success: bool,
    pub gold_spent: u32,
    pub legendary_unlocked: bool,
}

/// 装备数据结构
///
/// 基础属性在创建时一次性掷定；强化和附魔原地修改；
/// 当前属性始终由基础属性和强化等级推导，不单独存储。
#[derive(Clone, Debug, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct Equipment {
    pub name: String,
    pub kind: EquipmentKind,
    pub rarity: Rarity,
    pub base_attack: u32,
    pub base_defense: u32,
    pub base_hp: u32,
    pub enhancement_level: u8, // 0..=15
    pub enchantment: Option<crate::Enchantment>,
    pub legendary_attribute: Option<LegendaryAttribute>,
    pub set_bonus: Option<SetBonus>,
    pub special_effects: Vec<EffectTag>,
}

impl Equipment {
    /// 强化倍率：每级+10%，向下取整
    fn scaled(&self, base: u32) -> u32 {
        (base as f64 * (1.0 + 0.10 * self.enhancement_level as f64)).floor() as u32
    }

    /// 当前攻击力（含强化倍率）
    pub fn current_attack(&self) -> u32 {
        self.scaled(self.base_attack)
    }

    /// 当前防御力（含强化倍率）
    pub fn current_defense(&self) -> u32 {
        self.scaled(self.base_defense)
    }

    /// 当前生命值加成（含强化倍率）
    pub fn current_hp(&self) -> u32 {
        self.scaled(self.base_hp)
    }

    /// 下一级强化费用
    pub fn enhance_cost(&self) -> u32 {
        100 + 50 * self.enhancement_level as u32
    }

    /// 强化装备
    ///
    /// 已满级或金币不足时失败且不产生任何变化。
    /// 强化等级恰好到达10级的那一次转换授予传说词条，之后不再重复授予。
    pub fn try_enhance(&mut self, available_gold: u32) -> EnhanceOutcome {
        if self.enhancement_level >= MAX_ENHANCEMENT_LEVEL {
            return EnhanceOutcome::default();
        }

        let cost = self.enhance_cost();
        if available_gold < cost {
            return EnhanceOutcome::default();
        }

        self.enhancement_level += 1;

        let mut legendary_unlocked = false;
        if self.enhancement_level == LEGENDARY_UNLOCK_LEVEL && self.legendary_attribute.is_none() {
            self.legendary_attribute = Some(LegendaryAttribute::for_kind(self.kind));
            legendary_unlocked = true;
        }

        EnhanceOutcome {
            success: true,
            gold_spent: cost,
            legendary_unlocked,
        }
    }

    /// 汇总该装备贡献的全部修饰符标签（特效+套装外的固定来源）
    ///
    /// 套装标签不在这里汇总，需要两件成套才生效，由角色层判断。
    pub fn modifier_tags(&self) -> Vec<EffectTag> {
        let mut tags = self.special_effects.clone();
        if let Some(legendary) = &self.legendary_attribute {
            tags.push(legendary.effect());
        }
        tags
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut info = format!("{} [{}·{}]", self.name, self.rarity, self.kind);

        if self.enhancement_level > 0 {
            info.push_str(&format!(" (+{})", self.enhancement_level));
        }

        info.push_str(&format!(
            "\n攻击: {} 防御: {} 生命: {}",
            self.current_attack(),
            self.current_defense(),
            self.current_hp()
        ));

        if let Some(enchantment) = &self.enchantment {
            info.push_str(&format!("\n附魔: {}", enchantment));
        }

        if self.legendary_attribute.is_some() {
            info.push_str("\n传说词条已解锁");
        }

        write!(f, "{}", info)
    }
}
