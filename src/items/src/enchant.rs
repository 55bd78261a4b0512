//src/items/src/enchant.rs
use bincode::{Decode, Encode};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::equipment::{EffectTag, Equipment};
use crate::{EquipmentKind, Modifier};

/// 附魔费用（每次尝试固定收取）
pub const ENCHANT_COST: u32 = 500;

/// 装备附魔效果
///
/// 每件装备最多附魔一次，成功后永久生效。
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize,
    strum_macros::EnumIter,
)]
pub enum Enchantment {
    // 武器附魔
    Sharpness, // 锋利：基础攻击+15%
    Flame,     // 烈焰：火焰附加伤害
    Vampiric,  // 吸血：按伤害比例回复生命
    // 护甲附魔
    Sturdiness, // 坚固：基础防御+15%
    Vitality,   // 活力：基础生命+20%
    Warding,    // 庇护：伤害减免+5%
    // 饰品附魔
    Swiftness,    // 迅捷：闪避+5%
    Fortune,      // 幸运：暴击率+5%
    Regeneration, // 再生：每回合恢复3点生命
}

impl Enchantment {
    /// 附魔允许的装备部位
    pub fn allowed_kind(&self) -> EquipmentKind {
        match self {
            Enchantment::Sharpness | Enchantment::Flame | Enchantment::Vampiric => {
                EquipmentKind::Weapon
            }
            Enchantment::Sturdiness | Enchantment::Vitality | Enchantment::Warding => {
                EquipmentKind::Armor
            }
            Enchantment::Swiftness | Enchantment::Fortune | Enchantment::Regeneration => {
                EquipmentKind::Accessory
            }
        }
    }

    /// 基础成功率表
    pub fn base_rate(&self) -> f64 {
        match self {
            Enchantment::Sharpness => 0.60,
            Enchantment::Flame => 0.50,
            Enchantment::Vampiric => 0.40,
            Enchantment::Sturdiness => 0.60,
            Enchantment::Vitality => 0.55,
            Enchantment::Warding => 0.45,
            Enchantment::Swiftness => 0.50,
            Enchantment::Fortune => 0.45,
            Enchantment::Regeneration => 0.55,
        }
    }

    /// 成功后套用固定效果增量
    fn apply(&self, equipment: &mut Equipment) {
        match self {
            Enchantment::Sharpness => {
                equipment.base_attack = (equipment.base_attack as f64 * 1.15) as u32;
            }
            Enchantment::Flame => equipment.special_effects.push(EffectTag {
                modifier: Modifier::FlameDamage,
                value: 5.0,
            }),
            Enchantment::Vampiric => equipment.special_effects.push(EffectTag {
                modifier: Modifier::Lifesteal,
                value: 0.08,
            }),
            Enchantment::Sturdiness => {
                equipment.base_defense = (equipment.base_defense as f64 * 1.15) as u32;
            }
            Enchantment::Vitality => {
                equipment.base_hp = (equipment.base_hp as f64 * 1.20) as u32;
            }
            Enchantment::Warding => equipment.special_effects.push(EffectTag {
                modifier: Modifier::DamageReduction,
                value: 0.05,
            }),
            Enchantment::Swiftness => equipment.special_effects.push(EffectTag {
                modifier: Modifier::Dodge,
                value: 0.05,
            }),
            Enchantment::Fortune => equipment.special_effects.push(EffectTag {
                modifier: Modifier::CritRate,
                value: 0.05,
            }),
            Enchantment::Regeneration => equipment.special_effects.push(EffectTag {
                modifier: Modifier::HpRegen,
                value: 3.0,
            }),
        }
    }
}

/// 附魔操作结果
///
/// `attempted == false` 表示前置条件不满足，未消耗金币、未做任何修改；
/// 一旦进入概率判定（`attempted == true`），无论成败金币都被消耗。
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EnchantOutcome {
    pub attempted: bool,
    pub success: bool,
    pub gold_spent: u32,
}

impl Equipment {
    /// 尝试附魔
    pub fn try_enchant(
        &mut self,
        enchantment: Enchantment,
        available_gold: u32,
        rng: &mut impl Rng,
    ) -> EnchantOutcome {
        // 前置条件：未附魔过、部位匹配、金币足够
        if self.enchantment.is_some()
            || enchantment.allowed_kind() != self.kind
            || available_gold < ENCHANT_COST
        {
            return EnchantOutcome::default();
        }

        let rate = enchantment.base_rate() + self.rarity.enchant_bonus_rate();
        let success = rng.random_bool(rate.clamp(0.0, 1.0));

        if success {
            enchantment.apply(self);
            self.enchantment = Some(enchantment);
        }

        EnchantOutcome {
            attempted: true,
            success,
            gold_spent: ENCHANT_COST,
        }
    }
}

impl fmt::Display for Enchantment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Enchantment::Sharpness => "锋利",
            Enchantment::Flame => "烈焰",
            Enchantment::Vampiric => "吸血",
            Enchantment::Sturdiness => "坚固",
            Enchantment::Vitality => "活力",
            Enchantment::Warding => "庇护",
            Enchantment::Swiftness => "迅捷",
            Enchantment::Fortune => "幸运",
            Enchantment::Regeneration => "再生",
        };
        write!(f, "{}", name)
    }
}
