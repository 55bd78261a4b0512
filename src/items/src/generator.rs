//src/items/src/generator.rs
//! 随机装备生成
//!
//! 稀有度掷骰、基础属性范围、命名和随机标签都集中在这里，
//! 战利品掉落和商店进货共用同一入口。

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::equipment::{EffectTag, Equipment, SetBonus};
use crate::{EquipmentKind, Modifier, Rarity};

/// 稀有度加成的单位步长（每点加成让掷骰结果+0.10）
const RARITY_BONUS_STEP: f64 = 0.10;

/// 可随机到的特效标签池（标签及其固定数值）
const EFFECT_POOL: [(Modifier, f64); 10] = [
    (Modifier::CritRate, 0.05),
    (Modifier::CritDamage, 0.25),
    (Modifier::Dodge, 0.04),
    (Modifier::Lifesteal, 0.06),
    (Modifier::FlameDamage, 4.0),
    (Modifier::FrostDamage, 4.0),
    (Modifier::Backstab, 6.0),
    (Modifier::FirstTurnDamage, 8.0),
    (Modifier::HpRegen, 2.0),
    (Modifier::DamageReduction, 0.04),
];

/// 掷定稀有度
///
/// 掷骰结果为均匀随机数加上加成，封顶0.99保证传说档位始终可达、
/// 其余档位在加成足够大时被完全挤出。
pub fn roll_rarity(rarity_bonus: u32, rng: &mut impl Rng) -> Rarity {
    let roll = (rng.random_range(0.0..1.0) + RARITY_BONUS_STEP * rarity_bonus as f64).min(0.99);

    match roll {
        r if r < 0.50 => Rarity::Common,
        r if r < 0.75 => Rarity::Uncommon,
        r if r < 0.90 => Rarity::Rare,
        r if r < 0.97 => Rarity::Epic,
        _ => Rarity::Legendary,
    }
}

/// 生成一件随机装备
///
/// - `kind` 为 `None` 时部位也随机；
/// - `rarity_bonus` 提升稀有度掷骰结果（怪物等级、楼层深度等折算而来）；
/// - `force_legendary` 跳过掷骰直接给传说（Boss首杀奖励用）。
pub fn create_random(
    kind: Option<EquipmentKind>,
    rarity_bonus: u32,
    force_legendary: bool,
    rng: &mut impl Rng,
) -> Equipment {
    let kind = kind.unwrap_or_else(|| {
        *[
            EquipmentKind::Weapon,
            EquipmentKind::Armor,
            EquipmentKind::Accessory,
        ]
        .choose(rng)
        .unwrap_or(&EquipmentKind::Weapon)
    });

    let rarity = if force_legendary {
        Rarity::Legendary
    } else {
        roll_rarity(rarity_bonus, rng)
    };

    let multiplier = rarity.stat_multiplier();
    let scale = |base: u32| (base as f64 * multiplier).floor() as u32;

    // 部位决定一倍率下的基础属性范围
    let (base_attack, base_defense, base_hp) = match kind {
        EquipmentKind::Weapon => (scale(rng.random_range(5..=10)), 0, 0),
        EquipmentKind::Armor => (
            0,
            scale(rng.random_range(3..=8)),
            scale(rng.random_range(5..=15)),
        ),
        EquipmentKind::Accessory => (
            scale(rng.random_range(1..=3)),
            scale(rng.random_range(1..=3)),
            scale(rng.random_range(5..=10)),
        ),
    };

    let set_bonus = if rng.random_bool(rarity.set_bonus_chance()) {
        [SetBonus::Berserker, SetBonus::Guardian, SetBonus::Mystic]
            .choose(rng)
            .copied()
    } else {
        None
    };

    let special_effects = roll_special_effects(rarity, rng);

    Equipment {
        name: random_name(kind, rarity, rng),
        kind,
        rarity,
        base_attack,
        base_defense,
        base_hp,
        enhancement_level: 0,
        enchantment: None,
        legendary_attribute: None,
        set_bonus,
        special_effects,
    }
}

/// 逐个掷骰特效标签，同一修饰符不重复出现
fn roll_special_effects(rarity: Rarity, rng: &mut impl Rng) -> Vec<EffectTag> {
    let (chance, max_count) = rarity.special_effect_odds();
    let mut tags: Vec<EffectTag> = Vec::new();

    for _ in 0..max_count {
        if !rng.random_bool(chance) {
            continue;
        }
        if let Some(&(modifier, value)) = EFFECT_POOL.choose(rng) {
            if tags.iter().all(|t| t.modifier != modifier) {
                tags.push(EffectTag { modifier, value });
            }
        }
    }

    tags
}

fn random_name(kind: EquipmentKind, rarity: Rarity, rng: &mut impl Rng) -> String {
    let base = match kind {
        EquipmentKind::Weapon => ["长剑", "战斧", "法杖", "短弓"].choose(rng),
        EquipmentKind::Armor => ["铠甲", "皮甲", "法袍", "锁甲"].choose(rng),
        EquipmentKind::Accessory => ["护符", "戒指", "项链", "徽章"].choose(rng),
    }
    .copied()
    .unwrap_or("装备");

    format!("{}{}", rarity, base)
}
