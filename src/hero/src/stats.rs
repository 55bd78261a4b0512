//src/hero/src/stats.rs
//! 有效属性汇总
//!
//! 有效属性永远由基础属性和装备现值推导，不落盘、不缓存；
//! 装备、强化、附魔、升级后由调用方重新计算。

use crate::core::Character;

/// 一次汇总的结果快照
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectiveStats {
    pub attack: u32,
    pub defense: u32,
    pub max_hp: u32,
}

/// 计算角色的有效攻击/防御/生命上限（纯函数）
pub fn effective(character: &Character) -> EffectiveStats {
    let mut stats = EffectiveStats {
        attack: character.base_attack,
        defense: character.base_defense,
        max_hp: character.base_max_hp,
    };

    for equipment in [
        character.weapon.as_ref(),
        character.armor.as_ref(),
        character.accessory.as_ref(),
    ]
    .into_iter()
    .flatten()
    {
        stats.attack += equipment.current_attack();
        stats.defense += equipment.current_defense();
        stats.max_hp += equipment.current_hp();
    }

    stats
}
