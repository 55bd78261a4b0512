//src/hero/src/status.rs
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 异常状态种类
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize,
    strum_macros::EnumIter,
)]
pub enum StatusKind {
    Poison,    // 中毒：每回合固定伤害
    Frostbite, // 冻伤：攻击力×0.9
    Frost,     // 冰冻：防御力×0.9
}

/// 一次tick的结算结果
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusTick {
    pub damage: u32,
    pub expired: Vec<StatusKind>,
}

/// 异常状态倒计时追踪器
///
/// 英雄和怪物各持有一份；属性减益在读取时实时折算，不写回基础属性。
#[derive(Clone, Debug, Default, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct StatusEffects {
    effects: HashMap<StatusKind, u32>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// 施加状态；重复施加重置剩余回合数，不叠加
    pub fn add(&mut self, kind: StatusKind, duration: u32) {
        if duration == 0 {
            return;
        }
        self.effects.insert(kind, duration);
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.contains_key(&kind)
    }

    pub fn remaining(&self, kind: StatusKind) -> u32 {
        self.effects.get(&kind).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// 冻伤期间的攻击倍率
    pub fn attack_multiplier(&self) -> f64 {
        if self.has(StatusKind::Frostbite) { 0.9 } else { 1.0 }
    }

    /// 冰冻期间的防御倍率
    pub fn defense_multiplier(&self) -> f64 {
        if self.has(StatusKind::Frost) { 0.9 } else { 1.0 }
    }

    /// 回合结算：中毒结算伤害，所有状态倒计时减1，到0即移除
    pub fn tick(&mut self, poison_damage: u32) -> StatusTick {
        let mut result = StatusTick::default();

        if self.has(StatusKind::Poison) {
            result.damage += poison_damage;
        }

        for duration in self.effects.values_mut() {
            *duration -= 1;
        }

        self.effects.retain(|kind, duration| {
            if *duration == 0 {
                result.expired.push(*kind);
                false
            } else {
                true
            }
        });

        result
    }

    /// 导出为可持久化的映射
    pub fn as_map(&self) -> &HashMap<StatusKind, u32> {
        &self.effects
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusKind::Poison => "中毒",
            StatusKind::Frostbite => "冻伤",
            StatusKind::Frost => "冰冻",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poison_damages_each_tick_until_expired() {
        let mut effects = StatusEffects::new();
        effects.add(StatusKind::Poison, 3);

        let mut total = 0;
        for i in 0..3 {
            let tick = effects.tick(5);
            total += tick.damage;
            if i < 2 {
                assert!(tick.expired.is_empty());
            } else {
                assert_eq!(tick.expired, vec![StatusKind::Poison]);
            }
        }

        // 恰好3次中毒伤害，之后条目被移除
        assert_eq!(total, 15);
        assert!(!effects.has(StatusKind::Poison));
        assert_eq!(effects.tick(5).damage, 0);
    }

    #[test]
    fn add_resets_duration_instead_of_stacking() {
        let mut effects = StatusEffects::new();
        effects.add(StatusKind::Frostbite, 2);
        effects.tick(5);
        assert_eq!(effects.remaining(StatusKind::Frostbite), 1);

        effects.add(StatusKind::Frostbite, 4);
        assert_eq!(effects.remaining(StatusKind::Frostbite), 4);
    }

    #[test]
    fn multipliers_follow_active_effects() {
        let mut effects = StatusEffects::new();
        assert_eq!(effects.attack_multiplier(), 1.0);
        assert_eq!(effects.defense_multiplier(), 1.0);

        effects.add(StatusKind::Frostbite, 2);
        effects.add(StatusKind::Frost, 2);
        assert_eq!(effects.attack_multiplier(), 0.9);
        assert_eq!(effects.defense_multiplier(), 0.9);

        effects.tick(5);
        effects.tick(5);
        assert_eq!(effects.attack_multiplier(), 1.0);
        assert_eq!(effects.defense_multiplier(), 1.0);
    }

    #[test]
    fn zero_duration_add_is_ignored() {
        let mut effects = StatusEffects::new();
        effects.add(StatusKind::Poison, 0);
        assert!(effects.is_empty());
    }
}
