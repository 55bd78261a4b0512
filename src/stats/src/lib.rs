// src/stats/src/lib.rs
//! Fire-and-forget battle statistics.
//!
//! The combat engine calls these hooks as side effects and never reads
//! anything back, so a recorder can be as simple as a bag of counters
//! or a no-op.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Recorder hooks invoked by the combat engine.
pub trait StatsRecorder {
    fn record_battle_start(&mut self);
    fn record_battle_victory(&mut self, monster_name: &str, is_boss: bool);
    fn record_battle_defeat(&mut self);
    fn record_skill_used(&mut self, skill_name: &str);
    fn record_gold_earned(&mut self, amount: u32);
    fn record_damage_dealt(&mut self, amount: u32);
}

/// Counter-based recorder, persisted with the save file.
#[derive(Clone, Debug, Default, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct BattleStats {
    pub battles_started: u32,
    pub battles_won: u32,
    pub battles_lost: u32,
    pub bosses_defeated: u32,
    pub gold_earned: u64,
    pub damage_dealt: u64,
    /// Per-skill usage counters, keyed by display name.
    pub skills_used: HashMap<String, u32>,
}

impl BattleStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn win_rate(&self) -> f64 {
        let finished = self.battles_won + self.battles_lost;
        if finished == 0 {
            return 0.0;
        }
        self.battles_won as f64 / finished as f64
    }
}

impl StatsRecorder for BattleStats {
    fn record_battle_start(&mut self) {
        self.battles_started += 1;
    }

    fn record_battle_victory(&mut self, _monster_name: &str, is_boss: bool) {
        self.battles_won += 1;
        if is_boss {
            self.bosses_defeated += 1;
        }
    }

    fn record_battle_defeat(&mut self) {
        self.battles_lost += 1;
    }

    fn record_skill_used(&mut self, skill_name: &str) {
        *self.skills_used.entry(skill_name.to_string()).or_insert(0) += 1;
    }

    fn record_gold_earned(&mut self, amount: u32) {
        self.gold_earned += amount as u64;
    }

    fn record_damage_dealt(&mut self, amount: u32) {
        self.damage_dealt += amount as u64;
    }
}

/// Recorder that drops everything, for tests and headless runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRecorder;

impl StatsRecorder for NullRecorder {
    fn record_battle_start(&mut self) {}
    fn record_battle_victory(&mut self, _monster_name: &str, _is_boss: bool) {}
    fn record_battle_defeat(&mut self) {}
    fn record_skill_used(&mut self, _skill_name: &str) {}
    fn record_gold_earned(&mut self, _amount: u32) {}
    fn record_damage_dealt(&mut self, _amount: u32) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let mut stats = BattleStats::new();
        stats.record_battle_start();
        stats.record_battle_victory("哥布林", false);
        stats.record_battle_start();
        stats.record_battle_victory("巨龙", true);
        stats.record_battle_start();
        stats.record_battle_defeat();
        stats.record_skill_used("重击");
        stats.record_skill_used("重击");
        stats.record_gold_earned(40);
        stats.record_damage_dealt(123);

        assert_eq!(stats.battles_started, 3);
        assert_eq!(stats.battles_won, 2);
        assert_eq!(stats.bosses_defeated, 1);
        assert_eq!(stats.battles_lost, 1);
        assert_eq!(stats.skills_used["重击"], 2);
        assert_eq!(stats.gold_earned, 40);
        assert_eq!(stats.damage_dealt, 123);
        assert!((stats.win_rate() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn win_rate_handles_no_finished_battles() {
        let stats = BattleStats::new();
        assert_eq!(stats.win_rate(), 0.0);
    }
}
