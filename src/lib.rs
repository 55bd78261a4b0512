// src/lib.rs
//! 回合制文字RPG规则引擎
//!
//! 核心分为四块：状态追踪（status）、装备与属性汇总（items/hero）、
//! 技能树（skills）和遭遇引擎（combat）。引擎本身不打印任何文本，
//! 所有结果以事件流交给表现层渲染。

pub mod text;

pub use combat::{
    CombatEvent, Encounter, EncounterKind, EncounterState, Monster, PlayerAction, Target,
};
pub use error::{GameError, handle_error};
pub use hero::{Character, Class, EffectiveStats, GameRng, SkillId, SkillTree, StatusKind};
pub use items::{Enchantment, Equipment, EquipmentKind, Modifier, Rarity, create_random};
pub use save::{SaveData, SaveSystem};
pub use stats::{BattleStats, NullRecorder, StatsRecorder};
