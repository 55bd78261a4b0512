// src/combat/src/lib.rs

pub mod action;
pub mod engine;
pub mod event;
pub mod monster;

pub use crate::action::PlayerAction;
pub use crate::engine::{Encounter, EncounterState, POISON_TICK_DAMAGE};
pub use crate::event::{CombatEvent, Target};
pub use crate::monster::{BossSkillKind, EncounterKind, Monster, SpecialAbility};
