// src/hero/src/lib.rs

pub mod class;
pub mod core;
pub mod rng;
pub mod skills;
pub mod stats;
pub mod status;

pub use crate::class::{Class, ClassPassive};
pub use crate::core::Character;
pub use crate::rng::GameRng;
pub use crate::skills::{SkillCategory, SkillEffect, SkillId, SkillNode, SkillTree};
pub use crate::stats::{EffectiveStats, effective};
pub use crate::status::{StatusEffects, StatusKind, StatusTick};
