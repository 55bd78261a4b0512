//src/combat/src/event.rs
use hero::{SkillId, StatusKind};
use serde::{Deserialize, Serialize};

use crate::monster::BossSkillKind;

/// 事件作用方
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    Hero,
    Monster,
}

/// 一回合结算产生的结构化事件流
///
/// 引擎只产出数据，不打印文本；表现层把事件翻译成本地化文案。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    RoundStarted {
        round: u32,
    },
    HeroAttack {
        damage: u32,
        crit: bool,
    },
    HeroSkill {
        skill: SkillId,
        damage: u32,
        crit: bool,
        hits: u32,
    },
    MonsterDodged,
    HeroDodged,
    MonsterAttack {
        damage: u32,
    },
    BossSkill {
        kind: BossSkillKind,
        damage: u32,
    },
    StatusApplied {
        target: Target,
        status: StatusKind,
        duration: u32,
    },
    StatusDamage {
        target: Target,
        status: StatusKind,
        damage: u32,
    },
    StatusExpired {
        target: Target,
        status: StatusKind,
    },
    Healed {
        target: Target,
        amount: u32,
    },
    Lifesteal {
        amount: u32,
    },
    Regen {
        amount: u32,
    },
    Enraged,
    PotionDrunk {
        amount: u32,
        remaining: u32,
    },
    PotionEmpty,
    RallyRaised {
        offensive: bool,
        turns: u32,
    },
    Victory {
        gold: u32,
        exp: u32,
        levels_gained: u32,
    },
    Defeat,
}
