//src/combat/src/action.rs
use std::str::FromStr;

use hero::SkillId;
use serde::{Deserialize, Serialize};

/// 玩家在一回合内可选的行动
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    Attack,
    Potion,
    Skill(SkillId),
}

impl PlayerAction {
    /// 解析外层输入
    ///
    /// 无法识别的输入一律当作普通攻击，永不报错。
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed {
            "attack" | "a" | "1" => PlayerAction::Attack,
            "potion" | "p" | "2" => PlayerAction::Potion,
            _ => match SkillId::from_str(trimmed) {
                Ok(id) => PlayerAction::Skill(id),
                Err(_) => PlayerAction::Attack,
            },
        }
    }
}

impl Default for PlayerAction {
    fn default() -> Self {
        PlayerAction::Attack
    }
}
