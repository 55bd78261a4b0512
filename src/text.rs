//src/text.rs
//! 文案提供层
//!
//! 引擎产出结构化事件，这里负责翻译成可打印文本。
//! 引擎只传递不透明的键和数值，语言相关的逻辑全部留在这一层。

use combat::{CombatEvent, Target};

/// 本地化文案接口
pub trait TextProvider {
    fn get_text(&self, key: &str) -> String;

    /// 按位置替换模板中的`{0}`、`{1}`等占位符
    fn format_text(&self, key: &str, args: &[&str]) -> String {
        let mut text = self.get_text(key);
        for (i, arg) in args.iter().enumerate() {
            text = text.replace(&format!("{{{}}}", i), arg);
        }
        text
    }
}

/// 内置中文文案
#[derive(Default)]
pub struct DefaultTextProvider;

impl TextProvider for DefaultTextProvider {
    fn get_text(&self, key: &str) -> String {
        match key {
            "round_started" => "—— 第 {0} 回合 ——",
            "hero_attack" => "你发起攻击，造成 {0} 点伤害",
            "hero_attack_crit" => "暴击！你造成 {0} 点伤害",
            "hero_skill" => "你施放了技能，共 {0} 段，合计 {1} 点伤害",
            "monster_dodged" => "对方闪开了你的攻击",
            "hero_dodged" => "你侧身躲过了攻击",
            "monster_attack" => "对方攻击了你，造成 {0} 点伤害",
            "boss_skill" => "Boss施放技能，造成 {0} 点伤害",
            "status_applied_hero" => "你陷入了{0}状态（{1}回合）",
            "status_applied_monster" => "对方陷入了{0}状态（{1}回合）",
            "status_damage_hero" => "{0}侵蚀着你，损失 {1} 点生命",
            "status_damage_monster" => "对方受{0}折磨，损失 {1} 点生命",
            "status_expired_hero" => "你的{0}状态解除了",
            "status_expired_monster" => "对方的{0}状态解除了",
            "healed_hero" => "你回复了 {0} 点生命",
            "healed_monster" => "对方回复了 {0} 点生命",
            "lifesteal" => "你吸取了 {0} 点生命",
            "regen" => "回合恢复 {0} 点生命",
            "enraged" => "对方进入了狂暴状态！",
            "potion_drunk" => "你喝下药水，回复 {0} 点生命（剩余{1}瓶）",
            "potion_empty" => "药水已经喝光了",
            "rally_offensive" => "你鼓舞起斗志，攻击提升 {0} 回合",
            "rally_defensive" => "你竖起护盾，防御提升 {0} 回合",
            "victory" => "胜利！获得 {0} 金币和 {1} 点经验",
            "level_up" => "升级了！当前等级提升 {0} 级",
            "defeat" => "你倒下了……",
            _ => "……",
        }
        .to_string()
    }
}

/// 把一条战斗事件翻译成一行文本
pub fn render_event(provider: &impl TextProvider, event: &CombatEvent) -> String {
    match event {
        CombatEvent::RoundStarted { round } => {
            provider.format_text("round_started", &[&round.to_string()])
        }
        CombatEvent::HeroAttack { damage, crit } => {
            let key = if *crit { "hero_attack_crit" } else { "hero_attack" };
            provider.format_text(key, &[&damage.to_string()])
        }
        CombatEvent::HeroSkill { damage, hits, .. } => {
            provider.format_text("hero_skill", &[&hits.to_string(), &damage.to_string()])
        }
        CombatEvent::MonsterDodged => provider.get_text("monster_dodged"),
        CombatEvent::HeroDodged => provider.get_text("hero_dodged"),
        CombatEvent::MonsterAttack { damage } => {
            provider.format_text("monster_attack", &[&damage.to_string()])
        }
        CombatEvent::BossSkill { damage, .. } => {
            provider.format_text("boss_skill", &[&damage.to_string()])
        }
        CombatEvent::StatusApplied {
            target,
            status,
            duration,
        } => {
            let key = match target {
                Target::Hero => "status_applied_hero",
                Target::Monster => "status_applied_monster",
            };
            provider.format_text(key, &[&status.to_string(), &duration.to_string()])
        }
        CombatEvent::StatusDamage {
            target,
            status,
            damage,
        } => {
            let key = match target {
                Target::Hero => "status_damage_hero",
                Target::Monster => "status_damage_monster",
            };
            provider.format_text(key, &[&status.to_string(), &damage.to_string()])
        }
        CombatEvent::StatusExpired { target, status } => {
            let key = match target {
                Target::Hero => "status_expired_hero",
                Target::Monster => "status_expired_monster",
            };
            provider.format_text(key, &[&status.to_string()])
        }
        CombatEvent::Healed { target, amount } => {
            let key = match target {
                Target::Hero => "healed_hero",
                Target::Monster => "healed_monster",
            };
            provider.format_text(key, &[&amount.to_string()])
        }
        CombatEvent::Lifesteal { amount } => {
            provider.format_text("lifesteal", &[&amount.to_string()])
        }
        CombatEvent::Regen { amount } => provider.format_text("regen", &[&amount.to_string()]),
        CombatEvent::Enraged => provider.get_text("enraged"),
        CombatEvent::PotionDrunk { amount, remaining } => provider.format_text(
            "potion_drunk",
            &[&amount.to_string(), &remaining.to_string()],
        ),
        CombatEvent::PotionEmpty => provider.get_text("potion_empty"),
        CombatEvent::RallyRaised { offensive, turns } => {
            let key = if *offensive {
                "rally_offensive"
            } else {
                "rally_defensive"
            };
            provider.format_text(key, &[&turns.to_string()])
        }
        CombatEvent::Victory {
            gold,
            exp,
            levels_gained,
        } => {
            let mut line =
                provider.format_text("victory", &[&gold.to_string(), &exp.to_string()]);
            if *levels_gained > 0 {
                line.push('\n');
                line.push_str(
                    &provider.format_text("level_up", &[&levels_gained.to_string()]),
                );
            }
            line
        }
        CombatEvent::Defeat => provider.get_text("defeat"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_replaces_positional_placeholders() {
        let provider = DefaultTextProvider;
        let line = provider.format_text("victory", &["30", "45"]);
        assert_eq!(line, "胜利！获得 30 金币和 45 点经验");
    }

    #[test]
    fn unknown_key_falls_back_to_ellipsis() {
        let provider = DefaultTextProvider;
        assert_eq!(provider.get_text("no_such_key"), "……");
    }

    #[test]
    fn crit_attack_uses_its_own_template() {
        let provider = DefaultTextProvider;
        let line = render_event(
            &provider,
            &CombatEvent::HeroAttack {
                damage: 12,
                crit: true,
            },
        );
        assert!(line.contains("暴击"));
        assert!(line.contains("12"));
    }
}
