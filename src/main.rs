// src/main.rs
//! 演示入口：跑一场完整的冒险回合并打印事件流。
//! 传入一个数字参数可固定种子，便于复现同一场战斗。

use anyhow::Result;
use rand::Rng;

use combat::{Encounter, EncounterKind, EncounterState, PlayerAction};
use hero::{Character, Class, SkillId};
use items::EquipmentKind;
use stats::{BattleStats, StatsRecorder};
use terminal_text_rpg::text::{DefaultTextProvider, TextProvider, render_event};

fn main() -> Result<()> {
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| rand::rng().random());

    let provider = DefaultTextProvider;
    let mut stats = BattleStats::new();
    let mut hero = Character::with_seed("冒险者".to_string(), Class::Warrior, seed);

    println!("种子: {seed}");
    println!("{} ({}) 启程了", hero.name, hero.class);

    // 起手装备：一件随机武器
    let weapon = items::create_random(Some(EquipmentKind::Weapon), 2, false, &mut hero.rng);
    println!("拾取 {}", weapon);
    hero.acquire(weapon);
    hero.equip(0);
    hero.upgrade_skill(SkillId::HeavyBlow);

    for kind in [EncounterKind::Normal, EncounterKind::Ghost, EncounterKind::Boss] {
        run_encounter(&mut hero, kind, &mut stats, &provider);
        if !hero.is_alive() {
            break;
        }
        hero.heal(u32::MAX / 2); // 战间整备
    }

    println!(
        "\n战报：{}胜 {}负，累计造成 {} 点伤害，收获 {} 金币",
        stats.battles_won, stats.battles_lost, stats.damage_dealt, stats.gold_earned
    );

    Ok(())
}

fn run_encounter(
    hero: &mut Character,
    kind: EncounterKind,
    stats: &mut impl StatsRecorder,
    provider: &impl TextProvider,
) {
    let mut encounter = Encounter::start(hero, kind, stats);
    println!("\n遭遇了 {}！", encounter.monster.name);

    while encounter.state() == EncounterState::Active {
        // 简单策略：残血喝药，学会的技能优先，否则平砍
        let hp = encounter.hero.current_hp;
        let max_hp = encounter.hero.effective().max_hp;
        let action = if hp * 4 < max_hp && encounter.hero.potions > 0 {
            PlayerAction::Potion
        } else if encounter.hero.skills.contains_key(&SkillId::HeavyBlow) {
            PlayerAction::Skill(SkillId::HeavyBlow)
        } else {
            PlayerAction::Attack
        };

        for event in encounter.play_round(action, stats) {
            println!("{}", render_event(provider, &event));
        }
    }
}
