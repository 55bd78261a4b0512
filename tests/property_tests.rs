// tests/property_tests.rs
//! 数值不变量的随机化测试

use proptest::prelude::*;

use combat::{CombatEvent, Encounter, EncounterKind, Monster, PlayerAction};
use hero::{Character, Class, StatusEffects, StatusKind};
use items::{Equipment, EquipmentKind, Rarity};
use stats::NullRecorder;

fn dummy_monster(hp: u32, attack: u32, defense: u32) -> Monster {
    Monster {
        name: "靶子".to_string(),
        max_hp: hp,
        current_hp: hp,
        attack,
        defense,
        dodge: 0.0,
        gold_reward: 0,
        exp_reward: 0,
        ability: None,
        boss_skills: Vec::new(),
        statuses: StatusEffects::new(),
        enraged: false,
    }
}

proptest! {
    /// 任意攻防组合下，命中伤害从不低于1
    #[test]
    fn final_damage_is_at_least_one(
        seed in any::<u64>(),
        base_attack in 1u32..200,
        defense in 0u32..2000,
    ) {
        let mut hero = Character::with_seed("属性".to_string(), Class::Warrior, seed);
        hero.base_attack = base_attack;
        hero.base_max_hp = 1_000_000;
        hero.current_hp = 1_000_000;

        let monster = dummy_monster(1_000_000, 1, defense);
        let mut encounter = Encounter::with_monster(&mut hero, monster, EncounterKind::Normal);
        let events = encounter.play_round(PlayerAction::Attack, &mut NullRecorder);

        let damage = events.iter().find_map(|e| match e {
            CombatEvent::HeroAttack { damage, .. } => Some(*damage),
            _ => None,
        });
        prop_assert!(damage.unwrap() >= 1);
    }

    /// 状态倒计时严格每tick减1，归零即移除
    #[test]
    fn status_countdown_is_strict(duration in 1u32..20) {
        let mut effects = StatusEffects::new();
        effects.add(StatusKind::Frostbite, duration);

        for step in 0..duration {
            prop_assert_eq!(effects.remaining(StatusKind::Frostbite), duration - step);
            effects.tick(5);
        }
        prop_assert!(!effects.has(StatusKind::Frostbite));
    }

    /// 强化等级单调不减且永不越过15
    #[test]
    fn enhancement_level_is_monotonic_and_capped(
        gold_rolls in proptest::collection::vec(0u32..5000, 1..40),
    ) {
        let mut weapon = Equipment {
            name: "测试".to_string(),
            kind: EquipmentKind::Weapon,
            rarity: Rarity::Common,
            base_attack: 10,
            base_defense: 0,
            base_hp: 0,
            enhancement_level: 0,
            enchantment: None,
            legendary_attribute: None,
            set_bonus: None,
            special_effects: Vec::new(),
        };

        let mut previous = 0;
        for gold in gold_rolls {
            weapon.try_enhance(gold);
            prop_assert!(weapon.enhancement_level >= previous);
            prop_assert!(weapon.enhancement_level <= 15);
            previous = weapon.enhancement_level;
        }

        // 传说词条当且仅当到达过10级
        prop_assert_eq!(
            weapon.legendary_attribute.is_some(),
            weapon.enhancement_level >= 10
        );
    }

    /// 治疗与药水永不把生命抬过有效上限
    #[test]
    fn healing_never_exceeds_effective_max(
        seed in any::<u64>(),
        heal in 0u32..10_000,
    ) {
        let mut hero = Character::with_seed("属性".to_string(), Class::Mage, seed);
        hero.current_hp = 1;
        hero.heal(heal);
        prop_assert!(hero.current_hp <= hero.effective().max_hp);

        hero.drink_potion();
        prop_assert!(hero.current_hp <= hero.effective().max_hp);
    }
}
