// tests/equipment_test.rs
//! 装备强化、附魔与属性汇总的端到端测试

use pretty_assertions::assert_eq;

use hero::{Character, Class};
use items::equipment::LEGENDARY_UNLOCK_LEVEL;
use items::{Equipment, EquipmentKind, Rarity, create_random};

fn plain_weapon(base_attack: u32) -> Equipment {
    Equipment {
        name: "试炼之剑".to_string(),
        kind: EquipmentKind::Weapon,
        rarity: Rarity::Epic,
        base_attack,
        base_defense: 0,
        base_hp: 0,
        enhancement_level: 0,
        enchantment: None,
        legendary_attribute: None,
        set_bonus: None,
        special_effects: Vec::new(),
    }
}

#[test]
fn legendary_attribute_unlocks_exactly_on_level_ten() {
    let mut weapon = plain_weapon(10);
    weapon.enhancement_level = 9;

    assert!(weapon.legendary_attribute.is_none());

    let outcome = weapon.try_enhance(100_000);
    assert!(outcome.success);
    assert!(outcome.legendary_unlocked);
    assert_eq!(weapon.enhancement_level, LEGENDARY_UNLOCK_LEVEL);
    let granted = weapon.legendary_attribute;
    assert!(granted.is_some());

    // 继续强化不再重复授予、也不改变词条
    let outcome = weapon.try_enhance(100_000);
    assert!(outcome.success);
    assert!(!outcome.legendary_unlocked);
    assert_eq!(weapon.enhancement_level, 11);
    assert_eq!(weapon.legendary_attribute, granted);
}

#[test]
fn enhancement_stops_at_the_cap() {
    let mut weapon = plain_weapon(10);
    weapon.enhancement_level = 15;

    let outcome = weapon.try_enhance(1_000_000);
    assert!(!outcome.success);
    assert_eq!(outcome.gold_spent, 0);
    assert_eq!(weapon.enhancement_level, 15);
}

#[test]
fn equipped_weapon_raises_effective_attack() {
    let mut hero = Character::with_seed("测试".to_string(), Class::Warrior, 3);
    hero.base_attack = 20;

    hero.acquire(plain_weapon(10));
    assert!(hero.equip(0));
    assert_eq!(hero.effective().attack, 30);
}

#[test]
fn generated_legendary_gets_the_five_x_multiplier_range() {
    let mut hero = Character::with_seed("测试".to_string(), Class::Warrior, 8);
    for _ in 0..50 {
        let weapon = create_random(Some(EquipmentKind::Weapon), 0, true, &mut hero.rng);
        assert_eq!(weapon.rarity, Rarity::Legendary);
        assert!(weapon.base_attack >= 25); // 5 × 5倍率
        assert!(weapon.base_attack <= 50); // 10 × 5倍率
    }
}
