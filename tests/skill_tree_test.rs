// tests/skill_tree_test.rs
//! 技能树前置校验与角色技能点结算

use std::collections::HashMap;

use hero::{Character, Class, SkillId, SkillTree};

#[test]
fn prerequisite_gating_then_exact_point_spend() {
    let tree = SkillTree::for_class(Class::Warrior);
    let mut learned = HashMap::new();
    learned.insert(SkillId::HeavyBlow, 1);

    // 前置为重击2级：1级时无论点数多少都不可升级
    let (success, remaining) = tree.upgrade(SkillId::Cleave, &mut learned, 5);
    assert!(!success);
    assert_eq!(remaining, 5);
    assert!(!learned.contains_key(&SkillId::Cleave));

    // 补齐前置后，恰好1点也能升级，剩余0
    learned.insert(SkillId::HeavyBlow, 2);
    let (success, remaining) = tree.upgrade(SkillId::Cleave, &mut learned, 1);
    assert!(success);
    assert_eq!(remaining, 0);
    assert_eq!(learned[&SkillId::Cleave], 1);
}

#[test]
fn character_skill_points_are_deducted_on_upgrade() {
    let mut hero = Character::with_seed("测试".to_string(), Class::Mage, 4);
    hero.skill_points = 3;

    assert!(hero.upgrade_skill(SkillId::Fireball));
    assert_eq!(hero.skill_points, 2);
    assert_eq!(hero.skills[&SkillId::Fireball], 1);

    // 点数不足时失败且不扣点
    hero.skill_points = 0;
    assert!(!hero.upgrade_skill(SkillId::Fireball));
    assert_eq!(hero.skills[&SkillId::Fireball], 1);
}

#[test]
fn every_class_tree_has_reachable_prerequisites() {
    for class in [Class::Warrior, Class::Mage, Class::Rogue, Class::Ranger] {
        let tree = SkillTree::for_class(class);
        for node in tree.nodes() {
            for (prereq, required_level) in &node.prerequisites {
                let target = tree
                    .node(*prereq)
                    .unwrap_or_else(|| panic!("{class} 的前置技能不在本树中"));
                assert!(
                    *required_level <= target.max_level,
                    "{class} 的前置等级超出了上限"
                );
            }
        }
    }
}

#[test]
fn effect_values_scale_with_learned_level() {
    let tree = SkillTree::for_class(Class::Ranger);
    let mut learned = HashMap::new();
    learned.insert(SkillId::FirstAid, 2);

    // 急救每级回复20点
    assert_eq!(tree.effect(SkillId::FirstAid, 0, &learned), 40.0);
    // 未学习的技能效果为0
    assert_eq!(tree.effect(SkillId::Volley, 0, &learned), 0.0);
}
