//src/hero/src/core.rs
use bincode::{Decode, Encode};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use items::equipment::SetBonus;
use items::{EnchantOutcome, Enchantment, EnhanceOutcome, Equipment, EquipmentKind, Modifier};

use crate::class::Class;
use crate::rng::GameRng;
use crate::skills::{SkillEffect, SkillId, SkillTree};
use crate::stats;
use crate::status::StatusEffects;

/// 升级所需经验 = 当前等级 × 该系数
pub const EXP_PER_LEVEL: u32 = 100;

/// 药水回复量：生命上限的一半，保底20点
pub const POTION_HEAL_RATIO: f64 = 0.5;
pub const POTION_HEAL_FLOOR: u32 = 20;

/// 玩家角色
///
/// 基础属性只被升级和永久献祭修改；有效属性始终经由
/// [`stats::effective`] 推导。special_effects是修饰符汇总缓存，
/// 在装备或被动技能变化时整体重算。
#[derive(Clone, Debug, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub class: Class,

    pub base_attack: u32,
    pub base_defense: u32,
    pub base_max_hp: u32,
    pub current_hp: u32,

    pub level: u32,
    pub experience: u32,
    pub gold: u32,
    pub potions: u32,
    pub skill_points: u32,

    pub weapon: Option<Equipment>,
    pub armor: Option<Equipment>,
    pub accessory: Option<Equipment>,
    pub inventory: Vec<Equipment>,

    pub skills: HashMap<SkillId, u32>,
    pub status_effects: StatusEffects,
    pub special_effects: HashMap<Modifier, f64>,

    pub rng: GameRng,
}

impl Character {
    /// 创建新角色（随机种子）
    pub fn new(name: String, class: Class) -> Self {
        Self::with_seed(name, class, rand::rng().random())
    }

    /// 创建新角色（指定种子，可复现）
    pub fn with_seed(name: String, class: Class, seed: u64) -> Self {
        let mut character = Self {
            name,
            class,
            base_attack: class.base_attack(),
            base_defense: class.base_defense(),
            base_max_hp: class.base_max_hp(),
            current_hp: class.base_max_hp(),
            level: 1,
            experience: 0,
            gold: 100,
            potions: 3,
            skill_points: 1,
            weapon: None,
            armor: None,
            accessory: None,
            inventory: Vec::new(),
            skills: HashMap::new(),
            status_effects: StatusEffects::new(),
            special_effects: HashMap::new(),
            rng: GameRng::new(seed),
        };
        character.recompute_modifiers();
        character
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// 有效属性快照
    pub fn effective(&self) -> stats::EffectiveStats {
        stats::effective(self)
    }

    /// 读取某个修饰符的累计值（未持有返回0）
    pub fn modifier(&self, modifier: Modifier) -> f64 {
        self.special_effects.get(&modifier).copied().unwrap_or(0.0)
    }

    /// 受到伤害，生命值下限为0
    pub fn take_damage(&mut self, damage: u32) {
        self.current_hp = self.current_hp.saturating_sub(damage);
    }

    /// 回复生命，封顶有效上限
    pub fn heal(&mut self, amount: u32) {
        let max_hp = self.effective().max_hp;
        self.current_hp = self.current_hp.saturating_add(amount).min(max_hp);
    }

    /// 上限变化后收拢当前生命值
    pub fn clamp_hp(&mut self) {
        let max_hp = self.effective().max_hp;
        if self.current_hp > max_hp {
            self.current_hp = max_hp;
        }
    }

    /// 喝下一瓶药水
    ///
    /// 没有药水时返回false且不产生任何变化。
    pub fn drink_potion(&mut self) -> bool {
        if self.potions == 0 {
            return false;
        }
        self.potions -= 1;

        let max_hp = self.effective().max_hp;
        let amount = ((max_hp as f64 * POTION_HEAL_RATIO) as u32).max(POTION_HEAL_FLOOR);
        self.current_hp = (self.current_hp + amount).min(max_hp);
        true
    }

    /// 获得经验，可能连续升级
    ///
    /// 每次升级：按职业成长提升基础属性、+1技能点、生命回满。
    pub fn gain_exp(&mut self, amount: u32) -> u32 {
        self.experience += amount;

        let mut levels_gained = 0;
        while self.experience >= self.level * EXP_PER_LEVEL {
            self.experience -= self.level * EXP_PER_LEVEL;
            self.level += 1;
            levels_gained += 1;

            let (attack, defense, max_hp) = self.class.growth();
            self.base_attack += attack;
            self.base_defense += defense;
            self.base_max_hp += max_hp;
            self.skill_points += 1;

            self.current_hp = self.effective().max_hp;
        }
        levels_gained
    }

    /// 永久属性提升（随机事件的献祭奖励等）
    pub fn permanent_boost(&mut self, attack: u32, defense: u32, max_hp: u32) {
        self.base_attack += attack;
        self.base_defense += defense;
        self.base_max_hp += max_hp;
        if max_hp > 0 {
            self.heal(max_hp);
        }
    }

    fn slot_mut(&mut self, kind: EquipmentKind) -> &mut Option<Equipment> {
        match kind {
            EquipmentKind::Weapon => &mut self.weapon,
            EquipmentKind::Armor => &mut self.armor,
            EquipmentKind::Accessory => &mut self.accessory,
        }
    }

    pub fn slot(&self, kind: EquipmentKind) -> Option<&Equipment> {
        match kind {
            EquipmentKind::Weapon => self.weapon.as_ref(),
            EquipmentKind::Armor => self.armor.as_ref(),
            EquipmentKind::Accessory => self.accessory.as_ref(),
        }
    }

    /// 穿上背包中第index件装备
    ///
    /// 原槽位装备（若有）换回背包原位；索引越界返回false。
    pub fn equip(&mut self, index: usize) -> bool {
        if index >= self.inventory.len() {
            return false;
        }

        let equipment = self.inventory.remove(index);
        let slot = self.slot_mut(equipment.kind);
        if let Some(previous) = slot.replace(equipment) {
            self.inventory.insert(index, previous);
        }

        self.recompute_modifiers();
        self.clamp_hp();
        true
    }

    /// 卸下指定槽位的装备放回背包
    pub fn unequip(&mut self, kind: EquipmentKind) -> bool {
        let Some(equipment) = self.slot_mut(kind).take() else {
            return false;
        };
        self.inventory.push(equipment);

        self.recompute_modifiers();
        self.clamp_hp();
        true
    }

    /// 拾取装备进背包
    pub fn acquire(&mut self, equipment: Equipment) {
        self.inventory.push(equipment);
    }

    /// 强化指定槽位的装备（从角色金币扣费）
    pub fn enhance_slot(&mut self, kind: EquipmentKind) -> EnhanceOutcome {
        let gold = self.gold;
        let Some(equipment) = self.slot_mut(kind).as_mut() else {
            return EnhanceOutcome::default();
        };

        let outcome = equipment.try_enhance(gold);
        self.gold -= outcome.gold_spent;

        if outcome.success {
            self.recompute_modifiers();
            self.clamp_hp();
        }
        outcome
    }

    /// 附魔指定槽位的装备（从角色金币扣费，失败照常扣费）
    pub fn enchant_slot(&mut self, kind: EquipmentKind, enchantment: Enchantment) -> EnchantOutcome {
        let gold = self.gold;
        let Character {
            weapon,
            armor,
            accessory,
            rng,
            ..
        } = self;
        let slot = match kind {
            EquipmentKind::Weapon => weapon,
            EquipmentKind::Armor => armor,
            EquipmentKind::Accessory => accessory,
        };
        let Some(equipment) = slot.as_mut() else {
            return EnchantOutcome::default();
        };

        let outcome = equipment.try_enchant(enchantment, gold, rng);
        self.gold -= outcome.gold_spent;

        if outcome.success {
            self.recompute_modifiers();
            self.clamp_hp();
        }
        outcome
    }

    /// 升级技能（消耗技能点）
    pub fn upgrade_skill(&mut self, id: SkillId) -> bool {
        let tree = SkillTree::for_class(self.class);
        let (success, remaining) = tree.upgrade(id, &mut self.skills, self.skill_points);
        if success {
            self.skill_points = remaining;
            self.recompute_modifiers();
        }
        success
    }

    pub fn skill_tree(&self) -> SkillTree {
        SkillTree::for_class(self.class)
    }

    /// 重算修饰符汇总表
    ///
    /// 来源：职业被动 + 被动技能 + 已穿戴装备的标签 + 成套的套装效果。
    /// 同名修饰符全部相加。
    pub fn recompute_modifiers(&mut self) {
        let mut effects: HashMap<Modifier, f64> = HashMap::new();

        for passive in self.class.passives() {
            *effects.entry(passive.modifier).or_insert(0.0) += passive.value;
        }

        let tree = SkillTree::for_class(self.class);
        for node in tree.nodes() {
            if let SkillEffect::Passive { modifier } = node.effect {
                let value = tree.effect(node.id, 0, &self.skills);
                if value > 0.0 {
                    *effects.entry(modifier).or_insert(0.0) += value;
                }
            }
        }

        let mut set_counts: HashMap<SetBonus, u32> = HashMap::new();
        for equipment in [
            self.weapon.as_ref(),
            self.armor.as_ref(),
            self.accessory.as_ref(),
        ]
        .into_iter()
        .flatten()
        {
            for tag in equipment.modifier_tags() {
                *effects.entry(tag.modifier).or_insert(0.0) += tag.value;
            }
            if let Some(set) = equipment.set_bonus {
                *set_counts.entry(set).or_insert(0) += 1;
            }
        }

        // 同套装两件及以上，套装效果生效一次
        for (set, count) in set_counts {
            if count >= 2 {
                let tag = set.effect();
                *effects.entry(tag.modifier).or_insert(0.0) += tag.value;
            }
        }

        self.special_effects = effects;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use items::Rarity;

    fn test_equipment(kind: EquipmentKind) -> Equipment {
        Equipment {
            name: "测试装备".to_string(),
            kind,
            rarity: Rarity::Common,
            base_attack: if kind == EquipmentKind::Weapon { 10 } else { 0 },
            base_defense: if kind == EquipmentKind::Armor { 5 } else { 0 },
            base_hp: if kind == EquipmentKind::Armor { 30 } else { 0 },
            enhancement_level: 0,
            enchantment: None,
            legendary_attribute: None,
            set_bonus: None,
            special_effects: Vec::new(),
        }
    }

    #[test]
    fn leveling_is_repeated_until_exp_is_spent() {
        let mut hero = Character::with_seed("测试".to_string(), Class::Warrior, 1);
        // 1级需要100，2级需要200
        let gained = hero.gain_exp(350);
        assert_eq!(gained, 2);
        assert_eq!(hero.level, 3);
        assert_eq!(hero.experience, 50);
        assert_eq!(hero.skill_points, 3); // 初始1 + 每级1
        assert_eq!(hero.current_hp, hero.effective().max_hp);
    }

    #[test]
    fn equip_swaps_out_the_previous_item() {
        let mut hero = Character::with_seed("测试".to_string(), Class::Rogue, 1);
        hero.acquire(test_equipment(EquipmentKind::Weapon));
        hero.acquire(test_equipment(EquipmentKind::Weapon));

        assert!(hero.equip(0));
        assert!(hero.weapon.is_some());
        assert_eq!(hero.inventory.len(), 1);

        assert!(hero.equip(0));
        assert_eq!(hero.inventory.len(), 1); // 被换下的武器回到背包
    }

    #[test]
    fn unequip_clamps_hp_to_the_lower_max() {
        let mut hero = Character::with_seed("测试".to_string(), Class::Mage, 1);
        hero.acquire(test_equipment(EquipmentKind::Armor));
        hero.equip(0);
        hero.current_hp = hero.effective().max_hp;

        assert!(hero.unequip(EquipmentKind::Armor));
        assert_eq!(hero.current_hp, hero.effective().max_hp);
    }

    #[test]
    fn potion_heals_half_max_with_floor() {
        let mut hero = Character::with_seed("测试".to_string(), Class::Warrior, 1);
        hero.current_hp = 1;
        let max_hp = hero.effective().max_hp;

        assert!(hero.drink_potion());
        assert_eq!(hero.current_hp, 1 + (max_hp / 2).max(POTION_HEAL_FLOOR));
        assert_eq!(hero.potions, 2);
    }

    #[test]
    fn potion_is_a_noop_when_empty() {
        let mut hero = Character::with_seed("测试".to_string(), Class::Warrior, 1);
        hero.potions = 0;
        hero.current_hp = 1;

        assert!(!hero.drink_potion());
        assert_eq!(hero.current_hp, 1);
    }

    #[test]
    fn passive_skill_feeds_the_modifier_table() {
        let mut hero = Character::with_seed("测试".to_string(), Class::Warrior, 1);
        let before = hero.modifier(Modifier::DamageReduction);
        assert!((before - 0.05).abs() < 1e-9); // 职业被动

        assert!(hero.upgrade_skill(SkillId::IronSkin));
        let after = hero.modifier(Modifier::DamageReduction);
        assert!((after - 0.08).abs() < 1e-9); // +0.03/级
    }

    #[test]
    fn matching_set_pieces_activate_the_bonus_once() {
        let mut hero = Character::with_seed("测试".to_string(), Class::Warrior, 1);

        let mut armor = test_equipment(EquipmentKind::Armor);
        armor.set_bonus = Some(SetBonus::Guardian);
        let mut accessory = test_equipment(EquipmentKind::Accessory);
        accessory.set_bonus = Some(SetBonus::Guardian);

        hero.acquire(armor);
        hero.equip(0);
        let single = hero.modifier(Modifier::DamageReduction);

        hero.acquire(accessory);
        hero.equip(0);
        let paired = hero.modifier(Modifier::DamageReduction);

        assert!((paired - single - 0.08).abs() < 1e-9);
    }

    #[test]
    fn enhance_slot_deducts_gold_and_respects_shortage() {
        let mut hero = Character::with_seed("测试".to_string(), Class::Warrior, 1);
        hero.gold = 100;
        hero.acquire(test_equipment(EquipmentKind::Weapon));
        hero.equip(0);

        let outcome = hero.enhance_slot(EquipmentKind::Weapon);
        assert!(outcome.success);
        assert_eq!(hero.gold, 0);

        let outcome = hero.enhance_slot(EquipmentKind::Weapon);
        assert!(!outcome.success);
        assert_eq!(hero.gold, 0);
    }
}
