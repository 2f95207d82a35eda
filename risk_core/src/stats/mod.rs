//! Effective stat computation
//!
//! A character's combat profile is rebuilt from scratch on every request:
//! base attributes, then implants, skills and equipment in priority order,
//! then the stance multipliers, then clamping.

mod accumulator;

pub use accumulator::StatAccumulator;

use crate::catalog::{ModifierCatalog, Stance};
use crate::character::Character;
use crate::source::{
    BaseStatsSource, CombatModifierSource, EquipmentSource, ImplantSource, SkillSource,
};
use crate::types::SkillBranch;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A character's combat profile after every modifier. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EffectiveStats {
    pub attack: i64,
    pub defense: i64,
    pub speed: i64,
    pub max_hp: i64,
    pub current_hp: i64,
}

/// Which modifier layers to include, and an optional stance
#[derive(Debug, Clone)]
pub struct AggregationOptions {
    pub stance: Option<Stance>,
    pub include_implants: bool,
    pub include_skills: bool,
    pub include_equipment: bool,
}

impl Default for AggregationOptions {
    fn default() -> Self {
        AggregationOptions {
            stance: None,
            include_implants: true,
            include_skills: true,
            include_equipment: true,
        }
    }
}

impl AggregationOptions {
    pub fn with_stance(stance: Stance) -> Self {
        AggregationOptions {
            stance: Some(stance),
            ..Default::default()
        }
    }

    /// Base attributes only
    pub fn base_only() -> Self {
        AggregationOptions {
            stance: None,
            include_implants: false,
            include_skills: false,
            include_equipment: false,
        }
    }
}

/// Highest learned level per non-combat branch, used by heist odds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillProfile {
    pub tech_level: u8,
    pub stealth_level: u8,
}

/// Computes effective stats against a shared catalog
#[derive(Debug, Clone)]
pub struct StatAggregator {
    catalog: Arc<ModifierCatalog>,
}

impl StatAggregator {
    pub fn new(catalog: Arc<ModifierCatalog>) -> Self {
        StatAggregator { catalog }
    }

    pub fn catalog(&self) -> &ModifierCatalog {
        &self.catalog
    }

    /// Effective stats for a character
    pub fn compute_effective(
        &self,
        character: &Character,
        options: &AggregationOptions,
    ) -> EffectiveStats {
        let catalog = self.catalog.as_ref();
        let mut sources: Vec<Box<dyn CombatModifierSource + '_>> =
            vec![Box::new(BaseStatsSource::new(character.base))];

        if options.include_implants {
            let installed = character
                .installed()
                .map(|(slot, key)| (slot, key.to_string()))
                .collect();
            sources.push(Box::new(ImplantSource::new(catalog, installed)));
        }
        if options.include_skills {
            let learned = character
                .skills()
                .map(|(key, level)| (key.to_string(), level))
                .collect();
            sources.push(Box::new(SkillSource::new(catalog, learned)));
        }
        if options.include_equipment {
            let equipped = character
                .equipped()
                .map(|(slot, key)| (slot, key.to_string()))
                .collect();
            sources.push(Box::new(EquipmentSource::new(catalog, equipped)));
        }

        let mut accumulator = StatAccumulator::new();
        sources.sort_by_key(|s| s.priority());
        for source in &sources {
            source.apply(&mut accumulator);
        }

        if let Some(stance) = &options.stance {
            accumulator.apply_stance(stance);
        }
        accumulator.finish()
    }

    /// Highest tech and stealth skill levels a character has learned
    pub fn skill_profile(&self, character: &Character) -> SkillProfile {
        let best = |branch: SkillBranch| {
            self.catalog
                .skills_in_branch(branch)
                .map(|s| character.skill_level(&s.key))
                .max()
                .unwrap_or(0)
                .min(self.catalog.max_skill_level())
        };
        SkillProfile {
            tech_level: best(SkillBranch::Tech),
            stealth_level: best(SkillBranch::Stealth),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::BaseAttributes;
    use crate::config::default_catalog;
    use crate::types::{BodySlot, CharacterId, EquipSlot};

    fn aggregator() -> StatAggregator {
        StatAggregator::new(Arc::new(default_catalog()))
    }

    fn kitted_character() -> Character {
        let mut c = Character::new(CharacterId(1), "Vex");
        c.install(BodySlot::Arm, "blitz_arm");
        c.install(BodySlot::Torso, "nano_regen");
        c.learn_skill("combat_basics", 2, 5).unwrap();
        c.learn_skill("shadow_step", 1, 5).unwrap();
        c.equip(EquipSlot::Weapon, "assault_rifle");
        c
    }

    #[test]
    fn test_base_only() {
        let stats = aggregator().compute_effective(&kitted_character(), &AggregationOptions::base_only());
        assert_eq!(stats.attack, 10);
        assert_eq!(stats.defense, 5);
        assert_eq!(stats.speed, 8);
        assert_eq!(stats.max_hp, 100);
        assert_eq!(stats.current_hp, 100);
    }

    #[test]
    fn test_all_layers() {
        let stats = aggregator().compute_effective(&kitted_character(), &AggregationOptions::default());
        // 10 base + 6 blitz + 4 combat_basics + 5 rifle
        assert_eq!(stats.attack, 25);
        assert_eq!(stats.defense, 7);
        assert_eq!(stats.speed, 11);
        assert_eq!(stats.max_hp, 115);
        // current HP carried through unmodified
        assert_eq!(stats.current_hp, 100);
    }

    #[test]
    fn test_layer_flags() {
        let options = AggregationOptions {
            include_skills: false,
            include_equipment: false,
            ..Default::default()
        };
        let stats = aggregator().compute_effective(&kitted_character(), &options);
        assert_eq!(stats.attack, 16);
        assert_eq!(stats.speed, 8);
    }

    #[test]
    fn test_stance_applied_last() {
        let agg = aggregator();
        let aggressive = agg.catalog().stance("aggressive").unwrap().clone();
        let stats = agg.compute_effective(&kitted_character(), &AggregationOptions::with_stance(aggressive));
        // 25 * 1.3 = 32.5 -> 32, 7 * 0.7 = 4.9 -> 4
        assert_eq!(stats.attack, 32);
        assert_eq!(stats.defense, 4);
        assert_eq!(stats.speed, 11);
    }

    #[test]
    fn test_negative_modifiers_clamp_to_zero() {
        let mut c = Character::new(CharacterId(2), "Glass").with_base(BaseAttributes {
            attack: 1,
            defense: 1,
            speed: 1,
            max_hp: 10,
            current_hp: 10,
        });
        c.install(BodySlot::Head, "cortex_jammer");
        let stats = aggregator().compute_effective(&c, &AggregationOptions::default());
        assert_eq!(stats.defense, 0);
        assert_eq!(stats.attack, 7);
    }

    #[test]
    fn test_current_hp_clamped_after_max_hp() {
        let c = Character::new(CharacterId(3), "Overfull").with_base(BaseAttributes {
            attack: 10,
            defense: 5,
            speed: 8,
            max_hp: 100,
            current_hp: 140,
        });
        let stats = aggregator().compute_effective(&c, &AggregationOptions::default());
        assert_eq!(stats.current_hp, 100);
    }

    #[test]
    fn test_modifiers_only_count_in_their_catalog_slot() {
        let mut c = Character::new(CharacterId(6), "Stacker");
        for slot in [BodySlot::Head, BodySlot::Eyes, BodySlot::Legs] {
            c.install(slot, "neural_spike");
        }
        for slot in [EquipSlot::Weapon, EquipSlot::Armor, EquipSlot::Accessory] {
            c.equip(slot, "assault_rifle");
        }
        let stats = aggregator().compute_effective(&c, &AggregationOptions::default());
        // one neural_spike (+3 atk, +5 spd) and one rifle (+5 atk)
        assert_eq!(stats.attack, 18);
        assert_eq!(stats.speed, 13);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mut c = Character::new(CharacterId(4), "Ghost");
        c.install(BodySlot::Eyes, "discontinued_optics");
        c.learn_skill("forgotten_art", 3, 5).unwrap();
        c.equip(EquipSlot::Weapon, "prototype_railgun");
        let stats = aggregator().compute_effective(&c, &AggregationOptions::default());
        assert_eq!(stats.attack, 10);
    }

    #[test]
    fn test_skill_profile() {
        let mut c = Character::new(CharacterId(5), "Wire");
        c.learn_skill("hack_basics", 4, 5).unwrap();
        c.learn_skill("deep_dive", 2, 5).unwrap();
        c.learn_skill("ghost_protocol", 3, 5).unwrap();
        let profile = aggregator().skill_profile(&c);
        assert_eq!(profile.tech_level, 4);
        assert_eq!(profile.stealth_level, 3);
    }
}
