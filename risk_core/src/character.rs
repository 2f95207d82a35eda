//! Character - The persisted player record the engine reads

use crate::duel::PvpRecord;
use crate::error::ValidationError;
use crate::types::{BodySlot, CharacterId, EquipSlot, FactionId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unmodified attributes of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseAttributes {
    pub attack: i64,
    pub defense: i64,
    pub speed: i64,
    pub max_hp: i64,
    pub current_hp: i64,
}

impl Default for BaseAttributes {
    fn default() -> Self {
        BaseAttributes {
            attack: 10,
            defense: 5,
            speed: 8,
            max_hp: 100,
            current_hp: 100,
        }
    }
}

/// A player character as loaded from the CharacterStore
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub base: BaseAttributes,
    pub credits: i64,
    pub xp: i64,
    pub faction: Option<FactionId>,
    #[serde(default)]
    pub pvp: PvpRecord,
    /// Implant key per body slot
    #[serde(default)]
    installed: BTreeMap<BodySlot, String>,
    /// Skill key to learned level (1..=max)
    #[serde(default)]
    skills: BTreeMap<String, u8>,
    /// Item key per equip slot
    #[serde(default)]
    equipped: BTreeMap<EquipSlot, String>,
}

impl Character {
    /// Create a character with default base attributes and no credits
    pub fn new(id: CharacterId, name: impl Into<String>) -> Self {
        Character {
            id,
            name: name.into(),
            base: BaseAttributes::default(),
            credits: 0,
            xp: 0,
            faction: None,
            pvp: PvpRecord::default(),
            installed: BTreeMap::new(),
            skills: BTreeMap::new(),
            equipped: BTreeMap::new(),
        }
    }

    pub fn with_credits(mut self, credits: i64) -> Self {
        self.credits = credits;
        self
    }

    pub fn with_faction(mut self, faction: FactionId) -> Self {
        self.faction = Some(faction);
        self
    }

    pub fn with_base(mut self, base: BaseAttributes) -> Self {
        self.base = base;
        self
    }

    /// Install an implant, returning whatever occupied the slot before
    pub fn install(&mut self, slot: BodySlot, implant: impl Into<String>) -> Option<String> {
        self.installed.insert(slot, implant.into())
    }

    /// Set a skill's level; levels outside 1..=max_level are rejected
    pub fn learn_skill(
        &mut self,
        skill: impl Into<String>,
        level: u8,
        max_level: u8,
    ) -> Result<(), ValidationError> {
        if level == 0 || level > max_level {
            return Err(ValidationError::InvalidSkillLevel {
                level,
                max: max_level,
            });
        }
        self.skills.insert(skill.into(), level);
        Ok(())
    }

    /// Learned level of a skill, 0 if unlearned
    pub fn skill_level(&self, skill: &str) -> u8 {
        self.skills.get(skill).copied().unwrap_or(0)
    }

    /// Equip an item, returning whatever occupied the slot before
    pub fn equip(&mut self, slot: EquipSlot, item: impl Into<String>) -> Option<String> {
        self.equipped.insert(slot, item.into())
    }

    pub fn installed(&self) -> impl Iterator<Item = (BodySlot, &str)> {
        self.installed.iter().map(|(slot, key)| (*slot, key.as_str()))
    }

    pub fn skills(&self) -> impl Iterator<Item = (&str, u8)> {
        self.skills.iter().map(|(key, level)| (key.as_str(), *level))
    }

    pub fn equipped(&self) -> impl Iterator<Item = (EquipSlot, &str)> {
        self.equipped.iter().map(|(slot, key)| (*slot, key.as_str()))
    }
}
