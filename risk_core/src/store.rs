//! External record stores and in-memory implementations
//!
//! The engine never owns persistence. It reads records through these traits
//! and writes back narrow deltas while holding the relevant keyed locks.

use crate::character::Character;
use crate::config::default_territories;
use crate::conquest::{Territory, MAX_DEFENSE};
use crate::duel::PvpRecord;
use crate::error::StoreError;
use crate::types::{CharacterId, FactionId, TerritoryKey};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Change to apply to a stored character
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDelta {
    /// Added to the balance (negative to charge)
    pub currency_delta: i64,
    /// New current HP, if it changed
    pub hp_absolute: Option<i64>,
    pub xp_delta: i64,
    /// Replacement PvP record, if a duel finished
    pub pvp: Option<PvpRecord>,
}

impl CharacterDelta {
    pub fn currency(amount: i64) -> Self {
        CharacterDelta {
            currency_delta: amount,
            ..Default::default()
        }
    }

    pub fn with_hp(mut self, hp: i64) -> Self {
        self.hp_absolute = Some(hp);
        self
    }

    pub fn with_xp(mut self, xp: i64) -> Self {
        self.xp_delta = xp;
        self
    }

    pub fn with_pvp(mut self, record: PvpRecord) -> Self {
        self.pvp = Some(record);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == CharacterDelta::default()
    }
}

/// Source of truth for character records
pub trait CharacterStore: Send + Sync {
    fn load(&self, id: CharacterId) -> Result<Character, StoreError>;

    fn save_delta(&self, id: CharacterId, delta: &CharacterDelta) -> Result<(), StoreError>;
}

/// Source of truth for territory records
pub trait TerritoryStore: Send + Sync {
    fn load(&self, key: &TerritoryKey) -> Result<Territory, StoreError>;

    fn save_ownership(
        &self,
        key: &TerritoryKey,
        faction: FactionId,
        new_defense: u32,
    ) -> Result<(), StoreError>;

    fn save_defense(&self, key: &TerritoryKey, new_defense: u32) -> Result<(), StoreError>;
}

/// Character store backed by a map
#[derive(Debug, Default)]
pub struct InMemoryCharacterStore {
    characters: RwLock<HashMap<CharacterId, Character>>,
}

impl InMemoryCharacterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, character: Character) {
        self.characters.write().insert(character.id, character);
    }

    /// Snapshot of a stored character
    pub fn get(&self, id: CharacterId) -> Option<Character> {
        self.characters.read().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.characters.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.read().is_empty()
    }
}

impl CharacterStore for InMemoryCharacterStore {
    fn load(&self, id: CharacterId) -> Result<Character, StoreError> {
        self.get(id).ok_or(StoreError::CharacterNotFound(id))
    }

    fn save_delta(&self, id: CharacterId, delta: &CharacterDelta) -> Result<(), StoreError> {
        let mut characters = self.characters.write();
        let character = characters
            .get_mut(&id)
            .ok_or(StoreError::CharacterNotFound(id))?;

        character.credits += delta.currency_delta;
        character.xp += delta.xp_delta;
        if let Some(hp) = delta.hp_absolute {
            character.base.current_hp = hp.clamp(0, character.base.max_hp.max(0));
        }
        if let Some(record) = delta.pvp {
            character.pvp = record;
        }
        Ok(())
    }
}

/// Territory store backed by a map
#[derive(Debug, Default)]
pub struct InMemoryTerritoryStore {
    territories: RwLock<HashMap<TerritoryKey, Territory>>,
}

impl InMemoryTerritoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_territories(territories: impl IntoIterator<Item = Territory>) -> Self {
        let store = Self::new();
        for territory in territories {
            store.insert(territory);
        }
        store
    }

    /// Store pre-loaded with the built-in city districts
    pub fn seeded() -> Self {
        Self::with_territories(default_territories())
    }

    pub fn insert(&self, territory: Territory) {
        self.territories
            .write()
            .insert(territory.key.clone(), territory);
    }

    pub fn get(&self, key: &TerritoryKey) -> Option<Territory> {
        self.territories.read().get(key).cloned()
    }

    /// All territories, sorted by key
    pub fn all(&self) -> Vec<Territory> {
        let mut all: Vec<_> = self.territories.read().values().cloned().collect();
        all.sort_by(|a, b| a.key.cmp(&b.key));
        all
    }
}

impl TerritoryStore for InMemoryTerritoryStore {
    fn load(&self, key: &TerritoryKey) -> Result<Territory, StoreError> {
        self.get(key)
            .ok_or_else(|| StoreError::TerritoryNotFound(key.clone()))
    }

    fn save_ownership(
        &self,
        key: &TerritoryKey,
        faction: FactionId,
        new_defense: u32,
    ) -> Result<(), StoreError> {
        let mut territories = self.territories.write();
        let territory = territories
            .get_mut(key)
            .ok_or_else(|| StoreError::TerritoryNotFound(key.clone()))?;
        territory.owner = Some(faction);
        territory.defense = new_defense.min(MAX_DEFENSE);
        Ok(())
    }

    fn save_defense(&self, key: &TerritoryKey, new_defense: u32) -> Result<(), StoreError> {
        let mut territories = self.territories.write();
        let territory = territories
            .get_mut(key)
            .ok_or_else(|| StoreError::TerritoryNotFound(key.clone()))?;
        territory.defense = new_defense.min(MAX_DEFENSE);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_delta_applies_all_fields() {
        let store = InMemoryCharacterStore::new();
        store.insert(Character::new(CharacterId(1), "Vex").with_credits(1000));

        let delta = CharacterDelta::currency(-300).with_hp(40).with_xp(150);
        store.save_delta(CharacterId(1), &delta).unwrap();

        let c = store.get(CharacterId(1)).unwrap();
        assert_eq!(c.credits, 700);
        assert_eq!(c.base.current_hp, 40);
        assert_eq!(c.xp, 150);
    }

    #[test]
    fn test_save_delta_clamps_hp() {
        let store = InMemoryCharacterStore::new();
        store.insert(Character::new(CharacterId(1), "Vex"));

        store
            .save_delta(CharacterId(1), &CharacterDelta::default().with_hp(-20))
            .unwrap();
        assert_eq!(store.get(CharacterId(1)).unwrap().base.current_hp, 0);

        store
            .save_delta(CharacterId(1), &CharacterDelta::default().with_hp(500))
            .unwrap();
        assert_eq!(store.get(CharacterId(1)).unwrap().base.current_hp, 100);
    }

    #[test]
    fn test_missing_records() {
        let characters = InMemoryCharacterStore::new();
        assert_eq!(
            characters.load(CharacterId(9)).unwrap_err(),
            StoreError::CharacterNotFound(CharacterId(9))
        );

        let territories = InMemoryTerritoryStore::new();
        let key = TerritoryKey::from("nowhere");
        assert!(territories.load(&key).is_err());
        assert!(territories.save_defense(&key, 10).is_err());
    }

    #[test]
    fn test_seeded_territory_store() {
        let store = InMemoryTerritoryStore::seeded();
        assert_eq!(store.all().len(), 9);

        let key = TerritoryKey::from("undercity");
        store.save_ownership(&key, FactionId(2), 30).unwrap();
        let t = store.load(&key).unwrap();
        assert_eq!(t.owner, Some(FactionId(2)));
        assert_eq!(t.defense, 30);
    }
}
