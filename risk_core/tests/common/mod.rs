//! Shared fixtures for integration tests

#![allow(dead_code)]

use risk_core::prelude::*;
use risk_core::{default_territories, Territory};
use std::sync::Arc;

pub const FACTION_RED: FactionId = FactionId(1);
pub const FACTION_BLUE: FactionId = FactionId(2);

pub struct World {
    pub engine: Engine,
    pub characters: Arc<InMemoryCharacterStore>,
    pub territories: Arc<InMemoryTerritoryStore>,
    pub clock: Arc<ManualClock>,
}

impl World {
    pub fn credits(&self, id: CharacterId) -> i64 {
        self.characters.get(id).expect("character exists").credits
    }

    pub fn character(&self, id: CharacterId) -> Character {
        self.characters.get(id).expect("character exists")
    }

    pub fn territory(&self, key: &TerritoryKey) -> Territory {
        self.territories.get(key).expect("territory exists")
    }

    pub fn add(&self, character: Character) -> CharacterId {
        let id = character.id;
        self.characters.insert(character);
        id
    }

    pub fn add_territory(&self, key: &str, income: i64, defense: u32) -> TerritoryKey {
        let key = TerritoryKey::from(key);
        self.territories
            .insert(Territory::new(key.clone(), key.as_str(), income, defense));
        key
    }
}

/// Engine over in-memory stores seeded with the city districts
pub fn world(rng: Arc<dyn RandomSource>) -> World {
    let characters = Arc::new(InMemoryCharacterStore::new());
    let territories = Arc::new(InMemoryTerritoryStore::with_territories(default_territories()));
    let clock = Arc::new(ManualClock::at_epoch());
    let engine = Engine::builder()
        .characters(characters.clone())
        .territories(territories.clone())
        .clock(clock.clone())
        .rng(rng)
        .build()
        .expect("built-in constants are valid");
    World {
        engine,
        characters,
        territories,
        clock,
    }
}

pub fn scripted(values: &[i64]) -> Arc<ScriptedSource> {
    Arc::new(ScriptedSource::new(values.iter().copied()))
}

pub fn seeded(seed: u64) -> Arc<ChaChaSource> {
    Arc::new(ChaChaSource::seeded(seed))
}

/// A faction member with default stats and the given balance
pub fn member(id: u64, faction: FactionId, credits: i64) -> Character {
    Character::new(CharacterId(id), format!("runner-{id}"))
        .with_faction(faction)
        .with_credits(credits)
}

/// A member with explicit attack, defense and speed
pub fn fighter(id: u64, faction: FactionId, credits: i64, attack: i64, defense: i64, speed: i64) -> Character {
    member(id, faction, credits).with_base(BaseAttributes {
        attack,
        defense,
        speed,
        max_hp: 100,
        current_hp: 100,
    })
}
