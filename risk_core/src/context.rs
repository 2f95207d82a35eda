//! Shared collaborators for every resolver

use crate::catalog::ModifierCatalog;
use crate::character::Character;
use crate::clock::Clock;
use crate::config::GameConstants;
use crate::error::{EngineError, ValidationError};
use crate::gate::ResourceGate;
use crate::random::RandomSource;
use crate::stats::{AggregationOptions, EffectiveStats, StatAggregator};
use crate::store::{CharacterStore, TerritoryStore};
use crate::types::{CharacterId, FactionId};
use std::sync::Arc;

/// Everything a resolver needs: stores, tables, time, randomness and the gate
pub struct EngineContext {
    pub characters: Arc<dyn CharacterStore>,
    pub territories: Arc<dyn TerritoryStore>,
    pub catalog: Arc<ModifierCatalog>,
    pub constants: Arc<GameConstants>,
    pub clock: Arc<dyn Clock>,
    pub rng: Arc<dyn RandomSource>,
    pub gate: ResourceGate,
    pub aggregator: StatAggregator,
}

impl EngineContext {
    pub fn new(
        characters: Arc<dyn CharacterStore>,
        territories: Arc<dyn TerritoryStore>,
        catalog: Arc<ModifierCatalog>,
        constants: Arc<GameConstants>,
        clock: Arc<dyn Clock>,
        rng: Arc<dyn RandomSource>,
    ) -> Self {
        let gate = ResourceGate::new(clock.clone(), constants.cooldowns.clone());
        let aggregator = StatAggregator::new(catalog.clone());
        EngineContext {
            characters,
            territories,
            catalog,
            constants,
            clock,
            rng,
            gate,
            aggregator,
        }
    }

    /// Load a character and compute its effective stats with every layer
    pub fn load_with_stats(
        &self,
        id: CharacterId,
    ) -> Result<(Character, EffectiveStats), EngineError> {
        let character = self.characters.load(id)?;
        let stats = self
            .aggregator
            .compute_effective(&character, &AggregationOptions::default());
        Ok((character, stats))
    }

    /// Faction of a character, or a validation error if it has none
    pub fn require_faction(character: &Character) -> Result<FactionId, ValidationError> {
        character
            .faction
            .ok_or(ValidationError::NoFaction(character.id))
    }
}
