//! risk_core - Stat aggregation and contested-action resolution for Risk City
//!
//! This library provides:
//! - StatAggregator: Effective combat stats from implants, skills, items and stance
//! - ResourceGate: Atomic funds and cooldown checks per actor
//! - Duel resolution: Turn-based fights between two stat snapshots
//! - ConquestStateMachine: Raids, assaults, sieges and fortification
//! - HeistBoard: Crew-based heists with shared reward and risk
//! - Engine: The facade tying them together over injectable stores, clock and RNG

pub mod catalog;
pub mod character;
pub mod clock;
pub mod config;
pub mod conquest;
pub mod context;
pub mod duel;
pub mod engine;
pub mod error;
pub mod gate;
pub mod heist;
pub mod locks;
pub mod prelude;
pub mod random;
pub mod source;
pub mod stats;
pub mod store;
pub mod types;

// Re-export core types for convenience
pub use catalog::{ModifierCatalog, Stance, StatBonus};
pub use character::{BaseAttributes, Character};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{default_catalog, default_constants, default_territories, GameConstants};
pub use conquest::{
    AssaultOutcome, ConquestStateMachine, FortifyOutcome, RaidOutcome, SiegeContribution,
    SiegeDeclared, SiegeSession, Territory,
};
pub use context::EngineContext;
pub use duel::{resolve_duel, DuelOutcome, DuelWinner, PvpRecord};
pub use engine::{DuelReport, DuelRequest, Engine, EngineBuilder};
pub use error::{EngineError, ResourceError, StoreError, ValidationError};
pub use gate::ResourceGate;
pub use heist::{HeistExecution, HeistOutcome, HeistParty};
pub use random::{ChaChaSource, RandomSource, ScriptedSource};
pub use source::CombatModifierSource;
pub use stats::{AggregationOptions, EffectiveStats, StatAggregator};
pub use store::{CharacterDelta, CharacterStore, InMemoryCharacterStore, InMemoryTerritoryStore, TerritoryStore};
pub use types::{ActionKey, BodySlot, CharacterId, EquipSlot, FactionId, HeistId, TerritoryKey};
