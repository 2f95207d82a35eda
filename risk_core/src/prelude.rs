//! Prelude module for convenient imports
//!
//! ```rust
//! use risk_core::prelude::*;
//! ```

// Identifiers
pub use crate::types::{ActionKey, BodySlot, CharacterId, EquipSlot, FactionId, HeistId, TerritoryKey};

// Records and stats
pub use crate::character::{BaseAttributes, Character};
pub use crate::stats::{AggregationOptions, EffectiveStats};

// Engine
pub use crate::engine::{DuelRequest, Engine};
pub use crate::error::{EngineError, ResourceError, ValidationError};

// Collaborators
pub use crate::clock::{Clock, ManualClock};
pub use crate::random::{ChaChaSource, RandomSource, ScriptedSource};
pub use crate::store::{CharacterStore, InMemoryCharacterStore, InMemoryTerritoryStore, TerritoryStore};

// Outcomes
pub use crate::conquest::SiegeContribution;
pub use crate::duel::DuelWinner;
pub use crate::heist::HeistExecution;
