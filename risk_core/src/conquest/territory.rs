//! Territory records

use crate::types::{FactionId, TerritoryKey};
use serde::{Deserialize, Serialize};

/// Upper bound of a territory's defense value
pub const MAX_DEFENSE: u32 = 100;

/// A city district that factions fight over
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    pub key: TerritoryKey,
    pub name: String,
    /// Always within 0..=100
    pub defense: u32,
    pub income_rate: i64,
    pub owner: Option<FactionId>,
}

/// Ownership state of a territory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ownership {
    Unclaimed,
    Owned(FactionId),
}

impl Territory {
    /// Create an unclaimed territory; defense is capped at 100
    pub fn new(key: TerritoryKey, name: impl Into<String>, income_rate: i64, defense: u32) -> Self {
        Territory {
            key,
            name: name.into(),
            defense: defense.min(MAX_DEFENSE),
            income_rate,
            owner: None,
        }
    }

    pub fn with_owner(mut self, faction: FactionId) -> Self {
        self.owner = Some(faction);
        self
    }

    pub fn ownership(&self) -> Ownership {
        match self.owner {
            Some(faction) => Ownership::Owned(faction),
            None => Ownership::Unclaimed,
        }
    }

    pub fn is_owned_by(&self, faction: FactionId) -> bool {
        self.owner == Some(faction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defense_capped_on_creation() {
        let t = Territory::new(TerritoryKey::from("x"), "X", 100, 250);
        assert_eq!(t.defense, 100);
        assert_eq!(t.ownership(), Ownership::Unclaimed);
    }

    #[test]
    fn test_ownership() {
        let t = Territory::new(TerritoryKey::from("x"), "X", 100, 50).with_owner(FactionId(3));
        assert_eq!(t.ownership(), Ownership::Owned(FactionId(3)));
        assert!(t.is_owned_by(FactionId(3)));
        assert!(!t.is_owned_by(FactionId(4)));
    }
}
