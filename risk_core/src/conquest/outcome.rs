//! Outcomes of territory actions

use super::SiegeSession;
use crate::types::{FactionId, TerritoryKey};
use serde::{Deserialize, Serialize};

/// Result of a raid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaidOutcome {
    pub territory: TerritoryKey,
    pub success: bool,
    /// `spd*2 + atk + roll`
    pub attack_score: i64,
    /// `defense + roll`
    pub defense_score: i64,
    pub cost: i64,
    pub credits_stolen: i64,
    pub hp_lost: i64,
    pub xp_gained: i64,
    pub defense_after: u32,
}

/// Result of an assault
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssaultOutcome {
    pub territory: TerritoryKey,
    pub success: bool,
    pub attack_score: i64,
    pub defense_score: i64,
    pub cost: i64,
    pub hp_lost: i64,
    pub xp_gained: i64,
    /// New owner when the assault captured the territory
    pub new_owner: Option<FactionId>,
    pub defense_after: u32,
}

/// A newly declared siege
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiegeDeclared {
    pub session: SiegeSession,
    pub cost: i64,
}

/// Result of contributing to a siege
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiegeContribution {
    /// The siege goes on
    Progress {
        territory: TerritoryKey,
        damage: i64,
        siege_hp_remaining: i64,
        hp_lost: i64,
        cost: i64,
    },
    /// This contribution broke the siege and the territory changed hands
    Captured {
        territory: TerritoryKey,
        faction: FactionId,
        damage: i64,
        hp_lost: i64,
        cost: i64,
        xp_gained: i64,
        defense_after: u32,
    },
    /// Another contributor already finished the siege; nothing was charged
    AlreadyCaptured {
        territory: TerritoryKey,
        faction: FactionId,
    },
}

impl SiegeContribution {
    pub fn is_capture(&self) -> bool {
        matches!(self, SiegeContribution::Captured { .. })
    }
}

/// Result of fortifying
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortifyOutcome {
    pub territory: TerritoryKey,
    pub requested: u32,
    /// Points actually added after capping at the maximum
    pub applied: u32,
    pub cost: i64,
    pub xp_gained: i64,
    pub defense_after: u32,
}
