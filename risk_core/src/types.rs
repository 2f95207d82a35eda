//! Core identifiers and enums shared across risk_core

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a player character
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub u64);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a faction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FactionId(pub u64);

impl fmt::Display for FactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "faction-{}", self.0)
    }
}

/// Unique key of a territory (e.g. "downtown_core")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerritoryKey(pub String);

impl TerritoryKey {
    pub fn new(key: impl Into<String>) -> Self {
        TerritoryKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TerritoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TerritoryKey {
    fn from(s: &str) -> Self {
        TerritoryKey(s.to_string())
    }
}

/// Identifier of a heist party on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HeistId(pub u64);

impl fmt::Display for HeistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "heist-{}", self.0)
    }
}

/// Body slot for cybernetic implants (one implant per slot)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodySlot {
    Head,
    Eyes,
    Arm,
    Torso,
    Legs,
}

impl BodySlot {
    /// Get all body slots
    pub fn all() -> &'static [BodySlot] {
        &[
            BodySlot::Head,
            BodySlot::Eyes,
            BodySlot::Arm,
            BodySlot::Torso,
            BodySlot::Legs,
        ]
    }
}

/// Equip slot for carried items (one item per slot)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipSlot {
    Weapon,
    Armor,
    Accessory,
}

impl EquipSlot {
    /// Get all equip slots
    pub fn all() -> &'static [EquipSlot] {
        &[EquipSlot::Weapon, EquipSlot::Armor, EquipSlot::Accessory]
    }
}

/// Skill tree branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillBranch {
    Combat,
    Stealth,
    Tech,
}

/// Actions gated by the ResourceGate. Each key has its own cooldown timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKey {
    Duel,
    /// Shared by raid, assault and siege declaration
    TerritoryAttack,
    SiegeContribute,
    Fortify,
    HeistCreate,
    HeistJoin,
}

impl ActionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKey::Duel => "duel",
            ActionKey::TerritoryAttack => "territory_attack",
            ActionKey::SiegeContribute => "siege_contribute",
            ActionKey::Fortify => "fortify",
            ActionKey::HeistCreate => "heist_create",
            ActionKey::HeistJoin => "heist_join",
        }
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
