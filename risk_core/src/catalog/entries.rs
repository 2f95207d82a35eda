//! Catalog entry types

use crate::types::{BodySlot, EquipSlot, SkillBranch};
use serde::{Deserialize, Serialize};

/// Flat additive bonus to the four combat attributes. Missing fields are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBonus {
    pub attack: i64,
    pub defense: i64,
    pub speed: i64,
    pub max_hp: i64,
}

impl StatBonus {
    pub const ZERO: StatBonus = StatBonus {
        attack: 0,
        defense: 0,
        speed: 0,
        max_hp: 0,
    };

    /// Bonus multiplied by a whole factor (used for per-level skill scaling)
    pub fn scaled(&self, factor: i64) -> StatBonus {
        StatBonus {
            attack: self.attack * factor,
            defense: self.defense * factor,
            speed: self.speed * factor,
            max_hp: self.max_hp * factor,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == StatBonus::ZERO
    }
}

/// A cybernetic implant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImplantDef {
    pub key: String,
    pub name: String,
    pub slot: BodySlot,
    #[serde(default)]
    pub bonus: StatBonus,
}

/// A skill tree node. `bonus` is granted once per learned level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDef {
    pub key: String,
    pub name: String,
    pub branch: SkillBranch,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub bonus: StatBonus,
    /// Whether this node's bonus counts toward combat stats
    #[serde(default)]
    pub combat_bonus: bool,
}

/// An item. Items without a slot are consumables or loot and never count
/// toward combat stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub slot: Option<EquipSlot>,
    #[serde(default)]
    pub bonus: StatBonus,
}

/// Named multiplier profile applied to attack, defense and speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stance {
    pub key: String,
    pub name: String,
    #[serde(default = "identity_multiplier")]
    pub attack: f64,
    #[serde(default = "identity_multiplier")]
    pub defense: f64,
    #[serde(default = "identity_multiplier")]
    pub speed: f64,
}

fn identity_multiplier() -> f64 {
    1.0
}

impl Stance {
    /// The no-op stance
    pub fn balanced() -> Self {
        Stance {
            key: "balanced".to_string(),
            name: "Balanced".to_string(),
            attack: 1.0,
            defense: 1.0,
            speed: 1.0,
        }
    }
}

/// A heist target on the job board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeistTarget {
    pub name: String,
    pub reward: i64,
    pub difficulty: u32,
    pub min_crew: u32,
}
