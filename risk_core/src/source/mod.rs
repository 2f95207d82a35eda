//! CombatModifierSource - Trait and implementations for stat providers

mod base;
mod equipment;
mod implant;
mod skill;

pub use base::BaseStatsSource;
pub use equipment::EquipmentSource;
pub use implant::ImplantSource;
pub use skill::SkillSource;

use crate::catalog::StatBonus;
use crate::stats::StatAccumulator;
use tracing::debug;

/// Anything that contributes to a character's effective stats
pub trait CombatModifierSource: Send + Sync {
    /// Identifier for this source, used in logs
    fn id(&self) -> &str;

    /// Priority for application order (higher = applied later)
    /// Suggested priorities:
    /// - Base stats: -100
    /// - Implants: 0
    /// - Skills: 100
    /// - Equipment: 200
    fn priority(&self) -> i32 {
        0
    }

    /// Catalog bonus for a key, or None if the catalog has no such entry
    fn lookup(&self, key: &str) -> Option<StatBonus>;

    /// Bonus for a key; unknown keys contribute nothing
    fn bonus_for(&self, key: &str) -> StatBonus {
        self.lookup(key).unwrap_or_else(|| {
            debug!(source = self.id(), key, "unknown modifier key, contributing zero");
            StatBonus::ZERO
        })
    }

    /// Apply this source's stats to the accumulator
    fn apply(&self, stats: &mut StatAccumulator);
}
