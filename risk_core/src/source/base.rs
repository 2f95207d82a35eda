//! BaseStatsSource - A character's unmodified attributes

use crate::catalog::StatBonus;
use crate::character::BaseAttributes;
use crate::source::CombatModifierSource;
use crate::stats::StatAccumulator;

/// Seeds the accumulator with base attributes
pub struct BaseStatsSource {
    pub base: BaseAttributes,
}

impl BaseStatsSource {
    pub fn new(base: BaseAttributes) -> Self {
        BaseStatsSource { base }
    }
}

impl CombatModifierSource for BaseStatsSource {
    fn id(&self) -> &str {
        "base_stats"
    }

    fn priority(&self) -> i32 {
        -100
    }

    fn lookup(&self, _key: &str) -> Option<StatBonus> {
        None
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        stats.add(&StatBonus {
            attack: self.base.attack,
            defense: self.base.defense,
            speed: self.base.speed,
            max_hp: self.base.max_hp,
        });
        stats.current_hp = self.base.current_hp;
    }
}
