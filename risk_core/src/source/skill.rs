//! SkillSource - Stats from learned skill tree nodes

use crate::catalog::{ModifierCatalog, StatBonus};
use crate::source::CombatModifierSource;
use crate::stats::StatAccumulator;

/// Per-level bonuses from learned skills in the combat-bonus set.
///
/// Skills outside that set (e.g. pure tech nodes) are known but contribute
/// nothing to combat stats.
pub struct SkillSource<'a> {
    catalog: &'a ModifierCatalog,
    learned: Vec<(String, u8)>,
}

impl<'a> SkillSource<'a> {
    pub fn new(catalog: &'a ModifierCatalog, learned: Vec<(String, u8)>) -> Self {
        SkillSource { catalog, learned }
    }
}

impl CombatModifierSource for SkillSource<'_> {
    fn id(&self) -> &str {
        "skills"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn lookup(&self, key: &str) -> Option<StatBonus> {
        self.catalog.skill(key).map(|def| {
            if def.combat_bonus {
                def.bonus
            } else {
                StatBonus::ZERO
            }
        })
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        let max_level = self.catalog.max_skill_level();
        for (key, level) in &self.learned {
            let level = (*level).min(max_level);
            stats.add(&self.bonus_for(key).scaled(i64::from(level)));
        }
    }
}
