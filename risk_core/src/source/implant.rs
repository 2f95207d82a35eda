//! ImplantSource - Stats from installed cybernetics

use crate::catalog::{ModifierCatalog, StatBonus};
use crate::source::CombatModifierSource;
use crate::stats::StatAccumulator;
use crate::types::BodySlot;
use tracing::debug;

/// Fixed bonuses from every installed implant. An implant sitting in a body
/// slot other than the one its catalog entry names contributes nothing.
pub struct ImplantSource<'a> {
    catalog: &'a ModifierCatalog,
    installed: Vec<(BodySlot, String)>,
}

impl<'a> ImplantSource<'a> {
    pub fn new(catalog: &'a ModifierCatalog, installed: Vec<(BodySlot, String)>) -> Self {
        ImplantSource { catalog, installed }
    }
}

impl CombatModifierSource for ImplantSource<'_> {
    fn id(&self) -> &str {
        "implants"
    }

    fn priority(&self) -> i32 {
        0
    }

    fn lookup(&self, key: &str) -> Option<StatBonus> {
        self.catalog.implant(key).map(|def| def.bonus)
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        for (slot, key) in &self.installed {
            match self.catalog.implant(key) {
                Some(def) if def.slot != *slot => {
                    debug!(key = key.as_str(), ?slot, fits = ?def.slot, "implant in wrong slot, contributing zero");
                }
                _ => stats.add(&self.bonus_for(key)),
            }
        }
    }
}
