//! EquipmentSource - Stats from equipped items

use crate::catalog::{ModifierCatalog, StatBonus};
use crate::source::CombatModifierSource;
use crate::stats::StatAccumulator;
use crate::types::EquipSlot;
use tracing::debug;

/// Fixed bonuses from equipped items. Items only count in the slot their
/// catalog entry names; slotless consumables never count.
pub struct EquipmentSource<'a> {
    catalog: &'a ModifierCatalog,
    equipped: Vec<(EquipSlot, String)>,
}

impl<'a> EquipmentSource<'a> {
    pub fn new(catalog: &'a ModifierCatalog, equipped: Vec<(EquipSlot, String)>) -> Self {
        EquipmentSource { catalog, equipped }
    }
}

impl CombatModifierSource for EquipmentSource<'_> {
    fn id(&self) -> &str {
        "equipment"
    }

    fn priority(&self) -> i32 {
        200
    }

    fn lookup(&self, key: &str) -> Option<StatBonus> {
        self.catalog.item(key).map(|def| def.bonus)
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        for (slot, key) in &self.equipped {
            match self.catalog.item(key) {
                Some(def) if def.slot != Some(*slot) => {
                    debug!(key = key.as_str(), ?slot, fits = ?def.slot, "item in wrong slot, contributing zero");
                }
                _ => stats.add(&self.bonus_for(key)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_catalog, parse_catalog};

    #[test]
    fn test_equipment_bonuses() {
        let catalog = default_catalog();
        let source = EquipmentSource::new(
            &catalog,
            vec![
                (EquipSlot::Weapon, "sniper_rifle".to_string()),
                (EquipSlot::Armor, "armour_vest".to_string()),
                (EquipSlot::Accessory, "stealth_suit".to_string()),
            ],
        );
        let mut acc = StatAccumulator::new();
        source.apply(&mut acc);
        assert_eq!(acc.attack, 8);
        assert_eq!(acc.defense, 5);
        assert_eq!(acc.speed, 4);
    }

    #[test]
    fn test_item_only_counts_in_its_own_slot() {
        let catalog = default_catalog();
        let source = EquipmentSource::new(
            &catalog,
            vec![
                (EquipSlot::Weapon, "assault_rifle".to_string()),
                (EquipSlot::Armor, "assault_rifle".to_string()),
                (EquipSlot::Accessory, "assault_rifle".to_string()),
            ],
        );
        let mut acc = StatAccumulator::new();
        source.apply(&mut acc);
        assert_eq!(acc.attack, 5);
    }

    #[test]
    fn test_slotless_item_contributes_zero() {
        let catalog = parse_catalog(
            r#"
[[items]]
key = "stim_pack"
name = "Stim Pack"
bonus = { attack = 4, speed = 2 }
"#,
        )
        .unwrap();
        let source = EquipmentSource::new(&catalog, vec![(EquipSlot::Accessory, "stim_pack".to_string())]);
        let mut acc = StatAccumulator::new();
        source.apply(&mut acc);
        assert_eq!((acc.attack, acc.defense, acc.speed, acc.max_hp), (0, 0, 0, 0));
    }
}
