//! ModifierCatalog - Static reference data for stat modifiers
//!
//! Implants, skill nodes, items, stances and heist targets. The catalog is
//! immutable once built and is shared by reference (usually behind an `Arc`).

mod entries;

pub use entries::{HeistTarget, ImplantDef, ItemDef, SkillDef, Stance, StatBonus};

use crate::config::ConfigError;
use crate::types::SkillBranch;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// On-disk shape of a catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default = "default_max_skill_level")]
    pub max_skill_level: u8,
    #[serde(default)]
    pub implants: Vec<ImplantDef>,
    #[serde(default)]
    pub skills: Vec<SkillDef>,
    #[serde(default)]
    pub items: Vec<ItemDef>,
    #[serde(default)]
    pub stances: Vec<Stance>,
    #[serde(default)]
    pub heist_targets: Vec<HeistTarget>,
    /// Item keys a successful heist can award
    #[serde(default)]
    pub bonus_items: Vec<String>,
}

fn default_max_skill_level() -> u8 {
    5
}

/// Lookup tables for every modifier source
#[derive(Debug, Clone)]
pub struct ModifierCatalog {
    max_skill_level: u8,
    implants: HashMap<String, ImplantDef>,
    skills: HashMap<String, SkillDef>,
    items: HashMap<String, ItemDef>,
    stances: HashMap<String, Stance>,
    heist_targets: Vec<HeistTarget>,
    bonus_items: Vec<String>,
}

impl ModifierCatalog {
    /// Build a catalog from a parsed file, validating cross references
    pub fn from_file(file: CatalogFile) -> Result<Self, ConfigError> {
        if file.max_skill_level == 0 {
            return Err(ConfigError::ValidationError(
                "max_skill_level must be at least 1".to_string(),
            ));
        }

        let implants = index_by_key("implant", file.implants, |d| d.key.clone())?;
        let skills = index_by_key("skill", file.skills, |d| d.key.clone())?;
        let items = index_by_key("item", file.items, |d| d.key.clone())?;
        let stances = index_by_key("stance", file.stances, |d| d.key.clone())?;

        for skill in skills.values() {
            if let Some(parent) = &skill.parent {
                if !skills.contains_key(parent) {
                    return Err(ConfigError::ValidationError(format!(
                        "skill '{}' has unknown parent '{}'",
                        skill.key, parent
                    )));
                }
            }
        }

        for stance in stances.values() {
            if stance.attack < 0.0 || stance.defense < 0.0 || stance.speed < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "stance '{}' has a negative multiplier",
                    stance.key
                )));
            }
        }

        for target in &file.heist_targets {
            if !(1..=10).contains(&target.difficulty) || target.min_crew == 0 || target.reward < 0 {
                return Err(ConfigError::ValidationError(format!(
                    "heist target '{}' is out of range",
                    target.name
                )));
            }
        }

        for key in &file.bonus_items {
            if !items.contains_key(key) {
                return Err(ConfigError::ValidationError(format!(
                    "bonus item '{key}' is not in the item table"
                )));
            }
        }

        Ok(ModifierCatalog {
            max_skill_level: file.max_skill_level,
            implants,
            skills,
            items,
            stances,
            heist_targets: file.heist_targets,
            bonus_items: file.bonus_items,
        })
    }

    /// An empty catalog: every lookup misses
    pub fn empty() -> Self {
        ModifierCatalog {
            max_skill_level: default_max_skill_level(),
            implants: HashMap::new(),
            skills: HashMap::new(),
            items: HashMap::new(),
            stances: HashMap::new(),
            heist_targets: Vec::new(),
            bonus_items: Vec::new(),
        }
    }

    pub fn max_skill_level(&self) -> u8 {
        self.max_skill_level
    }

    pub fn implant(&self, key: &str) -> Option<&ImplantDef> {
        self.implants.get(key)
    }

    pub fn skill(&self, key: &str) -> Option<&SkillDef> {
        self.skills.get(key)
    }

    pub fn item(&self, key: &str) -> Option<&ItemDef> {
        self.items.get(key)
    }

    pub fn stance(&self, key: &str) -> Option<&Stance> {
        self.stances.get(key)
    }

    pub fn heist_target(&self, index: usize) -> Option<&HeistTarget> {
        self.heist_targets.get(index)
    }

    pub fn heist_targets(&self) -> &[HeistTarget] {
        &self.heist_targets
    }

    pub fn bonus_items(&self) -> &[String] {
        &self.bonus_items
    }

    /// Keys of every skill on a branch
    pub fn skills_in_branch(&self, branch: SkillBranch) -> impl Iterator<Item = &SkillDef> {
        self.skills.values().filter(move |s| s.branch == branch)
    }
}

fn index_by_key<T>(
    kind: &str,
    entries: Vec<T>,
    key_of: impl Fn(&T) -> String,
) -> Result<HashMap<String, T>, ConfigError> {
    let mut seen = HashSet::new();
    let mut map = HashMap::with_capacity(entries.len());
    for entry in entries {
        let key = key_of(&entry);
        if !seen.insert(key.clone()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate {kind} key '{key}'"
            )));
        }
        map.insert(key, entry);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_catalog, parse_catalog};
    use crate::types::BodySlot;

    #[test]
    fn test_default_catalog_contents() {
        let catalog = default_catalog();
        assert_eq!(catalog.max_skill_level(), 5);

        let spike = catalog.implant("neural_spike").unwrap();
        assert_eq!(spike.slot, BodySlot::Head);
        assert_eq!(spike.bonus.speed, 5);
        assert_eq!(spike.bonus.attack, 3);

        let regen = catalog.implant("nano_regen").unwrap();
        assert_eq!(regen.bonus.max_hp, 15);

        assert!(catalog.skill("god_mode").unwrap().combat_bonus);
        assert!(!catalog.skill("hack_basics").unwrap().combat_bonus);
        assert_eq!(catalog.heist_targets().len(), 8);
        assert_eq!(catalog.stance("aggressive").unwrap().attack, 1.3);
    }

    #[test]
    fn test_branch_lookup() {
        let catalog = default_catalog();
        let tech: Vec<_> = catalog.skills_in_branch(SkillBranch::Tech).collect();
        assert_eq!(tech.len(), 3);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let toml = r#"
[[implants]]
key = "x"
name = "X"
slot = "head"

[[implants]]
key = "x"
name = "X again"
slot = "eyes"
"#;
        let err = parse_catalog(toml).unwrap_err();
        assert!(err.to_string().contains("duplicate implant key 'x'"));
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let toml = r#"
[[skills]]
key = "child"
name = "Child"
branch = "combat"
parent = "missing"
"#;
        assert!(parse_catalog(toml).is_err());
    }

    #[test]
    fn test_bonus_item_must_exist() {
        let toml = r#"
bonus_items = ["ghost_item"]
"#;
        assert!(parse_catalog(toml).is_err());
    }
}
