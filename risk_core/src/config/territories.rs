//! Territory seed table loading

use super::ConfigError;
use crate::conquest::Territory;
use crate::types::TerritoryKey;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TerritoriesConfig {
    territories: Vec<TerritorySeed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TerritorySeed {
    key: String,
    name: String,
    income_rate: i64,
    defense: u32,
}

fn into_territories(config: TerritoriesConfig) -> Result<Vec<Territory>, ConfigError> {
    let mut seen = HashSet::new();
    let mut territories = Vec::with_capacity(config.territories.len());
    for seed in config.territories {
        if seed.defense > 100 {
            return Err(ConfigError::ValidationError(format!(
                "territory '{}' defense {} exceeds 100",
                seed.key, seed.defense
            )));
        }
        if !seen.insert(seed.key.clone()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate territory key '{}'",
                seed.key
            )));
        }
        territories.push(Territory::new(
            TerritoryKey::new(seed.key),
            seed.name,
            seed.income_rate,
            seed.defense,
        ));
    }
    Ok(territories)
}

/// Load territory seeds from a TOML file
pub fn load_territories(path: &Path) -> Result<Vec<Territory>, ConfigError> {
    into_territories(super::load_toml(path)?)
}

/// Load territory seeds from a TOML string
pub fn parse_territories(content: &str) -> Result<Vec<Territory>, ConfigError> {
    into_territories(super::parse_toml(content)?)
}

/// Get the built-in city districts, all unclaimed
pub fn default_territories() -> Vec<Territory> {
    let toml = include_str!("../../config/territories.toml");
    parse_territories(toml).unwrap_or_else(|e| {
        warn!(error = %e, "built-in territory table failed to load");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_territories() {
        let territories = default_territories();
        assert_eq!(territories.len(), 9);

        let towers = territories
            .iter()
            .find(|t| t.key.as_str() == "corp_towers")
            .unwrap();
        assert_eq!(towers.income_rate, 900);
        assert_eq!(towers.defense, 90);
        assert!(towers.owner.is_none());
    }

    #[test]
    fn test_defense_over_cap_rejected() {
        let toml = r#"
[[territories]]
key = "x"
name = "X"
income_rate = 10
defense = 101
"#;
        assert!(parse_territories(toml).is_err());
    }
}
