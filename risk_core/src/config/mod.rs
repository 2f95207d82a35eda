//! Configuration loading from TOML files

mod catalog;
mod constants;
mod territories;

pub use catalog::{default_catalog, load_catalog, parse_catalog};
pub use constants::{
    AssaultConstants, CooldownConstants, DuelConstants, FortifyConstants, GameConstants,
    HeistConstants, RaidConstants, RatingConstants, SiegeConstants,
};
pub use territories::{default_territories, load_territories, parse_territories};

use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load and validate game constants from a TOML file
pub fn load_constants(path: &Path) -> Result<GameConstants, ConfigError> {
    let constants: GameConstants = load_toml(path)?;
    constants.validate()?;
    Ok(constants)
}

/// Parse and validate game constants from a TOML string
pub fn parse_constants(content: &str) -> Result<GameConstants, ConfigError> {
    let constants: GameConstants = parse_toml(content)?;
    constants.validate()?;
    Ok(constants)
}

/// Get the built-in game constants
pub fn default_constants() -> GameConstants {
    let toml = include_str!("../../config/constants.toml");
    parse_constants(toml).unwrap_or_else(|e| {
        warn!(error = %e, "built-in constants failed to load, using compiled defaults");
        GameConstants::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_constants_match_defaults() {
        let from_file = default_constants();
        let compiled = GameConstants::default();
        assert_eq!(from_file.siege.min_defense, compiled.siege.min_defense);
        assert_eq!(from_file.heist.max_chance, compiled.heist.max_chance);
        assert_eq!(from_file.cooldowns.heist_join, compiled.cooldowns.heist_join);
        assert_eq!(from_file.duel.rating.starting, 1000);
    }

    #[test]
    fn test_parse_error_is_typed() {
        let result = parse_constants("[siege\nmin_defense = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_constants(Path::new("/nonexistent/constants.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
