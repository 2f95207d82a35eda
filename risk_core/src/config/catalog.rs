//! Modifier catalog loading

use super::ConfigError;
use crate::catalog::{CatalogFile, ModifierCatalog};
use std::path::Path;
use tracing::warn;

/// Load a modifier catalog from a TOML file
pub fn load_catalog(path: &Path) -> Result<ModifierCatalog, ConfigError> {
    let file: CatalogFile = super::load_toml(path)?;
    ModifierCatalog::from_file(file)
}

/// Load a modifier catalog from a TOML string
pub fn parse_catalog(content: &str) -> Result<ModifierCatalog, ConfigError> {
    let file: CatalogFile = super::parse_toml(content)?;
    ModifierCatalog::from_file(file)
}

/// Get the built-in catalog
pub fn default_catalog() -> ModifierCatalog {
    let toml = include_str!("../../config/catalog.toml");
    parse_catalog(toml).unwrap_or_else(|e| {
        warn!(error = %e, "built-in catalog failed to load, using an empty catalog");
        ModifierCatalog::empty()
    })
}
