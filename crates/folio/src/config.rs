//! Config file loading (folio.toml).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use folio_content::{
    BlogPost, CollectionKind, CollectionRegistry, CollectionSchema, DuplicatePolicy, FieldDecl,
};
use serde::Deserialize;

/// Configuration file structure (folio.toml).
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub registry: RegistrySettings,
    #[serde(default)]
    pub collections: BTreeMap<String, CollectionConfig>,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct RegistrySettings {
    #[serde(default)]
    pub on_duplicate: DuplicatePolicy,
}

/// A collection declared in the config file.
#[derive(Debug, Deserialize, PartialEq)]
pub struct CollectionConfig {
    #[serde(default)]
    pub kind: CollectionKind,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct FieldConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub optional: bool,
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Build the registry: `blog` first, then config collections by name.
pub fn build_registry(config: &ConfigFile) -> Result<CollectionRegistry> {
    let mut registry = CollectionRegistry::with_policy(config.registry.on_duplicate);

    registry
        .define_entry::<BlogPost>()
        .context("Failed to define built-in collection")?;

    for (name, collection) in &config.collections {
        let decls = collection.fields.iter().map(|f| FieldDecl {
            name: f.name.clone(),
            type_name: f.type_name.clone(),
            optional: f.optional,
        });
        let schema = CollectionSchema::from_decls(collection.kind, decls)
            .with_context(|| format!("Invalid schema for collection {name}"))?;
        registry
            .define(name, schema)
            .with_context(|| format!("Failed to define collection {name}"))?;
    }

    Ok(registry)
}

/// Load the config at `path` and build its registry.
pub fn load_registry(path: &Path) -> Result<CollectionRegistry> {
    let config = load_config(path)?;
    build_registry(&config)
}
