//! Print collection schemas.

use std::path::Path;

use anyhow::{anyhow, Result};
use folio_content::CollectionRegistry;

use crate::config::load_registry;

/// Run the schema command.
pub fn run(config: &Path, collection: Option<&str>) -> Result<()> {
    let registry = load_registry(config)?;
    println!("{}", render(&registry, collection)?);
    Ok(())
}

/// Render the registry, or a single collection, as pretty JSON.
pub fn render(registry: &CollectionRegistry, collection: Option<&str>) -> Result<String> {
    let json = match collection {
        Some(name) => {
            let schema = registry
                .get(name)
                .ok_or_else(|| anyhow!("Unknown collection {name}"))?;
            serde_json::to_string_pretty(schema)?
        }
        None => serde_json::to_string_pretty(registry)?,
    };
    Ok(json)
}
