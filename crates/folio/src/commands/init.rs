//! Write a starter config file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub fn run(config: &Path, yes: bool) -> Result<()> {
    if config.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config.display()
        );
        return Ok(());
    }

    fs::write(config, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config.display()))?;
    tracing::info!("Created {}", config.display());
    tracing::info!("Run 'folio check <files>' to validate blog entries.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Folio Configuration
#
# The `blog` collection is always defined:
#   title (text, required), pubDate (date, optional), description (text, optional)

[registry]
# What to do when a collection name is defined twice:
# "reject", "allow-identical" or "replace"
on_duplicate = "reject"

# Additional collections. Field types: text, date, number, boolean.
#
# [collections.notes]
# kind = "data"
# fields = [
#     { name = "title", type = "text" },
#     { name = "rating", type = "number", optional = true },
# ]
"#;
