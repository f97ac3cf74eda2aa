//! Validate content files command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use folio_content::{CollectionRegistry, ContentValidationError};

use crate::config::load_registry;

/// Outcome of checking a batch of files.
#[derive(Debug, Default, PartialEq)]
pub struct CheckReport {
    pub valid: usize,
    pub invalid: Vec<(PathBuf, ContentValidationError)>,
}

/// Run the check command.
pub fn run(config: &Path, collection: &str, files: &[PathBuf]) -> Result<()> {
    let registry = load_registry(config)?;

    if !registry.contains(collection) {
        bail!(
            "Unknown collection {collection} (defined: {})",
            registry.names().join(", ")
        );
    }

    let report = check_files(&registry, collection, files)?;

    for (path, err) in &report.invalid {
        tracing::error!("{}: {}", path.display(), err);
    }

    tracing::info!("{} valid, {} invalid", report.valid, report.invalid.len());

    if !report.invalid.is_empty() {
        bail!(
            "{} of {} entries failed validation",
            report.invalid.len(),
            files.len()
        );
    }

    Ok(())
}

/// Validate each file against `collection`.
///
/// Unreadable files are errors. Files that fail validation are collected.
pub fn check_files(
    registry: &CollectionRegistry,
    collection: &str,
    files: &[PathBuf],
) -> Result<CheckReport> {
    let mut report = CheckReport::default();

    for path in files {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        match registry.validate_source(collection, &source) {
            Ok(_) => {
                tracing::debug!("{}: ok", path.display());
                report.valid += 1;
            }
            Err(err) => report.invalid.push((path.clone(), err)),
        }
    }

    Ok(report)
}
