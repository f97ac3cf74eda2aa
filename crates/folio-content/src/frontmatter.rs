//! Frontmatter extraction and parsing.

use serde_yaml::{Mapping, Value};

/// Split a content document into its frontmatter mapping and body.
///
/// Returns the parsed frontmatter and the remaining content after the frontmatter block.
pub fn split_frontmatter(source: &str) -> Result<(Option<Mapping>, &str), FrontmatterError> {
    let source = strip_bom(source);
    let trimmed = source.trim_start();

    if !trimmed.starts_with("---") {
        return Ok((None, source));
    }

    // Find the closing ---
    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml_content = after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    // Drop the rest of the closing delimiter line
    let remaining = match remaining.find('\n') {
        Some(pos) if remaining[..pos].trim().is_empty() => &remaining[pos + 1..],
        None if remaining.trim().is_empty() => "",
        _ => remaining,
    };

    let mapping = parse_mapping(yaml_content)?;

    Ok((Some(mapping), remaining.trim_start()))
}

/// Parse a whole YAML document as entry data.
pub fn parse_data(source: &str) -> Result<Mapping, FrontmatterError> {
    parse_mapping(strip_bom(source).trim())
}

fn strip_bom(source: &str) -> &str {
    source.strip_prefix('\u{feff}').unwrap_or(source)
}

fn parse_mapping(yaml: &str) -> Result<Mapping, FrontmatterError> {
    if yaml.is_empty() {
        return Ok(Mapping::new());
    }

    let value: Value =
        serde_yaml::from_str(yaml).map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?;

    match value {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        _ => Err(FrontmatterError::NotAMapping),
    }
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),

    #[error("Frontmatter must be a mapping of field names to values")]
    NotAMapping,
}
