//! ms-project: input card format, loading and validation.
//!
//! Cards are YAML or JSON. Loading parses into a generic value first so that
//! every missing top-level section is reported at once, then deserializes into
//! [`InputCard`] and validates numeric ranges.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, missing_sections, validate_card};

use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported card format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn parse_yaml(content: &str) -> ProjectResult<InputCard> {
    let value: serde_yaml::Value = serde_yaml::from_str(content)?;
    let present: Vec<&str> = value
        .as_mapping()
        .map(|m| m.keys().filter_map(|k| k.as_str()).collect())
        .unwrap_or_default();
    check_sections(present)?;
    let card: InputCard = serde_yaml::from_value(value)?;
    validate_card(&card)?;
    Ok(card)
}

pub fn parse_json(content: &str) -> ProjectResult<InputCard> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    let present: Vec<&str> = value
        .as_object()
        .map(|m| m.keys().map(String::as_str).collect())
        .unwrap_or_default();
    check_sections(present)?;
    let card: InputCard = serde_json::from_value(value)?;
    validate_card(&card)?;
    Ok(card)
}

fn check_sections(present: Vec<&str>) -> Result<(), ValidationError> {
    let missing = missing_sections(present);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingSections(missing))
    }
}

pub fn load_yaml(path: &Path) -> ProjectResult<InputCard> {
    let content = std::fs::read_to_string(path)?;
    parse_yaml(&content)
}

pub fn load_json(path: &Path) -> ProjectResult<InputCard> {
    let content = std::fs::read_to_string(path)?;
    parse_json(&content)
}

/// Load by extension: `.yaml`/`.yml` or `.json`.
pub fn load_card(path: &Path) -> ProjectResult<InputCard> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "yaml" | "yml" => load_yaml(path),
        "json" => load_json(path),
        _ => Err(ProjectError::UnsupportedFormat(path.display().to_string())),
    }
}

pub fn save_yaml(path: &Path, card: &InputCard) -> ProjectResult<()> {
    validate_card(card)?;
    let content = serde_yaml::to_string(card)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn save_json(path: &Path, card: &InputCard) -> ProjectResult<()> {
    validate_card(card)?;
    let content = serde_json::to_string_pretty(card)?;
    std::fs::write(path, content)?;
    Ok(())
}
