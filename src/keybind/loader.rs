//! YAML section-file parsing
//!
//! Parses section files into [`InputSection`]s ready to be defined on the
//! stack. This is the on-disk syntax collaborator for the engine: it hands
//! over already-tokenized key mappings and contains no resolution logic.
//!
//! ```yaml
//! sections:
//!   - name: default
//!     origin: config-file
//!     force: true
//!     bindings:
//!       - key: q
//!         command: quit
//!       - key: SPACE
//!         command: cycle pause
//!         comment: toggle playback
//! ```

use std::path::Path;

use serde::Deserialize;

use super::mapping::KeyMapping;
use super::section::{InputSection, SectionOrigin};

/// Root structure of a sections YAML file
#[derive(Debug, Deserialize)]
pub struct SectionsConfig {
    pub sections: Vec<SectionConfig>,
}

/// One section entry from YAML
#[derive(Debug, Deserialize)]
pub struct SectionConfig {
    pub name: String,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub force: bool,
    #[serde(default)]
    pub bindings: Vec<BindingConfig>,
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    pub key: String,
    pub command: String,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Load input sections from a YAML file
pub fn load_sections_file(path: &Path) -> Result<Vec<InputSection>, SectionFileError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| SectionFileError::IoError(e.to_string()))?;
    parse_sections_yaml(&content)
}

/// Parse input sections from a YAML string
pub fn parse_sections_yaml(yaml: &str) -> Result<Vec<InputSection>, SectionFileError> {
    let config: SectionsConfig =
        serde_yaml::from_str(yaml).map_err(|e| SectionFileError::ParseError(e.to_string()))?;

    let mut sections = Vec::with_capacity(config.sections.len());
    for entry in config.sections {
        let origin = parse_origin(entry.origin.as_deref())?;
        let mut bindings = Vec::with_capacity(entry.bindings.len());
        for binding in entry.bindings {
            bindings.push(parse_binding(&entry.name, binding)?);
        }
        sections.push(InputSection::new(entry.name, origin, entry.force, bindings));
    }
    Ok(sections)
}

/// Parse one binding entry into a KeyMapping
fn parse_binding(section: &str, entry: BindingConfig) -> Result<KeyMapping, SectionFileError> {
    let tokens: Vec<String> = entry
        .command
        .split_whitespace()
        .map(str::to_string)
        .collect();
    if tokens.is_empty() {
        return Err(SectionFileError::EmptyCommand {
            section: section.to_string(),
            key: entry.key,
        });
    }

    // Commands addressed at the app rather than the player are written
    // with an "@" prefix on the first token
    let special = tokens[0].starts_with('@');

    let mut mapping = KeyMapping::new(entry.key, tokens);
    if special {
        mapping = mapping.special();
    }
    if let Some(comment) = entry.comment {
        mapping = mapping.with_comment(comment);
    }
    Ok(mapping)
}

/// Parse an origin label; missing means the user's config file
fn parse_origin(origin: Option<&str>) -> Result<SectionOrigin, SectionFileError> {
    let Some(origin) = origin else {
        return Ok(SectionOrigin::ConfigFile);
    };
    match origin.to_lowercase().as_str() {
        "config-file" | "config" => Ok(SectionOrigin::ConfigFile),
        "plugin" => Ok(SectionOrigin::Plugin),
        "script" | "embedded-script" => Ok(SectionOrigin::EmbeddedScript),
        "filter" | "video-filter" => Ok(SectionOrigin::VideoFilter),
        other => Err(SectionFileError::InvalidOrigin(other.to_string())),
    }
}

/// Errors that can occur when reading a sections file
#[derive(Debug, Clone)]
pub enum SectionFileError {
    IoError(String),
    ParseError(String),
    InvalidOrigin(String),
    EmptyCommand { section: String, key: String },
}

impl std::fmt::Display for SectionFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionFileError::IoError(e) => write!(f, "IO error: {}", e),
            SectionFileError::ParseError(e) => write!(f, "Parse error: {}", e),
            SectionFileError::InvalidOrigin(o) => write!(f, "Invalid origin: {}", o),
            SectionFileError::EmptyCommand { section, key } => {
                write!(f, "Empty command for key \"{}\" in section \"{}\"", key, section)
            }
        }
    }
}

impl std::error::Error for SectionFileError {}
