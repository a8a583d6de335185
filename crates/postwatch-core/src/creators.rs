use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A tracked publisher on the post source.
///
/// `id` is assumed unique across services within one deployment; it is the
/// key of the seen-state map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Creator {
    pub service: String,
    pub id: String,
    pub display_name: String,
}

/// Creator ids are numeric on most services; accept them unquoted in YAML.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CreatorId {
    Text(String),
    Number(u64),
}

impl CreatorId {
    fn into_string(self) -> String {
        match self {
            CreatorId::Text(s) => s.trim().to_string(),
            CreatorId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreatorEntry {
    service: String,
    id: CreatorId,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCreatorsFile {
    creators: Vec<CreatorEntry>,
}

#[derive(Debug, Clone)]
pub struct CreatorsFile {
    pub creators: Vec<Creator>,
}

impl From<CreatorEntry> for Creator {
    fn from(entry: CreatorEntry) -> Self {
        let service = entry.service.trim().to_string();
        let id = entry.id.into_string();
        let display_name = entry
            .display_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| id.clone());
        Self {
            service,
            id,
            display_name,
        }
    }
}

/// Load and validate the creators configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_creators(path: &Path) -> Result<CreatorsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CreatorsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_creators(&content)
}

/// Parse and validate creators YAML already in memory.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_creators(content: &str) -> Result<CreatorsFile, ConfigError> {
    let raw: RawCreatorsFile = serde_yaml::from_str(content)?;
    let creators_file = CreatorsFile {
        creators: raw.creators.into_iter().map(Creator::from).collect(),
    };
    validate_creators(&creators_file)?;
    Ok(creators_file)
}

fn validate_creators(creators_file: &CreatorsFile) -> Result<(), ConfigError> {
    if creators_file.creators.is_empty() {
        return Err(ConfigError::Validation(
            "at least one creator must be configured".to_string(),
        ));
    }

    let mut seen_ids = HashSet::new();
    for creator in &creators_file.creators {
        if creator.service.is_empty() {
            return Err(ConfigError::Validation(format!(
                "creator '{}' has an empty service",
                creator.id
            )));
        }
        if creator.id.is_empty() {
            return Err(ConfigError::Validation(format!(
                "creator on service '{}' has an empty id",
                creator.service
            )));
        }
        if !seen_ids.insert(creator.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate creator id: '{}'",
                creator.id
            )));
        }
    }

    Ok(())
}
