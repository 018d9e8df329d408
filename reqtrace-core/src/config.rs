//! Column-name configuration
//!
//! Workbooks from different programs name their columns slightly
//! differently. The defaults match the common layout; a YAML file can
//! override any of them.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ExtractError;

/// Environment variable pointing at a config file
pub const CONFIG_ENV_VAR: &str = "REQTRACE_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Column holding the row's own requirement ID
    pub id_column: String,
    /// Column holding the parent reference
    pub parent_column: String,
    /// Column holding functional child references
    pub child_column: String,
    /// Appended to the sheet title to name its requirement-text column
    pub text_column_suffix: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            id_column: "Req ID".to_string(),
            parent_column: "Parent".to_string(),
            child_column: "Functional Child".to_string(),
            text_column_suffix: " Requirement Text".to_string(),
        }
    }
}

impl ExtractorConfig {
    /// Loads a config from a YAML file. Missing keys keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_yaml::from_str(&content).map_err(|source| ExtractError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Picks the config for this run: an explicit path first, then the
    /// user's config file if one exists, otherwise the defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ExtractError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match get_config_path() {
            Some(path) if path.exists() => {
                log::debug!("Using config file {}", path.display());
                Self::load(path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Name of the requirement-text column for a sheet
    pub fn text_column(&self, sheet_title: &str) -> String {
        format!("{}{}", sheet_title, self.text_column_suffix)
    }
}

/// Gets the path to the config file
pub fn get_config_path() -> Option<PathBuf> {
    // Check if REQTRACE_CONFIG environment variable is set
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }

    // Default to <config dir>/reqtrace/config.yaml
    dirs::config_dir().map(|dir| dir.join("reqtrace").join("config.yaml"))
}
