//! Application configuration loaded from TOML
//!
//! Lookup order: an explicit path, `./umlcpp.toml`, then
//! `<config dir>/umlcpp/config.toml`. A missing explicit file is an error;
//! the implicit locations are optional and fall back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::generation::{GenerationError, GenerationOptions};
use crate::model::ProjectMetadata;

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "umlcpp.toml";

/// Directory under the platform config dir
pub const CONFIG_DIR_NAME: &str = "umlcpp";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Literal header text; replaces the generated project header
    pub copyright: Option<String>,
    pub generation: GenerationOptions,
    /// Overrides the project metadata carried by the model document
    pub project: ProjectMetadata,
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, GenerationError> {
        toml::from_str(content).map_err(|e| {
            GenerationError::InvalidConfiguration(format!("Failed to parse configuration: {e}"))
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, GenerationError> {
        let content = fs::read_to_string(path).map_err(|e| {
            GenerationError::LoadError(format!(
                "Failed to read configuration {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load the first configuration found, or the defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self, GenerationError> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "Loading configuration");
            return Self::from_file(path);
        }

        for candidate in Self::search_locations() {
            if candidate.is_file() {
                debug!(path = %candidate.display(), "Loading configuration");
                return Self::from_file(&candidate);
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Implicit configuration locations, most specific first
    pub fn search_locations() -> Vec<PathBuf> {
        let mut locations = Vec::new();

        if let Ok(current_dir) = std::env::current_dir() {
            locations.push(current_dir.join(LOCAL_CONFIG_FILE));
        }

        if let Some(config_dir) = dirs::config_dir() {
            locations.push(config_dir.join(CONFIG_DIR_NAME).join("config.toml"));
        }

        locations
    }
}
