//! File-based model loader
//!
//! Reads a model document from disk and hands it to the model layer for
//! assembly. The format is picked by extension; unknown extensions are tried
//! as JSON first, then YAML.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::generation::{GenerationError, ModelLoader};
use crate::model::{Model, ModelDocument};

/// Loads models from local YAML or JSON files
pub struct FileModelLoader;

impl FileModelLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parse `content` according to the extension of `path`
    pub fn parse(path: &Path, content: &str) -> Result<ModelDocument, GenerationError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let document = match extension.as_deref() {
            Some("json") => ModelDocument::from_json_str(content)?,
            Some("yaml") | Some("yml") => ModelDocument::from_yaml_str(content)?,
            _ => ModelDocument::from_json_str(content)
                .or_else(|_| ModelDocument::from_yaml_str(content))
                .map_err(|e| {
                    GenerationError::LoadError(format!("Failed to parse model document: {e}"))
                })?,
        };
        Ok(document)
    }
}

impl ModelLoader for FileModelLoader {
    fn load(&self, path: &Path) -> Result<Model, GenerationError> {
        let content = fs::read_to_string(path).map_err(|e| {
            GenerationError::LoadError(format!("Failed to read {}: {e}", path.display()))
        })?;

        let model = Self::parse(path, &content)?.into_model()?;
        debug!(path = %path.display(), nodes = model.len(), "Loaded model");
        Ok(model)
    }
}

impl Default for FileModelLoader {
    fn default() -> Self {
        Self::new()
    }
}
