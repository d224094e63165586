//! Request and response types for application use cases

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::ValidationError;
use crate::generation::{GenerationOptions, GenerationReport, rules};
use crate::model::ProjectMetadata;

/// Request to generate C++ skeletons from a model document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequest {
    pub model_path: PathBuf,
    pub output_dir: PathBuf,
    /// `/`-joined path of the element to start from; the model root when unset
    pub base: Option<String>,
    #[serde(default)]
    pub options: GenerationOptions,
    /// Non-empty fields override the project metadata of the document
    #[serde(default)]
    pub project: ProjectMetadata,
    /// Literal header text used instead of the project header
    pub copyright: Option<String>,
}

impl GenerateRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.model_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingField("model_path".to_string()));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingField("output_dir".to_string()));
        }

        rules::validate_options(&self.options)
            .map_err(|e| ValidationError::InvalidConfiguration(e.to_string()))?;

        Ok(())
    }
}

/// Response from a generation run
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub output_path: PathBuf,
    /// Ancestor path of the element generation started from (empty for the root)
    pub base: String,
    pub project: ProjectMetadata,
    pub report: GenerationReport,
}
