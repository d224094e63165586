//! Use case for generating C++ skeletons

use std::sync::Arc;

use tracing::info;

use crate::application::{ApplicationError, GenerateRequest, GenerateResponse};
use crate::generation::{CodeGenerator, HeaderTemplate, ModelLoader, OutputService};
use crate::model::ModelError;

/// Loads a model, picks the base element and runs the generator
pub struct GenerateUseCase {
    model_loader: Arc<dyn ModelLoader>,
    output_service: Arc<dyn OutputService>,
}

impl GenerateUseCase {
    pub fn new(model_loader: Arc<dyn ModelLoader>, output_service: Arc<dyn OutputService>) -> Self {
        Self {
            model_loader,
            output_service,
        }
    }

    pub fn execute(&self, request: GenerateRequest) -> Result<GenerateResponse, ApplicationError> {
        request.validate()?;

        let model = self.model_loader.load(&request.model_path)?;

        let base = match request.base.as_deref() {
            Some(path) => model
                .find(path)
                .ok_or_else(|| ModelError::UnknownElement(path.to_string()))?,
            None => model.root(),
        };

        let project = model.project().merged_with(&request.project);
        let header = match &request.copyright {
            Some(text) => HeaderTemplate::custom(text.clone()),
            None => HeaderTemplate::from_project(&project),
        };

        info!(
            model = %request.model_path.display(),
            project = %project.name,
            "Starting generation"
        );

        let generator = CodeGenerator::new(
            &model,
            request.options.clone(),
            header,
            self.output_service.as_ref(),
        )?;
        let report = generator.generate(base, &request.output_dir)?;

        Ok(GenerateResponse {
            output_path: request.output_dir,
            base: model.ancestor_path(base).to_string(),
            project,
            report,
        })
    }
}
