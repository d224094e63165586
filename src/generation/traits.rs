//! Port interfaces for the generation domain

use std::path::Path;

use crate::generation::GenerationError;
use crate::model::Model;

/// Filesystem seam used by the generation driver
pub trait OutputService: Send + Sync {
    /// Whether a file or directory already exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Create `path` and any missing parents
    fn ensure_directory(&self, path: &Path) -> Result<(), GenerationError>;

    /// Create a new file at `path` containing `content`
    fn write_file(&self, path: &Path, content: &str) -> Result<(), GenerationError>;
}

/// Loads a model from a document on disk
pub trait ModelLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<Model, GenerationError>;
}
