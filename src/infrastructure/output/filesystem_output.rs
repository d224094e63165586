//! Filesystem-based output service implementation

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::generation::{GenerationError, OutputService};

/// Output service that writes generated files to the local filesystem
pub struct FileSystemOutputService;

impl FileSystemOutputService {
    pub fn new() -> Self {
        Self
    }
}

impl OutputService for FileSystemOutputService {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn ensure_directory(&self, path: &Path) -> Result<(), GenerationError> {
        fs::create_dir_all(path).map_err(|source| GenerationError::CreateDirectory {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<(), GenerationError> {
        let wrap = |source| GenerationError::WriteFile {
            path: path.to_path_buf(),
            source,
        };

        // create_new: a file that appeared since the existence check is never clobbered
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(wrap)?;
        file.write_all(content.as_bytes()).map_err(wrap)?;
        file.flush().map_err(wrap)?;
        Ok(())
    }
}

impl Default for FileSystemOutputService {
    fn default() -> Self {
        Self::new()
    }
}
