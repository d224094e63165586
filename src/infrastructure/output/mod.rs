//! Output service implementations

pub mod filesystem_output;

pub use filesystem_output::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{GenerationError, OutputService};
    use tempfile::TempDir;

    #[test]
    fn test_filesystem_output_write_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output_service = FileSystemOutputService::new();
        let path = temp_dir.path().join("Widget.hpp");

        assert!(!output_service.exists(&path));
        output_service
            .write_file(&path, "class Widget\n{\n};\n")
            .expect("Failed to write file");

        assert!(output_service.exists(&path));
        let content = std::fs::read_to_string(&path).expect("Failed to read Widget.hpp");
        assert_eq!(content, "class Widget\n{\n};\n");
    }

    #[test]
    fn test_filesystem_output_never_overwrites() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output_service = FileSystemOutputService::new();
        let path = temp_dir.path().join("Widget.cpp");
        std::fs::write(&path, "// edited").expect("Failed to seed file");

        let result = output_service.write_file(&path, "// generated");
        assert!(matches!(result, Err(GenerationError::WriteFile { .. })));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "// edited");
    }

    #[test]
    fn test_filesystem_output_ensure_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output_service = FileSystemOutputService::new();

        let nested_path = temp_dir.path().join("deeply/nested/directory");

        let result = output_service.ensure_directory(&nested_path);
        assert!(result.is_ok());
        assert!(nested_path.is_dir());

        // Idempotent
        assert!(output_service.ensure_directory(&nested_path).is_ok());
    }

    #[test]
    fn test_filesystem_output_reports_path_on_failure() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output_service = FileSystemOutputService::new();
        let path = temp_dir.path().join("missing/Widget.hpp");

        let err = output_service.write_file(&path, "").unwrap_err();
        assert!(err.to_string().contains("Widget.hpp"));
    }
}
