//! End-to-end tests for generating C++ skeletons from the fixture model

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use tempfile::TempDir;
use umlcpp::application::{GenerateRequest, GenerateResponse, GenerateUseCase};
use umlcpp::generation::GenerationOptions;
use umlcpp::infrastructure::{FileModelLoader, FileSystemOutputService};

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/model.yaml")
}

fn generate(output: &Path, options: GenerationOptions) -> GenerateResponse {
    let use_case = GenerateUseCase::new(
        Arc::new(FileModelLoader::new()),
        Arc::new(FileSystemOutputService::new()),
    );
    use_case
        .execute(GenerateRequest {
            model_path: fixture(),
            output_dir: output.to_path_buf(),
            options,
            ..Default::default()
        })
        .expect("generation should succeed")
}

fn read(output: &Path, relative: &str) -> String {
    std::fs::read_to_string(output.join(relative))
        .unwrap_or_else(|e| panic!("Failed to read {relative}: {e}"))
}

/// Relative path -> content for every file below `root`
fn snapshot(root: &Path) -> BTreeMap<PathBuf, String> {
    let mut files = BTreeMap::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                pending.push(path);
            } else {
                let content = std::fs::read_to_string(&path).unwrap();
                files.insert(path.strip_prefix(root).unwrap().to_path_buf(), content);
            }
        }
    }
    files
}

#[test]
fn test_package_layout() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out");
    let response = generate(&out, GenerationOptions::default());

    for file in [
        "core/Drawable.hpp",
        "core/Shape.hpp",
        "core/Color.hpp",
        "shapes/Circle.hpp",
        "shapes/Circle.cpp",
        "shapes/Box.hpp",
        "shapes/Box.cpp",
        "util/Logger.hpp",
        "util/Logger.cpp",
    ] {
        assert!(out.join(file).is_file(), "missing {file}");
    }

    // Interfaces and abstract classes are header-only
    assert!(!out.join("core/Drawable.cpp").exists());
    assert!(!out.join("core/Shape.cpp").exists());
    assert!(!out.join("core/Color.cpp").exists());

    assert_eq!(response.report.written.len(), 9);
    assert_eq!(response.report.directories.len(), 3);
    assert_eq!(response.project.version, "1.5");
}

#[test]
fn test_circle_header() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out");
    generate(&out, GenerationOptions::default());

    let header = read(&out, "shapes/Circle.hpp");
    let expected = r#"/**
 * Project Garden
 * @author Jane Doe
 * @version 1.5
 */

#ifndef _CIRCLE_HPP
#define _CIRCLE_HPP

#include "../util/Logger.hpp"
#include "../core/Shape.hpp"
#include "../core/Drawable.hpp"
#include "Box.hpp"

/**
 * A round shape
 */
class Circle : public Shape, public Drawable
{
public:
    enum Fill
    {
        Solid,
        Hollow
    };

    Color color;
    static int count;

    /**
     * @param radius
     */
    Circle(double radius);

    ~Circle();

    /**
     * Surface covered by the circle
     * @return double
     */
    double area();

    /**
     * @param prefix
     * @return std::string
     */
    std::string label(std::string prefix = "");

    /**
     * @param factor
     * @return bool
     */
    template<typename T>
    bool scaled(T factor);

private:
    double radius = 1.0;
    std::vector<std::string> tags;
    int samples[4];
    Box container;
};

#endif //_CIRCLE_HPP
"#;
    assert_eq!(header, expected);
}

#[test]
fn test_template_class_source() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out");
    generate(&out, GenerationOptions::default());

    assert!(read(&out, "shapes/Box.hpp").contains("template<typename T, int N = 4>\nclass Box\n{"));

    let source = read(&out, "shapes/Box.cpp");
    let expected = r#"/**
 * Project Garden
 * @author Jane Doe
 * @version 1.5
 */

#include "Box.hpp"

/**
 * Box implementation
 */

/**
 * @param item
 */
template<typename T, int N>
void Box<T, N>::put(T item) {
}

/**
 * @return int
 */
template<typename T, int N>
int Box<T, N>::size() {
    return 0;
}
"#;
    assert_eq!(source, expected);
}

#[test]
fn test_circle_source_stubs() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out");
    generate(&out, GenerationOptions::default());

    let source = read(&out, "shapes/Circle.cpp");
    assert!(source.contains("#include \"Circle.hpp\"\n"));
    assert!(source.contains("/**\n * Circle implementation\n *\n * A round shape\n */\n"));
    assert!(source.contains("Circle::Circle(double radius) {\n}\n"));
    assert!(source.contains("Circle::~Circle() {\n}\n"));
    assert!(source.contains("double Circle::area() {\n    return 0.0;\n}\n"));
    assert!(source.contains("std::string Circle::label(std::string prefix) {\n    return \"\";\n}\n"));
    assert!(source.contains("template<typename T>\nbool Circle::scaled(T factor) {\n    return false;\n}\n"));
    // Attributes have no out-of-line form
    assert!(!source.contains("radius ="));
}

#[test]
fn test_interface_enum_and_leaf_class() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out");
    generate(&out, GenerationOptions::default());

    let drawable = read(&out, "core/Drawable.hpp");
    assert!(drawable.contains("/**\n * Anything that can be put on screen\n */\nclass Drawable\n{"));
    assert!(drawable.contains("public:\n    virtual void draw() = 0;\n};"));

    let color = read(&out, "core/Color.hpp");
    assert!(color.contains("#define _COLOR_HPP\n\nenum class Color\n{\n    Red,\n    Green,\n    Blue\n};\n"));

    let logger = read(&out, "util/Logger.hpp");
    assert!(logger.contains("class Logger final\n{"));
    assert!(logger.contains("    static void log(std::string message);"));
    assert!(read(&out, "util/Logger.cpp").contains("void Logger::log(std::string message) {\n}"));

    let shape = read(&out, "core/Shape.hpp");
    assert!(shape.contains("    virtual double area() = 0;"));
    assert!(shape.contains("protected:\n    int id;"));
}

#[test]
fn test_generation_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let first_out = temp_dir.path().join("first");
    let second_out = temp_dir.path().join("second");

    generate(&first_out, GenerationOptions::default());
    generate(&second_out, GenerationOptions::default());
    let first = snapshot(&first_out);
    assert_eq!(first, snapshot(&second_out));

    // Re-running over an existing tree writes nothing
    let rerun = generate(&first_out, GenerationOptions::default());
    assert!(rerun.report.written.is_empty());
    assert!(rerun.report.directories.is_empty());
    assert_eq!(rerun.report.skipped.len(), 9);
    assert_eq!(snapshot(&first_out), first);
}

#[test]
fn test_existing_header_is_preserved() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out");
    std::fs::create_dir_all(out.join("shapes")).unwrap();
    std::fs::write(out.join("shapes/Circle.hpp"), "// edited by hand\n").unwrap();

    let response = generate(&out, GenerationOptions::default());

    assert_eq!(read(&out, "shapes/Circle.hpp"), "// edited by hand\n");
    assert!(out.join("shapes/Circle.cpp").is_file());
    assert_eq!(response.report.skipped, vec![out.join("shapes/Circle.hpp")]);
    // shapes/ already existed
    assert_eq!(response.report.directories.len(), 2);
}

#[test]
fn test_tab_indentation_and_no_cpp() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out");
    let options = GenerationOptions {
        use_tab: true,
        gen_cpp: false,
        ..Default::default()
    };
    let response = generate(&out, options);

    assert!(response.report.written.iter().all(|p| p.extension().unwrap() == "hpp"));
    assert!(read(&out, "core/Drawable.hpp").contains("public:\n\tvirtual void draw() = 0;"));
    assert!(read(&out, "shapes/Box.hpp").contains("\t/**\n\t * @param item\n\t */\n\tvoid put(T item);"));
}

#[test]
fn test_cli_generate_with_config() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out");
    let config = temp_dir.path().join("umlcpp.toml");
    std::fs::write(
        &config,
        "copyright = \"// Garden project\"\n\n[generation]\nindent_spaces = 2\n",
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_umlcpp"))
        .current_dir(temp_dir.path())
        .arg("generate")
        .arg("--model")
        .arg(fixture())
        .arg("--output")
        .arg(&out)
        .arg("--base")
        .arg("util")
        .arg("--config")
        .arg(&config)
        .arg("--no-cpp")
        .output()
        .expect("Failed to run umlcpp");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 written, 0 skipped, 1 directories created"));

    let logger = read(&out, "util/Logger.hpp");
    assert!(logger.starts_with("// Garden project\n\n#ifndef _LOGGER_HPP"));
    assert!(logger.contains("public:\n  /**\n   * @param message\n   */\n  static void log(std::string message);"));
    assert!(!out.join("util/Logger.cpp").exists());
    assert!(!out.join("shapes").exists());
}

#[test]
fn test_cli_missing_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_umlcpp"))
        .current_dir(temp_dir.path())
        .args(["generate", "--output", "out", "--config", "absent.toml"])
        .arg("--model")
        .arg(fixture())
        .output()
        .expect("Failed to run umlcpp");

    assert!(!output.status.success());
    assert!(!temp_dir.path().join("out").exists());
}
