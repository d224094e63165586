//! Generation driver - walks the containment tree and writes skeleton files

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::generation::includes::HEADER_EXTENSION;
use crate::generation::rules::{validate_base, validate_options};
use crate::generation::{
    GenerationError, GenerationOptions, HeaderTemplate, OutputService, StructureEmitter,
};
use crate::model::{Model, Node, NodeId, NodeKind};

/// Source file extension
pub const SOURCE_EXTENSION: &str = "cpp";

/// What a generation run did on disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Files created by this run
    pub written: Vec<PathBuf>,
    /// Files left alone because they already existed
    pub skipped: Vec<PathBuf>,
    /// Package directories created by this run
    pub directories: Vec<PathBuf>,
}

impl GenerationReport {
    pub fn is_noop(&self) -> bool {
        self.written.is_empty() && self.directories.is_empty()
    }
}

/// Writes `.hpp`/`.cpp` skeletons for a model sub-tree.
///
/// Existing files are never overwritten, so hand-edited bodies survive a
/// re-run.
pub struct CodeGenerator<'a> {
    model: &'a Model,
    options: GenerationOptions,
    header: HeaderTemplate,
    emitter: StructureEmitter<'a>,
    output: &'a dyn OutputService,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(
        model: &'a Model,
        options: GenerationOptions,
        header: HeaderTemplate,
        output: &'a dyn OutputService,
    ) -> Result<Self, GenerationError> {
        validate_options(&options)?;
        Ok(Self {
            model,
            emitter: StructureEmitter::new(model, &options),
            options,
            header,
            output,
        })
    }

    /// Generate `node` and everything below it into `base_path`.
    ///
    /// The model root stands for `base_path` itself; any other package gets a
    /// directory of its own.
    pub fn generate(
        &self,
        node: NodeId,
        base_path: &Path,
    ) -> Result<GenerationReport, GenerationError> {
        validate_base(self.model, node)?;

        info!(
            base = %base_path.display(),
            element = self.model.ancestor_path(node),
            "Generating C++ skeletons"
        );

        let mut report = GenerationReport::default();
        self.output.ensure_directory(base_path)?;

        if node == self.model.root() {
            for child in self.model.children(node) {
                self.visit(child, base_path, &mut report)?;
            }
        } else {
            self.visit(self.model.node(node), base_path, &mut report)?;
        }

        info!(
            written = report.written.len(),
            skipped = report.skipped.len(),
            directories = report.directories.len(),
            "Generation finished"
        );
        Ok(report)
    }

    fn visit(
        &self,
        node: &Node,
        base_path: &Path,
        report: &mut GenerationReport,
    ) -> Result<(), GenerationError> {
        if node.name.trim().is_empty() {
            debug!(kind = node.kind.label(), "Skipping unnamed element");
            return Ok(());
        }

        debug!(
            element = self.model.ancestor_path(node.id),
            kind = node.kind.label(),
            "Visiting"
        );

        match &node.kind {
            NodeKind::Package => {
                let dir = base_path.join(&node.name);
                if !self.output.exists(&dir) {
                    self.output.ensure_directory(&dir)?;
                    report.directories.push(dir.clone());
                }
                for child in self.model.children(node.id) {
                    self.visit(child, &dir, report)?;
                }
            }
            NodeKind::Class(classifier) => {
                let header = self.file_path(base_path, node, HEADER_EXTENSION);
                self.write_if_absent(&header, report, || {
                    self.emitter.header_file(node, &self.header)
                })?;

                if !classifier.is_abstract && self.options.gen_cpp {
                    let source = self.file_path(base_path, node, SOURCE_EXTENSION);
                    self.write_if_absent(&source, report, || {
                        self.emitter.source_file(node, &self.header)
                    })?;
                }
            }
            NodeKind::Interface(_) | NodeKind::Enumeration(_) => {
                let header = self.file_path(base_path, node, HEADER_EXTENSION);
                self.write_if_absent(&header, report, || {
                    self.emitter.header_file(node, &self.header)
                })?;
            }
            NodeKind::Attribute(_) | NodeKind::Operation(_) => {}
        }

        Ok(())
    }

    fn file_path(&self, base_path: &Path, node: &Node, extension: &str) -> PathBuf {
        base_path.join(format!("{}.{extension}", node.name))
    }

    fn write_if_absent(
        &self,
        path: &Path,
        report: &mut GenerationReport,
        render: impl FnOnce() -> String,
    ) -> Result<(), GenerationError> {
        if self.output.exists(path) {
            warn!(path = %path.display(), "Skipping existing file");
            report.skipped.push(path.to_path_buf());
            return Ok(());
        }

        self.output.write_file(path, &render())?;
        info!(path = %path.display(), "Wrote file");
        report.written.push(path.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Classifier, ModelBuilder, NewNode};
    use std::collections::{BTreeMap, BTreeSet};
    use std::sync::Mutex;
    use tracing_test::traced_test;

    #[derive(Default)]
    struct MemoryOutput {
        files: Mutex<BTreeMap<PathBuf, String>>,
        dirs: Mutex<BTreeSet<PathBuf>>,
    }

    impl MemoryOutput {
        fn file(&self, path: &str) -> Option<String> {
            self.files.lock().unwrap().get(Path::new(path)).cloned()
        }

        fn seed(&self, path: &str, content: &str) {
            self.files
                .lock()
                .unwrap()
                .insert(PathBuf::from(path), content.to_string());
        }
    }

    impl OutputService for MemoryOutput {
        fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path) || self.dirs.lock().unwrap().contains(path)
        }

        fn ensure_directory(&self, path: &Path) -> Result<(), GenerationError> {
            self.dirs.lock().unwrap().insert(path.to_path_buf());
            Ok(())
        }

        fn write_file(&self, path: &Path, content: &str) -> Result<(), GenerationError> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }
    }

    fn sample() -> Model {
        let mut b = ModelBuilder::new("Model");
        let root = b.root();
        let app = b.add(root, NewNode::package("app"));
        b.add(app, NewNode::class("Widget"));
        b.add(
            app,
            NewNode::new(
                "Shape",
                NodeKind::Class(Classifier {
                    is_abstract: true,
                    ..Default::default()
                }),
            ),
        );
        b.add(app, NewNode::interface("Drawable"));
        b.add(root, NewNode::enumeration("Color", &["Red"]));
        b.add(root, NewNode::class(""));
        b.build()
    }

    fn generator<'a>(
        model: &'a Model,
        options: GenerationOptions,
        output: &'a MemoryOutput,
    ) -> CodeGenerator<'a> {
        CodeGenerator::new(model, options, HeaderTemplate::default(), output).unwrap()
    }

    #[test]
    fn test_generate_layout() {
        let model = sample();
        let output = MemoryOutput::default();
        let report = generator(&model, GenerationOptions::default(), &output)
            .generate(model.root(), Path::new("out"))
            .unwrap();

        let written: Vec<_> = report
            .written
            .iter()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(
            written,
            vec![
                "out/app/Widget.hpp",
                "out/app/Widget.cpp",
                "out/app/Shape.hpp",
                "out/app/Drawable.hpp",
                "out/Color.hpp",
            ]
        );
        assert_eq!(report.directories, vec![Path::new("out").join("app")]);
        assert!(report.skipped.is_empty());
        assert!(output.file("out/Color.hpp").unwrap().contains("enum Color"));
    }

    #[test]
    fn test_gen_cpp_disabled() {
        let model = sample();
        let output = MemoryOutput::default();
        let options = GenerationOptions {
            gen_cpp: false,
            ..Default::default()
        };
        let report = generator(&model, options, &output)
            .generate(model.root(), Path::new("out"))
            .unwrap();

        assert!(report.written.iter().all(|p| p.extension().unwrap() == "hpp"));
        assert_eq!(report.written.len(), 4);
    }

    #[traced_test]
    #[test]
    fn test_existing_header_is_kept() {
        let model = sample();
        let output = MemoryOutput::default();
        output.seed("out/app/Widget.hpp", "// hand written\n");

        let report = generator(&model, GenerationOptions::default(), &output)
            .generate(model.root(), Path::new("out"))
            .unwrap();

        assert_eq!(output.file("out/app/Widget.hpp").as_deref(), Some("// hand written\n"));
        assert!(output.file("out/app/Widget.cpp").is_some());
        assert_eq!(report.skipped, vec![PathBuf::from("out/app/Widget.hpp")]);
        assert!(logs_contain("Skipping existing file"));
    }

    #[test]
    fn test_second_run_writes_nothing() {
        let model = sample();
        let output = MemoryOutput::default();
        let generator = generator(&model, GenerationOptions::default(), &output);

        let first = generator.generate(model.root(), Path::new("out")).unwrap();
        let second = generator.generate(model.root(), Path::new("out")).unwrap();

        assert!(!first.is_noop());
        assert!(second.is_noop());
        assert_eq!(second.skipped, first.written);
    }

    #[test]
    fn test_generate_sub_tree() {
        let model = sample();
        let output = MemoryOutput::default();
        let widget = model.find("app/Widget").unwrap();
        let report = generator(&model, GenerationOptions::default(), &output)
            .generate(widget, Path::new("out"))
            .unwrap();

        assert_eq!(
            report.written,
            vec![PathBuf::from("out/Widget.hpp"), PathBuf::from("out/Widget.cpp")]
        );
    }

    #[test]
    fn test_invalid_options_rejected() {
        let model = sample();
        let output = MemoryOutput::default();
        let options = GenerationOptions {
            indent_spaces: 0,
            ..Default::default()
        };
        assert!(matches!(
            CodeGenerator::new(&model, options, HeaderTemplate::default(), &output),
            Err(GenerationError::InvalidConfiguration(_))
        ));
    }
}
