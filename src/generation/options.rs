//! Generation options and the per-run file header
//!
//! [`GenerationOptions`] mirrors the preference record the interactive front
//! end collects. [`HeaderTemplate`] is the copyright/doc block written at the
//! top of every file; it is an explicit value handed to the generator so two
//! runs for different projects never share header text.

use serde::{Deserialize, Serialize};

use crate::generation::sanitizers::format_documentation;
use crate::model::ProjectMetadata;

/// Options controlling how files are rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Indent with a tab instead of spaces
    pub use_tab: bool,

    /// Spaces per indentation level when `use_tab` is off
    pub indent_spaces: usize,

    /// Reserved; multiplicity wrapping always uses `std::vector`
    pub use_vector: bool,

    /// Reserved
    pub include_header: bool,

    /// Also emit `.cpp` bodies for non-abstract classes
    pub gen_cpp: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            use_tab: false,
            indent_spaces: 4,
            use_vector: true,
            include_header: true,
            gen_cpp: true,
        }
    }
}

impl GenerationOptions {
    /// One level of indentation
    pub fn indent_unit(&self) -> String {
        if self.use_tab {
            "\t".to_string()
        } else {
            " ".repeat(self.indent_spaces)
        }
    }
}

/// Text written at the top of each generated file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderTemplate {
    text: String,
}

impl HeaderTemplate {
    /// Doc block listing project name, author and version (empty parts omitted)
    pub fn from_project(project: &ProjectMetadata) -> Self {
        let mut lines = Vec::new();
        if !project.name.is_empty() {
            lines.push(format!("Project {}", project.name));
        }
        if !project.author.is_empty() {
            lines.push(format!("@author {}", project.author));
        }
        if !project.version.is_empty() {
            lines.push(format!("@version {}", project.version));
        }
        Self {
            text: format_documentation(&lines.join("\n")),
        }
    }

    /// Use `text` verbatim
    pub fn custom(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
