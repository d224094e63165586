//! Indentation-aware text buffer used by the emitters

/// Line-oriented writer that prefixes every non-empty line with the current
/// indentation
#[derive(Debug, Clone)]
pub struct CodeWriter {
    unit: String,
    depth: usize,
    lines: Vec<String>,
}

impl CodeWriter {
    pub fn new(indent_unit: impl Into<String>) -> Self {
        Self {
            unit: indent_unit.into(),
            depth: 0,
            lines: Vec::new(),
        }
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn outdent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Write `text` at the current depth.
    ///
    /// Multi-line text is indented line by line; blank lines stay blank.
    pub fn write_line(&mut self, text: &str) {
        if text.is_empty() {
            self.lines.push(String::new());
            return;
        }
        let prefix = self.unit.repeat(self.depth);
        for line in text.lines() {
            if line.trim().is_empty() {
                self.lines.push(String::new());
            } else {
                self.lines.push(format!("{prefix}{line}"));
            }
        }
    }

    /// Write every line of an already formatted block (doc comments end in `\n`)
    pub fn write_block(&mut self, block: &str) {
        if !block.is_empty() {
            self.write_line(block.trim_end_matches('\n'));
        }
    }

    pub fn blank_line(&mut self) {
        self.lines.push(String::new());
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_string(self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}
