//! Class, interface and enumeration skeletons
//!
//! Header mode writes the full declaration: template line, inheritance list,
//! then one access section per non-empty visibility bucket. Source mode only
//! produces out-of-line operation definitions, walking nested classes in the
//! same bucket order so both files list things in the same sequence.

use crate::generation::includes::{base_specifiers, include_lines, HEADER_EXTENSION};
use crate::generation::members::MemberEmitter;
use crate::generation::options::{GenerationOptions, HeaderTemplate};
use crate::generation::sanitizers::{format_documentation, guard_identifier};
use crate::generation::signature::{RenderMode, SignatureBuilder, template_header};
use crate::generation::visibility::{Member, classify};
use crate::generation::writer::CodeWriter;
use crate::model::{Model, Node, NodeKind};

/// Renders whole files and the declarations inside them
#[derive(Debug, Clone)]
pub struct StructureEmitter<'m> {
    model: &'m Model,
    indent_unit: String,
    members: MemberEmitter<'m>,
    signatures: SignatureBuilder<'m>,
}

impl<'m> StructureEmitter<'m> {
    pub fn new(model: &'m Model, options: &GenerationOptions) -> Self {
        let indent_unit = options.indent_unit();
        Self {
            model,
            members: MemberEmitter::new(model),
            signatures: SignatureBuilder::new(model, indent_unit.clone()),
            indent_unit,
        }
    }

    fn writer(&self) -> CodeWriter {
        CodeWriter::new(self.indent_unit.clone())
    }

    /// Complete `.hpp` for a class, interface or enumeration
    pub fn header_file(&self, node: &Node, header: &HeaderTemplate) -> String {
        let guard = format!(
            "_{}_{}",
            guard_identifier(&node.name),
            guard_identifier(HEADER_EXTENSION)
        );
        let mut w = self.writer();

        if !header.is_empty() {
            w.write_block(header.as_str());
            w.blank_line();
        }
        w.write_line(&format!("#ifndef {guard}"));
        w.write_line(&format!("#define {guard}"));

        let includes = include_lines(self.model, node.id);
        if !includes.is_empty() {
            w.blank_line();
            for line in &includes {
                w.write_line(line);
            }
        }
        w.blank_line();

        match &node.kind {
            NodeKind::Enumeration(_) => self.write_enumeration(&mut w, node),
            _ => self.write_class_header(&mut w, node),
        }

        w.blank_line();
        w.write_line(&format!("#endif //{guard}"));
        w.into_string()
    }

    /// Complete `.cpp` for a class
    pub fn source_file(&self, node: &Node, header: &HeaderTemplate) -> String {
        let mut w = self.writer();
        if !header.is_empty() {
            w.write_block(header.as_str());
            w.blank_line();
        }
        w.write_line(&format!("#include \"{}.{HEADER_EXTENSION}\"", node.name));
        w.blank_line();
        self.write_class_body(&mut w, node);
        w.into_string()
    }

    /// Class declaration ending in `};`
    pub fn write_class_header(&self, w: &mut CodeWriter, node: &Node) {
        let Some(classifier) = node.kind.classifier() else {
            return;
        };

        w.write_block(&format_documentation(&node.documentation));
        if let Some(line) = template_header(&classifier.template_parameters) {
            w.write_line(&line);
        }

        let mut line = format!("class {}", node.name);
        if classifier.is_final() {
            line.push_str(" final");
        }
        let bases = base_specifiers(self.model, node.id);
        if !bases.is_empty() {
            line.push_str(" : ");
            line.push_str(&bases.join(", "));
        }
        w.write_line(&line);
        w.write_line("{");

        let buckets = classify(self.collect_members(node));
        for (index, (label, items)) in buckets.sections().enumerate() {
            if index > 0 {
                w.blank_line();
            }
            w.write_line(&format!("{label}:"));
            w.indent();

            let enums = items
                .iter()
                .filter(|m| matches!(m, Member::Nested(n) if matches!(n.kind, NodeKind::Enumeration(_))));
            let others = items
                .iter()
                .filter(|m| !matches!(m, Member::Nested(n) if matches!(n.kind, NodeKind::Enumeration(_))));

            let mut previous = None;
            for member in enums.chain(others) {
                self.write_member(w, member, &mut previous);
            }
            w.outdent();
        }

        w.write_line("};");
    }

    /// Operations and nested types are set off from their neighbours by a
    /// blank line; `previous` is `None` until the first item of a section.
    fn write_member(&self, w: &mut CodeWriter, member: &Member<'_>, previous: &mut Option<bool>) {
        let block = matches!(member, Member::Operation(_) | Member::Nested(_));
        let separate = |w: &mut CodeWriter, previous: &mut Option<bool>| {
            if matches!(previous, Some(last) if *last || block) {
                w.blank_line();
            }
            *previous = Some(block);
        };

        let text = match member {
            Member::Attribute(node) => self.members.render_attribute(node),
            Member::AssociationEnd(end) => self.members.render_association_end(end),
            Member::Operation(node) => self
                .signatures
                .render_operation(node, RenderMode::Declaration),
            Member::Nested(node) => {
                separate(w, previous);
                match node.kind {
                    NodeKind::Enumeration(_) => self.write_enumeration(w, node),
                    _ => self.write_class_header(w, node),
                }
                return;
            }
        };

        if let Some(text) = text {
            separate(w, previous);
            w.write_line(&text);
        }
    }

    /// Attributes, association ends held by this node, operations and
    /// nested types, in that order
    fn collect_members(&self, node: &Node) -> Vec<Member<'m>> {
        let children: Vec<&'m Node> = self.model.children(node.id).collect();
        let mut members: Vec<Member<'m>> = children
            .iter()
            .filter(|c| matches!(c.kind, NodeKind::Attribute(_)))
            .map(|c| Member::Attribute(*c))
            .collect();

        members.extend(
            self.model
                .relationships_of(node.id)
                .filter_map(|rel| rel.opposite_end(node.id))
                .map(Member::AssociationEnd),
        );
        members.extend(
            children
                .iter()
                .filter(|c| matches!(c.kind, NodeKind::Operation(_)))
                .map(|c| Member::Operation(*c)),
        );
        members.extend(
            children
                .iter()
                .filter(|c| {
                    !c.name.is_empty()
                        && matches!(
                            c.kind,
                            NodeKind::Class(_) | NodeKind::Interface(_) | NodeKind::Enumeration(_)
                        )
                })
                .map(|c| Member::Nested(*c)),
        );
        members
    }

    /// Out-of-line definitions for `node` and its nested classes
    pub fn write_class_body(&self, w: &mut CodeWriter, node: &Node) {
        let mut banner = format!("{} implementation", node.name);
        if !node.documentation.trim().is_empty() {
            banner.push_str("\n\n");
            banner.push_str(node.documentation.trim_end());
        }
        w.write_block(&format_documentation(&banner));

        let operations = classify(
            self.model
                .children(node.id)
                .filter(|c| matches!(c.kind, NodeKind::Operation(_))),
        );
        for (_, items) in operations.sections() {
            for op in items {
                if let Some(text) = self.signatures.render_operation(op, RenderMode::Definition) {
                    w.blank_line();
                    w.write_line(&text);
                }
            }
        }

        let nested = classify(
            self.model
                .children(node.id)
                .filter(|c| !c.name.is_empty() && matches!(c.kind, NodeKind::Class(_))),
        );
        for (_, items) in nested.sections() {
            for class in items {
                w.blank_line();
                self.write_class_body(w, class);
            }
        }
    }

    /// `enum [class] Name { ... };`
    pub fn write_enumeration(&self, w: &mut CodeWriter, node: &Node) {
        let NodeKind::Enumeration(enumeration) = &node.kind else {
            return;
        };

        w.write_block(&format_documentation(&node.documentation));
        let scoped = if enumeration.is_leaf { "class " } else { "" };
        w.write_line(&format!("enum {scoped}{}", node.name));
        w.write_line("{");
        w.indent();
        let literals: Vec<&str> = enumeration
            .literals
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect();
        if !literals.is_empty() {
            w.write_line(&literals.join(",\n"));
        }
        w.outdent();
        w.write_line("};");
    }
}
