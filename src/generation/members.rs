//! Member variable declarations for attributes and association ends

use crate::generation::sanitizers::format_documentation;
use crate::generation::types::{TypeMapper, declarator, fixed_count};
use crate::model::{AssociationEnd, Model, Node, NodeKind};

/// Declaration modifiers in emission order: `static`, `const`, `virtual`
pub fn modifiers(is_static: bool, is_read_only: bool, is_abstract: bool) -> String {
    let mut mods = Vec::new();
    if is_static {
        mods.push("static");
    }
    if is_read_only {
        mods.push("const");
    }
    if is_abstract {
        mods.push("virtual");
    }
    mods.join(" ")
}

/// Renders `[doc][mods ]type name[ = default];`
#[derive(Debug, Clone, Copy)]
pub struct MemberEmitter<'m> {
    types: TypeMapper<'m>,
}

impl<'m> MemberEmitter<'m> {
    pub fn new(model: &'m Model) -> Self {
        Self {
            types: TypeMapper::new(model),
        }
    }

    /// Declaration of an attribute node, `None` when it has no name
    pub fn render_attribute(&self, node: &Node) -> Option<String> {
        let NodeKind::Attribute(attr) = &node.kind else {
            return None;
        };
        let multiplicity = attr.multiplicity.as_deref();
        let ty = self
            .types
            .resolve(&attr.type_ref, multiplicity, attr.is_ordered);
        render(
            &node.name,
            &node.documentation,
            &modifiers(attr.is_static, attr.is_read_only, attr.is_abstract),
            &ty,
            fixed_count(multiplicity),
            attr.default_value.as_deref(),
        )
    }

    /// Declaration of the member variable an association end becomes
    pub fn render_association_end(&self, end: &AssociationEnd) -> Option<String> {
        let ty = self.types.resolve_end(end);
        render(
            &end.name,
            &end.documentation,
            &modifiers(end.is_static, end.is_read_only, end.is_abstract),
            &ty,
            fixed_count(end.multiplicity.as_deref()),
            end.default_value.as_deref(),
        )
    }
}

fn render(
    name: &str,
    documentation: &str,
    mods: &str,
    ty: &str,
    count: Option<&str>,
    default_value: Option<&str>,
) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let mut out = format_documentation(documentation);
    if !mods.is_empty() {
        out.push_str(mods);
        out.push(' ');
    }
    out.push_str(&declarator(ty, name, count));
    if let Some(default) = default_value.map(str::trim).filter(|d| !d.is_empty()) {
        out.push_str(" = ");
        out.push_str(default);
    }
    out.push(';');
    Some(out)
}
