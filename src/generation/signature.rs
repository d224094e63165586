//! Operation signatures, template headers and stub bodies

use crate::generation::sanitizers::format_documentation;
use crate::generation::types::{TypeMapper, VOID, declarator};
use crate::model::{Model, Node, NodeKind, Operation, Parameter, TemplateParameter};

/// Which form of an operation to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// In-class declaration ending in `;`
    Declaration,
    /// Out-of-line definition with a stub body
    Definition,
}

/// `template<typename T, int N = 4>`; a parameter without a type is a
/// `typename`
pub fn template_header(params: &[TemplateParameter]) -> Option<String> {
    render_template_header(params, true)
}

/// Same as [`template_header`] without default arguments, which may not be
/// repeated on out-of-line definitions
pub fn definition_template_header(params: &[TemplateParameter]) -> Option<String> {
    render_template_header(params, false)
}

fn render_template_header(params: &[TemplateParameter], with_defaults: bool) -> Option<String> {
    if params.is_empty() {
        return None;
    }
    let entries: Vec<String> = params
        .iter()
        .map(|p| {
            let kind = match p.param_type.trim() {
                "" => "typename",
                kind => kind,
            };
            match p.default_value.as_deref().map(str::trim) {
                Some(default) if with_defaults && !default.is_empty() => {
                    format!("{kind} {} = {default}", p.name)
                }
                _ => format!("{kind} {}", p.name),
            }
        })
        .collect();
    Some(format!("template<{}>", entries.join(", ")))
}

/// `<T, N>`, the argument list used to name a templated class
pub fn template_arguments(params: &[TemplateParameter]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
    format!("<{}>", names.join(", "))
}

/// Statement returning a placeholder value of type `return_type`
pub fn stub_return(return_type: &str) -> &'static str {
    let mut normalized = return_type.trim();
    for qualifier in ["const ", "unsigned ", "signed "] {
        normalized = normalized.strip_prefix(qualifier).unwrap_or(normalized).trim();
    }

    match normalized {
        "void" => "return;",
        "bool" | "boolean" => "return false;",
        "int" | "long" | "short" | "byte" | "long long" | "long int" | "short int" => "return 0;",
        "double" | "float" | "long double" => "return 0.0;",
        "char" => "return '0';",
        "std::string" | "string" | "String" => "return \"\";",
        _ => "return nullptr;",
    }
}

/// Renders operation declarations and definitions
#[derive(Debug, Clone)]
pub struct SignatureBuilder<'m> {
    model: &'m Model,
    types: TypeMapper<'m>,
    indent_unit: String,
}

impl<'m> SignatureBuilder<'m> {
    pub fn new(model: &'m Model, indent_unit: impl Into<String>) -> Self {
        Self {
            model,
            types: TypeMapper::new(model),
            indent_unit: indent_unit.into(),
        }
    }

    /// Render `op_node` in the given mode.
    ///
    /// Returns `None` for nodes that are not operations or have no name. The
    /// text may span several lines (doc block, template lines, body).
    pub fn render_operation(&self, op_node: &Node, mode: RenderMode) -> Option<String> {
        let NodeKind::Operation(op) = &op_node.kind else {
            return None;
        };
        let name = op_node.name.trim();
        if name.is_empty() {
            return None;
        }

        let owner = self.model.parent(op_node.id);
        let owner_name = owner.map(|o| o.name.as_str()).unwrap_or_default();
        let is_structor = !owner_name.is_empty()
            && (name == owner_name || name.strip_prefix('~') == Some(owner_name));

        let return_type = op
            .return_parameter()
            .map(|p| self.parameter_type(p))
            .unwrap_or_else(|| VOID.to_string());

        let mut out = format_documentation(&self.documentation(op_node, op));

        match mode {
            RenderMode::Declaration => {
                let in_interface = matches!(owner.map(|o| &o.kind), Some(NodeKind::Interface(_)));
                let is_abstract = !op.is_static && (op.is_abstract || in_interface);

                if let Some(clause) = &op.template_clause {
                    out.push_str(clause);
                    out.push('\n');
                }
                if op.is_static {
                    out.push_str("static ");
                } else if is_abstract || op.is_leaf {
                    out.push_str("virtual ");
                }
                if !is_structor {
                    out.push_str(&return_type);
                    out.push(' ');
                }
                out.push_str(&format!("{name}({})", self.parameter_list(op, true)));
                if op.is_leaf && !op.is_static {
                    out.push_str(" final");
                } else if is_abstract {
                    out.push_str(" = 0");
                }
                out.push(';');
            }
            RenderMode::Definition => {
                for header in self.owner_template_headers(op_node) {
                    out.push_str(&header);
                    out.push('\n');
                }
                if let Some(clause) = &op.template_clause {
                    out.push_str(clause);
                    out.push('\n');
                }
                if !is_structor {
                    out.push_str(&return_type);
                    out.push(' ');
                }
                out.push_str(&format!(
                    "{}{name}({}) {{\n",
                    self.owner_scope(op_node),
                    self.parameter_list(op, false)
                ));
                if op.return_parameter().is_some() && !is_structor {
                    out.push_str(&self.indent_unit);
                    out.push_str(stub_return(&return_type));
                    out.push('\n');
                }
                out.push('}');
            }
        }

        Some(out)
    }

    fn parameter_type(&self, param: &Parameter) -> String {
        self.types
            .resolve(&param.type_ref, param.multiplicity.as_deref(), false)
    }

    fn parameter_list(&self, op: &Operation, with_defaults: bool) -> String {
        op.inputs()
            .map(|p| {
                let ty = self.parameter_type(p);
                let mut rendered = if p.name.trim().is_empty() {
                    ty
                } else {
                    declarator(&ty, p.name.trim(), None)
                };
                if with_defaults {
                    if let Some(default) = p.default_value.as_deref().map(str::trim) {
                        if !default.is_empty() {
                            rendered.push_str(" = ");
                            rendered.push_str(default);
                        }
                    }
                }
                rendered
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn documentation(&self, op_node: &Node, op: &Operation) -> String {
        let mut lines: Vec<String> = Vec::new();
        if !op_node.documentation.trim().is_empty() {
            lines.push(op_node.documentation.trim_end().to_string());
        }
        for param in op.inputs() {
            lines.push(format!("@param {}", param.name.trim()));
        }
        if let Some(ret) = op.return_parameter() {
            lines.push(format!("@return {}", self.parameter_type(ret)));
        }
        lines.join("\n")
    }

    /// Enclosing classifiers of `node`, outermost first
    fn enclosing_classifiers(&self, node: &Node) -> Vec<&'m Node> {
        let mut chain = Vec::new();
        let mut current = self.model.parent(node.id);
        while let Some(parent) = current {
            if !parent.kind.is_classifier() {
                break;
            }
            chain.push(parent);
            current = self.model.parent(parent.id);
        }
        chain.reverse();
        chain
    }

    /// `Outer<T>::Inner::`
    fn owner_scope(&self, op_node: &Node) -> String {
        self.enclosing_classifiers(op_node)
            .into_iter()
            .map(|owner| {
                let args = owner
                    .kind
                    .classifier()
                    .map(|c| template_arguments(&c.template_parameters))
                    .unwrap_or_default();
                format!("{}{args}::", owner.name)
            })
            .collect()
    }

    fn owner_template_headers(&self, op_node: &Node) -> Vec<String> {
        self.enclosing_classifiers(op_node)
            .into_iter()
            .filter_map(|owner| owner.kind.classifier())
            .filter_map(|c| definition_template_header(&c.template_parameters))
            .collect()
    }
}
