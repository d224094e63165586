//! Serializable model document and its conversion into a [`Model`]
//!
//! This is the model boundary. A host export (YAML or JSON) is deserialized
//! into the `*Doc` types below and then assembled into the arena. All
//! decoding happens here exactly once: element references are resolved by
//! path and template-encoded operation names are split into their clause and
//! name.

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::model::{
    AssociationEnd, Attribute, Classifier, Direction, Edge, Enumeration, Model, ModelBuilder,
    ModelError, NewNode, NodeId, NodeKind, Operation, Parameter, ProjectMetadata, Relationship,
    TemplateParameter, TypeRef, Visibility,
};

/// Separator between an inline template clause and the operation name
pub const TEMPLATE_SEPARATOR: char = '|';

/// Split a stored operation name into `(template clause, name)`.
///
/// Only the first two `|`-separated segments are considered.
pub fn split_template_name(raw: &str) -> (Option<String>, String) {
    let mut parts = raw.split(TEMPLATE_SEPARATOR);
    let first = parts.next().unwrap_or_default().trim();
    match parts.next() {
        Some(name) => {
            let clause = Some(first.to_string()).filter(|c| !c.is_empty());
            (clause, name.trim().to_string())
        }
        None => (None, first.to_string()),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(t) => t,
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

/// Accept `"5"`, `5`, `1.0` or `true` where the model stores text
pub(crate) fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_text))
}

pub(crate) fn required_scalar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(deserializer)?.unwrap_or_default())
}

/// Root of a model document
#[derive(Debug, Clone, Deserialize)]
pub struct ModelDocument {
    #[serde(default)]
    pub project: ProjectMetadata,
    pub model: RootDoc,
    #[serde(default)]
    pub relationships: Vec<RelationshipDoc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RootDoc {
    #[serde(default = "default_root_name")]
    pub name: String,
    #[serde(default)]
    pub elements: Vec<ElementDoc>,
}

fn default_root_name() -> String {
    "Model".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementDoc {
    Package {
        name: String,
        #[serde(default)]
        documentation: String,
        #[serde(default)]
        elements: Vec<ElementDoc>,
    },
    Class(ClassifierDoc),
    Interface(ClassifierDoc),
    Enumeration(EnumerationDoc),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierDoc {
    pub name: String,
    #[serde(default)]
    pub documentation: String,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default, rename = "leaf")]
    pub is_leaf: bool,
    #[serde(default)]
    pub final_specialization: bool,
    #[serde(default)]
    pub template_parameters: Vec<TemplateParameterDoc>,
    #[serde(default)]
    pub attributes: Vec<AttributeDoc>,
    #[serde(default)]
    pub operations: Vec<OperationDoc>,
    #[serde(default)]
    pub elements: Vec<ElementDoc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateParameterDoc {
    pub name: String,
    #[serde(default, rename = "type")]
    pub param_type: String,
    #[serde(default, deserialize_with = "scalar_text")]
    pub default: Option<String>,
}

/// Either free text (`int`, `vector<string>`) or `{ ref: pkg/Class }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TypeDoc {
    Reference {
        #[serde(rename = "ref")]
        reference: String,
    },
    Name(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttributeDoc {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub type_doc: Option<TypeDoc>,
    #[serde(default)]
    pub documentation: String,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub multiplicity: Option<String>,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub ordered: bool,
    #[serde(default, deserialize_with = "scalar_text")]
    pub default: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OperationDoc {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub documentation: String,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default, rename = "leaf")]
    pub is_leaf: bool,
    #[serde(default)]
    pub parameters: Vec<ParameterDoc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParameterDoc {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub type_doc: Option<TypeDoc>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub multiplicity: Option<String>,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default, deserialize_with = "scalar_text")]
    pub default: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnumerationDoc {
    pub name: String,
    #[serde(default)]
    pub documentation: String,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(default, rename = "leaf")]
    pub is_leaf: bool,
    #[serde(default)]
    pub literals: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RelationshipDoc {
    Association { end1: EndDoc, end2: EndDoc },
    Generalization(EdgeDoc),
    InterfaceRealization(EdgeDoc),
    Dependency(EdgeDoc),
}

#[derive(Debug, Clone, Deserialize)]
pub struct EdgeDoc {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub visibility: Option<Visibility>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EndDoc {
    pub reference: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub navigable: bool,
    #[serde(default, deserialize_with = "scalar_text")]
    pub multiplicity: Option<String>,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(default)]
    pub documentation: String,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub ordered: bool,
    #[serde(default, deserialize_with = "scalar_text")]
    pub default: Option<String>,
}

impl ModelDocument {
    pub fn from_yaml_str(content: &str) -> Result<Self, ModelError> {
        serde_yaml::from_str(content).map_err(|e| ModelError::InvalidDocument(e.to_string()))
    }

    pub fn from_json_str(content: &str) -> Result<Self, ModelError> {
        serde_json::from_str(content).map_err(|e| ModelError::InvalidDocument(e.to_string()))
    }

    /// Assemble the arena, resolving every reference by path
    pub fn into_model(self) -> Result<Model, ModelError> {
        let mut assembler = Assembler::new(&self.model.name);
        assembler.builder.project(self.project);

        let root = assembler.builder.root();
        for element in self.model.elements {
            assembler.add_element(root, element);
        }
        assembler.resolve_types()?;
        for relationship in self.relationships {
            assembler.add_relationship(relationship);
        }

        Ok(assembler.builder.build())
    }
}

/// Where a pending `{ ref: ... }` type has to be written back
enum TypeSlot {
    Attribute(NodeId),
    Parameter(NodeId, usize),
}

struct PendingType {
    slot: TypeSlot,
    reference: String,
}

struct Assembler {
    builder: ModelBuilder,
    node_paths: Vec<String>,
    by_path: HashMap<String, NodeId>,
    pending: Vec<PendingType>,
}

impl Assembler {
    fn new(root_name: &str) -> Self {
        Self {
            builder: ModelBuilder::new(root_name),
            node_paths: vec![String::new()],
            by_path: HashMap::new(),
            pending: Vec::new(),
        }
    }

    fn register(&mut self, parent: NodeId, node: NewNode) -> NodeId {
        let parent_path = &self.node_paths[parent.0];
        let path = if parent_path.is_empty() {
            node.name.clone()
        } else {
            format!("{parent_path}/{}", node.name)
        };
        let id = self.builder.add(parent, node);
        self.by_path.entry(path.clone()).or_insert(id);
        self.node_paths.push(path);
        id
    }

    fn add_element(&mut self, parent: NodeId, element: ElementDoc) {
        match element {
            ElementDoc::Package {
                name,
                documentation,
                elements,
            } => {
                let id = self.register(
                    parent,
                    NewNode::package(name).with_documentation(documentation),
                );
                for child in elements {
                    self.add_element(id, child);
                }
            }
            ElementDoc::Class(doc) => self.add_classifier(parent, doc, false),
            ElementDoc::Interface(doc) => self.add_classifier(parent, doc, true),
            ElementDoc::Enumeration(doc) => {
                let node = NewNode {
                    name: doc.name,
                    documentation: doc.documentation,
                    visibility: doc.visibility,
                    kind: NodeKind::Enumeration(Enumeration {
                        is_leaf: doc.is_leaf,
                        literals: doc.literals,
                    }),
                };
                self.register(parent, node);
            }
        }
    }

    fn add_classifier(&mut self, parent: NodeId, doc: ClassifierDoc, interface: bool) {
        let classifier = Classifier {
            is_abstract: doc.is_abstract,
            is_leaf: doc.is_leaf,
            is_final_specialization: doc.final_specialization,
            template_parameters: doc
                .template_parameters
                .into_iter()
                .map(|t| TemplateParameter {
                    name: t.name,
                    param_type: t.param_type,
                    default_value: t.default,
                })
                .collect(),
        };
        let kind = if interface {
            NodeKind::Interface(classifier)
        } else {
            NodeKind::Class(classifier)
        };
        let id = self.register(
            parent,
            NewNode {
                name: doc.name,
                documentation: doc.documentation,
                visibility: doc.visibility,
                kind,
            },
        );

        for attribute in doc.attributes {
            self.add_attribute(id, attribute);
        }
        for operation in doc.operations {
            self.add_operation(id, operation);
        }
        for nested in doc.elements {
            self.add_element(id, nested);
        }
    }

    fn add_attribute(&mut self, owner: NodeId, doc: AttributeDoc) {
        let (type_ref, reference) = split_type(doc.type_doc);
        let node = NewNode {
            name: doc.name,
            documentation: doc.documentation,
            visibility: doc.visibility,
            kind: NodeKind::Attribute(Attribute {
                type_ref,
                multiplicity: doc.multiplicity,
                is_static: doc.is_static,
                is_read_only: doc.read_only,
                is_abstract: doc.is_abstract,
                is_ordered: doc.ordered,
                default_value: doc.default,
            }),
        };
        let id = self.register(owner, node);
        if let Some(reference) = reference {
            self.pending.push(PendingType {
                slot: TypeSlot::Attribute(id),
                reference,
            });
        }
    }

    fn add_operation(&mut self, owner: NodeId, doc: OperationDoc) {
        let (encoded_clause, name) = split_template_name(&doc.name);
        let template_clause = doc
            .template
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .or(encoded_clause);

        let mut parameters = Vec::with_capacity(doc.parameters.len());
        let mut references = Vec::new();
        for (idx, param) in doc.parameters.into_iter().enumerate() {
            let (type_ref, reference) = split_type(param.type_doc);
            if let Some(reference) = reference {
                references.push((idx, reference));
            }
            parameters.push(Parameter {
                name: param.name,
                type_ref,
                multiplicity: param.multiplicity,
                direction: param.direction,
                default_value: param.default,
            });
        }

        let node = NewNode {
            name,
            documentation: doc.documentation,
            visibility: doc.visibility,
            kind: NodeKind::Operation(Operation {
                template_clause,
                is_static: doc.is_static,
                is_abstract: doc.is_abstract,
                is_leaf: doc.is_leaf,
                parameters,
            }),
        };
        let id = self.register(owner, node);
        for (idx, reference) in references {
            self.pending.push(PendingType {
                slot: TypeSlot::Parameter(id, idx),
                reference,
            });
        }
    }

    fn lookup(&self, path: &str) -> Option<NodeId> {
        self.by_path.get(path.trim_matches('/')).copied()
    }

    fn resolve_types(&mut self) -> Result<(), ModelError> {
        for pending in std::mem::take(&mut self.pending) {
            let target = self.lookup(&pending.reference).ok_or_else(|| {
                let owner = match pending.slot {
                    TypeSlot::Attribute(id) | TypeSlot::Parameter(id, _) => id,
                };
                ModelError::UnresolvedReference {
                    reference: pending.reference.clone(),
                    context: self.node_paths[owner.0].clone(),
                }
            })?;

            match pending.slot {
                TypeSlot::Attribute(id) => {
                    if let NodeKind::Attribute(attr) = &mut self.builder.node_mut(id).kind {
                        attr.type_ref = TypeRef::Node(target);
                    }
                }
                TypeSlot::Parameter(id, idx) => {
                    if let NodeKind::Operation(op) = &mut self.builder.node_mut(id).kind {
                        if let Some(param) = op.parameters.get_mut(idx) {
                            param.type_ref = TypeRef::Node(target);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn add_relationship(&mut self, doc: RelationshipDoc) {
        let relationship = match doc {
            RelationshipDoc::Association { end1, end2 } => {
                match (self.association_end(end1), self.association_end(end2)) {
                    (Some(end1), Some(end2)) => Some(Relationship::Association { end1, end2 }),
                    _ => None,
                }
            }
            RelationshipDoc::Generalization(edge) => {
                self.edge(edge).map(Relationship::Generalization)
            }
            RelationshipDoc::InterfaceRealization(edge) => {
                self.edge(edge).map(Relationship::InterfaceRealization)
            }
            RelationshipDoc::Dependency(edge) => self.edge(edge).map(Relationship::Dependency),
        };

        match relationship {
            Some(rel) => {
                debug!(kind = ?rel.kind(), "Registered relationship");
                self.builder.relate(rel);
            }
            None => warn!("Dropping relationship with an unresolved endpoint"),
        }
    }

    fn edge(&self, doc: EdgeDoc) -> Option<Edge> {
        let source = self.resolve_endpoint(&doc.source)?;
        let target = self.resolve_endpoint(&doc.target)?;
        Some(Edge {
            source,
            target,
            visibility: doc.visibility.unwrap_or(Visibility::Public),
        })
    }

    fn association_end(&self, doc: EndDoc) -> Option<AssociationEnd> {
        let reference = self.resolve_endpoint(&doc.reference)?;
        Some(AssociationEnd {
            reference,
            name: doc.name,
            navigable: doc.navigable,
            multiplicity: doc.multiplicity,
            visibility: doc.visibility,
            documentation: doc.documentation,
            is_static: doc.is_static,
            is_read_only: doc.read_only,
            is_abstract: doc.is_abstract,
            is_ordered: doc.ordered,
            default_value: doc.default,
        })
    }

    fn resolve_endpoint(&self, path: &str) -> Option<NodeId> {
        let found = self.lookup(path);
        if found.is_none() {
            warn!(reference = %path, "Relationship endpoint not found in model");
        }
        found
    }
}

fn split_type(doc: Option<TypeDoc>) -> (TypeRef, Option<String>) {
    match doc {
        None => (TypeRef::Unset, None),
        Some(TypeDoc::Name(name)) if name.trim().is_empty() => (TypeRef::Unset, None),
        Some(TypeDoc::Name(name)) => (TypeRef::Named(name), None),
        Some(TypeDoc::Reference { reference }) => (TypeRef::Unset, Some(reference)),
    }
}
