//! Element payloads of the host object model
//!
//! Every node of the containment tree carries one [`NodeKind`]. Parameters,
//! enumeration literals and template parameters only exist inside their
//! owner, so they are plain values rather than nodes of their own.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::NodeId;

/// Declared accessibility of a model element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    Private,
    Package,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
            Visibility::Package => "package",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of an operation parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    In,
    InOut,
    Out,
    Return,
}

/// Type descriptor of an attribute or parameter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeRef {
    /// Nothing resolvable; maps to `void`
    #[default]
    Unset,
    /// Reference to a named model element (class, enumeration, ...)
    Node(NodeId),
    /// Free-text primitive or container name
    Named(String),
}

impl TypeRef {
    pub fn named(text: impl Into<String>) -> Self {
        TypeRef::Named(text.into())
    }
}

/// Template parameter of a class or interface
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemplateParameter {
    pub name: String,
    /// `typename`, `class`, `int`, ... (empty means `typename`)
    pub param_type: String,
    pub default_value: Option<String>,
}

/// Shared payload of classes and interfaces
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    pub is_abstract: bool,
    pub is_leaf: bool,
    pub is_final_specialization: bool,
    pub template_parameters: Vec<TemplateParameter>,
}

impl Classifier {
    /// Whether the generated class carries the `final` specifier
    pub fn is_final(&self) -> bool {
        self.is_leaf || self.is_final_specialization
    }
}

#[derive(Debug, Clone, Default)]
pub struct Attribute {
    pub type_ref: TypeRef,
    pub multiplicity: Option<String>,
    pub is_static: bool,
    pub is_read_only: bool,
    pub is_abstract: bool,
    pub is_ordered: bool,
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Parameter {
    pub name: String,
    pub type_ref: TypeRef,
    pub multiplicity: Option<String>,
    pub direction: Direction,
    pub default_value: Option<String>,
}

/// Operation payload.
///
/// The template clause is decoded once when the model is built, so render
/// code never has to split names.
#[derive(Debug, Clone, Default)]
pub struct Operation {
    pub template_clause: Option<String>,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_leaf: bool,
    pub parameters: Vec<Parameter>,
}

impl Operation {
    /// Parameters rendered in the argument list
    pub fn inputs(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters
            .iter()
            .filter(|p| p.direction == Direction::In)
    }

    /// The first `return` parameter; any further ones are ignored
    pub fn return_parameter(&self) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.direction == Direction::Return)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Enumeration {
    /// Leaf enumerations become scoped (`enum class`)
    pub is_leaf: bool,
    pub literals: Vec<String>,
}

/// Closed set of node variants in the containment tree
#[derive(Debug, Clone)]
pub enum NodeKind {
    Package,
    Class(Classifier),
    Interface(Classifier),
    Enumeration(Enumeration),
    Attribute(Attribute),
    Operation(Operation),
}

impl NodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Package => "package",
            NodeKind::Class(_) => "class",
            NodeKind::Interface(_) => "interface",
            NodeKind::Enumeration(_) => "enumeration",
            NodeKind::Attribute(_) => "attribute",
            NodeKind::Operation(_) => "operation",
        }
    }

    pub fn classifier(&self) -> Option<&Classifier> {
        match self {
            NodeKind::Class(c) | NodeKind::Interface(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_classifier(&self) -> bool {
        self.classifier().is_some()
    }
}

/// One side of an association
#[derive(Debug, Clone)]
pub struct AssociationEnd {
    pub reference: NodeId,
    pub name: String,
    pub navigable: bool,
    pub multiplicity: Option<String>,
    pub visibility: Option<Visibility>,
    pub documentation: String,
    pub is_static: bool,
    pub is_read_only: bool,
    pub is_abstract: bool,
    pub is_ordered: bool,
    pub default_value: Option<String>,
}

impl AssociationEnd {
    pub fn new(reference: NodeId, name: impl Into<String>, navigable: bool) -> Self {
        Self {
            reference,
            name: name.into(),
            navigable,
            multiplicity: None,
            visibility: None,
            documentation: String::new(),
            is_static: false,
            is_read_only: false,
            is_abstract: false,
            is_ordered: false,
            default_value: None,
        }
    }

    /// Navigable and named ends become member variables of the other side
    pub fn is_member(&self) -> bool {
        self.navigable && !self.name.is_empty()
    }
}

/// Kind tag used to filter relationship queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    Association,
    Generalization,
    InterfaceRealization,
    Dependency,
}

/// Directed edge of a generalization, realization or dependency
#[derive(Debug, Clone)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub visibility: Visibility,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            target,
            visibility: Visibility::Public,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Relationship {
    Association {
        end1: AssociationEnd,
        end2: AssociationEnd,
    },
    Generalization(Edge),
    InterfaceRealization(Edge),
    Dependency(Edge),
}

impl Relationship {
    pub fn kind(&self) -> RelationshipKind {
        match self {
            Relationship::Association { .. } => RelationshipKind::Association,
            Relationship::Generalization(_) => RelationshipKind::Generalization,
            Relationship::InterfaceRealization(_) => RelationshipKind::InterfaceRealization,
            Relationship::Dependency(_) => RelationshipKind::Dependency,
        }
    }

    pub fn source(&self) -> NodeId {
        match self {
            Relationship::Association { end1, .. } => end1.reference,
            Relationship::Generalization(e)
            | Relationship::InterfaceRealization(e)
            | Relationship::Dependency(e) => e.source,
        }
    }

    pub fn target(&self) -> NodeId {
        match self {
            Relationship::Association { end2, .. } => end2.reference,
            Relationship::Generalization(e)
            | Relationship::InterfaceRealization(e)
            | Relationship::Dependency(e) => e.target,
        }
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.source() == node || self.target() == node
    }

    /// The end of an association that `node` holds as a member variable.
    ///
    /// Only the *opposite* end qualifies, and only when it is navigable and
    /// named. A self-association resolves to `end2`.
    pub fn opposite_end(&self, node: NodeId) -> Option<&AssociationEnd> {
        match self {
            Relationship::Association { end1, end2 } => {
                if end1.reference == node && end2.is_member() {
                    Some(end2)
                } else if end2.reference == node && end1.is_member() {
                    Some(end1)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

/// Project metadata supplied by the host, used to seed the file header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectMetadata {
    #[serde(deserialize_with = "crate::model::document::required_scalar_text")]
    pub name: String,
    #[serde(deserialize_with = "crate::model::document::required_scalar_text")]
    pub author: String,
    #[serde(deserialize_with = "crate::model::document::required_scalar_text")]
    pub version: String,
}

impl ProjectMetadata {
    /// Overlay the non-empty fields of `other` onto `self`
    pub fn merged_with(&self, other: &ProjectMetadata) -> ProjectMetadata {
        let pick = |mine: &String, theirs: &String| {
            if theirs.is_empty() {
                mine.clone()
            } else {
                theirs.clone()
            }
        };
        ProjectMetadata {
            name: pick(&self.name, &other.name),
            author: pick(&self.author, &other.author),
            version: pick(&self.version, &other.version),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn end(id: usize, name: &str, navigable: bool) -> AssociationEnd {
        AssociationEnd::new(NodeId(id), name, navigable)
    }

    #[test]
    fn test_opposite_end_picks_navigable_named_side() {
        let rel = Relationship::Association {
            end1: end(1, "", false),
            end2: end(2, "owner", true),
        };

        assert_eq!(rel.opposite_end(NodeId(1)).map(|e| e.name.as_str()), Some("owner"));
        // end1 is neither navigable nor named, so node 2 gets nothing
        assert!(rel.opposite_end(NodeId(2)).is_none());
    }

    #[test]
    fn test_opposite_end_ignores_unnamed_end() {
        let rel = Relationship::Association {
            end1: end(1, "a", true),
            end2: end(2, "", true),
        };
        assert!(rel.opposite_end(NodeId(1)).is_none());
        assert_eq!(rel.opposite_end(NodeId(2)).map(|e| e.name.as_str()), Some("a"));
    }

    #[test]
    fn test_relationship_endpoints() {
        let rel = Relationship::Generalization(Edge::new(NodeId(3), NodeId(4)));
        assert_eq!(rel.kind(), RelationshipKind::Generalization);
        assert_eq!(rel.source(), NodeId(3));
        assert_eq!(rel.target(), NodeId(4));
        assert!(rel.touches(NodeId(4)));
        assert!(!rel.touches(NodeId(5)));
    }

    #[test]
    fn test_operation_parameter_directions() {
        let op = Operation {
            parameters: vec![
                Parameter {
                    name: "a".to_string(),
                    ..Default::default()
                },
                Parameter {
                    type_ref: TypeRef::named("bool"),
                    direction: Direction::Return,
                    ..Default::default()
                },
                Parameter {
                    name: "out".to_string(),
                    direction: Direction::Out,
                    ..Default::default()
                },
                Parameter {
                    type_ref: TypeRef::named("int"),
                    direction: Direction::Return,
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let inputs: Vec<_> = op.inputs().map(|p| p.name.as_str()).collect();
        assert_eq!(inputs, vec!["a"]);
        assert_eq!(
            op.return_parameter().map(|p| &p.type_ref),
            Some(&TypeRef::named("bool"))
        );
    }

    #[test]
    fn test_project_metadata_merge() {
        let base = ProjectMetadata {
            name: "Demo".to_string(),
            author: "Ann".to_string(),
            version: String::new(),
        };
        let overlay = ProjectMetadata {
            name: String::new(),
            author: "Bob".to_string(),
            version: "2.0".to_string(),
        };

        let merged = base.merged_with(&overlay);
        assert_eq!(merged.name, "Demo");
        assert_eq!(merged.author, "Bob");
        assert_eq!(merged.version, "2.0");
    }

    #[test]
    fn test_visibility_display() {
        assert_eq!(Visibility::Public.to_string(), "public");
        assert_eq!(format!("{}", Visibility::Private), "private");
    }
}
