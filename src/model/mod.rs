//! Model domain module - the read-only object graph the generator consumes
//!
//! The host owns a containment tree of packages, classifiers and members plus
//! a set of relationships between them. Here that graph is an arena: nodes are
//! addressed by [`NodeId`], every node except the root has exactly one parent,
//! and relationships are indexed per node so the generator can ask for
//! "relationships touching X" without scanning the whole set.
//!
//! Ancestor paths (the `/`-joined names below the root) are computed once when
//! the model is built and reused for every include line.

pub mod document;
pub mod errors;
pub mod types;

pub use document::*;
pub use errors::*;
pub use types::*;

use std::collections::HashMap;

/// Index of a node in its [`Model`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// One element of the containment tree
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub documentation: String,
    pub visibility: Option<Visibility>,
    pub kind: NodeKind,
}

/// Description of a node to be added through [`ModelBuilder::add`]
#[derive(Debug, Clone)]
pub struct NewNode {
    pub name: String,
    pub documentation: String,
    pub visibility: Option<Visibility>,
    pub kind: NodeKind,
}

impl NewNode {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            documentation: String::new(),
            visibility: None,
            kind,
        }
    }

    pub fn package(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Package)
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Class(Classifier::default()))
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Interface(Classifier::default()))
    }

    pub fn enumeration(name: impl Into<String>, literals: &[&str]) -> Self {
        Self::new(
            name,
            NodeKind::Enumeration(Enumeration {
                is_leaf: false,
                literals: literals.iter().map(|l| l.to_string()).collect(),
            }),
        )
    }

    pub fn attribute(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self::new(
            name,
            NodeKind::Attribute(Attribute {
                type_ref,
                ..Default::default()
            }),
        )
    }

    pub fn operation(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Operation(Operation::default()))
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }
}

/// Incrementally assembles a [`Model`]
#[derive(Debug)]
pub struct ModelBuilder {
    nodes: Vec<Node>,
    relationships: Vec<Relationship>,
    project: ProjectMetadata,
}

impl ModelBuilder {
    /// Start a model whose root is a package called `root_name`
    pub fn new(root_name: impl Into<String>) -> Self {
        let root = Node {
            id: NodeId(0),
            name: root_name.into(),
            parent: None,
            children: Vec::new(),
            documentation: String::new(),
            visibility: None,
            kind: NodeKind::Package,
        };
        Self {
            nodes: vec![root],
            relationships: Vec::new(),
            project: ProjectMetadata::default(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append `node` as the last child of `parent`
    pub fn add(&mut self, parent: NodeId, node: NewNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id,
            name: node.name,
            parent: Some(parent),
            children: Vec::new(),
            documentation: node.documentation,
            visibility: node.visibility,
            kind: node.kind,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn relate(&mut self, relationship: Relationship) {
        self.relationships.push(relationship);
    }

    pub fn project(&mut self, project: ProjectMetadata) {
        self.project = project;
    }

    pub fn build(self) -> Model {
        let paths = self
            .nodes
            .iter()
            .map(|node| ancestor_path(&self.nodes, node))
            .collect();

        let mut by_node: HashMap<NodeId, Vec<usize>> = HashMap::new();
        for (idx, rel) in self.relationships.iter().enumerate() {
            let (source, target) = (rel.source(), rel.target());
            by_node.entry(source).or_default().push(idx);
            if target != source {
                by_node.entry(target).or_default().push(idx);
            }
        }

        Model {
            nodes: self.nodes,
            relationships: self.relationships,
            by_node,
            paths,
            project: self.project,
        }
    }
}

fn ancestor_path(nodes: &[Node], node: &Node) -> String {
    let mut names = Vec::new();
    let mut current = node;
    while let Some(parent) = current.parent {
        names.push(current.name.as_str());
        current = &nodes[parent.0];
    }
    names.reverse();
    names.join("/")
}

/// Immutable object graph handed to the generator
#[derive(Debug)]
pub struct Model {
    nodes: Vec<Node>,
    relationships: Vec<Relationship>,
    by_node: HashMap<NodeId, Vec<usize>>,
    paths: Vec<String>,
    project: ProjectMetadata,
}

impl Model {
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn project(&self) -> &ProjectMetadata {
        &self.project
    }

    /// Owned children of `id` in declaration order
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> {
        self.node(id).children.iter().map(|child| self.node(*child))
    }

    pub fn parent(&self, id: NodeId) -> Option<&Node> {
        self.node(id).parent.map(|p| self.node(p))
    }

    /// `/`-joined names from below the root down to and including `id`
    pub fn ancestor_path(&self, id: NodeId) -> &str {
        &self.paths[id.0]
    }

    /// Relationships whose source or target is `id`, in model order
    pub fn relationships_of(&self, id: NodeId) -> impl Iterator<Item = &Relationship> {
        self.by_node
            .get(&id)
            .into_iter()
            .flatten()
            .map(|idx| &self.relationships[*idx])
    }

    /// Relationships touching `id` restricted to the given kinds
    pub fn relationships_of_kind<'a>(
        &'a self,
        id: NodeId,
        kinds: &'a [RelationshipKind],
    ) -> impl Iterator<Item = &'a Relationship> {
        self.relationships_of(id)
            .filter(move |rel| kinds.contains(&rel.kind()))
    }

    /// Look up a node by its ancestor path (`pkg/sub/Class`); the empty path
    /// is the root
    pub fn find(&self, path: &str) -> Option<NodeId> {
        let path = path.trim_matches('/');
        self.paths
            .iter()
            .position(|p| p == path)
            .map(NodeId)
    }
}
