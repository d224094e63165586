//! Include resolution between generated headers

use std::collections::HashSet;
use tracing::debug;

use crate::model::{Model, NodeId, Relationship, RelationshipKind};

/// Header file extension
pub const HEADER_EXTENSION: &str = "hpp";

/// Relative path from the file of `from` to the file of `to`.
///
/// Both arguments are `/`-joined ancestor paths ending in the element name.
/// The shared directory prefix is dropped, one `../` is emitted per remaining
/// directory of `from`, then the rest of `to` follows.
pub fn relative_path(from: &str, to: &str) -> String {
    let from: Vec<&str> = from.split('/').collect();
    let to: Vec<&str> = to.split('/').collect();

    // Only directories can be shared; the last segment is the file itself
    let max_common = from.len().min(to.len()).saturating_sub(1);
    let common = from
        .iter()
        .zip(&to)
        .take(max_common)
        .take_while(|(a, b)| a == b)
        .count();

    let ups = from.len() - common - 1;
    let mut path = "../".repeat(ups);
    path.push_str(&to[common..].join("/"));
    path
}

/// Relative header path from `from`'s file to `to`'s header
pub fn relative_include(model: &Model, from: NodeId, to: NodeId) -> String {
    format!(
        "{}.{HEADER_EXTENSION}",
        relative_path(model.ancestor_path(from), model.ancestor_path(to))
    )
}

/// Nodes whose headers `node` depends on, in emission order.
///
/// Dependencies come first, then generalization/realization targets, then
/// the types of navigable named association ends. Self references are
/// excluded.
pub fn include_targets(model: &Model, node: NodeId) -> Vec<NodeId> {
    let mut targets = Vec::new();

    for rel in model.relationships_of_kind(node, &[RelationshipKind::Dependency]) {
        if rel.source() == node && rel.target() != node {
            targets.push(rel.target());
        }
    }

    for rel in model.relationships_of_kind(
        node,
        &[
            RelationshipKind::Generalization,
            RelationshipKind::InterfaceRealization,
        ],
    ) {
        if rel.source() == node && rel.target() != node {
            targets.push(rel.target());
        }
    }

    for rel in model.relationships_of_kind(node, &[RelationshipKind::Association]) {
        if let Some(end) = rel.opposite_end(node) {
            if end.reference != node {
                targets.push(end.reference);
            }
        }
    }

    targets
}

/// `#include "..."` lines for `node`, de-duplicated by resolved path
pub fn include_lines(model: &Model, node: NodeId) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut lines = Vec::new();

    for target in include_targets(model, node) {
        if model.node(target).name.is_empty() {
            continue;
        }
        let path = relative_include(model, node, target);
        if seen.insert(path.clone()) {
            debug!(
                from = model.ancestor_path(node),
                include = %path,
                "Resolved include"
            );
            lines.push(format!("#include \"{path}\""));
        }
    }

    lines
}

/// Inheritance list entries (`public Base`) for `node`
pub fn base_specifiers(model: &Model, node: NodeId) -> Vec<String> {
    model
        .relationships_of_kind(
            node,
            &[
                RelationshipKind::Generalization,
                RelationshipKind::InterfaceRealization,
            ],
        )
        .filter_map(|rel| match rel {
            Relationship::Generalization(edge) | Relationship::InterfaceRealization(edge)
                if edge.source == node && edge.target != node =>
            {
                let target = model.node(edge.target);
                (!target.name.is_empty()).then(|| format!("{} {}", edge.visibility, target.name))
            }
            _ => None,
        })
        .collect()
}
