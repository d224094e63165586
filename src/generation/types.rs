//! Type mapping from model type descriptors to C++ type syntax

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{AssociationEnd, Model, TypeRef};

/// Names that live in the `std` namespace
pub const STD_TYPES: &[&str] = &[
    "string", "map", "vector", "pair", "thread", "ostream", "istream", "fstream", "atomic",
];

/// Base type used when nothing can be resolved
pub const VOID: &str = "void";

const ARRAY_SUFFIX: &str = "[]";

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:[A-Za-z_]\w*::)*[A-Za-z_]\w*").expect("valid identifier regex"));

static FIXED_COUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("valid count regex"));

/// Prefix every known standard-library name in `text` with `std::`.
///
/// Works on whole identifiers, so `vector<string>` becomes
/// `std::vector<std::string>` while `stringstream` and already qualified
/// names are left alone.
pub fn qualify_std(text: &str) -> String {
    IDENTIFIER
        .replace_all(text, |caps: &regex::Captures| {
            let token = &caps[0];
            if !token.contains("::") && STD_TYPES.contains(&token) {
                format!("std::{token}")
            } else {
                token.to_string()
            }
        })
        .into_owned()
}

/// Apply a multiplicity annotation to an already resolved base type
pub fn apply_multiplicity(base: &str, multiplicity: Option<&str>, ordered: bool) -> String {
    let Some(multiplicity) = multiplicity.map(str::trim) else {
        return base.to_string();
    };

    match multiplicity {
        "0..*" | "1..*" | "*" => match ordered {
            // No ordered container has been chosen; both keep std::vector
            true => format!("std::vector<{base}>"),
            false => format!("std::vector<{base}>"),
        },
        "1" => base.to_string(),
        count if FIXED_COUNT.is_match(count) => format!("{base}{ARRAY_SUFFIX}"),
        _ => base.to_string(),
    }
}

/// Fixed element count of a numeric multiplicity other than `1`
pub fn fixed_count(multiplicity: Option<&str>) -> Option<&str> {
    let count = multiplicity?.trim();
    (count != "1" && FIXED_COUNT.is_match(count)).then_some(count)
}

/// Render `ty name`, moving an array suffix behind the name.
///
/// With a known count the count is embedded (`int values[5]`), otherwise the
/// bare `[]` is kept (`int values[]`).
pub fn declarator(ty: &str, name: &str, count: Option<&str>) -> String {
    match ty.strip_suffix(ARRAY_SUFFIX) {
        Some(element) => format!("{element} {name}[{}]", count.unwrap_or_default()),
        None => format!("{ty} {name}"),
    }
}

/// Resolves type descriptors against a model
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper<'m> {
    model: &'m Model,
}

impl<'m> TypeMapper<'m> {
    pub fn new(model: &'m Model) -> Self {
        Self { model }
    }

    /// Base type of a descriptor without multiplicity
    pub fn base_type(&self, type_ref: &TypeRef) -> String {
        match type_ref {
            TypeRef::Node(id) => match self.model.get(*id) {
                Some(node) if !node.name.is_empty() => node.name.clone(),
                _ => VOID.to_string(),
            },
            TypeRef::Named(text) if !text.trim().is_empty() => qualify_std(text.trim()),
            _ => VOID.to_string(),
        }
    }

    pub fn resolve(&self, type_ref: &TypeRef, multiplicity: Option<&str>, ordered: bool) -> String {
        apply_multiplicity(&self.base_type(type_ref), multiplicity, ordered)
    }

    /// Type of the member variable an association end turns into
    pub fn resolve_end(&self, end: &AssociationEnd) -> String {
        self.resolve(
            &TypeRef::Node(end.reference),
            end.multiplicity.as_deref(),
            end.is_ordered,
        )
    }
}
