//! Visibility classification of class members

use crate::model::{AssociationEnd, Node, Visibility};

/// Anything that carries an optional declared accessibility
pub trait Accessible {
    fn visibility(&self) -> Option<Visibility>;
}

impl Accessible for Node {
    fn visibility(&self) -> Option<Visibility> {
        self.visibility
    }
}

impl Accessible for AssociationEnd {
    fn visibility(&self) -> Option<Visibility> {
        self.visibility
    }
}

impl<T: Accessible + ?Sized> Accessible for &T {
    fn visibility(&self) -> Option<Visibility> {
        (**self).visibility()
    }
}

/// Items split into the three C++ access sections, input order preserved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityBuckets<T> {
    pub public: Vec<T>,
    pub protected: Vec<T>,
    pub private: Vec<T>,
}

impl<T> Default for VisibilityBuckets<T> {
    fn default() -> Self {
        Self {
            public: Vec::new(),
            protected: Vec::new(),
            private: Vec::new(),
        }
    }
}

impl<T> VisibilityBuckets<T> {
    /// Non-empty buckets with their access label, public first
    pub fn sections(&self) -> impl Iterator<Item = (&'static str, &[T])> {
        [
            ("public", self.public.as_slice()),
            ("protected", self.protected.as_slice()),
            ("private", self.private.as_slice()),
        ]
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
    }

    pub fn len(&self) -> usize {
        self.public.len() + self.protected.len() + self.private.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition `items` by visibility.
///
/// `public` and `private` map directly; `protected`, `package` and unset all
/// land in the protected bucket.
pub fn classify<T: Accessible>(items: impl IntoIterator<Item = T>) -> VisibilityBuckets<T> {
    let mut buckets = VisibilityBuckets::default();
    for item in items {
        match item.visibility() {
            Some(Visibility::Public) => buckets.public.push(item),
            Some(Visibility::Private) => buckets.private.push(item),
            _ => buckets.protected.push(item),
        }
    }
    buckets
}

/// One entry of a class body before classification
#[derive(Debug, Clone, Copy)]
pub enum Member<'m> {
    Attribute(&'m Node),
    AssociationEnd(&'m AssociationEnd),
    Operation(&'m Node),
    /// Nested class, interface or enumeration
    Nested(&'m Node),
}

impl Accessible for Member<'_> {
    fn visibility(&self) -> Option<Visibility> {
        match self {
            Member::Attribute(node) | Member::Operation(node) | Member::Nested(node) => {
                node.visibility
            }
            Member::AssociationEnd(end) => end.visibility,
        }
    }
}
