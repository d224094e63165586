//! umlcpp - generate skeleton C++ headers and sources from a UML object model
//!
//! A model (packages, classes, interfaces, enumerations, members and the
//! relationships between them) is loaded from a YAML or JSON document into an
//! arena, then walked to produce one `.hpp` per classifier and one `.cpp` per
//! concrete class. Files that already exist are never touched, so generated
//! bodies can be edited by hand and the tool re-run safely.
#![deny(unsafe_code)]

pub mod application;
pub mod generation;
pub mod infrastructure;
pub mod model;
