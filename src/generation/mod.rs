//! Generation domain module - turns a model into C++ skeleton files
//!
//! The pieces are layered bottom-up: the type mapper, include resolver and
//! visibility classifier answer small questions about the model; the member
//! emitter and signature builder render single declarations; the structure
//! emitter assembles whole files; and the [`CodeGenerator`] walks the
//! containment tree, deciding which files to write.

pub mod errors;
pub mod includes;
pub mod members;
pub mod options;
pub mod orchestrator;
pub mod rules;
pub mod sanitizers;
pub mod signature;
pub mod structure;
pub mod traits;
pub mod types;
pub mod visibility;
pub mod writer;

pub use errors::*;
pub use members::MemberEmitter;
pub use options::*;
pub use orchestrator::*;
pub use signature::{RenderMode, SignatureBuilder};
pub use structure::StructureEmitter;
pub use traits::*;
pub use types::TypeMapper;
pub use visibility::{Accessible, Member, VisibilityBuckets, classify};
pub use writer::CodeWriter;
