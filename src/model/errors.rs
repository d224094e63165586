//! Error types for the model domain

use thiserror::Error;

/// Errors raised while building or querying a model
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Unresolved reference '{reference}' in {context}")]
    UnresolvedReference { reference: String, context: String },

    #[error("Unknown element: {0}")]
    UnknownElement(String),

    #[error("Invalid model document: {0}")]
    InvalidDocument(String),
}
