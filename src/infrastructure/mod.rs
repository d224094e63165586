//! Infrastructure layer - concrete implementations of domain ports

pub mod config;
pub mod model_loader;
pub mod output;

pub use config::*;
pub use model_loader::*;
pub use output::*;
