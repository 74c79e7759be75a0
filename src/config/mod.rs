//! Configuration
//!
//! Layered configuration: built-in defaults, global file, project file,
//! environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AnalysisConfig, Config};
