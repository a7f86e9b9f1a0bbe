//! Configuration loading and types for easypages.
//!
//! This module handles all aspects of configuration:
//! - Type definitions for config structures (`types`)
//! - Layered loading from defaults, a TOML file and overrides (`load`)

mod load;
mod types;

// Re-export all types for convenient access
pub use load::Overrides;
pub use types::{MarkdownConfig, Settings};

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to deserialize config: {0}")]
    Deserialize(#[from] config::ConfigError),

    #[error("failed to get current working directory: {0}")]
    CwdFailure(std::io::Error),

    #[error("{0}")]
    Validation(String),
}
