// src/error.rs

//! Error types for aptpin

use thiserror::Error;

/// Errors produced by pin validation, setting writes and config loading
#[derive(Debug, Error)]
pub enum Error {
    /// Two or more mutually exclusive pin targets were set
    #[error("Mutually exclusive parameters: {0}")]
    MutualExclusion(String),

    /// A parameter value is not allowed in this context
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for aptpin operations
pub type Result<T> = std::result::Result<T, Error>;
