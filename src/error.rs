//! Error types for generation
//!
//! Every variant here is fatal: it aborts an invocation before any source
//! text is emitted. Translation failures have their own type in
//! [`crate::translate`] because the engine always recovers from them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    /// The configuration document is not well-formed JSON/TOML
    #[error("Invalid configuration document: {0}")]
    ConfigParse(String),

    /// A known configuration key holds a value of the wrong kind
    #[error("Invalid configuration value: {0}")]
    ConfigShape(String),

    /// Resolved arguments are contradictory or incomplete
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The schema source has no table with this name
    #[error("Table '{0}' not found")]
    TableNotFound(String),

    /// The schema source could not be opened or queried
    #[error("Connection error: {0}")]
    Connection(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GenError {
    pub(crate) fn shape(key: &str, err: impl std::fmt::Display) -> Self {
        GenError::ConfigShape(format!("{}: {}", key, err))
    }

    /// Classify a failure from stacking configuration layers
    pub(crate) fn layering(key: &str, err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::FileParse { cause, .. } => {
                GenError::ConfigParse(format!("{}: {}", key, cause))
            }
            other => Self::shape(key, other),
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
