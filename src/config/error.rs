//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// A single structural problem found while validating a resolved tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    /// A required path did not resolve to any value.
    #[error("missing required configuration: {path}")]
    MissingRequired { path: String },

    /// A value is present but violates a declared constraint.
    #[error("invalid value for {path}: {reason}")]
    InvalidValue { path: String, reason: String },
}

impl ConfigValidationError {
    /// The dotted path the error refers to.
    pub fn path(&self) -> &str {
        match self {
            ConfigValidationError::MissingRequired { path } => path,
            ConfigValidationError::InvalidValue { path, .. } => path,
        }
    }
}

/// Non-fatal failure to load an environment file.
///
/// The affected layer contributes no overrides; resolution carries on.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("failed to load environment file {path}: {reason}")]
pub struct ConfigLoadWarning {
    pub path: PathBuf,
    pub reason: String,
}

/// Errors returned by resolver and snapshot operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration validation failed: {}", join_errors(.0))]
    Validation(Vec<ConfigValidationError>),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("configuration section {0} does not exist")]
    MissingSection(String),

    #[error("configuration section {path} has an unexpected shape: {source}")]
    Section {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// Validation errors carried by this error, if any.
    pub fn validation_errors(&self) -> &[ConfigValidationError] {
        match self {
            ConfigError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

fn join_errors(errors: &[ConfigValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
