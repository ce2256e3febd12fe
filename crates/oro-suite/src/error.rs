//! Error types for suite operations.

use oro_core::{ConfigError, RenderError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while assembling, loading or saving a suite.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Failed to serialize a report
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    /// A case with this name is already registered
    #[error("duplicate case name: {0}")]
    DuplicateCase(String),

    /// A case definition does not validate
    #[error("invalid case '{name}': {source}")]
    InvalidCase {
        /// Name of the offending case.
        name: String,
        /// Validation failure.
        #[source]
        source: ConfigError,
    },
}

impl SuiteError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SuiteError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SuiteError::WriteFile {
            path: path.into(),
            source,
        }
    }
}

/// Why a single case could not be generated or checked.
///
/// Reported in that case's outcome; never aborts the rest of the suite.
#[derive(Debug, Error)]
pub enum CaseError {
    /// Invalid configuration or parameter binding.
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    /// The unit failed while rendering.
    #[error("render: {0}")]
    Render(#[from] RenderError),

    /// The golden file could not be written.
    #[error("golden file: {0}")]
    Io(#[from] oro_io::Error),
}
