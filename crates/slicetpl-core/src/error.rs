//! Error types for data parsing and template rendering.

use thiserror::Error;

/// Errors that can occur while building a preview.
///
/// Filter input of the wrong shape and out-of-range slice bounds are not
/// errors: the filters return the value unchanged or clamp the bounds.
#[derive(Error, Debug)]
pub enum PreviewError {
    /// The data block was not valid JSON.
    #[error("JSON data error: {0}")]
    DataJson(#[from] serde_json::Error),

    /// The data block was not valid YAML.
    #[error("YAML data error: {0}")]
    DataYaml(#[from] serde_yaml::Error),

    /// The rewritten template failed to compile or evaluate.
    #[error("Template error: {0:#}")]
    Template(#[from] minijinja::Error),

    /// A data format name that is neither `json` nor `yaml`.
    #[error("Unknown data format: '{0}' (expected json or yaml)")]
    UnknownFormat(String),
}

/// Convenience alias used throughout slicetpl-core.
pub type Result<T> = std::result::Result<T, PreviewError>;
