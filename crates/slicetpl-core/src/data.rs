//! Data context parsing -- JSON or YAML text into a template context.

use crate::error::{PreviewError, Result};
use minijinja::value::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// The format of a data block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataFormat {
    #[default]
    Json,
    Yaml,
}

impl DataFormat {
    /// Guess the format from a file extension. `.yaml` and `.yml` are YAML,
    /// `.json` is JSON, anything else is `None`.
    pub fn detect(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(DataFormat::Json),
            "yaml" | "yml" => Some(DataFormat::Yaml),
            _ => None,
        }
    }
}

impl FromStr for DataFormat {
    type Err = PreviewError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(DataFormat::Json),
            "yaml" | "yml" => Ok(DataFormat::Yaml),
            other => Err(PreviewError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataFormat::Json => f.write_str("json"),
            DataFormat::Yaml => f.write_str("yaml"),
        }
    }
}

/// Parse a data block into a template context.
///
/// A blank block gives an empty context, so templates without variables
/// render without any data.
///
/// # Errors
///
/// Returns [`PreviewError::DataJson`] or [`PreviewError::DataYaml`] when the
/// text does not parse in the given format.
///
/// ```
/// use slicetpl_core::{parse_context, DataFormat};
///
/// let ctx = parse_context("name: World", DataFormat::Yaml).unwrap();
/// assert_eq!(ctx.get_attr("name").unwrap().as_str(), Some("World"));
/// assert!(parse_context(r#"{"name": "Wor"#, DataFormat::Json).is_err());
/// ```
pub fn parse_context(text: &str, format: DataFormat) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(minijinja::context! {});
    }
    match format {
        DataFormat::Json => {
            let data: serde_json::Value = serde_json::from_str(text)?;
            Ok(Value::from_serialize(&data))
        }
        DataFormat::Yaml => {
            let data: serde_yaml::Value = serde_yaml::from_str(text)?;
            Ok(Value::from_serialize(&data))
        }
    }
}
