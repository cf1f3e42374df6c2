use std::path::Path;

use crate::constants::{DATA_FILE_EXTENSIONS, STDIN_INDICATOR};
use crate::error::{Error, Result};

/// Serialization formats accepted for context data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
    Toml,
}

impl DataFormat {
    /// Picks the format from the file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            _ => Err(Error::UnsupportedFormat {
                path: path.display().to_string(),
                formats: DATA_FILE_EXTENSIONS.join(", "),
            }),
        }
    }

    /// Parses `content` into a JSON value.
    pub fn parse(self, content: &str) -> Result<serde_json::Value> {
        let value = match self {
            Self::Json => serde_json::from_str(content)?,
            Self::Yaml => serde_yaml::from_str(content)?,
            Self::Toml => toml::from_str(content)?,
        };
        Ok(value)
    }
}

/// Parses a data document and requires a mapping at the top level.
///
/// An empty document yields an empty mapping.
pub fn parse_mapping(
    content: &str,
    format: DataFormat,
    origin: &str,
) -> Result<serde_json::Map<String, serde_json::Value>> {
    if content.trim().is_empty() {
        return Ok(serde_json::Map::new());
    }
    match format.parse(content)? {
        serde_json::Value::Object(map) => Ok(map),
        serde_json::Value::Null => Ok(serde_json::Map::new()),
        other => Err(Error::ConfigValidation(format!(
            "'{origin}' must contain a mapping at the top level, found {}",
            json_type_name(&other)
        ))),
    }
}

/// Loads a context data file, or stdin when `path` is `-`.
///
/// Stdin is parsed as YAML, which also accepts JSON documents.
pub fn load_data_file<P: AsRef<Path>>(
    path: P,
) -> Result<serde_json::Map<String, serde_json::Value>> {
    let path = path.as_ref();
    if path.as_os_str() == STDIN_INDICATOR {
        let buf = read_from(std::io::stdin())?;
        return parse_mapping(&buf, DataFormat::Yaml, "<stdin>");
    }

    let format = DataFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Other(anyhow::anyhow!("Failed to read '{}': {e}", path.display()))
    })?;
    parse_mapping(&content, format, &path.display().to_string())
}

pub fn read_from(mut reader: impl std::io::Read) -> Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf).map_err(Error::IoError)?;
    Ok(buf)
}

pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Object(_) => "a mapping",
    }
}
