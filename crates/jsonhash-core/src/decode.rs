//! # Decoders
//!
//! Turn document text into a [`JsonValue`]. JSON goes through the
//! duplicate-preserving `Deserialize` impl on `JsonValue`; YAML goes through
//! `serde_yaml::Value` so that tagged nodes can be rejected explicitly.

use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::error::JsonHashError;
use crate::value::JsonValue;

/// Decode a JSON document from text.
pub fn from_json_str(text: &str) -> Result<JsonValue, JsonHashError> {
    Ok(serde_json::from_str(text)?)
}

/// Decode a JSON document from bytes.
pub fn from_json_slice(bytes: &[u8]) -> Result<JsonValue, JsonHashError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Decode a JSON document from a reader.
pub fn from_json_reader(reader: impl Read) -> Result<JsonValue, JsonHashError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Decode a YAML document from text.
pub fn from_yaml_str(text: &str) -> Result<JsonValue, JsonHashError> {
    let value: serde_yaml::Value = serde_yaml::from_str(text)?;
    JsonValue::try_from(value)
}

/// Decode a YAML document from bytes.
pub fn from_yaml_slice(bytes: &[u8]) -> Result<JsonValue, JsonHashError> {
    let value: serde_yaml::Value = serde_yaml::from_slice(bytes)?;
    JsonValue::try_from(value)
}

/// Document syntax accepted by the decoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    /// JSON text.
    #[default]
    Json,
    /// YAML text.
    Yaml,
}

impl DocumentFormat {
    /// Guess the format from a file extension. Anything that is not
    /// `.yaml`/`.yml` is treated as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }

    /// Decode a document in this format.
    pub fn decode(self, bytes: &[u8]) -> Result<JsonValue, JsonHashError> {
        match self {
            Self::Json => from_json_slice(bytes),
            Self::Yaml => from_yaml_slice(bytes),
        }
    }

    /// Returns the format name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentFormat {
    type Err = JsonHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(JsonHashError::Decode(format!(
                "unknown document format: {other}"
            ))),
        }
    }
}
