//! Format-agnostic configuration loading and saving

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, NormalizedPath, Result, io};

/// Configuration store that picks TOML, JSON or YAML from the file extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a file.
    ///
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    /// - `.yaml`, `.yml` -> YAML
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let content = io::read_text(path)?;
        Self::parse(path, &content)
    }

    /// Load configuration if the file exists.
    pub fn load_optional<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<Option<T>> {
        match io::read_text_if_exists(path)? {
            Some(content) => Self::parse(path, &content).map(Some),
            None => Ok(None),
        }
    }

    /// Save configuration atomically, serialized according to the extension.
    pub fn save<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<()> {
        let serialize_err = |format: &str, message: String| Error::ConfigSerialize {
            path: path.to_native(),
            format: format.into(),
            message,
        };

        let content = match Format::of(path)? {
            Format::Toml => {
                toml::to_string_pretty(value).map_err(|e| serialize_err("TOML", e.to_string()))?
            }
            Format::Json => serde_json::to_string_pretty(value)
                .map(|mut s| {
                    s.push('\n');
                    s
                })
                .map_err(|e| serialize_err("JSON", e.to_string()))?,
            Format::Yaml => {
                serde_yaml::to_string(value).map_err(|e| serialize_err("YAML", e.to_string()))?
            }
        };

        io::write_atomic(path, content.as_bytes())
    }

    fn parse<T: DeserializeOwned>(path: &NormalizedPath, content: &str) -> Result<T> {
        let parse_err = |format: &str, message: String| Error::ConfigParse {
            path: path.to_native(),
            format: format.into(),
            message,
        };

        match Format::of(path)? {
            Format::Toml => toml::from_str(content).map_err(|e| parse_err("TOML", e.to_string())),
            Format::Json => {
                serde_json::from_str(content).map_err(|e| parse_err("JSON", e.to_string()))
            }
            Format::Yaml => {
                serde_yaml::from_str(content).map_err(|e| parse_err("YAML", e.to_string()))
            }
        }
    }
}

enum Format {
    Toml,
    Json,
    Yaml,
}

impl Format {
    fn of(path: &NormalizedPath) -> Result<Self> {
        let extension = path.extension().unwrap_or("");
        match extension.to_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }
}
