//! Parser-wide configuration.
//!
//! Carries the program metadata used in generated text and the global
//! defaults that apply when an option does not say otherwise. Loadable from
//! YAML or JSON.
//!
//! # Example YAML
//!
//! ```yaml
//! name: deploy
//! version: 1.4.0
//! helpText: Ship builds to an environment.
//! defaultType: string
//! helpFlag: true
//! versionFlag: true
//! allowUnrecognized: false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ValueType;
use crate::document;
use crate::error::Result;

fn default_name() -> String {
    "app".to_string()
}

fn enabled() -> bool {
    true
}

/// Top-level parser configuration.
///
/// # Examples
///
/// ```
/// use argi_core::{ParserConfig, ValueType};
///
/// let config = ParserConfig::new("deploy").with_version("1.4.0");
/// assert_eq!(config.name, "deploy");
/// assert_eq!(config.default_type, ValueType::String);
/// assert!(config.help_flag);
/// assert!(!config.allow_unrecognized);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParserConfig {
    /// Program name shown in usage and error text.
    #[serde(default = "default_name")]
    pub name: String,
    /// Program version shown by `--version`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Free text printed between the version and usage in help output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    /// Replaces the generated usage line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_text: Option<String>,
    /// Replaces the generated version text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_text: Option<String>,
    /// Value type for options and slots that declare none.
    #[serde(default)]
    pub default_type: ValueType,
    /// Registers the built-in `--help`/`-h`/`-?` flag.
    #[serde(default = "enabled")]
    pub help_flag: bool,
    /// Registers the built-in `--version` flag.
    #[serde(default = "enabled")]
    pub version_flag: bool,
    /// Report leftover tokens instead of failing on them.
    #[serde(default)]
    pub allow_unrecognized: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: None,
            help_text: None,
            usage_text: None,
            version_text: None,
            default_type: ValueType::default(),
            help_flag: true,
            version_flag: true,
            allow_unrecognized: false,
        }
    }
}

impl ParserConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn with_help_text(mut self, text: &str) -> Self {
        self.help_text = Some(text.to_string());
        self
    }

    pub fn with_default_type(mut self, value_type: ValueType) -> Self {
        self.default_type = value_type;
        self
    }

    /// Loads configuration from a `.json`, `.yaml` or `.yml` file.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::ConfigError::Io) if the file cannot be read, a
    /// JSON/YAML error if parsing fails, or
    /// [`UnsupportedFormat`](crate::ConfigError::UnsupportedFormat) for an
    /// unknown extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        document::load(path.as_ref())
    }

    /// Saves the configuration in the format implied by the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        document::save(path.as_ref(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_yaml() -> &'static str {
        r#"
name: deploy
version: 1.4.0
helpText: Ship builds.
defaultType: number
helpFlag: false
allowUnrecognized: true
"#
    }

    #[test]
    fn test_deserialize_complete() {
        let config: ParserConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        assert_eq!(config.name, "deploy");
        assert_eq!(config.version.as_deref(), Some("1.4.0"));
        assert_eq!(config.help_text.as_deref(), Some("Ship builds."));
        assert_eq!(config.default_type, ValueType::Number);
        assert!(!config.help_flag);
        assert!(config.version_flag);
        assert!(config.allow_unrecognized);
    }

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: ParserConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.name, "app");
        assert_eq!(config.default_type, ValueType::String);
        assert!(config.help_flag);
        assert!(config.version_flag);
        assert!(config.usage_text.is_none());
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        for file in ["config.yml", "config.json"] {
            let path = dir.path().join(file);
            let original: ParserConfig = serde_yaml::from_str(sample_yaml()).unwrap();
            original.save(&path).unwrap();

            let loaded = ParserConfig::load(&path).unwrap();
            assert_eq!(loaded.name, original.name);
            assert_eq!(loaded.version, original.version);
            assert_eq!(loaded.default_type, original.default_type);
            assert_eq!(loaded.help_flag, original.help_flag);
        }
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "name = 'x'").unwrap();

        assert!(matches!(
            ParserConfig::load(&path),
            Err(crate::ConfigError::UnsupportedFormat(_))
        ));
    }
}
