//! TKG Configuration Management
//!
//! Handles configuration from environment variables with defaults that
//! reproduce a plain `tkg` run. Command-line flags are applied on top by the
//! binary.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Input document configuration
    pub input: InputConfig,

    /// Layout configuration
    pub layout: LayoutConfig,

    /// Rendering output configuration
    pub output: OutputConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup (environment-shaped)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Input
        if let Some(path) = lookup("TKG_INPUT") {
            config.input.path = PathBuf::from(path);
        }

        // Layout
        if let Some(width) = lookup("TKG_LABEL_WIDTH") {
            config.layout.label_width = width.parse().map_err(|_| ConfigError::InvalidValue {
                key: "TKG_LABEL_WIDTH".to_string(),
                value: width.clone(),
            })?;
        }

        // Output
        if let Some(path) = lookup("TKG_OUTPUT") {
            config.output.path = Some(PathBuf::from(path));
        }
        if let Some(format) = lookup("TKG_FORMAT") {
            config.output.format = format.parse()?;
        }
        if let Some(title) = lookup("TKG_TITLE") {
            config.output.title = title;
        }

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            config.logging.json_format = format.eq_ignore_ascii_case("json");
        }

        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that the type system does not cover
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layout.label_width == 0 {
            return Err(ConfigError::InvalidValue {
                key: "label_width".to_string(),
                value: "0".to_string(),
            });
        }
        if self.input.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired("input path".to_string()));
        }
        Ok(())
    }
}

/// Input document configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Path of the document to read
    pub path: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("ai_legends_email_report.pdf"),
        }
    }
}

/// Layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Column width for wrapped Person and Email labels
    pub label_width: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { label_width: 15 }
    }
}

/// Rendering output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output file; derived from the format when unset
    pub path: Option<PathBuf>,

    /// Output format
    pub format: OutputFormat,

    /// Title drawn above the graph
    pub title: String,
}

impl OutputConfig {
    /// Output path, falling back to `team_knowledge_graph.<ext>`
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            PathBuf::from(format!("team_knowledge_graph.{}", self.format.extension()))
        })
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            format: OutputFormat::Svg,
            title: "Team Knowledge Graph".to_string(),
        }
    }
}

/// Supported rendering formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Svg,
    Json,
}

impl OutputFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidValue {
                key: "TKG_FORMAT".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(
            config.input.path,
            PathBuf::from("ai_legends_email_report.pdf")
        );
        assert_eq!(config.layout.label_width, 15);
        assert_eq!(config.output.format, OutputFormat::Svg);
        assert_eq!(
            config.output.resolved_path(),
            PathBuf::from("team_knowledge_graph.svg")
        );
    }

    #[test]
    fn test_lookup_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("TKG_INPUT", "emails.txt"),
            ("TKG_LABEL_WIDTH", "20"),
            ("TKG_FORMAT", "JSON"),
            ("LOG_FORMAT", "json"),
        ]))
        .unwrap();

        assert_eq!(config.input.path, PathBuf::from("emails.txt"));
        assert_eq!(config.layout.label_width, 20);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(
            config.output.resolved_path(),
            PathBuf::from("team_knowledge_graph.json")
        );
        assert!(config.logging.json_format);
    }

    #[test]
    fn test_invalid_label_width() {
        let result = AppConfig::from_lookup(lookup_from(&[("TKG_LABEL_WIDTH", "wide")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

        let result = AppConfig::from_lookup(lookup_from(&[("TKG_LABEL_WIDTH", "0")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("svg".parse::<OutputFormat>().unwrap(), OutputFormat::Svg);
        assert_eq!("Json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("png".parse::<OutputFormat>().is_err());
    }
}
