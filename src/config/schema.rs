//! Configuration schema types for `pscan.toml`
//!
//! Every section and field is optional; missing values fall back to the
//! defaults below.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::color::parse_hex;
use crate::histogram::{DEFAULT_LEAST_COMMON, DEFAULT_TOP_COLORS};

/// Settings for the `analyze` command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeConfig {
    /// Number of colors listed by default
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Number of least common colors shown with `--stats`
    #[serde(default = "default_least")]
    pub least: usize,
    /// Destination of `--csv` when no path is given
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self { limit: default_limit(), least: default_least(), csv_path: default_csv_path() }
    }
}

fn default_limit() -> usize {
    DEFAULT_TOP_COLORS
}

fn default_least() -> usize {
    DEFAULT_LEAST_COMMON
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("colors.csv")
}

/// Settings for the `replace` command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaceConfig {
    /// Appended to the input file stem to name the output image
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

impl Default for ReplaceConfig {
    fn default() -> Self {
        Self { suffix: default_suffix() }
    }
}

fn default_suffix() -> String {
    "_color_change".to_string()
}

/// Settings for the `template` command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Color of the top-left tile and every tile diagonal to it
    #[serde(default = "default_primary")]
    pub primary: String,
    /// Color of the remaining tiles
    #[serde(default = "default_secondary")]
    pub secondary: String,
    /// Output file when `-o` is not given
    #[serde(default = "default_template_output")]
    pub output: PathBuf,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            secondary: default_secondary(),
            output: default_template_output(),
        }
    }
}

fn default_primary() -> String {
    "#008000".to_string()
}

fn default_secondary() -> String {
    "#ff0000".to_string()
}

fn default_template_output() -> PathBuf {
    PathBuf::from("sprite_template.png")
}

/// Complete pscan.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default)]
    pub analyze: AnalyzeConfig,
    #[serde(default)]
    pub replace: ReplaceConfig,
    #[serde(default)]
    pub template: TemplateConfig,
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "template.primary")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' {}", self.field, self.message)
    }
}

impl ScanConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.analyze.least == 0 {
            errors.push(ConfigValidationError {
                field: "analyze.least".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if self.analyze.csv_path.as_os_str().is_empty() {
            errors.push(ConfigValidationError {
                field: "analyze.csv_path".to_string(),
                message: "must be a non-empty path".to_string(),
            });
        }

        // An empty suffix would overwrite the input image
        if self.replace.suffix.is_empty() {
            errors.push(ConfigValidationError {
                field: "replace.suffix".to_string(),
                message: "must be a non-empty string".to_string(),
            });
        }

        for (field, value) in
            [("template.primary", &self.template.primary), ("template.secondary", &self.template.secondary)]
        {
            if let Err(e) = parse_hex(value) {
                errors.push(ConfigValidationError { field: field.to_string(), message: e.to_string() });
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ScanConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.analyze.limit, 10);
        assert_eq!(config.analyze.least, 5);
        assert_eq!(config.replace.suffix, "_color_change");
        assert_eq!(config.template.output, PathBuf::from("sprite_template.png"));
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: ScanConfig = toml::from_str("").unwrap();
        assert_eq!(config, ScanConfig::default());
    }

    #[test]
    fn test_partial_section() {
        let config: ScanConfig = toml::from_str("[analyze]\nlimit = 3\n").unwrap();
        assert_eq!(config.analyze.limit, 3);
        assert_eq!(config.analyze.least, 5);
        assert_eq!(config.replace, ReplaceConfig::default());
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let mut config = ScanConfig::default();
        config.analyze.least = 0;
        config.replace.suffix.clear();
        config.template.secondary = "not-a-color".to_string();

        let errors = config.validate();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["analyze.least", "replace.suffix", "template.secondary"]);
        assert!(errors[1].to_string().starts_with("'replace.suffix' must be"));
    }
}
