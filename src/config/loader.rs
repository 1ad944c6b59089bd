//! Configuration loading and discovery for `pscan.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::ScanConfig;
use log::debug;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file searched for
pub const CONFIG_FILE_NAME: &str = "pscan.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse pscan.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override the default top-N listing size
    pub limit: Option<usize>,
    /// Override the CSV export path
    pub csv_path: Option<PathBuf>,
    /// Override the replacement output suffix
    pub suffix: Option<String>,
    /// Override the template primary color
    pub primary: Option<String>,
    /// Override the template secondary color
    pub secondary: Option<String>,
}

/// Find pscan.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for pscan.toml
/// 2. Check XDG_CONFIG_HOME/palettescan/pscan.toml (or ~/.config/palettescan/pscan.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find pscan.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("palettescan").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find pscan.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a pscan.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the
/// default configuration.
pub fn load_config(path: Option<&Path>) -> Result<ScanConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => {
            debug!("no {} found, using defaults", CONFIG_FILE_NAME);
            Ok(ScanConfig::default())
        }
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<ScanConfig, ConfigError> {
    debug!("loading config from '{}'", path.display());
    let contents = fs::read_to_string(path)?;
    let config: ScanConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        let messages = errors.into_iter().map(|e| format!("{}: {}", path.display(), e)).collect();
        return Err(ConfigError::Validation(messages));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut ScanConfig, overrides: &CliOverrides) {
    if let Some(limit) = overrides.limit {
        config.analyze.limit = limit;
    }

    if let Some(ref csv_path) = overrides.csv_path {
        config.analyze.csv_path = csv_path.clone();
    }

    if let Some(ref suffix) = overrides.suffix {
        config.replace.suffix = suffix.clone();
    }

    if let Some(ref primary) = overrides.primary {
        config.template.primary = primary.clone();
    }

    if let Some(ref secondary) = overrides.secondary {
        config.template.secondary = secondary.clone();
    }
}
