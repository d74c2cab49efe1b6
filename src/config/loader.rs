//! Configuration loading and discovery for `hq2x.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::{Hq2xConfig, LogLevel};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for during discovery
pub const CONFIG_FILE_NAME: &str = "hq2x.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse hq2x.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override worker thread count
    pub threads: Option<usize>,
    /// Force a sequential or parallel pass
    pub parallel: Option<bool>,
    /// Force the YUV lookup table on or off
    pub yuv_table: Option<bool>,
    /// Override log level
    pub log_level: Option<LogLevel>,
}

/// Find hq2x.toml by walking up from the current working directory.
///
/// # Returns
/// - `Some(path)` if an hq2x.toml file is found
/// - `None` if no config file is found
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find hq2x.toml by walking up from a specific directory.
///
/// This is the internal implementation that allows specifying the start directory,
/// useful for testing.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.is_file() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from an hq2x.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration.
///
/// # Example
/// ```ignore
/// // Load from discovered config
/// let config = load_config(None)?;
///
/// // Load from specific path
/// let config = load_config(Some(Path::new("sprites/hq2x.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<Hq2xConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            log::debug!("loading config from {}", p.display());
            load_config_file(&p)
        }
        None => Ok(Hq2xConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<Hq2xConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: Hq2xConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut Hq2xConfig, overrides: &CliOverrides) {
    if let Some(threads) = overrides.threads {
        config.upscale.threads = threads;
    }

    if let Some(parallel) = overrides.parallel {
        config.upscale.parallel = parallel;
    }

    if let Some(yuv_table) = overrides.yuv_table {
        config.upscale.yuv_table = yuv_table;
    }

    if let Some(level) = overrides.log_level {
        config.log.level = level;
    }
}
