//! Configuration schema types for `hq2x.toml`
//!
//! Every field is optional in the file; missing values fall back to the
//! defaults below.

use crate::hqx::UpscaleOptions;
use serde::{Deserialize, Serialize};

/// Log verbosity accepted in `[log] level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No output at all
    Off,
    Error,
    /// Problems that did not stop the run (default)
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// The level as a `flexi_logger` spec string.
    pub fn as_spec(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_spec())
    }
}

/// `[upscale]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpscaleConfig {
    /// Split work across a rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Worker threads; 0 lets rayon decide
    #[serde(default)]
    pub threads: usize,
    /// Precompute the 24-bit YUV lookup table
    #[serde(default)]
    pub yuv_table: bool,
}

impl Default for UpscaleConfig {
    fn default() -> Self {
        Self { parallel: default_parallel(), threads: 0, yuv_table: false }
    }
}

fn default_parallel() -> bool {
    true
}

impl UpscaleConfig {
    pub fn options(&self) -> UpscaleOptions {
        UpscaleOptions { parallel: self.parallel, yuv_table: self.yuv_table }
    }
}

/// `[log]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub level: LogLevel,
}

/// Root of `hq2x.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hq2xConfig {
    #[serde(default)]
    pub upscale: UpscaleConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Upper bound on `upscale.threads`.
pub const MAX_THREADS: usize = 1024;

/// A single validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "upscale.threads")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "hq2x.toml: '{}' {}", self.field, self.message)
    }
}

impl Hq2xConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.upscale.threads > MAX_THREADS {
            errors.push(ConfigValidationError {
                field: "upscale.threads".to_string(),
                message: format!("must be at most {}", MAX_THREADS),
            });
        }

        if self.upscale.threads > 1 && !self.upscale.parallel {
            errors.push(ConfigValidationError {
                field: "upscale.threads".to_string(),
                message: "has no effect when upscale.parallel is false".to_string(),
            });
        }

        errors
    }
}
