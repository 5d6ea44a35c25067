//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (TOML/YAML/JSON)
//! - Command-line arguments (applied by the handlers)
//!
//! The loaded [`Config`] is handed to each handler explicitly.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use srms_core::{HeaderRequirements, UploadPolicy, DEFAULT_PREVIEW_LIMIT, POLL_INTERVAL};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extra or overriding header sets, keyed by operation tag
    pub operations: HeaderRequirements,

    /// Preview settings
    pub preview: PreviewConfig,

    /// Upload admission settings
    pub upload: UploadPolicy,

    /// Progress polling settings
    pub progress: ProgressConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Preview configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Rows shown in a preview
    pub limit: usize,
}

/// Progress polling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Seconds between status polls
    pub interval_secs: u64,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Use colored output by default
    pub color: bool,

    /// Show progress indicators
    pub progress: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); unset follows -v
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,

    /// Log file path
    pub file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            operations: HeaderRequirements::empty(),
            preview: PreviewConfig::default(),
            upload: UploadPolicy::default(),
            progress: ProgressConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PREVIEW_LIMIT,
        }
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            interval_secs: POLL_INTERVAL.as_secs(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            progress: true,
        }
    }
}

/// On-disk format, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Toml,
    Yaml,
    Json,
}

impl FileKind {
    fn of(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(Error::InvalidFormat {
                path: path.to_path_buf(),
                expected: "TOML, YAML or JSON".to_string(),
            }),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let parsed: Result<Config> = match FileKind::of(path)? {
            FileKind::Toml => toml::from_str(&content).map_err(Error::from),
            FileKind::Yaml => serde_yaml::from_str(&content).map_err(Error::from),
            FileKind::Json => serde_json::from_str(&content).map_err(Error::from),
        };
        let config = parsed.inspect_err(|e| {
            tracing::debug!(path = %path.display(), error = %e, "Configuration file did not parse");
        })?;

        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Load configuration from the first default location that exists
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        tracing::debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check, in priority order
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".srms.toml"),
            PathBuf::from(".srms.yaml"),
            PathBuf::from(".srms.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let srms_dir = config_dir.join("srms");
            paths.push(srms_dir.join("config.toml"));
            paths.push(srms_dir.join("config.yaml"));
            paths.push(srms_dir.join("config.json"));
        }

        paths
    }

    /// Built-in header sets with the configured operations layered on top
    pub fn header_requirements(&self) -> HeaderRequirements {
        let mut requirements = HeaderRequirements::default();
        requirements.merge(self.operations.clone());
        requirements
    }

    /// Reject settings no command could work with
    pub fn validate(&self) -> Result<()> {
        if self.upload.extension.trim().is_empty() {
            return Err(Error::config("upload.extension must not be empty"));
        }
        if self.upload.max_bytes == 0 {
            return Err(Error::config("upload.max_bytes must be greater than zero"));
        }
        if self.progress.interval_secs == 0 {
            return Err(Error::config("progress.interval_secs must be greater than zero"));
        }
        Ok(())
    }

    /// Serialize in the format implied by the file extension
    pub fn to_string_for(&self, path: &Path) -> Result<String> {
        Ok(match FileKind::of(path)? {
            FileKind::Toml => toml::to_string_pretty(self)?,
            FileKind::Yaml => serde_yaml::to_string(self)?,
            FileKind::Json => serde_json::to_string_pretty(self)?,
        })
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_string_for(path)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}
