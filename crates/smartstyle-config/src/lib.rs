//! Smartstyle Config
//!
//! This crate handles configuration loading and management
//! for smartstyle, supporting TOML configuration files.
//!
//! # Overview
//!
//! Configuration is loaded from platform-specific locations:
//! - Linux: `~/.config/smartstyle/config.toml`
//! - macOS: `~/Library/Application Support/smartstyle/config.toml`
//! - Windows: `%APPDATA%\smartstyle\config.toml`
//!
//! # Example
//!
//! ```no_run
//! use smartstyle_config::Config;
//!
//! // Load config with defaults
//! let config = Config::load().unwrap();
//!
//! // Or load with an override file
//! let config = Config::load_with_override(Some("./custom.toml")).unwrap();
//! ```

mod logging;
mod options;

pub use logging::{LoggingConfig, DEFAULT_LOG_LEVEL};
pub use options::{ResolvedStyle, StyleOptions, MARKER_OPTION, STYLE_NAME_OPTION};

use serde::{Deserialize, Serialize};
use smartstyle_core::{Result, SmartStyleError};
use std::path::{Path, PathBuf};

/// Default TOML configuration string.
const DEFAULT_TOML: &str = r#"[options]
Marker    = ">r"
StyleName = "RightAligned"

[logging]
Level = "warn"
"#;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Step options
    #[serde(default)]
    pub options: StyleOptions,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        // Parse the default TOML to ensure consistency
        toml::from_str(DEFAULT_TOML).expect("Default TOML should be valid")
    }
}

impl Config {
    /// Returns the default TOML configuration string.
    ///
    /// # Example
    ///
    /// ```
    /// use smartstyle_config::Config;
    /// let toml = Config::default_toml();
    /// assert!(toml.contains("[options]"));
    /// ```
    pub fn default_toml() -> &'static str {
        DEFAULT_TOML
    }

    /// Returns the platform-specific configuration file path.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns the platform-specific configuration directory.
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "smartstyle")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Ensures the config file exists, creating it with defaults if not.
    ///
    /// # Returns
    ///
    /// The path to the config file.
    pub fn ensure_config_file() -> Result<PathBuf> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| SmartStyleError::Config("Could not determine config directory".into()))?;

        std::fs::create_dir_all(&config_dir)?;

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            Self::default().save_to(&config_path)?;
        }

        Ok(config_path)
    }

    /// Load configuration from the default platform-specific path.
    ///
    /// If no config file exists, returns the default configuration.
    pub fn load() -> Result<Self> {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                let mut config = Self::default();
                config.merge(&Self::load_from(&config_path)?);
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific path.
    ///
    /// Keys missing from the file stay unset; merge the result into a
    /// base config to fill them in.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| {
            SmartStyleError::Config(format!("Parse error in {}: {}", path.display(), e))
        })
    }

    /// Parse a TOML string without applying defaults.
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration with an optional override file or string.
    ///
    /// 1. Load the base config from the default location
    /// 2. If `override_config` is provided:
    ///    - If it's a path to an existing file, load and merge it
    ///    - Otherwise, treat it as a TOML string and parse it
    ///
    /// # Example
    ///
    /// ```no_run
    /// use smartstyle_config::Config;
    ///
    /// let config = Config::load_with_override(Some("[options]\nMarker = \">l\"")).unwrap();
    /// assert_eq!(config.options.marker.as_deref(), Some(">l"));
    /// ```
    pub fn load_with_override(override_config: Option<&str>) -> Result<Self> {
        let mut config = Self::load()?;

        if let Some(override_str) = override_config {
            config.merge(&Self::from_path_or_inline(override_str)?);
        }

        Ok(config)
    }

    /// Read `arg` as a config file if it names one, otherwise as inline TOML.
    pub fn from_path_or_inline(arg: &str) -> Result<Self> {
        let path = Path::new(arg);
        if path.is_file() {
            Self::load_from(path)
        } else {
            Self::parse(arg)
                .map_err(|e| SmartStyleError::Config(format!("Override parse error: {}", e)))
        }
    }

    /// Merge another config into this one.
    ///
    /// Values set in `other` take precedence over values in `self`.
    ///
    /// # Example
    ///
    /// ```
    /// use smartstyle_config::Config;
    ///
    /// let mut base = Config::default();
    /// let override_config = Config::parse(r#"
    ///     [options]
    ///     StyleName = "Centered"
    /// "#).unwrap();
    ///
    /// base.merge(&override_config);
    /// assert_eq!(base.options.style_name.as_deref(), Some("Centered"));
    /// assert_eq!(base.options.marker.as_deref(), Some(">r"));
    /// ```
    pub fn merge(&mut self, other: &Config) {
        self.options.merge(&other.options);
        self.logging.merge(&other.logging);
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| SmartStyleError::Config(format!("Serialization error: {}", e)))?;
        std::fs::write(path, toml_string)?;
        Ok(())
    }
}
