//! # Export Configuration
//!
//! Settings that drive a single export call, plus the top-level
//! configuration the command line tool loads from disk.
//!
//! Both structures serialize to TOML and RON through the [`Config`] trait.

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};

/// Output format for a bound file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CodeWalker-style XML
    #[default]
    Xml,
    /// Pretty-printed RON dump of the record tree
    Ron,
}

impl OutputFormat {
    /// File extension conventionally used for this format
    pub fn extension(self) -> &'static str {
        match self {
            Self::Xml => "ybn.xml",
            Self::Ron => "ybn.ron",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xml" => Ok(Self::Xml),
            "ron" => Ok(Self::Ron),
            other => Err(ConfigError::Invalid(format!("unknown output format '{other}'"))),
        }
    }
}

/// # Export Settings
///
/// Per-export switches handed to the bound and drawable dictionary paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Serialized output format
    pub format: OutputFormat,
    /// Turn best-effort skips (missing triangle meshes, hierarchy cycles)
    /// into hard errors
    pub strict: bool,
    /// Let the drawable exporter compute bone tags from bone names
    pub auto_calculate_bone_tag: bool,
}

impl ExportSettings {
    /// Create settings with defaults
    pub fn new() -> Self {
        Self {
            format: OutputFormat::Xml,
            strict: false,
            auto_calculate_bone_tag: false,
        }
    }

    /// Set output format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable strict mode
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Enable or disable bone tag calculation
    pub fn with_auto_calculate_bone_tag(mut self, enabled: bool) -> Self {
        self.auto_calculate_bone_tag = enabled;
        self
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for ExportSettings {}

/// # Application Configuration
///
/// Top-level configuration for the export tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default log level when `RUST_LOG` is unset
    pub log_level: String,
    /// Export settings
    pub settings: ExportSettings,
}

impl AppConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            settings: ExportSettings::default(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set export settings
    pub fn with_settings(mut self, settings: ExportSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];
        if !LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!("unknown log level '{}'", self.log_level)));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for AppConfig {}
