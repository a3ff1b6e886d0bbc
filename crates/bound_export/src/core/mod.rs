//! # Core Module
//!
//! Shared configuration used by every export path.

pub mod config;

pub use config::{AppConfig, Config, ConfigError, ExportSettings, OutputFormat};
