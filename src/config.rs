//! Configuration management
//!
//! This module handles loading and managing configuration from:
//! - Command-line arguments
//! - Configuration files (TOML)
//! - Defaults

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub default: DefaultConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultConfig {
    /// Namespace URI used to qualify pit element lookups
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

/// Render settings for the PNG backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Output image width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Output image height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Area assigned to a node per unit of degree, in square pixels
    #[serde(default = "default_node_size_scale")]
    pub node_size_scale: f64,

    /// Number of spring layout iterations
    #[serde(default = "default_layout_iterations")]
    pub layout_iterations: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions

fn default_namespace() -> String {
    crate::PEACH_NAMESPACE.to_string()
}

fn default_width() -> u32 {
    1024
}

fn default_height() -> u32 {
    768
}

fn default_node_size_scale() -> f64 {
    500.0
}

fn default_layout_iterations() -> u32 {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

// Default implementations

impl Default for DefaultConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            node_size_scale: default_node_size_scale(),
            layout_iterations: default_layout_iterations(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config file {:?}: {}", path, e)))?;

        Ok(config)
    }

    /// Load configuration from default locations
    ///
    /// Searches in order:
    /// 1. ./pit2graph.toml
    /// 2. ~/.pit2graph/config.toml
    pub fn load() -> Result<Self> {
        let paths = vec![
            PathBuf::from("pit2graph.toml"),
            dirs::home_dir()
                .map(|h| h.join(".pit2graph").join("config.toml"))
                .unwrap_or_else(|| PathBuf::from("/dev/null")),
        ];

        for path in paths {
            if path.exists() {
                tracing::info!("Loading config from {:?}", path);
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default.namespace, crate::PEACH_NAMESPACE);
        assert_eq!(config.render.width, 1024);
        assert_eq!(config.render.node_size_scale, 500.0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
[default]
namespace = "http://example.com/custom"

[render]
width = 640
height = 480

[logging]
level = "debug"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.default.namespace, "http://example.com/custom");
        assert_eq!(config.render.width, 640);
        assert_eq!(config.render.height, 480);
        assert_eq!(config.render.layout_iterations, 100);
        assert_eq!(config.logging.level, "debug");
    }
}
