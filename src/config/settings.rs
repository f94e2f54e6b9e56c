//! Application configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use speedo_types::{GaugeConfig, GeneratorConfig};
use std::path::{Path, PathBuf};

/// Application-wide configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the config format
    #[serde(default = "default_version")]
    pub version: u32,
    /// Window dimensions
    #[serde(default)]
    pub window: WindowConfig,
    /// Waveform parameters
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default = "GaugeConfig::speedometer")]
    pub speedometer: GaugeConfig,
    #[serde(default = "GaugeConfig::tachometer")]
    pub tachometer: GaugeConfig,
}

fn default_version() -> u32 {
    1
}

impl AppConfig {
    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("io", "github.speedo", "speedo")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            window: WindowConfig::default(),
            generator: GeneratorConfig::default(),
            speedometer: GaugeConfig::speedometer(),
            tachometer: GaugeConfig::tachometer(),
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    /// Start in fullscreen mode
    #[serde(default)]
    pub fullscreen: bool,
}

fn default_width() -> i32 {
    800
}

fn default_height() -> i32 {
    480
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            fullscreen: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_yields_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.speedometer.max_value, 220.0);
        assert_eq!(config.tachometer.max_value, 8000.0);
        assert!(config.tachometer.divide_value_by_division);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let json = r##"{
            "window": { "fullscreen": true },
            "generator": { "max_speed": 240.0 },
            "speedometer": { "label": "mph", "value_color": "#FF0000" }
        }"##;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert!(config.window.fullscreen);
        assert_eq!(config.window.width, 800);
        assert_eq!(config.generator.max_speed, 240.0);
        assert_eq!(config.generator.max_rpm, 8000.0);
        assert_eq!(config.speedometer.label, "mph");
        assert_eq!(config.speedometer.value_color.to_rgba8(), (255, 0, 0, 255));
        assert_eq!(config.speedometer.division_value, 20.0);
        assert_eq!(config.tachometer, GaugeConfig::tachometer());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("speedo-config-test-{}", std::process::id()));
        let path = dir.join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.window.height = 600;
        config.generator.frame_ms = 33;
        config.save_to_path(&path).unwrap();

        let loaded = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded.window, config.window);
        assert_eq!(loaded.generator.frame_ms, 33);
        assert_eq!(loaded.generator.max_rpm, 8000.0);
        assert_eq!(loaded.tachometer.label, "x1000 rpm");
        assert_eq!(
            loaded.speedometer.rim_color.to_rgba8(),
            config.speedometer.rim_color.to_rgba8()
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = std::env::temp_dir().join(format!("speedo-config-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(AppConfig::load_from_path(&path).is_err());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
