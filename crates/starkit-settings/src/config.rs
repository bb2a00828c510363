//! Configuration and settings management for StarKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats; the default location is the platform config
//! directory.
//!
//! Configuration is organized into logical sections:
//! - History settings (stack capacity, drag debounce window)
//! - Canvas settings (surface size)
//! - Star defaults (parameters of a freshly added shape)
//! - Object style (fill, stroke, handle size and accent colour)

use crate::error::{ConfigError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Undo/redo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of commands kept on the stack
    pub capacity: usize,
    /// Idle time after the last handle drag before it is committed
    pub debounce_ms: u64,
}

impl HistorySettings {
    /// Debounce window as a [`Duration`]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            capacity: 100,
            debounce_ms: 500,
        }
    }
}

/// Drawing surface settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Surface width in canvas units
    pub width: f64,
    /// Height as a fraction of the width
    pub aspect: f64,
}

impl CanvasSettings {
    /// Surface height in canvas units
    pub fn height(&self) -> f64 {
        self.width * self.aspect
    }
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 1280.0,
            aspect: 0.56,
        }
    }
}

/// Parameters given to a newly added star
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarDefaults {
    pub spoke_count: u32,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub roundness: f64,
}

impl Default for StarDefaults {
    fn default() -> Self {
        Self {
            spoke_count: 8,
            outer_radius: 120.0,
            inner_radius: 80.0,
            roundness: 0.0,
        }
    }
}

/// Object and handle style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectStyle {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    /// Edge length of native handles, diameter of custom ones
    pub corner_size: f64,
    /// Gap between the shape bounds and the native handles
    pub padding: f64,
    /// Colour of the custom handles
    pub accent: String,
}

impl Default for ObjectStyle {
    fn default() -> Self {
        Self {
            fill: "#fff".to_string(),
            stroke: "#000".to_string(),
            stroke_width: 1.0,
            corner_size: 12.0,
            padding: 10.0,
            accent: "#ffa07a".to_string(),
        }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub history: HistorySettings,
    pub canvas: CanvasSettings,
    pub star: StarDefaults,
    pub style: ObjectStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform location of the config file (`<config dir>/starkit/config.toml`)
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
        })?;
        Ok(dir.join("starkit").join("config.toml"))
    }

    /// Load config from the default path, falling back to defaults when
    /// no file exists there
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history.capacity == 0 {
            return Err(ConfigError::out_of_range(
                "history.capacity",
                self.history.capacity,
            ));
        }

        if !(self.canvas.width.is_finite() && self.canvas.width > 0.0) {
            return Err(ConfigError::out_of_range("canvas.width", self.canvas.width));
        }

        if !(self.canvas.aspect.is_finite() && self.canvas.aspect > 0.0) {
            return Err(ConfigError::out_of_range("canvas.aspect", self.canvas.aspect));
        }

        let star = &self.star;
        if !(3..=200).contains(&star.spoke_count) {
            return Err(ConfigError::out_of_range("star.spoke_count", star.spoke_count));
        }

        if !(star.outer_radius.is_finite() && star.outer_radius > 0.0) {
            return Err(ConfigError::out_of_range("star.outer_radius", star.outer_radius));
        }

        if !(3.0..=star.outer_radius).contains(&star.inner_radius) {
            return Err(ConfigError::out_of_range("star.inner_radius", star.inner_radius));
        }

        if !(0.0..=0.499).contains(&star.roundness) {
            return Err(ConfigError::out_of_range("star.roundness", star.roundness));
        }

        if self.style.corner_size <= 0.0 {
            return Err(ConfigError::out_of_range(
                "style.corner_size",
                self.style.corner_size,
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.history.capacity, 100);
        assert_eq!(config.history.debounce(), Duration::from_millis(500));
        assert!((config.canvas.height() - 716.8).abs() < 1e-9);
    }

    #[test]
    fn test_validate_rejects_bad_star_defaults() {
        let mut config = Config::new();
        config.star.inner_radius = 200.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange { ref key, .. }) if key == "star.inner_radius"
        ));

        let mut config = Config::new();
        config.star.spoke_count = 2;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.star.roundness = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let mut config = Config::new();
        config.history.capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[history]\ndebounce_ms = 250\n").unwrap();
        assert_eq!(config.history.debounce_ms, 250);
        assert_eq!(config.history.capacity, 100);
        assert_eq!(config.star, StarDefaults::default());
    }
}
