//! Application settings
//!
//! Stored in `~/.config/sketch-keys/config.yaml`. Every field has a default,
//! so a partial file (or none at all) is fine. Keybindings are code, not
//! configuration, and never appear here.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use thiserror::Error;

use crate::overlay::{OverlayAnchor, PanelConfig};
use crate::platform::OsClass;

/// Errors reading or writing a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Window geometry and title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "sketch-keys".to_string(),
        }
    }
}

/// Appearance and timing of a text panel
///
/// Fields missing from a config section keep that panel's own defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSettings {
    pub anchor: OverlayAnchor,
    pub fade_in_ms: u64,
    /// `None` keeps the panel up until it is dismissed
    pub hold_ms: Option<u64>,
    pub fade_out_ms: u64,
    /// ARGB
    pub background: u32,
    /// ARGB
    pub text_color: u32,
    pub margin: usize,
    pub padding: usize,
}

impl PanelSettings {
    fn help() -> Self {
        Self {
            anchor: OverlayAnchor::Center,
            fade_in_ms: 120,
            hold_ms: None,
            fade_out_ms: 200,
            background: 0xE0202020,
            text_color: 0xFFE0E0E0,
            margin: 10,
            padding: 12,
        }
    }

    fn message() -> Self {
        Self {
            anchor: OverlayAnchor::BottomRight,
            fade_in_ms: 100,
            hold_ms: Some(1200),
            fade_out_ms: 400,
            background: 0xC0303030,
            text_color: 0xFFFFFFFF,
            margin: 16,
            padding: 8,
        }
    }

    /// Panel config for these settings, sized later with `fit_text`
    pub fn to_panel_config(&self) -> PanelConfig {
        PanelConfig::new(self.anchor, 0, 0)
            .with_margin(self.margin)
            .with_padding(self.padding)
            .with_background(self.background)
            .with_text_color(self.text_color)
            .with_timing(
                Duration::from_millis(self.fade_in_ms),
                self.hold_ms.map(Duration::from_millis),
                Duration::from_millis(self.fade_out_ms),
            )
    }
}

/// Lay the keys present in `overrides` over `base`
fn merge_panel(base: PanelSettings, overrides: Value) -> Result<PanelSettings, serde_yaml::Error> {
    match overrides {
        Value::Null => Ok(base),
        Value::Mapping(overrides) => {
            let mut merged = serde_yaml::to_value(&base)?;
            if let Value::Mapping(fields) = &mut merged {
                for (key, value) in overrides {
                    fields.insert(key, value);
                }
            }
            serde_yaml::from_value(merged)
        }
        other => serde_yaml::from_value(other),
    }
}

fn help_panel<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PanelSettings, D::Error> {
    let overrides = Value::deserialize(deserializer)?;
    merge_panel(PanelSettings::help(), overrides).map_err(de::Error::custom)
}

fn message_panel<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PanelSettings, D::Error> {
    let overrides = Value::deserialize(deserializer)?;
    merge_panel(PanelSettings::message(), overrides).map_err(de::Error::custom)
}

fn default_separator() -> String {
    "\n".to_string()
}

fn default_font_size() -> f32 {
    14.0
}

/// Settings that persist across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchConfig {
    /// Force Mac or non-Mac bindings instead of probing the OS
    #[serde(default)]
    pub platform: Option<OsClass>,

    /// Joins lines of the usage listing
    #[serde(default = "default_separator")]
    pub usage_separator: String,

    /// TrueType font for panel text; system fonts are tried when unset
    #[serde(default)]
    pub font_path: Option<PathBuf>,

    #[serde(default = "default_font_size")]
    pub font_size: f32,

    #[serde(default)]
    pub window: WindowSettings,

    #[serde(default = "PanelSettings::help", deserialize_with = "help_panel")]
    pub help_panel: PanelSettings,

    #[serde(default = "PanelSettings::message", deserialize_with = "message_panel")]
    pub message_panel: PanelSettings,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            platform: None,
            usage_separator: default_separator(),
            font_path: None,
            font_size: default_font_size(),
            window: WindowSettings::default(),
            help_panel: PanelSettings::help(),
            message_panel: PanelSettings::message(),
        }
    }
}

impl SketchConfig {
    /// Load config from the default location, or return defaults if it is
    /// missing or broken
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load config from `path`
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&content)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // An empty file deserializes as unit, not as an empty mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Save config to `path`
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content).map_err(write_err)?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_gives_defaults() {
        assert_eq!(SketchConfig::from_yaml_str("").unwrap(), SketchConfig::default());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config = SketchConfig::from_yaml_str("platform: mac\nfont_size: 18\n").unwrap();
        assert_eq!(config.platform, Some(OsClass::Mac));
        assert_eq!(config.font_size, 18.0);
        assert_eq!(config.usage_separator, "\n");
        assert_eq!(config.help_panel.hold_ms, None);
        assert_eq!(config.message_panel.hold_ms, Some(1200));
    }

    #[test]
    fn test_partial_panel_settings() {
        let config =
            SketchConfig::from_yaml_str("message_panel:\n  anchor: top_left\n  hold_ms: null\n")
                .unwrap();
        assert_eq!(config.message_panel.anchor, OverlayAnchor::TopLeft);
        assert_eq!(config.message_panel.hold_ms, None);
        assert_eq!(config.message_panel.fade_out_ms, 400);
    }

    #[test]
    fn test_partial_help_panel_keeps_help_defaults() {
        let config = SketchConfig::from_yaml_str("help_panel:\n  padding: 4\n").unwrap();
        assert_eq!(config.help_panel.padding, 4);
        assert_eq!(config.help_panel.hold_ms, None);
        assert_eq!(config.help_panel.anchor, OverlayAnchor::Center);
    }

    #[test]
    fn test_panel_section_of_wrong_type_is_error() {
        assert!(SketchConfig::from_yaml_str("help_panel: 12\n").is_err());
    }

    #[test]
    fn test_invalid_platform_is_parse_error() {
        let err = SketchConfig::from_yaml_str("platform: amiga\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_panel_config_timing() {
        let panel = PanelSettings::help().to_panel_config();
        assert_eq!(panel.anchor, OverlayAnchor::Center);
        assert_eq!(panel.hold, None);
        assert_eq!(panel.fade_in, Duration::from_millis(120));
    }
}
