//! Settings structs, defaults, and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted settings inside the config directory.
pub const CONFIG_FILE_NAME: &str = "skyshade.ron";

/// Top-level settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Galaxy backdrop brightness settings.
    pub skybox: SkyboxConfig,
    /// Diagnostics.
    pub debug: DebugConfig,
}

/// Galaxy backdrop brightness.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SkyboxConfig {
    /// Take over the host's galaxy brightness and darken it around bodies.
    pub change_skybox: bool,
    /// Un-darkened brightness applied to all three channels, `[0, 1]`.
    pub max_brightness: f32,
}

/// Diagnostics configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter, e.g. `"info"` or `"skyshade_sky=trace"`.
    pub log_level: String,
}

impl Default for SkyboxConfig {
    fn default() -> Self {
        Self {
            change_skybox: true,
            max_brightness: 0.25,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl SkyboxConfig {
    /// Brightness clamped to `[0, 1]`. Non-finite values fall back to 0.
    pub fn brightness(&self) -> f32 {
        if self.max_brightness.is_finite() {
            self.max_brightness.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// The un-darkened backdrop color: [`brightness`](Self::brightness) on every channel.
    pub fn base_color(&self) -> [f32; 3] {
        let b = self.brightness();
        [b, b, b]
    }
}

/// Default settings directory: `<platform config dir>/skyshade`, or the
/// working directory when the platform has none.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("skyshade"))
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Config {
    /// Load settings from `config_dir`, writing a default file first if none exists.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE_NAME);

        if path.exists() {
            let config = Self::read(&path)?;
            log::info!("Loaded settings from {}", path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default settings at {}", path.display());
            Ok(config)
        }
    }

    /// Persist settings to `config_dir`, creating the directory if needed.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::WriteError {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&path, serialized).map_err(|source| ConfigError::WriteError { path, source })
    }

    /// Re-read the file; `Some` only when its contents differ from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = Self::read(&config_dir.join(CONFIG_FILE_NAME))?;

        if &fresh != self {
            log::info!("Settings reloaded with changes");
            Ok(Some(fresh))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_shipped_settings() {
        let config = Config::default();
        assert!(config.skybox.change_skybox);
        assert!((config.skybox.max_brightness - 0.25).abs() < 1e-6);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_default_config_serializes() {
        let ron_str = ron::ser::to_string_pretty(
            &Config::default(),
            ron::ser::PrettyConfig::new().depth_limit(3),
        )
        .unwrap();
        assert!(ron_str.contains("change_skybox: true"));
        assert!(ron_str.contains("max_brightness: 0.25"));
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config: Config = ron::from_str("(skybox: (max_brightness: 0.5))").unwrap();
        assert!(config.skybox.change_skybox);
        assert!((config.skybox.max_brightness - 0.5).abs() < 1e-6);
        assert_eq!(config.debug, DebugConfig::default());
    }

    #[test]
    fn test_unknown_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(render_vessels: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_brightness_is_clamped() {
        let mut skybox = SkyboxConfig::default();
        skybox.max_brightness = 3.0;
        assert_eq!(skybox.base_color(), [1.0, 1.0, 1.0]);
        skybox.max_brightness = -0.5;
        assert_eq!(skybox.base_color(), [0.0, 0.0, 0.0]);
        skybox.max_brightness = f32::NAN;
        assert_eq!(skybox.brightness(), 0.0);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.skybox.max_brightness = 0.6;
        config.skybox.change_skybox = false;
        config.debug.log_level = "debug".to_string();

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.skybox.max_brightness = 0.1;
        modified.save(dir.path()).unwrap();

        let reloaded = config.reload(dir.path()).unwrap();
        assert_eq!(reloaded, Some(modified));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{{not ron}}").unwrap();

        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_reload_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::default().reload(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
