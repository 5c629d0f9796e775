use crate::toast::{Position, ResolvedOptions, DEFAULT_DURATION};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Option values used when a toast does not set them
    #[serde(default)]
    pub defaults: DefaultOptions,
    /// How long an exiting toast stays attached before it is detached (default: 300)
    #[serde(default = "default_exit_animation_ms")]
    pub exit_animation_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultOptions {
    /// Auto-dismiss delay; 0 keeps toasts until removed (default: 3000)
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    /// Host anchor (default: top-right)
    #[serde(default)]
    pub position: Position,
    /// Render a close control (default: true)
    #[serde(default = "default_true")]
    pub close_button: bool,
    /// Render a progress marker (default: true)
    #[serde(default = "default_true")]
    pub progress_bar: bool,
    /// Extra class added to every toast
    #[serde(default)]
    pub class_name: Option<String>,
}

fn default_exit_animation_ms() -> u64 {
    300
}

fn default_duration_ms() -> u64 {
    DEFAULT_DURATION.as_millis() as u64
}

fn default_true() -> bool {
    true
}

impl Default for DefaultOptions {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            position: Position::default(),
            close_button: true,
            progress_bar: true,
            class_name: None,
        }
    }
}

impl DefaultOptions {
    /// The values toast options are merged over
    pub fn resolved(&self) -> ResolvedOptions {
        ResolvedOptions {
            duration: Duration::from_millis(self.duration_ms),
            position: self.position,
            close_button: self.close_button,
            progress_bar: self.progress_bar,
            class_name: self.class_name.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            defaults: DefaultOptions::default(),
            exit_animation_ms: default_exit_animation_ms(),
        }
    }
}

impl Config {
    /// Load configuration from `config_path`, or defaults if it does not exist
    pub fn load_or_default(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!("No config at {:?}, using defaults", config_path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid toastr configuration")
    }

    /// Save configuration to file
    pub fn save(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }
        std::fs::write(config_path, self.to_toml()?)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn exit_animation(&self) -> Duration {
        Duration::from_millis(self.exit_animation_ms)
    }
}

/// Get the config directory path (always ~/.config/toastr, regardless of OS)
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/"))
        .join(".config")
        .join("toastr")
}

/// Get the config file path (~/.config/toastr/config.toml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.exit_animation(), Duration::from_millis(300));
        assert_eq!(config.defaults.resolved(), ResolvedOptions::default());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = Config::from_toml("[defaults]\nposition = \"bottom-left\"\n").unwrap();
        assert_eq!(config.defaults.position, Position::BottomLeft);
        assert_eq!(config.defaults.duration_ms, 3000);
        assert!(config.defaults.close_button);
        assert_eq!(config.exit_animation_ms, 300);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_unknown_position_is_rejected() {
        assert!(Config::from_toml("[defaults]\nposition = \"middle\"\n").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.defaults.duration_ms = 0;
        config.exit_animation_ms = 150;
        let parsed = Config::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}
