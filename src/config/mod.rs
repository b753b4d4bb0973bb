//! Configuration models for .dinewheel/config.json.
//!
//! Every section has Serde defaults, so a missing file or a partial file
//! both load into a complete [`WheelConfig`].

pub mod field;
pub mod metadata;
mod validation;

use serde::{Deserialize, Serialize};

pub use field::{ConfigField, FieldError};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default config file path.
pub const CONFIG_FILE: &str = ".dinewheel/config.json";
/// Default spin record path.
pub const SPIN_RECORD_FILE: &str = ".dinewheel/spin_record.json";
/// Default log directory path.
pub const LOG_DIR: &str = ".dinewheel/logs";

/// Daily window during which spinning is allowed.
///
/// The window is half-open: `[start_hour, end_hour)` in local time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// First hour of the day at which spinning is allowed.
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,
    /// Hour at which spinning stops being allowed.
    #[serde(default = "default_end_hour")]
    pub end_hour: u32,
}

fn default_start_hour() -> u32 {
    0
}

fn default_end_hour() -> u32 {
    10
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            start_hour: default_start_hour(),
            end_hour: default_end_hour(),
        }
    }
}

/// Configuration for the spin animation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Length of one spin in milliseconds.
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    /// Fewest extra full turns per spin.
    #[serde(default = "default_min_turns")]
    pub min_turns: u32,
    /// Most extra full turns per spin.
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
    /// Frame interval of the wheel screen in milliseconds.
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
}

fn default_duration_ms() -> u64 {
    3500
}

fn default_min_turns() -> u32 {
    3
}

fn default_max_turns() -> u32 {
    6
}

fn default_frame_ms() -> u64 {
    16
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            min_turns: default_min_turns(),
            max_turns: default_max_turns(),
            frame_ms: default_frame_ms(),
        }
    }
}

impl AnimationConfig {
    /// Spin length as a [`Duration`].
    pub fn spin_duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Frame interval as a [`Duration`], never shorter than one millisecond.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }
}

/// How the winner of a spin is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionStrategy {
    /// Draw the winning index, then compute a rotation that shows it.
    #[default]
    IndexFirst,
    /// Draw a rotation, then read the winner off the pointer.
    AngleFirst,
}

impl SelectionStrategy {
    /// Name as written in the config file.
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionStrategy::IndexFirst => "index-first",
            SelectionStrategy::AngleFirst => "angle-first",
        }
    }
}

impl std::fmt::Display for SelectionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for winner selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Selection strategy.
    #[serde(default)]
    pub strategy: SelectionStrategy,
}

/// Configuration for the restaurant dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Path to a dataset file replacing the bundled one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Configuration for discount rewards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardsConfig {
    /// Codes handed out after a completed spin, one drawn per spin.
    #[serde(default = "default_codes")]
    pub codes: Vec<String>,
}

fn default_codes() -> Vec<String> {
    ["SPIN10", "LUCKY15", "WHEEL20", "DINE25"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            codes: default_codes(),
        }
    }
}

/// Configuration for log output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log filter, e.g. `info` or `dinewheel=debug`.
    #[serde(default = "default_level")]
    pub level: String,
    /// Directory the daily log files are written to.
    #[serde(default = "default_log_directory")]
    pub directory: String,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    LOG_DIR.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            directory: default_log_directory(),
        }
    }
}

/// Main configuration for dinewheel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelConfig {
    /// Daily spin window.
    #[serde(default)]
    pub window: WindowConfig,
    /// Spin animation settings.
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Winner selection settings.
    #[serde(default)]
    pub selection: SelectionConfig,
    /// Dataset settings.
    #[serde(default)]
    pub dataset: DatasetConfig,
    /// Reward settings.
    #[serde(default)]
    pub rewards: RewardsConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Error type for config operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading the config file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Error parsing the config file JSON.
    #[error("Failed to parse config JSON: {0}")]
    ParseError(#[from] serde_json::Error),
    /// The config parsed but holds values that cannot be used together.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl WheelConfig {
    /// Load configuration from a file, or return defaults if file doesn't exist.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to config file. Defaults to `.dinewheel/config.json` if None.
    ///
    /// The loaded values are validated before being returned.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        let config: WheelConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, path: Option<&Path>) -> Result<(), ConfigError> {
        let path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Check that values which depend on each other are consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let window = &self.window;
        if window.start_hour > 24 || window.end_hour > 24 {
            return Err(ConfigError::Invalid(
                "window hours must be between 0 and 24".into(),
            ));
        }
        if window.start_hour >= window.end_hour {
            return Err(ConfigError::Invalid(format!(
                "window.start_hour ({}) must be before window.end_hour ({})",
                window.start_hour, window.end_hour
            )));
        }

        let animation = &self.animation;
        if animation.duration_ms == 0 {
            return Err(ConfigError::Invalid(
                "animation.duration_ms must be greater than zero".into(),
            ));
        }
        if animation.min_turns < 3 {
            return Err(ConfigError::Invalid(
                "animation.min_turns must be at least 3".into(),
            ));
        }
        if animation.min_turns > animation.max_turns {
            return Err(ConfigError::Invalid(format!(
                "animation.min_turns ({}) must not exceed animation.max_turns ({})",
                animation.min_turns, animation.max_turns
            )));
        }
        Ok(())
    }

    /// Get a config value by dot-notation path (e.g., "window.end_hour").
    pub fn get_by_path(&self, path: &str) -> Result<String, FieldError> {
        let (section, key) = field::split_path(path)?;
        let value = match section {
            "window" => self.window.get_field(key),
            "animation" => self.animation.get_field(key),
            "selection" => self.selection.get_field(key),
            "dataset" => self.dataset.get_field(key),
            "rewards" => self.rewards.get_field(key),
            "logging" => self.logging.get_field(key),
            _ => None,
        };
        value.ok_or_else(|| FieldError::UnknownKey(path.into()))
    }

    /// Set a config value by dot-notation path.
    pub fn set_by_path(&mut self, path: &str, value: &str) -> Result<(), FieldError> {
        let (section, key) = field::split_path(path)?;
        match section {
            "window" => self.window.set_field(key, value),
            "animation" => self.animation.set_field(key, value),
            "selection" => self.selection.set_field(key, value),
            "dataset" => self.dataset.set_field(key, value),
            "rewards" => self.rewards.set_field(key, value),
            "logging" => self.logging.set_field(key, value),
            _ => Err(FieldError::UnknownKey(path.into())),
        }
    }

    /// List all section names.
    pub fn section_names() -> &'static [&'static str] {
        &[
            "window",
            "animation",
            "selection",
            "dataset",
            "rewards",
            "logging",
        ]
    }

    /// Get all field names for a section.
    pub fn fields_for_section(section: &str) -> Option<&'static [&'static str]> {
        match section {
            "window" => Some(WindowConfig::field_names()),
            "animation" => Some(AnimationConfig::field_names()),
            "selection" => Some(SelectionConfig::field_names()),
            "dataset" => Some(DatasetConfig::field_names()),
            "rewards" => Some(RewardsConfig::field_names()),
            "logging" => Some(LoggingConfig::field_names()),
            _ => None,
        }
    }

    /// List all valid config keys as dot-notation paths.
    pub fn all_keys() -> Vec<String> {
        let mut keys = Vec::new();
        for section in Self::section_names() {
            if let Some(fields) = Self::fields_for_section(section) {
                for field in fields {
                    keys.push(format!("{section}.{field}"));
                }
            }
        }
        keys
    }

    /// Reset a section to its default values.
    pub fn reset_section(&mut self, section: &str) -> Result<(), FieldError> {
        match section {
            "window" => self.window = WindowConfig::default(),
            "animation" => self.animation = AnimationConfig::default(),
            "selection" => self.selection = SelectionConfig::default(),
            "dataset" => self.dataset = DatasetConfig::default(),
            "rewards" => self.rewards = RewardsConfig::default(),
            "logging" => self.logging = LoggingConfig::default(),
            _ => return Err(FieldError::UnknownKey(section.into())),
        }
        Ok(())
    }

    /// Reset a specific field to its default value.
    pub fn reset_field(&mut self, path: &str) -> Result<(), FieldError> {
        let (section, key) = field::split_path(path)?;

        // Optional fields have no textual default, so they are cleared directly
        if section == "dataset" && key == "path" {
            self.dataset.path = None;
            return Ok(());
        }

        let default_value = Self::default().get_by_path(path)?;
        self.set_by_path(path, &default_value)
    }
}
