//! ConfigField trait implementations for config sections.
//!
//! Each section gets dynamic get/set access with per-field parsing for the
//! `dinewheel config` commands.

use super::field::{format_optional, format_vec, parse_vec, ConfigField, FieldError};
use super::{
    AnimationConfig, DatasetConfig, LoggingConfig, RewardsConfig, SelectionConfig,
    SelectionStrategy, WindowConfig,
};

fn parse_number<T: std::str::FromStr>(
    key: &str,
    value: &str,
    expected: &str,
) -> Result<T, FieldError> {
    value.trim().parse().map_err(|_| FieldError::InvalidValue {
        key: key.into(),
        expected: expected.into(),
    })
}

fn parse_hour(key: &str, value: &str) -> Result<u32, FieldError> {
    let hour: u32 = parse_number(key, value, "hour between 0 and 24")?;
    if hour > 24 {
        return Err(FieldError::InvalidValue {
            key: key.into(),
            expected: "hour between 0 and 24".into(),
        });
    }
    Ok(hour)
}

impl ConfigField for WindowConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "start_hour" => Some(self.start_hour.to_string()),
            "end_hour" => Some(self.end_hour.to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "start_hour" => {
                self.start_hour = parse_hour(key, value)?;
                Ok(())
            }
            "end_hour" => {
                self.end_hour = parse_hour(key, value)?;
                Ok(())
            }
            _ => Err(FieldError::UnknownKey(key.into())),
        }
    }

    fn field_names() -> &'static [&'static str] {
        &["start_hour", "end_hour"]
    }

    fn section_name() -> &'static str {
        "window"
    }
}

impl ConfigField for AnimationConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "duration_ms" => Some(self.duration_ms.to_string()),
            "min_turns" => Some(self.min_turns.to_string()),
            "max_turns" => Some(self.max_turns.to_string()),
            "frame_ms" => Some(self.frame_ms.to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "duration_ms" => {
                self.duration_ms = parse_number(key, value, "milliseconds")?;
                Ok(())
            }
            "min_turns" => {
                self.min_turns = parse_number(key, value, "positive integer")?;
                Ok(())
            }
            "max_turns" => {
                self.max_turns = parse_number(key, value, "positive integer")?;
                Ok(())
            }
            "frame_ms" => {
                self.frame_ms = parse_number(key, value, "milliseconds")?;
                Ok(())
            }
            _ => Err(FieldError::UnknownKey(key.into())),
        }
    }

    fn field_names() -> &'static [&'static str] {
        &["duration_ms", "min_turns", "max_turns", "frame_ms"]
    }

    fn section_name() -> &'static str {
        "animation"
    }
}

impl ConfigField for SelectionConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "strategy" => Some(self.strategy.as_str().to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "strategy" => {
                self.strategy = match value.trim().to_lowercase().as_str() {
                    "index-first" | "index" => SelectionStrategy::IndexFirst,
                    "angle-first" | "angle" => SelectionStrategy::AngleFirst,
                    _ => {
                        return Err(FieldError::InvalidValue {
                            key: key.into(),
                            expected: "index-first or angle-first".into(),
                        })
                    }
                };
                Ok(())
            }
            _ => Err(FieldError::UnknownKey(key.into())),
        }
    }

    fn field_names() -> &'static [&'static str] {
        &["strategy"]
    }

    fn section_name() -> &'static str {
        "selection"
    }
}

impl ConfigField for DatasetConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "path" => Some(format_optional(&self.path)),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "path" => {
                self.path = if value.is_empty() || value == "(not set)" {
                    None
                } else {
                    Some(value.to_string())
                };
                Ok(())
            }
            _ => Err(FieldError::UnknownKey(key.into())),
        }
    }

    fn field_names() -> &'static [&'static str] {
        &["path"]
    }

    fn section_name() -> &'static str {
        "dataset"
    }
}

impl ConfigField for RewardsConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "codes" => Some(format_vec(&self.codes)),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "codes" => {
                self.codes = parse_vec(value);
                Ok(())
            }
            _ => Err(FieldError::UnknownKey(key.into())),
        }
    }

    fn field_names() -> &'static [&'static str] {
        &["codes"]
    }

    fn section_name() -> &'static str {
        "rewards"
    }
}

impl ConfigField for LoggingConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.level.clone()),
            "directory" => Some(self.directory.clone()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "level" => {
                if value.trim().is_empty() {
                    return Err(FieldError::InvalidValue {
                        key: key.into(),
                        expected: "log filter such as info or dinewheel=debug".into(),
                    });
                }
                self.level = value.trim().to_string();
                Ok(())
            }
            "directory" => {
                self.directory = value.to_string();
                Ok(())
            }
            _ => Err(FieldError::UnknownKey(key.into())),
        }
    }

    fn field_names() -> &'static [&'static str] {
        &["level", "directory"]
    }

    fn section_name() -> &'static str {
        "logging"
    }
}
