//! ConfigField trait for dynamic get/set access to config sections.
//!
//! Sections are addressed by `section.field` paths from the
//! `dinewheel config` commands.

/// Error type for config field operations.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// The specified config key is not recognised.
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    /// The value provided is invalid for the specified key.
    #[error("Invalid value for {key}: expected {expected}")]
    InvalidValue {
        /// The config key that was being set.
        key: String,
        /// Description of the expected value format.
        expected: String,
    },

    /// The config path format is invalid.
    #[error("Invalid path format: {0}")]
    InvalidPath(String),
}

/// Trait for config sections that support dynamic get/set access.
///
/// Each config section (WindowConfig, AnimationConfig, etc.) implements this
/// trait to enable field access by name.
pub trait ConfigField {
    /// Get a field value by name, returning serialised string.
    ///
    /// Returns `None` if the key is not recognised.
    fn get_field(&self, key: &str) -> Option<String>;

    /// Set a field value by name from string input.
    ///
    /// Returns an error if the key is not recognised or the value is invalid.
    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError>;

    /// List all field names in this section.
    fn field_names() -> &'static [&'static str]
    where
        Self: Sized;

    /// Get the section name for this config type.
    fn section_name() -> &'static str
    where
        Self: Sized;
}

/// Split a dot-notation path into section and field.
///
/// # Examples
///
/// ```ignore
/// split_path("window.end_hour") // Ok(("window", "end_hour"))
/// split_path("animation.duration_ms") // Ok(("animation", "duration_ms"))
/// split_path("invalid") // Err(InvalidPath)
/// ```
pub fn split_path(path: &str) -> Result<(&str, &str), FieldError> {
    path.split_once('.')
        .ok_or_else(|| FieldError::InvalidPath(format!("{path} (expected section.field)")))
}

/// Format an optional string value for display.
pub fn format_optional(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "(not set)".to_string())
}

/// Format a vector of strings for display.
pub fn format_vec(values: &[String]) -> String {
    if values.is_empty() {
        "(none)".to_string()
    } else {
        values.join(", ")
    }
}

/// Parse a comma-separated string into a vector.
pub fn parse_vec(value: &str) -> Vec<String> {
    if value.is_empty() || value == "(none)" {
        Vec::new()
    } else {
        value.split(',').map(|s| s.trim().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path_valid() {
        let (section, field) = split_path("window.end_hour").unwrap();
        assert_eq!(section, "window");
        assert_eq!(field, "end_hour");
    }

    #[test]
    fn test_split_path_nested() {
        let (section, field) = split_path("logging.level.extra").unwrap();
        assert_eq!(section, "logging");
        assert_eq!(field, "level.extra");
    }

    #[test]
    fn test_split_path_invalid() {
        let result = split_path("invalid");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), FieldError::InvalidPath(_)));
    }

    #[test]
    fn test_format_optional_some() {
        let opt = Some("places.json".to_string());
        assert_eq!(format_optional(&opt), "places.json");
    }

    #[test]
    fn test_format_optional_none() {
        let opt: Option<String> = None;
        assert_eq!(format_optional(&opt), "(not set)");
    }

    #[test]
    fn test_format_vec_empty() {
        let vec: Vec<String> = vec![];
        assert_eq!(format_vec(&vec), "(none)");
    }

    #[test]
    fn test_format_vec_values() {
        let codes = vec!["SPIN10".to_string(), "DINE25".to_string()];
        assert_eq!(format_vec(&codes), "SPIN10, DINE25");
    }

    #[test]
    fn test_parse_vec_empty() {
        assert!(parse_vec("").is_empty());
        assert!(parse_vec("(none)").is_empty());
    }

    #[test]
    fn test_parse_vec_values() {
        let result = parse_vec("SPIN10, LUCKY15 ,WHEEL20");
        assert_eq!(result, vec!["SPIN10", "LUCKY15", "WHEEL20"]);
    }

    #[test]
    fn test_parse_vec_single() {
        let result = parse_vec("DINE25");
        assert_eq!(result, vec!["DINE25"]);
    }

    #[test]
    fn test_field_error_display() {
        let err = FieldError::UnknownKey("window.noon".into());
        assert_eq!(err.to_string(), "Unknown config key: window.noon");

        let err = FieldError::InvalidValue {
            key: "end_hour".into(),
            expected: "hour between 0 and 24".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for end_hour: expected hour between 0 and 24"
        );

        let err = FieldError::InvalidPath("invalid".into());
        assert_eq!(err.to_string(), "Invalid path format: invalid");
    }
}
