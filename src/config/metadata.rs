//! Config key metadata for documentation and help.
//!
//! Descriptions, types, defaults, and examples for every config key, used
//! by `dinewheel config explain`.

/// Metadata for a single config key.
#[derive(Debug, Clone)]
pub struct KeyMetadata {
    /// The full dot-notation key (e.g., "window.end_hour").
    pub key: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Type description (e.g., "u32", "bool", "string").
    pub value_type: &'static str,
    /// Default value as string.
    pub default: &'static str,
    /// Example values.
    pub examples: &'static [&'static str],
}

/// All config key metadata.
pub static METADATA: &[KeyMetadata] = &[
    // window section
    KeyMetadata {
        key: "window.start_hour",
        description: "First local hour of the day at which the wheel can be spun. The window \
                      includes this hour.",
        value_type: "hour (0-24)",
        default: "0",
        examples: &["0", "7", "11"],
    },
    KeyMetadata {
        key: "window.end_hour",
        description: "Local hour at which spinning closes for the day. The window stops just \
                      before this hour; 24 keeps it open until midnight.",
        value_type: "hour (0-24)",
        default: "10",
        examples: &["10", "14", "24"],
    },
    // animation section
    KeyMetadata {
        key: "animation.duration_ms",
        description: "How long one spin animates before the winner is revealed.",
        value_type: "milliseconds",
        default: "3500",
        examples: &["2000", "3500", "6000"],
    },
    KeyMetadata {
        key: "animation.min_turns",
        description: "Fewest extra full turns the wheel makes before settling. Values below \
                      3 are rejected.",
        value_type: "positive integer",
        default: "3",
        examples: &["3", "4", "5"],
    },
    KeyMetadata {
        key: "animation.max_turns",
        description: "Most extra full turns the wheel makes before settling. Must be at least \
                      animation.min_turns.",
        value_type: "positive integer",
        default: "6",
        examples: &["5", "6", "10"],
    },
    KeyMetadata {
        key: "animation.frame_ms",
        description: "Redraw interval of the wheel screen while a spin is in flight.",
        value_type: "milliseconds",
        default: "16",
        examples: &["16", "33", "50"],
    },
    // selection section
    KeyMetadata {
        key: "selection.strategy",
        description: "How the winner is chosen. 'index-first' draws the restaurant and then \
                      the rotation that shows it; 'angle-first' draws a rotation and reads \
                      the restaurant off the pointer.",
        value_type: "index-first | angle-first",
        default: "index-first",
        examples: &["index-first", "angle-first"],
    },
    // dataset section
    KeyMetadata {
        key: "dataset.path",
        description: "Path to a restaurant dataset JSON file. When unset the bundled dataset \
                      is used. A missing or malformed file leaves the wheel empty.",
        value_type: "file path (optional)",
        default: "(not set)",
        examples: &["restaurants.json", ".dinewheel/places.json"],
    },
    // rewards section
    KeyMetadata {
        key: "rewards.codes",
        description: "Discount codes handed out after a spin. One is drawn at random per \
                      completed spin; an empty list hands out nothing.",
        value_type: "comma-separated strings",
        default: "SPIN10, LUCKY15, WHEEL20, DINE25",
        examples: &["SPIN10", "LUNCH5, LUNCH10", "(none)"],
    },
    // logging section
    KeyMetadata {
        key: "logging.level",
        description: "Log filter directive. The DINEWHEEL_LOG environment variable takes \
                      precedence when set.",
        value_type: "filter directive",
        default: "info",
        examples: &["info", "debug", "dinewheel=trace"],
    },
    KeyMetadata {
        key: "logging.directory",
        description: "Directory the daily rolling log files are written to.",
        value_type: "directory path",
        default: ".dinewheel/logs",
        examples: &[".dinewheel/logs", "/tmp/dinewheel"],
    },
];

/// Get metadata for a specific key.
pub fn get_metadata(key: &str) -> Option<&'static KeyMetadata> {
    METADATA.iter().find(|m| m.key == key)
}

/// Get all keys in the metadata table.
pub fn all_keys() -> impl Iterator<Item = &'static str> {
    METADATA.iter().map(|m| m.key)
}

/// Search for keys matching a query (prefix or contains).
pub fn search_keys(query: &str) -> Vec<&'static KeyMetadata> {
    let query_lower = query.to_lowercase();
    METADATA
        .iter()
        .filter(|m| {
            m.key.to_lowercase().contains(&query_lower)
                || m.description.to_lowercase().contains(&query_lower)
        })
        .collect()
}

/// Get all keys for a specific section.
pub fn keys_for_section(section: &str) -> Vec<&'static KeyMetadata> {
    let prefix = format!("{section}.");
    METADATA
        .iter()
        .filter(|m| m.key.starts_with(&prefix))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WheelConfig;

    #[test]
    fn test_get_metadata_existing() {
        let meta = get_metadata("window.end_hour");
        assert!(meta.is_some());
        let meta = meta.unwrap();
        assert_eq!(meta.key, "window.end_hour");
        assert_eq!(meta.default, "10");
        assert!(meta.description.contains("spinning"));
    }

    #[test]
    fn test_get_metadata_missing() {
        let meta = get_metadata("nonexistent.key");
        assert!(meta.is_none());
    }

    #[test]
    fn test_all_keys() {
        let keys: Vec<_> = all_keys().collect();
        assert!(keys.contains(&"window.start_hour"));
        assert!(keys.contains(&"selection.strategy"));
        assert!(keys.contains(&"rewards.codes"));
    }

    #[test]
    fn test_search_keys_by_key() {
        let results = search_keys("turns");
        assert_eq!(results.len(), 2);
        assert!(results.iter().any(|m| m.key == "animation.min_turns"));
        assert!(results.iter().any(|m| m.key == "animation.max_turns"));
    }

    #[test]
    fn test_search_keys_by_description() {
        let results = search_keys("DINEWHEEL_LOG");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].key, "logging.level");
    }

    #[test]
    fn test_keys_for_section() {
        let animation_keys = keys_for_section("animation");
        assert_eq!(animation_keys.len(), 4);
        assert!(animation_keys.iter().all(|m| m.key.starts_with("animation.")));

        let window_keys = keys_for_section("window");
        assert_eq!(window_keys.len(), 2);
    }

    #[test]
    fn test_all_metadata_has_required_fields() {
        for meta in METADATA {
            assert!(!meta.key.is_empty(), "Key should not be empty");
            assert!(
                !meta.description.is_empty(),
                "Description should not be empty"
            );
            assert!(
                !meta.value_type.is_empty(),
                "Value type should not be empty"
            );
            assert!(!meta.default.is_empty(), "Default should not be empty");
            assert!(!meta.examples.is_empty(), "Examples should not be empty");
        }
    }

    #[test]
    fn test_metadata_matches_config_keys() {
        let config_keys = WheelConfig::all_keys();
        assert_eq!(config_keys.len(), METADATA.len());
        for key in config_keys {
            assert!(get_metadata(&key).is_some(), "no metadata for {key}");
        }
    }

    #[test]
    fn test_metadata_defaults_match_config() {
        let config = WheelConfig::default();
        for meta in METADATA {
            assert_eq!(
                config.get_by_path(meta.key).unwrap(),
                meta.default,
                "default mismatch for {}",
                meta.key
            );
        }
    }
}
