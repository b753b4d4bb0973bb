//! Config command implementations.
//!
//! This module implements the `dinewheel config` subcommands for managing
//! configuration without editing JSON directly.

use crate::config::{
    metadata::{self, KeyMetadata},
    FieldError, WheelConfig,
};

/// Result type for config command operations.
pub type ConfigCommandResult = Result<(), ConfigCommandError>;

/// Error type for config command operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigCommandError {
    /// A key or value was rejected.
    #[error("{0}")]
    FieldError(#[from] FieldError),

    /// The config file could not be loaded, saved or validated.
    #[error("Config error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),

    /// The named section does not exist.
    #[error("Unknown section: {0}")]
    UnknownSection(String),
}

/// Show all config values in a human-readable format.
pub fn config_show(section_filter: Option<&str>) -> ConfigCommandResult {
    let config = WheelConfig::load(None)?;

    println!("\x1b[1m=== dinewheel config ===\x1b[0m");
    println!();

    // Determine which sections to show
    let sections: Vec<&str> = if let Some(filter) = section_filter {
        if WheelConfig::fields_for_section(filter).is_some() {
            vec![filter]
        } else {
            return Err(ConfigCommandError::UnknownSection(filter.into()));
        }
    } else {
        WheelConfig::section_names().to_vec()
    };

    for section in sections {
        println!("\x1b[36m{section}\x1b[0m");
        if let Some(fields) = WheelConfig::fields_for_section(section) {
            for field in fields {
                let path = format!("{section}.{field}");
                let value = config.get_by_path(&path).unwrap_or_else(|_| "?".into());
                println!("  {:<24} {}", field, value);
            }
        }
        println!();
    }

    Ok(())
}

/// Get a specific config value.
pub fn config_get(key: &str) -> ConfigCommandResult {
    let config = WheelConfig::load(None)?;
    let value = config.get_by_path(key)?;
    println!("{value}");
    Ok(())
}

/// Set a config value.
///
/// The whole config is validated before it is written, so a value that
/// conflicts with another (e.g. a window that ends before it starts) is
/// rejected and the file is left alone.
pub fn config_set(key: &str, value: &str) -> ConfigCommandResult {
    let mut config = WheelConfig::load(None)?;
    let old_value = config.get_by_path(key).ok();

    config.set_by_path(key, value)?;
    config.validate()?;
    config.save(None)?;

    // Show what changed
    let new_value = config.get_by_path(key)?;
    if let Some(old) = old_value {
        if old != new_value {
            println!("\x1b[32m✓\x1b[0m {key}: {old} → {new_value}");
        } else {
            println!("\x1b[33m⚠\x1b[0m {key} unchanged: {new_value}");
        }
    } else {
        println!("\x1b[32m✓\x1b[0m {key} = {new_value}");
    }

    Ok(())
}

/// Reset config to defaults.
pub fn config_reset(key: Option<&str>) -> ConfigCommandResult {
    // A broken file is exactly what a full reset should be able to fix
    let mut config = match key {
        Some(_) => WheelConfig::load(None)?,
        None => WheelConfig::default(),
    };

    match key {
        Some(k) => {
            // Check if it's a section or a field
            if WheelConfig::fields_for_section(k).is_some() {
                config.reset_section(k)?;
                println!("\x1b[32m✓\x1b[0m Reset section '{k}' to defaults");
            } else if k.contains('.') {
                config.reset_field(k)?;
                let new_value = config.get_by_path(k)?;
                println!("\x1b[32m✓\x1b[0m Reset {k} to default: {new_value}");
            } else {
                return Err(ConfigCommandError::UnknownSection(k.into()));
            }
            config.validate()?;
        }
        None => println!("\x1b[32m✓\x1b[0m Reset all config to defaults"),
    }

    config.save(None)?;
    Ok(())
}

/// Show documentation for config keys.
pub fn config_explain(key: Option<&str>) -> ConfigCommandResult {
    match key {
        Some(k) => explain_key(k),
        None => explain_all(),
    }
}

fn explain_key(key: &str) -> ConfigCommandResult {
    // Try exact match first
    if let Some(meta) = metadata::get_metadata(key) {
        print_key_help(meta);
        return Ok(());
    }

    // Check if it's a section
    if WheelConfig::fields_for_section(key).is_some() {
        let section_keys = metadata::keys_for_section(key);
        println!("\x1b[1m{key}\x1b[0m section");
        println!();
        for meta in section_keys {
            let field = meta
                .key
                .strip_prefix(&format!("{key}."))
                .unwrap_or(meta.key);
            println!("  \x1b[36m{field}\x1b[0m");
            println!("    {}", meta.description.lines().next().unwrap_or(""));
            println!();
        }
        return Ok(());
    }

    let matches = metadata::search_keys(key);
    if matches.is_empty() {
        eprintln!("\x1b[31mUnknown key:\x1b[0m {key}");
        eprintln!();
        suggest_similar_keys(key);
        return Err(ConfigCommandError::FieldError(FieldError::UnknownKey(
            key.into(),
        )));
    }

    println!("\x1b[33mDid you mean:\x1b[0m");
    for meta in matches.iter().take(5) {
        println!("  {}", meta.key);
    }
    Ok(())
}

fn explain_all() -> ConfigCommandResult {
    println!("\x1b[1m=== dinewheel config keys ===\x1b[0m");
    println!();
    println!("Use \x1b[36mdinewheel config explain <key>\x1b[0m for details.");
    println!();

    for &section in WheelConfig::section_names() {
        println!("\x1b[1m{section}\x1b[0m");
        if let Some(fields) = WheelConfig::fields_for_section(section) {
            for field in fields {
                let path = format!("{section}.{field}");
                match metadata::get_metadata(&path) {
                    Some(meta) => {
                        println!("  \x1b[36m{field}\x1b[0m");
                        println!("    {}", first_sentence(meta.description, 55));
                    }
                    None => println!("  \x1b[36m{field}\x1b[0m"),
                }
            }
        }
        println!();
    }

    Ok(())
}

/// First sentence of `text`, cut to `max` characters.
fn first_sentence(text: &str, max: usize) -> String {
    let sentence = text.split(". ").next().unwrap_or(text);
    if sentence.chars().count() > max {
        let cut: String = sentence.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        sentence.to_string()
    }
}

fn print_key_help(meta: &KeyMetadata) {
    let config = WheelConfig::load(None).ok();
    let current = config.as_ref().and_then(|c| c.get_by_path(meta.key).ok());

    println!("\x1b[1m{}\x1b[0m", meta.key);
    println!();
    println!("  {}", meta.description);
    println!();
    println!("  \x1b[2mType:\x1b[0m     {}", meta.value_type);
    println!("  \x1b[2mDefault:\x1b[0m  {}", meta.default);
    if let Some(curr) = current {
        if curr == meta.default {
            println!("  \x1b[2mCurrent:\x1b[0m  {} \x1b[2m(default)\x1b[0m", curr);
        } else {
            println!("  \x1b[2mCurrent:\x1b[0m  \x1b[33m{}\x1b[0m", curr);
        }
    }
    println!();
    println!("  \x1b[2mExamples:\x1b[0m");
    for example in meta.examples {
        println!("    dinewheel config set {} {}", meta.key, example);
    }
}

fn suggest_similar_keys(key: &str) {
    let suggestions = similar_keys(key);
    if !suggestions.is_empty() {
        eprintln!("\x1b[33mSimilar keys:\x1b[0m");
        for s in suggestions {
            eprintln!("  {s}");
        }
    } else {
        eprintln!("Run \x1b[36mdinewheel config explain\x1b[0m to see all available keys.");
    }
}

/// Keys sharing a dot-separated part with `key`.
fn similar_keys(key: &str) -> Vec<&'static str> {
    let parts: Vec<&str> = key.split('.').filter(|p| !p.is_empty()).collect();
    metadata::all_keys()
        .filter(|k| {
            parts.iter().any(|p| k.contains(p))
                || k.split('.').any(|kp| parts.iter().any(|p| kp.contains(p)))
        })
        .take(5)
        .collect()
}

/// List all valid config keys.
pub fn config_keys() -> ConfigCommandResult {
    for key in WheelConfig::all_keys() {
        println!("{key}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_similar_keys_by_part() {
        let keys = similar_keys("animation.turns");
        assert!(keys.contains(&"animation.min_turns"));
        assert!(keys.len() <= 5);
    }

    #[test]
    fn test_similar_keys_none() {
        assert!(similar_keys("zzzz").is_empty());
    }

    #[test]
    fn test_first_sentence() {
        assert_eq!(first_sentence("Hour the window opens. More.", 55), "Hour the window opens");
        let long = "x".repeat(80);
        assert_eq!(first_sentence(&long, 10), "xxxxxxx...");
    }

    #[test]
    fn test_unknown_section_error_display() {
        let err = ConfigCommandError::UnknownSection("limits".into());
        assert_eq!(err.to_string(), "Unknown section: limits");
    }

    #[test]
    fn test_set_then_validate_rejects_inverted_window() {
        let mut config = WheelConfig::default();
        config.set_by_path("window.start_hour", "12").unwrap();
        assert!(config.validate().is_err());
    }
}
