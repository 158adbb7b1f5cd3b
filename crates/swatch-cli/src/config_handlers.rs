//! Handler functions for `swatch config` commands.
//!
//! The handlers are generic over [`ConfigManager`] so they only depend on
//! the file lookup and TOML round-tripping the trait provides. The dotted-key
//! helpers operate on plain [`toml::Value`] trees.

use crate::cli::ConfigAction;
use crate::config::SwatchConfig;
use std::path::PathBuf;
use swatch_core::traits::ConfigManager;
use swatch_core::{Error, Result};

// ============================================================================
// Command dispatch
// ============================================================================

/// Runs a config subcommand against [`SwatchConfig`].
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path::<SwatchConfig>(config_path),
        ConfigAction::Get { key } => cmd_config_get::<SwatchConfig>(config_path, &key),
        ConfigAction::Set { key, value } => {
            cmd_config_set::<SwatchConfig>(config_path, &key, &value)
        }
        ConfigAction::Init { file, force } => {
            cmd_config_init::<SwatchConfig>(file.as_deref().or(config_path), force)
        }
        ConfigAction::Export => {
            let config = SwatchConfig::load(config_path)?;
            cmd_config_export(&config)
        }
    }
}

// ============================================================================
// Generic command handlers
// ============================================================================

/// Prints the resolved config file path.
pub fn cmd_config_path<C: ConfigManager>(config_path: Option<&str>) -> Result<()> {
    let path = C::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory for this platform"))?;
    println!("{}", path.display());
    if !path.exists() {
        eprintln!(
            "(file does not exist; run `{} config init` to create it)",
            C::project_name()
        );
    }
    Ok(())
}

/// Prints a configuration value by dotted key.
pub fn cmd_config_get<C: ConfigManager>(config_path: Option<&str>, key: &str) -> Result<()> {
    let config = C::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    let found = get_nested_value(&value, key)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))?;
    println!("{}", format_toml_value(found));
    Ok(())
}

/// Sets a value by dotted key in the config file.
///
/// The edited file must still load as `C`; otherwise nothing is written.
pub fn cmd_config_set<C: ConfigManager>(
    config_path: Option<&str>,
    key: &str,
    value: &str,
) -> Result<()> {
    let path = C::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;
    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `{} config init` first.",
            path.display(),
            C::project_name()
        )));
    }

    let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
    let mut doc: toml::Value = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;

    set_nested_value(&mut doc, key, parse_value(value))?;
    doc.clone()
        .try_into::<C>()
        .map_err(|e| Error::config(format!("Invalid value for '{key}': {e}")))?;

    let toml_str = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    std::fs::write(&path, toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    println!("Set {key} = {value} in {}", path.display());
    Ok(())
}

/// Writes a default configuration file.
pub fn cmd_config_init<C: ConfigManager>(file: Option<&str>, force: bool) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => C::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = C::default().to_toml_string()?;
    std::fs::write(&path, &toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    println!("Config file created at {}", path.display());
    Ok(())
}

/// Prints the configuration as environment variables.
pub fn cmd_config_export<C: ConfigManager>(config: &C) -> Result<()> {
    for (key, value) in config.to_env_vars()? {
        println!("{key}={value}");
    }
    Ok(())
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

/// Follows a dotted key path through nested tables.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Sets a value at a dotted key path, creating intermediate tables.
pub fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(Error::config(format!("Invalid key '{key}'")));
    }
    let Some((last, parents)) = parts.split_last() else {
        return Err(Error::config("Empty key path"));
    };

    let mut current = root;
    for part in parents {
        let table = current
            .as_table_mut()
            .ok_or_else(|| Error::config(format!("Cannot navigate into non-table at '{part}'")))?;
        current = table
            .entry(part.to_string())
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }
    let table = current
        .as_table_mut()
        .ok_or_else(|| Error::config("Cannot set key on a non-table value"))?;
    table.insert(last.to_string(), value);
    Ok(())
}

/// Parses a command-line string into a TOML value.
///
/// Priority: bool, integer, float, string.
pub fn parse_value(s: &str) -> toml::Value {
    match s {
        "true" => return toml::Value::Boolean(true),
        "false" => return toml::Value::Boolean(false),
        _ => {}
    }
    if let Ok(i) = s.parse::<i64>() {
        return toml::Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return toml::Value::Float(f);
    }
    toml::Value::String(s.to_string())
}

/// Formats a TOML value for stdout.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
        other => other.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_default(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, SwatchConfig::default().to_toml_string().unwrap()).unwrap();
        path
    }

    // ------------------------------------------------------------------------
    // cmd_config_path / get
    // ------------------------------------------------------------------------

    #[test]
    fn test_cmd_config_path_explicit() {
        assert!(cmd_config_path::<SwatchConfig>(Some("/explicit/swatch.toml")).is_ok());
    }

    #[test]
    fn test_cmd_config_get_nested_key() {
        let dir = TempDir::new().unwrap();
        let path = write_default(&dir);
        assert!(cmd_config_get::<SwatchConfig>(Some(path.to_str().unwrap()), "output.format").is_ok());
    }

    #[test]
    fn test_cmd_config_get_missing_key() {
        let dir = TempDir::new().unwrap();
        let path = write_default(&dir);
        let err = cmd_config_get::<SwatchConfig>(Some(path.to_str().unwrap()), "output.colour")
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    // ------------------------------------------------------------------------
    // cmd_config_set
    // ------------------------------------------------------------------------

    #[test]
    fn test_cmd_config_set_rule_level() {
        let dir = TempDir::new().unwrap();
        let path = write_default(&dir);
        cmd_config_set::<SwatchConfig>(Some(path.to_str().unwrap()), "rules.off-palette", "off")
            .unwrap();

        let config = SwatchConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.rules["off-palette"], swatch_rules::RuleLevel::Off);
    }

    #[test]
    fn test_cmd_config_set_rejects_invalid_value() {
        let dir = TempDir::new().unwrap();
        let path = write_default(&dir);
        let before = std::fs::read_to_string(&path).unwrap();

        let err = cmd_config_set::<SwatchConfig>(Some(path.to_str().unwrap()), "output.format", "yaml")
            .unwrap_err();
        assert!(err.to_string().contains("Invalid value for 'output.format'"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_cmd_config_set_missing_file() {
        let err = cmd_config_set::<SwatchConfig>(Some("/nonexistent/swatch.toml"), "output.format", "json")
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    // ------------------------------------------------------------------------
    // cmd_config_init / export
    // ------------------------------------------------------------------------

    #[test]
    fn test_cmd_config_init_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("swatch").join("config.toml");
        cmd_config_init::<SwatchConfig>(Some(path.to_str().unwrap()), false).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[output]"));
        assert!(content.contains("[selectors.components]"));
    }

    #[test]
    fn test_cmd_config_init_no_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "existing").unwrap();

        let err = cmd_config_init::<SwatchConfig>(Some(path.to_str().unwrap()), false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert!(cmd_config_init::<SwatchConfig>(Some(path.to_str().unwrap()), true).is_ok());
    }

    #[test]
    fn test_cmd_config_export() {
        let config = SwatchConfig::default();
        assert!(cmd_config_export(&config).is_ok());
    }

    // ------------------------------------------------------------------------
    // Dotted-key helpers
    // ------------------------------------------------------------------------

    #[test]
    fn test_get_nested_value() {
        let val: toml::Value = toml::from_str("[output]\nformat = \"json\"").unwrap();
        assert_eq!(
            get_nested_value(&val, "output.format"),
            Some(&toml::Value::String("json".into()))
        );
        assert!(get_nested_value(&val, "output.missing").is_none());
        assert!(get_nested_value(&val, "output.format.deeper").is_none());
    }

    #[test]
    fn test_set_nested_value_creates_tables() {
        let mut val = toml::Value::Table(toml::map::Map::new());
        set_nested_value(&mut val, "units.root_font_px", toml::Value::Float(18.0)).unwrap();
        assert_eq!(
            get_nested_value(&val, "units.root_font_px"),
            Some(&toml::Value::Float(18.0))
        );
    }

    #[test]
    fn test_set_nested_value_rejects_bad_keys() {
        let mut val: toml::Value = toml::from_str("format = \"json\"").unwrap();
        assert!(set_nested_value(&mut val, "format.inner", toml::Value::Integer(1)).is_err());
        assert!(set_nested_value(&mut val, "a..b", toml::Value::Integer(1)).is_err());
    }

    #[test]
    fn test_parse_value_types() {
        assert_eq!(parse_value("true"), toml::Value::Boolean(true));
        assert_eq!(parse_value("42"), toml::Value::Integer(42));
        assert_eq!(parse_value("14.5"), toml::Value::Float(14.5));
        assert_eq!(parse_value("warning"), toml::Value::String("warning".into()));
    }

    #[test]
    fn test_format_toml_value() {
        assert_eq!(format_toml_value(&toml::Value::String("json".into())), "json");
        assert_eq!(format_toml_value(&toml::Value::Integer(44)), "44");
        assert_eq!(format_toml_value(&toml::Value::Boolean(false)), "false");
    }
}
