//! Command implementations.
//!
//! Each command has a formatting function that returns its stdout text and
//! a thin `cmd_*` wrapper that loads configuration and prints it.

use crate::cli::{Cli, Command, TokensAction};
use crate::config::SwatchConfig;
use crate::config_handlers::handle_config_command;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use swatch_content::StyleParser;
use swatch_core::traits::ConfigManager;
use swatch_core::{Error, Result};
use swatch_lint::{Linter, OutputFormat, render};
use swatch_rules::RuleSet;
use swatch_tokens::{Definitions, Registry, Token, TokenCategory};

/// Runs the parsed command line; returns the process exit code.
pub fn run(cli: Cli) -> Result<i32> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Check {
            paths,
            definitions,
            format,
        } => cmd_check(config_path, &paths, definitions.as_deref(), format),
        Command::Tokens {
            definitions,
            action,
        } => {
            cmd_tokens(config_path, definitions.as_deref(), action)?;
            Ok(0)
        }
        Command::Rules { definitions } => {
            cmd_rules(config_path, definitions.as_deref())?;
            Ok(0)
        }
        Command::Config { action } => {
            handle_config_command(config_path, action)?;
            Ok(0)
        }
    }
}

/// Exit code for load, read and configuration failures.
pub const EXIT_FATAL: i32 = 2;

/// Maps the outcome of [`run`] to a process exit code.
pub fn exit_code(result: &Result<i32>) -> i32 {
    match result {
        Ok(code) => *code,
        Err(_) => EXIT_FATAL,
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Loads definitions: the command-line path wins over the config file,
/// which wins over the built-in set.
pub fn load_definitions(explicit: Option<&Path>, config: &SwatchConfig) -> Result<Definitions> {
    match explicit.or(config.definitions.path.as_deref()) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading definitions");
            Definitions::from_path(path)
        }
        None => {
            tracing::debug!("Using built-in definitions");
            Definitions::builtin()
        }
    }
}

/// Builds the rule set with the configured levels and units.
pub fn build_rules(defs: &Definitions, registry: &Registry, config: &SwatchConfig) -> Result<RuleSet> {
    Ok(RuleSet::build(defs, registry)?
        .with_levels(config.rule_levels())?
        .with_units(config.units))
}

/// Builds a linter from configuration and an optional definitions override.
pub fn build_linter(explicit: Option<&Path>, config: &SwatchConfig) -> Result<Linter> {
    let defs = load_definitions(explicit, config)?;
    let registry = Registry::load(&defs)?;
    let rules = build_rules(&defs, &registry, config)?;
    tracing::info!(
        source = %defs.source_name,
        tokens = registry.len(),
        "Loaded definitions"
    );
    Ok(Linter::new(
        registry,
        rules,
        StyleParser::new(config.selectors.clone()),
    ))
}

// ============================================================================
// check
// ============================================================================

/// Checks `paths` and prints the report; returns 0 when clean, 1 otherwise.
pub fn cmd_check(
    config_path: Option<&str>,
    paths: &[PathBuf],
    definitions: Option<&Path>,
    format: Option<OutputFormat>,
) -> Result<i32> {
    let config = SwatchConfig::load(config_path)?;
    let (output, code) = check_output(&config, paths, definitions, format)?;
    print!("{output}");
    Ok(code)
}

/// Runs a check and renders the report; returns the text and exit code.
pub fn check_output(
    config: &SwatchConfig,
    paths: &[PathBuf],
    definitions: Option<&Path>,
    format: Option<OutputFormat>,
) -> Result<(String, i32)> {
    let linter = build_linter(definitions, config)?;
    let report = linter.check_paths(paths)?;
    let format = format.unwrap_or(config.output.format);
    let mut output = render(&report, format)?;
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok((output, report.exit_code()))
}

// ============================================================================
// tokens
// ============================================================================

fn cmd_tokens(config_path: Option<&str>, definitions: Option<&Path>, action: TokensAction) -> Result<()> {
    let config = SwatchConfig::load(config_path)?;
    let defs = load_definitions(definitions, &config)?;
    let registry = Registry::load(&defs)?;
    let output = match action {
        TokensAction::List { category } => format_token_list(&registry, category),
        TokensAction::Resolve { id } => format_token(resolve_token(&registry, &id)?),
    };
    print!("{output}");
    Ok(())
}

/// Resolves an identifier or a `--custom-property` name.
///
/// On failure the error carries the nearest known name, if any.
pub fn resolve_token<'r>(registry: &'r Registry, id: &str) -> Result<&'r Token> {
    let result = if id.starts_with("--") {
        registry.resolve_css_var(id)
    } else {
        registry.resolve(id)
    };
    result.map_err(|err| match registry.suggest(id) {
        Some(hint) => Error::config(format!("{err}; did you mean '{hint}'?")),
        None => err,
    })
}

/// One line per token: identifier, custom property, CSS value.
pub fn format_token_list(registry: &Registry, category: Option<TokenCategory>) -> String {
    let tokens: Vec<&Token> = match category {
        Some(category) => registry.by_category(category).collect(),
        None => registry.iter().collect(),
    };
    let id_width = tokens.iter().map(|t| t.id.len()).max().unwrap_or(0);
    let var_width = id_width + 2;

    let mut out = String::new();
    for token in &tokens {
        let _ = writeln!(
            out,
            "{:<id_width$}  {:<var_width$}  {}",
            token.id,
            token.css_var(),
            token.css
        );
    }
    out
}

/// Details of a single token.
pub fn format_token(token: &Token) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "id:       {}", token.id);
    let _ = writeln!(out, "property: {}", token.css_var());
    let _ = writeln!(out, "category: {}", token.category);
    if let Some(role) = token.role {
        let _ = writeln!(out, "role:     {role}");
    }
    let _ = writeln!(out, "value:    {}", token.css);
    if !token.usage.is_empty() {
        let _ = writeln!(out, "usage:    {}", token.usage);
    }
    out
}

// ============================================================================
// rules
// ============================================================================

fn cmd_rules(config_path: Option<&str>, definitions: Option<&Path>) -> Result<()> {
    let config = SwatchConfig::load(config_path)?;
    let defs = load_definitions(definitions, &config)?;
    let registry = Registry::load(&defs)?;
    let rules = build_rules(&defs, &registry, &config)?;
    print!("{}", format_rules(&rules));
    Ok(())
}

/// One line per rule: identifier, effective level, description.
pub fn format_rules(rules: &RuleSet) -> String {
    let infos = rules.rules();
    let width = infos.iter().map(|r| r.id.len()).max().unwrap_or(0);
    let mut out = String::new();
    for info in &infos {
        let _ = writeln!(
            out,
            "{:<width$}  {:<7}  {}",
            info.id,
            info.level.to_string(),
            info.description
        );
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use swatch_rules::RuleLevel;
    use tempfile::TempDir;

    fn builtin_registry() -> Registry {
        Registry::builtin().unwrap()
    }

    // ------------------------------------------------------------------------
    // Exit codes
    // ------------------------------------------------------------------------

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(exit_code(&Ok(0)), 0);
        assert_eq!(exit_code(&Ok(1)), 1);
        assert_eq!(exit_code(&Err(Error::config("bad config"))), EXIT_FATAL);

        let config = SwatchConfig::default();
        let missing = check_output(&config, &[PathBuf::from("/nonexistent/a.css")], None, None)
            .map(|(_, code)| code);
        assert_eq!(exit_code(&missing), 2);
    }

    // ------------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------------

    #[test]
    fn test_load_definitions_prefers_explicit_path() {
        let config = SwatchConfig {
            definitions: crate::config::DefinitionsConfig {
                path: Some(PathBuf::from("/nonexistent/from-config.toml")),
            },
            ..Default::default()
        };
        let err = load_definitions(Some(Path::new("/nonexistent/explicit.toml")), &config)
            .unwrap_err();
        assert!(err.to_string().contains("explicit.toml"));
    }

    #[test]
    fn test_load_definitions_builtin_by_default() {
        let defs = load_definitions(None, &SwatchConfig::default()).unwrap();
        assert_eq!(defs.source_name, swatch_tokens::BUILTIN_SOURCE);
    }

    #[test]
    fn test_build_rules_rejects_unknown_rule() {
        let mut config = SwatchConfig::default();
        config.rules.insert("no-such-rule".into(), RuleLevel::Off);
        let defs = Definitions::builtin().unwrap();
        let registry = Registry::load(&defs).unwrap();
        let err = build_rules(&defs, &registry, &config).unwrap_err();
        assert!(err.to_string().contains("no-such-rule"));
    }

    // ------------------------------------------------------------------------
    // check
    // ------------------------------------------------------------------------

    #[test]
    fn test_check_output_exit_codes() {
        let dir = TempDir::new().unwrap();
        let clean = dir.path().join("clean.css");
        let dirty = dir.path().join("dirty.css");
        std::fs::write(&clean, ".card { background: var(--color-surface); }").unwrap();
        std::fs::write(&dirty, ".btn { min-height: 40px; }").unwrap();
        let config = SwatchConfig::default();

        let (text, code) = check_output(&config, &[clean], None, None).unwrap();
        assert_eq!(code, 0);
        assert!(text.contains("no violations"));

        let (text, code) = check_output(&config, &[dirty], None, None).unwrap();
        assert_eq!(code, 1);
        assert!(text.contains("touch-target-floor"));
    }

    #[test]
    fn test_check_output_respects_rule_levels() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("app.css");
        std::fs::write(&file, ".btn { min-height: 40px; }").unwrap();
        let mut config = SwatchConfig::default();
        config.rules.insert("touch-target-floor".into(), RuleLevel::Off);

        let (_, code) = check_output(&config, &[file], None, None).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_check_output_json_from_config() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("app.css");
        std::fs::write(&file, ".x { color: #a855f7; }").unwrap();
        let mut config = SwatchConfig::default();
        config.output.format = OutputFormat::Json;

        let (text, _) = check_output(&config, &[file.clone()], None, None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(value["total_violations"].as_u64().unwrap() >= 1);

        // the command-line format wins
        let (text, _) = check_output(&config, &[file], None, Some(OutputFormat::Text)).unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&text).is_err());
    }

    #[test]
    fn test_check_output_missing_file() {
        let err = check_output(
            &SwatchConfig::default(),
            &[PathBuf::from("/nonexistent/app.css")],
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    // ------------------------------------------------------------------------
    // tokens
    // ------------------------------------------------------------------------

    #[test]
    fn test_resolve_token_by_id_and_property() {
        let registry = builtin_registry();
        assert_eq!(resolve_token(&registry, "color.bg").unwrap().id, "color.bg");
        assert_eq!(resolve_token(&registry, "--color-bg").unwrap().id, "color.bg");
    }

    #[test]
    fn test_resolve_token_suggests() {
        let registry = builtin_registry();
        let err = resolve_token(&registry, "color.surfce").unwrap_err();
        assert!(err.to_string().contains("did you mean 'color.surface'"));

        let err = resolve_token(&registry, "--color-surfce").unwrap_err();
        assert!(err.to_string().contains("--color-surface"));
    }

    #[test]
    fn test_format_token_list_category() {
        let registry = builtin_registry();
        let text = format_token_list(&registry, Some(TokenCategory::Radius));
        assert!(!text.is_empty());
        assert!(text.lines().all(|line| line.starts_with("radius.")));
        assert!(text.contains("--radius-"));
    }

    #[test]
    fn test_format_token_details() {
        let registry = builtin_registry();
        let text = format_token(registry.resolve("color.bg").unwrap());
        assert!(text.contains("property: --color-bg"));
        assert!(text.contains("category: color"));
    }

    // ------------------------------------------------------------------------
    // rules
    // ------------------------------------------------------------------------

    #[test]
    fn test_format_rules_shows_levels() {
        let defs = Definitions::builtin().unwrap();
        let registry = Registry::load(&defs).unwrap();
        let mut config = SwatchConfig::default();
        config.rules.insert("off-palette".into(), RuleLevel::Off);
        let rules = build_rules(&defs, &registry, &config).unwrap();

        let text = format_rules(&rules);
        let line = text.lines().find(|l| l.starts_with("off-palette")).unwrap();
        assert!(line.contains("off"));
        assert!(text.contains("unresolved-token"));
    }
}
