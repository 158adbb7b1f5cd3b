//! Command-line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use swatch_lint::OutputFormat;
use swatch_tokens::TokenCategory;

/// Swatch - design-token linter for stylesheets and component descriptions
#[derive(Parser, Debug)]
#[command(name = "swatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check files or directories against the design system
    Check {
        /// Files (.css, .md, .toml) or directories to check
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Token and rule definitions (defaults to the built-in set)
        #[arg(short, long)]
        definitions: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Inspect design tokens
    Tokens {
        /// Token and rule definitions (defaults to the built-in set)
        #[arg(short, long, global = true)]
        definitions: Option<PathBuf>,

        /// Token action
        #[command(subcommand)]
        action: TokensAction,
    },

    /// List rules with their effective levels
    Rules {
        /// Token and rule definitions (defaults to the built-in set)
        #[arg(short, long)]
        definitions: Option<PathBuf>,
    },

    /// Manage the configuration file
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `tokens` subcommands.
#[derive(Subcommand, Debug)]
pub enum TokensAction {
    /// List tokens, optionally of one category
    List {
        /// Category (color, spacing, radius, typography, weight)
        #[arg(long)]
        category: Option<TokenCategory>,
    },
    /// Resolve a token identifier or custom-property name
    Resolve {
        /// Identifier (`color.bg`) or custom property (`--color-bg`)
        id: String,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Print a value by dotted key (e.g. `output.format`)
    Get {
        /// Dotted key
        key: String,
    },
    /// Set a value by dotted key in the config file
    Set {
        /// Dotted key
        key: String,
        /// New value
        value: String,
    },
    /// Write a default config file
    Init {
        /// Where to write it (defaults to the platform config directory)
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration as environment variables
    Export,
}
