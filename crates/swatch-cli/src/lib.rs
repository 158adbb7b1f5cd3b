#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Swatch CLI: the `swatch` command.
//!
//! - `swatch check <paths>`: lint stylesheets, Markdown and component files
//! - `swatch tokens list|resolve`: inspect the token registry
//! - `swatch rules`: show rules and their effective levels
//! - `swatch config path|get|set|init|export`: manage the config file
//!
//! Exit codes: 0 when clean, 1 when violations were found, 2 on fatal errors.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;

pub use cli::Cli;
pub use commands::{EXIT_FATAL, exit_code, run};
pub use config::SwatchConfig;
