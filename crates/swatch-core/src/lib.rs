#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Swatch Core: shared types, errors, and value analysis.
//!
//! This crate provides the foundational types used across all Swatch crates.
//! It has no internal Swatch dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error taxonomy and Result alias
//! - [`types`]: Declarations, component kinds, violations
//! - [`value`]: CSS value analysis (colors, lengths, gradients, token references)
//! - [`traits`]: The [`ConfigManager`](traits::ConfigManager) trait
//! - [`util`]: Identifier helpers

pub mod error;
pub mod traits;
pub mod types;
pub mod util;
pub mod value;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use types::{
    ComponentKind, ElementTag, Location, RuleId, Severity, State, StyleDeclaration, Violation,
};

// Convenience re-exports from util
pub use util::ids::{css_var_name, normalize_id};
