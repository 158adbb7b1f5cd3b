#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Swatch Tokens: design-token definitions and the token registry.
//!
//! Definitions are TOML (see [`definitions`]). A [`Registry`] is built from
//! them once, validated against the approved palette, and passed by
//! reference to everything that resolves tokens.
//!
//! ```
//! use swatch_tokens::Registry;
//!
//! let registry = Registry::builtin().unwrap();
//! let token = registry.resolve("color.surface").unwrap();
//! assert_eq!(token.css, "#12161b");
//! assert_eq!(registry.resolve_css_var("--color-surface").unwrap().id, "color.surface");
//! ```

pub mod definitions;
pub mod registry;
pub mod token;

pub use definitions::{BUILTIN_DEFINITIONS, BUILTIN_SOURCE, Definitions};
pub use registry::Registry;
pub use token::{ColorRole, MUTED_ALPHA_LIMIT, Token, TokenCategory, TokenValue};
