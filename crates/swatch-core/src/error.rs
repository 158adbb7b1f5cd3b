//! Error types for Swatch.
//!
//! Only conditions that stop a run are errors. Problems found in the
//! documents under test (unresolved token references, malformed
//! declarations) are reported as data, never through this type.

use std::path::{Path, PathBuf};

/// Errors that abort a Swatch run.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Token or rule definitions are malformed or inconsistent.
    #[error("Failed to load definitions from {source_name}: {message}")]
    Load {
        /// Name of the definition source (file path or `<builtin>`)
        source_name: String,
        /// What went wrong
        message: String,
    },

    /// Two tokens share an identifier or a custom-property name.
    #[error("Duplicate token identifier '{id}' in {source_name}")]
    DuplicateToken {
        /// The repeated identifier
        id: String,
        /// Name of the definition source
        source_name: String,
    },

    /// A token identifier is absent from the registry.
    #[error("Unknown token '{id}'{}", referenced_suffix(.referenced_by))]
    UnknownToken {
        /// Identifier that failed to resolve
        id: String,
        /// Rule or definition that referenced it, when known
        referenced_by: Option<String>,
    },

    /// A string does not name a member of a closed set (component kind, state, ...).
    #[error("Unknown {kind} '{value}'")]
    UnknownVariant {
        /// Name of the closed set
        kind: &'static str,
        /// Rejected input
        value: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error with the path that caused it.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn referenced_suffix(referenced_by: &Option<String>) -> String {
    match referenced_by {
        Some(owner) => format!(" referenced by {owner}"),
        None => String::new(),
    }
}

/// Convenience `Result` type alias for Swatch operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new load error.
    pub fn load<S, M>(source_name: S, message: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Error::Load {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Creates a duplicate-identifier load error.
    pub fn duplicate_token<I, S>(id: I, source_name: S) -> Self
    where
        I: Into<String>,
        S: Into<String>,
    {
        Error::DuplicateToken {
            id: id.into(),
            source_name: source_name.into(),
        }
    }

    /// Creates an unknown-token error without a referencing owner.
    pub fn unknown_token<S: Into<String>>(id: S) -> Self {
        Error::UnknownToken {
            id: id.into(),
            referenced_by: None,
        }
    }

    /// Creates an unknown-token error naming the rule that referenced it.
    pub fn unknown_token_in<I, O>(id: I, referenced_by: O) -> Self
    where
        I: Into<String>,
        O: Into<String>,
    {
        Error::UnknownToken {
            id: id.into(),
            referenced_by: Some(referenced_by.into()),
        }
    }

    /// Creates an unknown-variant error.
    pub fn unknown_variant<S: Into<String>>(kind: &'static str, value: S) -> Self {
        Error::UnknownVariant {
            kind,
            value: value.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it occurred on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns whether this error comes from the definition source
    /// (as opposed to configuration or the environment).
    pub fn is_definition_error(&self) -> bool {
        matches!(
            self,
            Error::Load { .. } | Error::DuplicateToken { .. } | Error::UnknownToken { .. }
        )
    }

    /// Returns the offending identifier, if the error is about one.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Error::DuplicateToken { id, .. } | Error::UnknownToken { id, .. } => Some(id),
            Error::UnknownVariant { value, .. } => Some(value),
            _ => None,
        }
    }
}
