//! Utility modules.
//!
//! - [`ids`]: identifier normalization and custom-property naming

pub mod ids;
