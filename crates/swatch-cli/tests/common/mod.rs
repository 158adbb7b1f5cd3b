//! Shared fixtures for command-line tests.

#![allow(dead_code, clippy::unwrap_used)]

use clap::Parser;
use std::path::{Path, PathBuf};
use swatch_cli::Cli;
use tempfile::TempDir;

/// A temporary project with its own config file.
pub struct Project {
    pub dir: TempDir,
}

impl Project {
    /// Creates a project whose config file holds `config`.
    pub fn new(config: &str) -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("swatch.toml"), config).unwrap();
        Self { dir }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("swatch.toml")
    }

    /// Writes a file below the project root and returns its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Runs `swatch --config <project config> <args>`.
    pub fn run(&self, args: &[&str]) -> swatch_core::Result<i32> {
        let config = self.config_path();
        let mut argv = vec!["swatch", "--config", config.to_str().unwrap()];
        argv.extend_from_slice(args);
        swatch_cli::run(Cli::try_parse_from(argv).unwrap())
    }
}
