//! Unified path management for docgen configuration and output files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/docgen/            # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/docgen/       # Data directory
//! └── documents/               # Generated documents (default output)
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "docgen";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config or data directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Platform-specific locations used by docgen (XDG on Linux).
pub struct DocgenPaths;

impl DocgenPaths {
    /// Returns the docgen configuration directory (e.g., `~/.config/docgen/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the docgen data directory (e.g., `~/.local/share/docgen/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Default directory for generated documents.
    pub fn documents_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("documents"))
    }
}
