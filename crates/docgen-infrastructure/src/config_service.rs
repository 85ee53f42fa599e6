//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the root configuration
//! from the configuration file (~/.config/docgen/config.toml).

use crate::paths::DocgenPaths;
use docgen_core::{DocgenConfig, DocgenError, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Configuration service that loads and caches the root configuration.
///
/// A missing file yields the defaults; nothing is written until
/// [`ConfigService::save`] is called.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<DocgenConfig>>>,
}

impl ConfigService {
    /// Creates a service for the default config file location.
    pub fn new() -> Result<Self> {
        let path = DocgenPaths::config_file().map_err(|e| DocgenError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a service reading from an explicit file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the root configuration, loading from file if not cached.
    ///
    /// A file that cannot be read or parsed is logged and replaced by defaults.
    pub fn get_config(&self) -> DocgenConfig {
        // Check if already cached
        {
            let read_lock = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = self.load().unwrap_or_else(|e| {
            tracing::warn!(
                target: "docgen::config",
                "Failed to load {}: {}. Using defaults.",
                self.path.display(),
                e
            );
            DocgenConfig::default()
        });

        // Cache it
        {
            let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = None;
    }

    /// Reads the configuration file, bypassing the cache.
    pub fn load(&self) -> Result<DocgenConfig> {
        if !self.path.exists() {
            tracing::debug!(
                target: "docgen::config",
                "No config at {}, using defaults",
                self.path.display()
            );
            return Ok(DocgenConfig::default());
        }
        let text = std::fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Writes `config` to the configuration file and refreshes the cache.
    pub fn save(&self, config: &DocgenConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(config)?;
        std::fs::write(&self.path, text)?;

        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));

        assert_eq!(service.get_config(), DocgenConfig::default());
        assert!(!service.path().exists());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");
        let service = ConfigService::with_path(&path);

        let config = DocgenConfig {
            greeting: vec!["Welcome back".to_string()],
            preserve_inputs_on_reshape: true,
            ..DocgenConfig::default()
        };
        service.save(&config).unwrap();

        let fresh = ConfigService::with_path(&path);
        assert_eq!(fresh.get_config(), config);
    }

    #[test]
    fn test_cache_until_invalidated() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::with_path(&path);
        assert!(!service.get_config().preserve_inputs_on_reshape);

        std::fs::write(&path, "preserve_inputs_on_reshape = true\n").unwrap();
        assert!(!service.get_config().preserve_inputs_on_reshape);

        service.invalidate_cache();
        assert!(service.get_config().preserve_inputs_on_reshape);
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "greeting = 42").unwrap();
        let service = ConfigService::with_path(&path);

        assert!(service.load().is_err());
        assert_eq!(service.get_config(), DocgenConfig::default());
    }
}
