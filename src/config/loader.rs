use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::AllocatorConfig;
use crate::error::{AllocatorError, ErrorCode, Result};

/// `config.toml` inside the platform config directory, if a home directory exists
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "recipe-allocator", "recipe-allocator")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load defaults, then the config file, then the environment
pub fn load_config(explicit: Option<&Path>) -> Result<AllocatorConfig> {
    ConfigLoader::new()
        .with_file(explicit.map(Path::to_path_buf))
        .load()
}

/// Builds an [`AllocatorConfig`] from its layered sources
#[derive(Debug)]
pub struct ConfigLoader {
    explicit: Option<PathBuf>,
    fallback: Option<PathBuf>,
    read_env: bool,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            explicit: None,
            fallback: default_config_path(),
            read_env: true,
        }
    }

    /// Use this file instead of the default location; it must exist
    pub fn with_file(mut self, path: Option<PathBuf>) -> Self {
        self.explicit = path;
        self
    }

    /// Replace the default location; a missing file there is skipped
    pub fn with_fallback(mut self, path: Option<PathBuf>) -> Self {
        self.fallback = path;
        self
    }

    pub fn without_env(mut self) -> Self {
        self.read_env = false;
        self
    }

    pub fn load(&self) -> Result<AllocatorConfig> {
        let mut config = match (&self.explicit, &self.fallback) {
            (Some(path), _) => read_config_file(path)?,
            (None, Some(path)) if path.exists() => read_config_file(path)?,
            _ => AllocatorConfig::default(),
        };

        if self.read_env {
            config.merge_env_vars()?;
        }

        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn read_config_file(path: &Path) -> Result<AllocatorConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        let code = if e.kind() == std::io::ErrorKind::NotFound {
            ErrorCode::CONFIG_NOT_FOUND
        } else {
            ErrorCode::CONFIG_GENERIC
        };
        AllocatorError::config_with_code(code, format!("cannot read {}", path.display()))
            .with_source(e)
    })?;

    let config =
        AllocatorConfig::from_toml_str(&content).map_err(|e| e.with_context(path.display()))?;
    debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_fallback_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigLoader::new()
            .with_fallback(Some(dir.path().join("config.toml")))
            .without_env()
            .load()
            .unwrap();
        assert_eq!(config, AllocatorConfig::default());
    }

    #[test]
    fn test_fallback_file_is_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "output_format = \"json\"\n").unwrap();

        let config = ConfigLoader::new()
            .with_fallback(Some(path))
            .without_env()
            .load()
            .unwrap();
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_explicit_file_wins_over_fallback() {
        let dir = TempDir::new().unwrap();
        let fallback = dir.path().join("fallback.toml");
        let explicit = dir.path().join("explicit.toml");
        fs::write(&fallback, "log_level = \"error\"\n").unwrap();
        fs::write(&explicit, "log_level = \"trace\"\n").unwrap();

        let config = ConfigLoader::new()
            .with_fallback(Some(fallback))
            .with_file(Some(explicit))
            .without_env()
            .load()
            .unwrap();
        assert_eq!(config.log_level, "trace");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = ConfigLoader::new()
            .with_file(Some(dir.path().join("absent.toml")))
            .without_env()
            .load()
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_NOT_FOUND);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_invalid_file_names_the_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "log_level = [").unwrap();

        let err = ConfigLoader::new()
            .with_file(Some(path))
            .without_env()
            .load()
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_TOML);
        assert!(err.to_string().contains("broken.toml"));
    }
}
