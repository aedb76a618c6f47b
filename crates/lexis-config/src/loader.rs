//! Settings loading and persistence with atomic file operations.

use crate::schema::Settings;
use lexis_common::{LexisError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File formats settings can be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.yml` / `.yaml`
    Yaml,
    /// `.json`
    Json,
}

impl ConfigFormat {
    /// Picks the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("yml" | "yaml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            other => Err(LexisError::Config(format!(
                "unsupported settings file extension: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }
}

/// Settings loader with atomic file operations.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new settings loader.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this loader reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and validates settings from file.
    pub fn load(&self) -> Result<Settings> {
        let format = ConfigFormat::from_path(&self.path)?;
        debug!("Loading settings file: {:?}", self.path);

        let content = fs::read_to_string(&self.path)?;
        let settings: Settings = match format {
            ConfigFormat::Toml => toml::from_str(&content)
                .map_err(|e| LexisError::Serialization(format!("invalid TOML: {e}")))?,
            ConfigFormat::Yaml => serde_yaml::from_str(&content)
                .map_err(|e| LexisError::Serialization(format!("invalid YAML: {e}")))?,
            ConfigFormat::Json => serde_json::from_str(&content)
                .map_err(|e| LexisError::Serialization(format!("invalid JSON: {e}")))?,
        };

        settings.validate()?;
        info!("Loaded settings from {:?}", self.path);
        Ok(settings)
    }

    /// Saves settings to file atomically.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        let content = match ConfigFormat::from_path(&self.path)? {
            ConfigFormat::Toml => toml::to_string_pretty(settings)
                .map_err(|e| LexisError::Serialization(e.to_string()))?,
            ConfigFormat::Yaml => serde_yaml::to_string(settings)
                .map_err(|e| LexisError::Serialization(e.to_string()))?,
            ConfigFormat::Json => serde_json::to_string_pretty(settings)
                .map_err(|e| LexisError::Serialization(e.to_string()))?,
        };

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(content.as_bytes())?;
        file.persist(&self.path).map_err(|e| LexisError::Io(e.error))?;

        info!("Saved settings to {:?}", self.path);
        Ok(())
    }
}
