//! Console configuration.
//!
//! Settings live in `~/.bpconsole/config.toml` (or `%LOCALAPPDATA%\bpconsole\config.toml`
//! on Windows) and can be pointed elsewhere with `--config`. A missing file
//! means defaults.
//!
//! ```toml
//! label = "blueprint"
//! title = "Blueprint Containers"
//! timestamp_format = "%Y-%m-%d %H:%M:%S%.3f UTC"
//! template = "/path/to/custom.html"
//! ```

use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::constants::{CONFIG_DIR_NAME, DEFAULT_LABEL, DEFAULT_TIMESTAMP_FORMAT, DEFAULT_TITLE};
use crate::core::ConsoleError;

/// Plugin settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginConfig {
    /// Label reported to the hosting console and exposed to the template.
    pub label: String,

    /// Page heading.
    pub title: String,

    /// chrono format string for event timestamps (UTC).
    pub timestamp_format: String,

    /// Replacement page template. The embedded template is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            title: DEFAULT_TITLE.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            template: None,
        }
    }
}

impl PluginConfig {
    /// Load from the default location, falling back to defaults.
    pub async fn load() -> Result<Self> {
        Self::load_with_optional(None).await
    }

    /// Load from `path` if given, otherwise from the default location.
    ///
    /// A file that does not exist yields the default configuration.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::default_path()?,
        };
        if fs::try_exists(&path).await.unwrap_or(false) {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid TOML, contains unknown
    /// keys, or does not pass [`validate`](Self::validate).
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config.validate()?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Platform-specific location of `config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join(CONFIG_DIR_NAME.trim_start_matches('.'))
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(CONFIG_DIR_NAME)
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Check field values that TOML typing cannot express.
    pub fn validate(&self) -> Result<(), ConsoleError> {
        if self.label.trim().is_empty() {
            return Err(ConsoleError::ConfigError {
                message: "label must not be empty".to_string(),
            });
        }

        if StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConsoleError::ConfigError {
                message: format!("invalid timestamp_format '{}'", self.timestamp_format),
            });
        }

        Ok(())
    }
}
