//! Runtime settings for the tool registry
//!
//! Resolution order, later wins:
//! 1. Built-in defaults
//! 2. User settings file (~/.config/toolhub/settings.yaml)
//! 3. Environment variables (`TOOLHUB_*`)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::loader::DEFAULT_CONFIG_FILE;
use crate::error::{RegistryError, RegistryResult};

/// Path of the MCP configuration document
pub const ENV_MCP_CONFIG: &str = "TOOLHUB_MCP_CONFIG";
/// Restrict tool discovery to a single server
pub const ENV_MCP_SERVER: &str = "TOOLHUB_MCP_SERVER";
/// Enable or disable startup warm-up
pub const ENV_WARMUP: &str = "TOOLHUB_WARMUP";

/// Settings file structure. Every field is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsFile {
    #[serde(default)]
    pub mcp_config: Option<PathBuf>,
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default)]
    pub warmup: Option<bool>,
}

/// Resolved settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// MCP configuration document path
    pub config_path: PathBuf,
    /// Only list tools from this server when set
    pub server_name: Option<String>,
    /// Whether the bootstrap schedules a warm-up fetch
    pub warmup: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_FILE),
            server_name: None,
            warmup: true,
        }
    }
}

impl Settings {
    /// Defaults, then the user settings file if present, then the environment
    pub fn load() -> RegistryResult<Self> {
        let mut settings = Self::default();
        if let Some(path) = Self::user_file() {
            if path.exists() {
                settings.apply_file(Self::read_file(&path)?);
            }
        }
        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Defaults overridden by the environment only
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        settings.apply_env(|key| std::env::var(key).ok());
        settings
    }

    /// Defaults overridden by a settings file
    pub fn from_file(path: impl AsRef<Path>) -> RegistryResult<Self> {
        let mut settings = Self::default();
        settings.apply_file(Self::read_file(path.as_ref())?);
        Ok(settings)
    }

    /// User-level settings file location
    pub fn user_file() -> Option<PathBuf> {
        let config_dir = dirs::config_dir().or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_dir.join("toolhub").join("settings.yaml"))
    }

    fn read_file(path: &Path) -> RegistryResult<SettingsFile> {
        let content = fs::read_to_string(path).map_err(|e| RegistryError::malformed(path, e))?;
        serde_yaml::from_str(&content)
            .map_err(|e| RegistryError::malformed(path, format!("Failed to parse YAML: {}", e)))
    }

    fn apply_file(&mut self, file: SettingsFile) {
        if let Some(path) = file.mcp_config {
            self.config_path = path;
        }
        if let Some(server) = file.server {
            self.server_name = Some(server);
        }
        if let Some(warmup) = file.warmup {
            self.warmup = warmup;
        }
    }

    /// Apply environment overrides. Empty values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(path) = get(ENV_MCP_CONFIG) {
            self.config_path = PathBuf::from(path);
        }
        if let Some(server) = get(ENV_MCP_SERVER) {
            self.server_name = Some(server);
        }
        if let Some(warmup) = get(ENV_WARMUP) {
            self.warmup = matches!(warmup.to_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }
    }
}
