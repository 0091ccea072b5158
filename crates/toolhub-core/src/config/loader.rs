//! Reads MCP configuration documents from disk
//!
//! JSON is the native format (`.mcp.json`); files with a `.yaml`/`.yml`
//! extension are parsed as YAML into the same document shape.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{RegistryError, RegistryResult};

/// Default document location, relative to the process working directory
pub const DEFAULT_CONFIG_FILE: &str = ".mcp.json";

/// Loads the configuration document from a fixed path
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_FILE)
    }
}

impl ConfigLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document on the blocking pool so the async scheduler never
    /// waits on the filesystem.
    pub async fn load(&self) -> RegistryResult<Value> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || load_document(&path))
            .await
            .map_err(|e| RegistryError::malformed(&self.path, format!("load task failed: {}", e)))?
    }

    /// Load the document on the current thread
    pub fn load_blocking(&self) -> RegistryResult<Value> {
        load_document(&self.path)
    }
}

/// Read and parse a configuration document
pub fn load_document(path: &Path) -> RegistryResult<Value> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => RegistryError::ConfigNotFound {
            path: path.to_path_buf(),
        },
        _ => RegistryError::malformed(path, e),
    })?;

    if is_yaml(path) {
        serde_yaml::from_str(&content)
            .map_err(|e| RegistryError::malformed(path, format!("Failed to parse YAML: {}", e)))
    } else {
        serde_json::from_str(&content)
            .map_err(|e| RegistryError::malformed(path, format!("Failed to parse JSON: {}", e)))
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}
