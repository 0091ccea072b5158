//! Boundary traits for the external tool registry

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::RegistryResult;
use crate::types::{CanonicalConfig, ToolDescriptor};

/// A connected registry that can enumerate tools per server
///
/// Implementations:
/// - `RegistryClient`: live rmcp connections to stdio servers
/// - Test doubles returning canned descriptors
#[async_trait]
pub trait ToolSource: Send + Sync {
    /// Names of every connected server, sorted
    fn server_names(&self) -> Vec<String>;

    /// List the tools advertised by one server
    async fn list_tools(&self, server: &str) -> RegistryResult<Vec<ToolDescriptor>>;
}

/// Shared handle to the process-wide registry connection
pub type RegistryHandle = Arc<dyn ToolSource>;

/// Builds a registry handle from canonical configuration
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, config: &CanonicalConfig) -> RegistryResult<RegistryHandle>;
}
