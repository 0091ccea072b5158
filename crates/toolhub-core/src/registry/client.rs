//! Registry handle holding one live MCP connection per configured server

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::try_join_all;

use super::traits::{Connector, RegistryHandle, ToolSource};
use crate::error::{RegistryError, RegistryResult};
use crate::logging::Logger;
use crate::mcp::McpClient;
use crate::types::{CanonicalConfig, ToolDescriptor};

/// Live connections to every configured registry server, keyed by name
pub struct RegistryClient {
    clients: HashMap<String, McpClient>,
}

impl RegistryClient {
    /// Connect to every server concurrently. Fails if any server fails.
    pub async fn connect(config: &CanonicalConfig, logger: Arc<dyn Logger>) -> RegistryResult<Self> {
        let clients = try_join_all(
            config
                .iter()
                .map(|server| McpClient::connect_stdio(server, logger.clone())),
        )
        .await?;

        Ok(Self {
            clients: clients
                .into_iter()
                .map(|client| (client.name().to_string(), client))
                .collect(),
        })
    }
}

#[async_trait]
impl ToolSource for RegistryClient {
    fn server_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.clients.keys().cloned().collect();
        names.sort();
        names
    }

    async fn list_tools(&self, server: &str) -> RegistryResult<Vec<ToolDescriptor>> {
        let client = self
            .clients
            .get(server)
            .ok_or_else(|| RegistryError::connection(server, "server is not configured"))?;

        let tools = client.list_tools().await?;
        Ok(tools
            .into_iter()
            .map(|tool| ToolDescriptor::from_mcp(tool, server))
            .collect())
    }
}

/// Production connector: spawns each configured stdio server
pub struct StdioConnector {
    logger: Arc<dyn Logger>,
}

impl StdioConnector {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }
}

#[async_trait]
impl Connector for StdioConnector {
    async fn connect(&self, config: &CanonicalConfig) -> RegistryResult<RegistryHandle> {
        let client = RegistryClient::connect(config, self.logger.clone()).await?;
        Ok(Arc::new(client) as RegistryHandle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::types::ServerConfig;

    #[tokio::test]
    async fn test_connect_fails_when_any_server_fails() {
        let config: CanonicalConfig = [ServerConfig::stdio("broken", "/nonexistent/toolhub-test-server")]
            .into_iter()
            .collect();

        let connector = StdioConnector::new(Arc::new(NoOpLogger::new()));
        let err = connector.connect(&config).await.err().unwrap();
        assert!(matches!(err, RegistryError::ConnectionFailure { .. }));
    }

    #[tokio::test]
    async fn test_unknown_server_is_connection_failure() {
        let client = RegistryClient {
            clients: HashMap::new(),
        };
        assert!(client.server_names().is_empty());

        let err = client.list_tools("missing").await.unwrap_err();
        assert_eq!(err, RegistryError::connection("missing", "server is not configured"));
    }
}
