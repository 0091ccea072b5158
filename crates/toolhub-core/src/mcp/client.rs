//! MCP client using the official rmcp SDK
//!
//! Spawns a stdio MCP server as a child process and speaks MCP over its
//! stdin/stdout.

use std::sync::Arc;

use rmcp::{
    model::{ClientCapabilities, ClientInfo, Implementation, Tool},
    service::RunningService,
    transport::TokioChildProcess,
    RoleClient, ServiceExt,
};
use tokio::process::Command;

use crate::error::{RegistryError, RegistryResult};
use crate::logging::Logger;
use crate::types::{ServerConfig, Transport, DEFAULT_ENCODING};

/// Live connection to one MCP server
pub struct McpClient {
    /// Server name from the configuration
    name: String,
    /// The underlying rmcp running service
    client: RunningService<RoleClient, ClientInfo>,
    logger: Arc<dyn Logger>,
}

impl McpClient {
    /// Spawn a stdio server and complete the MCP handshake
    pub async fn connect_stdio(config: &ServerConfig, logger: Arc<dyn Logger>) -> RegistryResult<Self> {
        if config.transport != Transport::Stdio {
            return Err(RegistryError::UnsupportedTransport {
                server: config.name.clone(),
                transport: config.transport.to_string(),
                url: None,
            });
        }
        // rmcp frames stdio messages as UTF-8 JSON only
        if !is_utf8(&config.encoding) {
            return Err(RegistryError::InvalidServerField {
                server: config.name.clone(),
                field: "encoding".to_string(),
                expected: DEFAULT_ENCODING.to_string(),
            });
        }

        logger.info(&format!(
            "[McpClient] Spawning '{}': {} {}",
            config.name,
            config.command,
            config.args.join(" ")
        ));

        let mut command = Command::new(&config.command);
        command.args(&config.args).envs(&config.env);
        if let Some(dir) = &config.working_dir {
            command.current_dir(dir);
        }

        let transport = TokioChildProcess::new(command)
            .map_err(|e| RegistryError::connection(&config.name, format!("failed to spawn: {}", e)))?;

        let client = client_info()
            .serve(transport)
            .await
            .map_err(|e| RegistryError::connection(&config.name, format!("initialization failed: {}", e)))?;

        let client = Self {
            name: config.name.clone(),
            client,
            logger,
        };
        client.logger.info(&format!(
            "[McpClient] Connected to '{}' ({})",
            client.name,
            client.server_name().unwrap_or("unknown server")
        ));
        Ok(client)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// List every tool the server advertises, following pagination
    pub async fn list_tools(&self) -> RegistryResult<Vec<Tool>> {
        let tools = self
            .client
            .list_all_tools()
            .await
            .map_err(|e| RegistryError::connection(&self.name, e))?;

        self.logger.debug(&format!(
            "[McpClient] Listed {} tools from '{}'",
            tools.len(),
            self.name
        ));

        Ok(tools)
    }

    /// Name the server reported during the handshake
    pub fn server_name(&self) -> Option<&str> {
        self.client.peer_info().map(|info| info.server_info.name.as_str())
    }
}

fn is_utf8(encoding: &str) -> bool {
    encoding.eq_ignore_ascii_case(DEFAULT_ENCODING) || encoding.eq_ignore_ascii_case("utf8")
}

fn client_info() -> ClientInfo {
    ClientInfo {
        meta: None,
        protocol_version: Default::default(),
        capabilities: ClientCapabilities::default(),
        client_info: Implementation {
            name: "toolhub-core".to_string(),
            title: Some("Toolhub".to_string()),
            version: env!("CARGO_PKG_VERSION").to_string(),
            website_url: None,
            icons: None,
        },
    }
}
