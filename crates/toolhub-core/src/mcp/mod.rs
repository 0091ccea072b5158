//! MCP (Model Context Protocol) client module
//!
//! Uses the official rmcp SDK to connect to stdio MCP servers.
//!
//! # Example
//!
//! ```rust,ignore
//! use toolhub_core::mcp::McpClient;
//! use toolhub_core::types::ServerConfig;
//!
//! let config = ServerConfig::stdio("mcp-atlassian", "uvx")
//!     .with_args(vec!["mcp-atlassian".to_string()]);
//! let client = McpClient::connect_stdio(&config, logger).await?;
//! let tools = client.list_tools().await?;
//! ```

mod client;

pub use client::McpClient;

// Re-export rmcp types that consumers might need
pub use rmcp::model::Tool as McpTool;
