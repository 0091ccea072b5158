//! Error taxonomy for tool registry resolution
//!
//! Every variant carries owned, printable context so a single failure can be
//! cloned and handed to every caller that was waiting on the same attempt.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading configuration, connecting to registry
/// servers, or resolving tools
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The configuration document does not exist
    #[error("MCP configuration not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// The configuration document could not be read or parsed
    #[error("MCP configuration at {} is malformed: {message}", path.display())]
    ConfigMalformed { path: PathBuf, message: String },

    /// A server entry uses a transport this layer cannot connect to
    #[error(
        "{transport} MCP connections are not supported for '{server}'{}",
        url.as_ref().map(|url| format!(" ({})", url)).unwrap_or_default()
    )]
    UnsupportedTransport {
        server: String,
        transport: String,
        url: Option<String>,
    },

    /// A server entry has neither `command` nor `url`
    #[error("Unknown MCP server configuration format for '{server}'. Expected 'command' or 'url' key, got: {keys:?}")]
    UnknownServerFormat { server: String, keys: Vec<String> },

    /// The document has no `mcpServers` entries
    #[error("No MCP servers found in configuration (mcpServers key is missing or empty)")]
    NoServersConfigured,

    /// A recognised field of a server entry has the wrong shape
    #[error("Invalid field '{field}' for MCP server '{server}': expected {expected}")]
    InvalidServerField {
        server: String,
        field: String,
        expected: String,
    },

    /// The registry server could not be reached or returned an error
    #[error("Connection to MCP server '{server}' failed: {message}")]
    ConnectionFailure { server: String, message: String },

    /// No tools were returned, or none of the requested tools exist
    #[error("No tools found: {0}")]
    EmptyResultSet(String),
}

impl RegistryError {
    /// Create a connection failure for a server
    pub fn connection(server: impl Into<String>, message: impl ToString) -> Self {
        Self::ConnectionFailure {
            server: server.into(),
            message: message.to_string(),
        }
    }

    /// Create a malformed-config error
    pub fn malformed(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::ConfigMalformed {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Whether the failure comes from the configuration rather than the registry
    pub fn is_config_error(&self) -> bool {
        !matches!(
            self,
            Self::ConnectionFailure { .. } | Self::EmptyResultSet(_)
        )
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
