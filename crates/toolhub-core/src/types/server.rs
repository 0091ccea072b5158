//! Canonical registry server connection descriptors

use std::collections::BTreeMap;

use serde::Serialize;

/// Default text encoding for stdio servers
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Transport used to reach a registry server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Stdio,
    Sse,
    Http,
}

impl Transport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::Stdio => "stdio",
            Transport::Sse => "sse",
            Transport::Http => "http",
        }
    }

    /// Parse a transport name as written in configuration documents
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "stdio" => Some(Transport::Stdio),
            "sse" => Some(Transport::Sse),
            "http" => Some(Transport::Http),
            _ => None,
        }
    }
}

impl std::fmt::Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection descriptor for one registry server
///
/// Serialises to the canonical shape keyed by server name, so `name` itself
/// is not part of the serialised body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerConfig {
    #[serde(skip)]
    pub name: String,
    pub transport: Transport,
    pub command: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
    #[serde(rename = "cwd")]
    pub working_dir: Option<String>,
    pub encoding: String,
}

impl ServerConfig {
    /// A stdio server with empty args/env and the default encoding
    pub fn stdio(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transport: Transport::Stdio,
            command: command.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
            working_dir: None,
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }

    pub fn with_working_dir(mut self, working_dir: Option<String>) -> Self {
        self.working_dir = working_dir;
        self
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }
}

/// Server name → connection descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CanonicalConfig {
    servers: BTreeMap<String, ServerConfig>,
}

impl CanonicalConfig {
    pub fn get(&self, name: &str) -> Option<&ServerConfig> {
        self.servers.get(name)
    }

    /// Server names in sorted order
    pub fn names(&self) -> Vec<String> {
        self.servers.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServerConfig> {
        self.servers.values()
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    pub(crate) fn insert(&mut self, server: ServerConfig) {
        self.servers.insert(server.name.clone(), server);
    }
}

impl FromIterator<ServerConfig> for CanonicalConfig {
    fn from_iter<I: IntoIterator<Item = ServerConfig>>(iter: I) -> Self {
        let mut config = Self::default();
        for server in iter {
            config.insert(server);
        }
        config
    }
}
