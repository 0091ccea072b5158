//! Conversion from the IDE `.mcp.json` document to canonical server configs
//!
//! ```text
//! { "mcpServers": { "<name>": { "command": "...", "args": [...], "env": {...}, "cwd": "..." } } }
//!         │
//!         ▼
//! { "<name>": { "transport": "stdio", "command": "...", "args": [...], "env": {...},
//!               "cwd": "...", "encoding": "utf-8" } }
//! ```

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{RegistryError, RegistryResult};
use crate::types::{CanonicalConfig, ServerConfig, Transport};

/// Top-level key holding the per-server entries
pub const MCP_SERVERS_KEY: &str = "mcpServers";

/// Convert an IDE-style MCP document into a canonical config.
///
/// Pure: performs no I/O and returns equal output for equal input.
pub fn adapt(document: &Value) -> RegistryResult<CanonicalConfig> {
    let servers = document
        .get(MCP_SERVERS_KEY)
        .and_then(Value::as_object)
        .filter(|servers| !servers.is_empty())
        .ok_or(RegistryError::NoServersConfigured)?;

    servers
        .iter()
        .map(|(name, entry)| adapt_server(name, entry))
        .collect()
}

fn adapt_server(name: &str, entry: &Value) -> RegistryResult<ServerConfig> {
    let Some(fields) = entry.as_object() else {
        return Err(RegistryError::UnknownServerFormat {
            server: name.to_string(),
            keys: Vec::new(),
        });
    };

    if let Some(command) = fields.get("command") {
        let command = command
            .as_str()
            .ok_or_else(|| invalid(name, "command", "a string"))?;

        let mut server = ServerConfig::stdio(name, command)
            .with_args(string_list(name, fields, "args")?)
            .with_env(string_map(name, fields, "env")?)
            .with_working_dir(optional_string(name, fields, "cwd")?);
        if let Some(encoding) = optional_string(name, fields, "encoding")? {
            server = server.with_encoding(encoding);
        }
        return Ok(server);
    }

    if let Some(url) = fields.get("url") {
        return Err(RegistryError::UnsupportedTransport {
            server: name.to_string(),
            transport: Transport::Http.to_string(),
            url: Some(url.as_str().map(str::to_string).unwrap_or_else(|| url.to_string())),
        });
    }

    Err(RegistryError::UnknownServerFormat {
        server: name.to_string(),
        keys: fields.keys().cloned().collect(),
    })
}

fn invalid(server: &str, field: &str, expected: &str) -> RegistryError {
    RegistryError::InvalidServerField {
        server: server.to_string(),
        field: field.to_string(),
        expected: expected.to_string(),
    }
}

fn optional_string(
    server: &str,
    fields: &Map<String, Value>,
    field: &str,
) -> RegistryResult<Option<String>> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(invalid(server, field, "a string")),
    }
}

fn string_list(server: &str, fields: &Map<String, Value>, field: &str) -> RegistryResult<Vec<String>> {
    let Some(value) = fields.get(field) else {
        return Ok(Vec::new());
    };
    value
        .as_array()
        .and_then(|items| {
            items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
        })
        .ok_or_else(|| invalid(server, field, "a list of strings"))
}

fn string_map(
    server: &str,
    fields: &Map<String, Value>,
    field: &str,
) -> RegistryResult<BTreeMap<String, String>> {
    let Some(value) = fields.get(field) else {
        return Ok(BTreeMap::new());
    };
    value
        .as_object()
        .and_then(|entries| {
            entries
                .iter()
                .map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
                .collect::<Option<BTreeMap<_, _>>>()
        })
        .ok_or_else(|| invalid(server, field, "an object of string values"))
}
