//! Helpers operating on raw MCP configuration documents

use serde_json::{Map, Value};

use super::adapter::MCP_SERVERS_KEY;
use crate::types::Transport;

/// Check a single server entry, collecting every problem found.
pub fn validate_server_entry(entry: &Value) -> Result<(), Vec<String>> {
    let Some(fields) = entry.as_object() else {
        return Err(vec!["Server configuration must be an object".to_string()]);
    };

    let mut errors = Vec::new();

    if !fields.contains_key("command") && !fields.contains_key("url") {
        errors.push("Configuration must have either 'command' or 'url' key".to_string());
    }

    if let Some(args) = fields.get("args") {
        if !args.is_array() {
            errors.push(format!("'args' must be a list, got {}", type_name(args)));
        }
    }

    if let Some(env) = fields.get("env") {
        if !env.is_object() {
            errors.push(format!("'env' must be an object, got {}", type_name(env)));
        }
    }

    if let Some(transport) = fields.get("transport") {
        if transport.as_str().and_then(Transport::parse).is_none() {
            errors.push(format!(
                "'transport' must be one of [\"stdio\", \"sse\", \"http\"], got {}",
                transport
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Merge two documents. Servers from `overlay` replace same-named servers in
/// `base`; other top-level keys from `overlay` overwrite those in `base`.
pub fn merge_documents(base: &Value, overlay: &Value) -> Value {
    let mut merged = base.as_object().cloned().unwrap_or_default();

    let Some(overlay) = overlay.as_object() else {
        return Value::Object(merged);
    };

    for (key, value) in overlay {
        if key != MCP_SERVERS_KEY {
            merged.insert(key.clone(), value.clone());
            continue;
        }

        let servers = merged
            .entry(MCP_SERVERS_KEY)
            .or_insert_with(|| Value::Object(Map::new()));
        if !servers.is_object() {
            *servers = Value::Object(Map::new());
        }
        if let (Some(target), Some(incoming)) = (servers.as_object_mut(), value.as_object()) {
            for (name, entry) in incoming {
                target.insert(name.clone(), entry.clone());
            }
        }
    }

    Value::Object(merged)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
