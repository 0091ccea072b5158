//! Test doubles shared by unit tests

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{RegistryError, RegistryResult};
use crate::logging::Logger;
use crate::registry::{Connector, RegistryHandle, ToolSource};
use crate::types::{CanonicalConfig, ToolDescriptor};

/// Logger that keeps every message for assertions
#[derive(Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingLogger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn warnings(&self) -> Vec<String> {
        self.at("warn")
    }

    pub fn infos(&self) -> Vec<String> {
        self.at("info")
    }

    fn at(&self, level: &str) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    fn push(&self, level: &'static str, message: &str) {
        self.entries.lock().push((level, message.to_string()));
    }
}

impl Logger for RecordingLogger {
    fn debug(&self, message: &str) {
        self.push("debug", message);
    }
    fn info(&self, message: &str) {
        self.push("info", message);
    }
    fn warn(&self, message: &str) {
        self.push("warn", message);
    }
    fn error(&self, message: &str) {
        self.push("error", message);
    }
}

/// In-memory registry whose responses can be swapped between calls
pub struct FakeSource {
    tools: Mutex<BTreeMap<String, Vec<ToolDescriptor>>>,
    failure: Mutex<Option<RegistryError>>,
    delay: Duration,
    pub list_calls: AtomicUsize,
}

impl FakeSource {
    pub fn new(servers: &[(&str, &[&str])]) -> Arc<Self> {
        Self::with_delay(servers, Duration::from_millis(20))
    }

    pub fn with_delay(servers: &[(&str, &[&str])], delay: Duration) -> Arc<Self> {
        let source = Arc::new(Self {
            tools: Mutex::new(BTreeMap::new()),
            failure: Mutex::new(None),
            delay,
            list_calls: AtomicUsize::new(0),
        });
        source.set_tools(servers);
        source
    }

    pub fn set_tools(&self, servers: &[(&str, &[&str])]) {
        *self.tools.lock() = servers
            .iter()
            .map(|(server, names)| {
                let tools = names
                    .iter()
                    .map(|name| ToolDescriptor::new(*name, format!("{} tool", name), *server))
                    .collect();
                (server.to_string(), tools)
            })
            .collect();
    }

    pub fn fail_with(&self, error: Option<RegistryError>) {
        *self.failure.lock() = error;
    }

    pub fn calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ToolSource for FakeSource {
    fn server_names(&self) -> Vec<String> {
        self.tools.lock().keys().cloned().collect()
    }

    async fn list_tools(&self, server: &str) -> RegistryResult<Vec<ToolDescriptor>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        // Respond with what the registry held when the call was made
        let failure = self.failure.lock().clone();
        let tools = self.tools.lock().get(server).cloned();
        tokio::time::sleep(self.delay).await;
        if let Some(error) = failure {
            return Err(error);
        }
        tools.ok_or_else(|| RegistryError::connection(server, "server is not configured"))
    }
}

/// Connector that hands out a fixed source and counts constructions
pub struct FakeConnector {
    source: Arc<FakeSource>,
    failure: Mutex<Option<RegistryError>>,
    pub connects: AtomicUsize,
}

impl FakeConnector {
    pub fn new(source: Arc<FakeSource>) -> Arc<Self> {
        Arc::new(Self {
            source,
            failure: Mutex::new(None),
            connects: AtomicUsize::new(0),
        })
    }

    pub fn fail_with(&self, error: Option<RegistryError>) {
        *self.failure.lock() = error;
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for FakeConnector {
    async fn connect(&self, _config: &CanonicalConfig) -> RegistryResult<RegistryHandle> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        if let Some(error) = self.failure.lock().clone() {
            return Err(error);
        }
        Ok(self.source.clone() as RegistryHandle)
    }
}

/// Write a one-server stdio `.mcp.json` into `dir`
pub fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join(".mcp.json");
    fs::write(
        &path,
        r#"{"mcpServers":{"mcp-atlassian":{"command":"uvx","args":["mcp-atlassian"]}}}"#,
    )
    .unwrap();
    path
}
