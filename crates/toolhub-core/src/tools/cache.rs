//! Generation-scoped tool cache
//!
//! ```text
//!          fetch starts          success
//!  Empty ───────────────► Fetching ───────► Ready
//!    ▲                      │                 │
//!    └──── failure ─────────┘                 │
//!    └──────────────── invalidate ────────────┘
//! ```
//!
//! Invalidating while a fetch is in flight bumps the generation; the fetch
//! still completes but its result is dropped and waiters refetch.

use std::sync::Arc;

use futures::future::try_join_all;

use crate::error::{RegistryError, RegistryResult};
use crate::logging::Logger;
use crate::registry::RegistryClientSingleton;
use crate::sync::{FlightState, SingleFlight};
use crate::types::{ToolDescriptor, ToolSet, ToolSummary};

/// Cache lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Nothing cached and no fetch running
    Empty,
    /// A fetch is in flight
    Fetching,
    /// Tools are cached
    Ready,
    /// Nothing cached because the last fetch failed; the next call retries
    FetchFailed,
}

/// Snapshot of the cache for diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct CacheStatus {
    pub state: CacheState,
    pub generation: u64,
    pub tool_count: Option<usize>,
    pub last_error: Option<RegistryError>,
}

/// Process-wide cache of tool descriptors fetched from the registry
pub struct ToolCache {
    client: Arc<RegistryClientSingleton>,
    server: Option<String>,
    tools: Arc<SingleFlight<Arc<ToolSet>>>,
    logger: Arc<dyn Logger>,
}

impl ToolCache {
    /// Create a cache over every configured server, or only `server` when set
    pub fn new(
        client: Arc<RegistryClientSingleton>,
        server: Option<String>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            client,
            server,
            tools: Arc::new(SingleFlight::new()),
            logger,
        }
    }

    /// All tools, fetching them if the cache is empty.
    ///
    /// Concurrent callers share a single fetch and its outcome. Failures are
    /// not cached.
    pub async fn get_all(&self) -> RegistryResult<Arc<ToolSet>> {
        let client = self.client.clone();
        let server = self.server.clone();
        let logger = self.logger.clone();
        self.tools
            .get_or_try_init(move || fetch(client.clone(), server.clone(), logger.clone()))
            .await
    }

    /// The requested tools, in request order.
    ///
    /// Names that are not available are logged and skipped. Fails with
    /// `EmptyResultSet` if none are available.
    pub async fn get_subset<S: AsRef<str>>(&self, names: &[S]) -> RegistryResult<Vec<ToolDescriptor>> {
        let tools = self.get_all().await?;

        let mut selected = Vec::with_capacity(names.len());
        for name in names.iter().map(|name| name.as_ref()) {
            match tools.get(name) {
                Some(tool) => selected.push(tool.clone()),
                None => self
                    .logger
                    .warn(&format!("mcp_tool_not_found: '{}' skipped", name)),
            }
        }

        if selected.is_empty() {
            let requested: Vec<&str> = names.iter().map(|name| name.as_ref()).collect();
            self.logger
                .error(&format!("no_requested_tools_found: [{}]", requested.join(", ")));
            return Err(RegistryError::EmptyResultSet(format!(
                "none of the requested tools are available: [{}]",
                requested.join(", ")
            )));
        }

        self.logger
            .info(&format!("mcp_tools_selected: {} of {}", selected.len(), names.len()));
        Ok(selected)
    }

    /// Cached tool names in alphabetical order, fetching if needed
    pub async fn tool_names(&self) -> RegistryResult<Vec<String>> {
        Ok(self.get_all().await?.names())
    }

    /// Readable summaries of every cached tool, fetching if needed
    pub async fn summaries(&self) -> RegistryResult<Vec<ToolSummary>> {
        Ok(self.get_all().await?.summaries())
    }

    /// Drop cached tools so the next access refetches. Performs no I/O.
    pub fn invalidate(&self) {
        self.invalidator().reset();
    }

    /// Handle that can reset this cache without access to the cache itself
    pub fn invalidator(&self) -> CacheInvalidator {
        CacheInvalidator {
            tools: self.tools.clone(),
            logger: self.logger.clone(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.tools.generation()
    }

    pub fn status(&self) -> CacheStatus {
        let snapshot = self.tools.snapshot();
        let state = match snapshot.state {
            FlightState::Ready => CacheState::Ready,
            FlightState::Pending => CacheState::Fetching,
            FlightState::Empty if snapshot.last_error.is_some() => CacheState::FetchFailed,
            FlightState::Empty => CacheState::Empty,
        };
        CacheStatus {
            state,
            generation: snapshot.generation,
            tool_count: snapshot.value.map(|tools| tools.len()),
            last_error: snapshot.last_error,
        }
    }
}

/// Resets a [`ToolCache`] to force a fresh fetch on next access
#[derive(Clone)]
pub struct CacheInvalidator {
    tools: Arc<SingleFlight<Arc<ToolSet>>>,
    logger: Arc<dyn Logger>,
}

impl CacheInvalidator {
    /// Bump the generation and empty the cache. Never fetches.
    pub fn reset(&self) -> u64 {
        let generation = self.tools.reset();
        self.logger
            .info(&format!("mcp_tools_cache_reset: generation {}", generation));
        generation
    }
}

async fn fetch(
    client: Arc<RegistryClientSingleton>,
    server: Option<String>,
    logger: Arc<dyn Logger>,
) -> RegistryResult<Arc<ToolSet>> {
    logger.info("Initializing MCP tools cache");
    let result = fetch_tools(&client, server, logger.as_ref()).await;
    if let Err(e) = &result {
        logger.error(&format!("Failed to initialize MCP tools cache: {}", e));
    }
    result
}

async fn fetch_tools(
    client: &RegistryClientSingleton,
    server: Option<String>,
    logger: &dyn Logger,
) -> RegistryResult<Arc<ToolSet>> {
    let handle = client.get_or_create().await?;
    let servers = match server {
        Some(name) => vec![name],
        None => handle.server_names(),
    };

    let listings = try_join_all(servers.iter().map(|name| handle.list_tools(name))).await?;

    let mut tools = ToolSet::new();
    for (server, descriptors) in servers.iter().zip(listings) {
        for tool in descriptors {
            let name = tool.name.clone();
            if !tools.insert(tool) {
                logger.warn(&format!(
                    "mcp_tool_duplicate: '{}' from '{}' ignored",
                    name, server
                ));
            }
        }
    }

    if tools.is_empty() {
        logger.error("no_tools_found_in_mcp_server");
        return Err(RegistryError::EmptyResultSet(
            "No tools found in MCP server".to_string(),
        ));
    }

    logger.info(&format!(
        "mcp_tools_fetched: {} tools [{}]",
        tools.len(),
        tools.names().join(", ")
    ));
    Ok(Arc::new(tools))
}
