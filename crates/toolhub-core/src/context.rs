//! Process-scoped owner of the registry client and tool cache
//!
//! Build one `ToolContext` at startup and hand clones of it (or of its parts)
//! to consumers. Nothing here runs at construction time; warm-up is an
//! explicit call.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::config::{ConfigLoader, Settings};
use crate::error::RegistryResult;
use crate::logging::{Logger, TracingLogger};
use crate::registry::{Connector, RegistryClientSingleton, RegistryHandle, StdioConnector};
use crate::tools::{CacheInvalidator, ToolCache, WarmupScheduler};
use crate::types::ToolDescriptor;

/// Shared context for tool resolution
#[derive(Clone)]
pub struct ToolContext {
    client: Arc<RegistryClientSingleton>,
    cache: Arc<ToolCache>,
    logger: Arc<dyn Logger>,
}

impl ToolContext {
    /// Context using stdio MCP connections and `tracing` output
    pub fn new(settings: &Settings) -> Self {
        let logger: Arc<dyn Logger> = Arc::new(TracingLogger::with_component("toolhub"));
        let connector = Arc::new(StdioConnector::new(logger.clone()));
        Self::with_parts(settings, connector, logger)
    }

    /// Context with an injected connector and logger
    pub fn with_parts(
        settings: &Settings,
        connector: Arc<dyn Connector>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let client = Arc::new(RegistryClientSingleton::new(
            ConfigLoader::new(&settings.config_path),
            connector,
            logger.clone(),
        ));
        let cache = Arc::new(ToolCache::new(
            client.clone(),
            settings.server_name.clone(),
            logger.clone(),
        ));
        Self {
            client,
            cache,
            logger,
        }
    }

    /// Build a context and, if enabled in `settings`, schedule warm-up
    pub fn bootstrap(settings: &Settings) -> Self {
        let context = Self::new(settings);
        if settings.warmup {
            context.warmup();
        }
        context
    }

    /// The registry handle, created on first use
    pub async fn client(&self) -> RegistryResult<RegistryHandle> {
        self.client.get_or_create().await
    }

    pub fn cache(&self) -> &Arc<ToolCache> {
        &self.cache
    }

    /// Named tools in request order
    pub async fn get_subset<S: AsRef<str>>(&self, names: &[S]) -> RegistryResult<Vec<ToolDescriptor>> {
        self.cache.get_subset(names).await
    }

    pub fn invalidator(&self) -> CacheInvalidator {
        self.cache.invalidator()
    }

    /// Fire-and-forget cache warm-up on the current runtime
    pub fn warmup(&self) -> Option<JoinHandle<()>> {
        WarmupScheduler::new(self.cache.clone(), self.logger.clone()).schedule_warmup()
    }
}
