//! Opportunistic background initialisation of the tool cache

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::cache::ToolCache;
use crate::error::RegistryError;
use crate::logging::Logger;

/// Schedules a best-effort `get_all` so the first real request finds the
/// cache populated. Failures are logged and never propagated.
pub struct WarmupScheduler {
    cache: Arc<ToolCache>,
    logger: Arc<dyn Logger>,
}

impl WarmupScheduler {
    pub fn new(cache: Arc<ToolCache>, logger: Arc<dyn Logger>) -> Self {
        Self { cache, logger }
    }

    /// Spawn the warm-up on the current tokio runtime without waiting for it.
    ///
    /// Returns `None` when called outside a runtime; the cache then fills
    /// lazily on first use.
    pub fn schedule_warmup(&self) -> Option<JoinHandle<()>> {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                self.logger
                    .info("No running runtime; MCP tools will initialize on demand");
                return None;
            }
        };

        let cache = self.cache.clone();
        let logger = self.logger.clone();
        let task = runtime.spawn(async move {
            warm(&cache, logger.as_ref()).await;
        });
        self.logger.info("Scheduled MCP tools initialization task");
        Some(task)
    }
}

/// Populate the cache, swallowing any failure. Returns whether it succeeded.
pub async fn warm(cache: &ToolCache, logger: &dyn Logger) -> bool {
    logger.info("Initializing MCP tools (async)...");
    match cache.get_all().await {
        Ok(tools) => {
            logger.info(&format!("MCP tools initialized ({} tools)", tools.len()));
            true
        }
        Err(e @ RegistryError::ConfigNotFound { .. }) => {
            logger.warn(&format!(
                "mcp_config_not_found_during_init: {}; MCP tools will be initialized on first use",
                e
            ));
            false
        }
        Err(e) if e.is_config_error() => {
            logger.warn(&format!(
                "mcp_config_invalid_during_init: {}; MCP tools will be initialized on first use",
                e
            ));
            false
        }
        Err(e) => {
            logger.warn(&format!(
                "mcp_tools_initialization_failed: {}; MCP tools will be initialized on first use",
                e
            ));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::registry::RegistryClientSingleton;
    use crate::test_support::{write_config, FakeConnector, FakeSource, RecordingLogger};
    use crate::tools::CacheState;
    use tempfile::tempdir;

    fn cache_at(path: std::path::PathBuf, logger: Arc<RecordingLogger>) -> (Arc<ToolCache>, Arc<FakeSource>) {
        let source = FakeSource::new(&[("mcp-atlassian", &["confluence_search"])]);
        let client = RegistryClientSingleton::new(
            ConfigLoader::new(path),
            FakeConnector::new(source.clone()),
            logger.clone(),
        );
        (Arc::new(ToolCache::new(Arc::new(client), None, logger)), source)
    }

    #[tokio::test]
    async fn test_missing_config_then_created() {
        let dir = tempdir().unwrap();
        let logger = RecordingLogger::new();
        let (cache, source) = cache_at(dir.path().join(".mcp.json"), logger.clone());
        let scheduler = WarmupScheduler::new(cache.clone(), logger.clone());

        let task = scheduler.schedule_warmup().expect("runtime is available");
        task.await.unwrap();

        assert!(logger
            .warnings()
            .iter()
            .any(|w| w.starts_with("mcp_config_not_found_during_init")));
        assert_eq!(cache.status().state, CacheState::FetchFailed);
        assert_eq!(source.calls(), 0);

        write_config(dir.path());
        let tools = cache.get_all().await.unwrap();
        assert!(tools.contains("confluence_search"));
        assert_eq!(cache.status().state, CacheState::Ready);
    }

    #[tokio::test]
    async fn test_successful_warmup_populates_cache() {
        let dir = tempdir().unwrap();
        let logger = RecordingLogger::new();
        let (cache, source) = cache_at(write_config(dir.path()), logger.clone());

        WarmupScheduler::new(cache.clone(), logger.clone())
            .schedule_warmup()
            .unwrap()
            .await
            .unwrap();

        assert_eq!(cache.status().state, CacheState::Ready);
        cache.get_subset(&["confluence_search"]).await.unwrap();
        assert_eq!(source.calls(), 1);
        assert!(logger.warnings().is_empty());
    }

    #[tokio::test]
    async fn test_registry_failure_is_suppressed() {
        let dir = tempdir().unwrap();
        let logger = RecordingLogger::new();
        let (cache, source) = cache_at(write_config(dir.path()), logger.clone());
        source.fail_with(Some(RegistryError::connection("mcp-atlassian", "refused")));

        assert!(!warm(&cache, logger.as_ref()).await);
        assert!(logger
            .warnings()
            .iter()
            .any(|w| w.starts_with("mcp_tools_initialization_failed")));
        assert!(!logger.warnings().iter().any(|w| w.contains("config")));
    }

    #[tokio::test]
    async fn test_config_problems_are_reported_as_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".mcp.json");
        std::fs::write(&path, r#"{"mcpServers":{"remote":{"url":"http://x"}}}"#).unwrap();
        let logger = RecordingLogger::new();
        let (cache, source) = cache_at(path, logger.clone());

        assert!(!warm(&cache, logger.as_ref()).await);
        let warnings = logger.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("mcp_config_invalid_during_init"));
        assert_eq!(source.calls(), 0);
    }

    #[test]
    fn test_no_runtime_is_noop() {
        let dir = tempdir().unwrap();
        let logger = RecordingLogger::new();
        let (cache, source) = cache_at(write_config(dir.path()), logger.clone());

        assert!(WarmupScheduler::new(cache.clone(), logger.clone())
            .schedule_warmup()
            .is_none());
        assert_eq!(cache.status().state, CacheState::Empty);
        assert_eq!(source.calls(), 0);
        assert!(logger.infos().iter().any(|m| m.contains("on demand")));
    }
}
