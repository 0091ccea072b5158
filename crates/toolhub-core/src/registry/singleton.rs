//! At-most-once creation of the registry handle

use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::traits::{Connector, RegistryHandle};
use crate::config::{adapt, ConfigLoader};
use crate::error::RegistryResult;
use crate::logging::Logger;
use crate::sync::SingleFlight;

/// Lazily creates the registry handle exactly once for the process.
///
/// Creation loads the configuration document, adapts it, and connects. If it
/// fails, every caller that joined the attempt receives the same error and
/// the next call starts over. Once created, the handle is never replaced.
pub struct RegistryClientSingleton {
    loader: ConfigLoader,
    connector: Arc<dyn Connector>,
    logger: Arc<dyn Logger>,
    handle: OnceCell<RegistryHandle>,
    creation: SingleFlight<RegistryHandle>,
}

impl RegistryClientSingleton {
    pub fn new(loader: ConfigLoader, connector: Arc<dyn Connector>, logger: Arc<dyn Logger>) -> Self {
        Self {
            loader,
            connector,
            logger,
            handle: OnceCell::new(),
            creation: SingleFlight::new(),
        }
    }

    pub fn loader(&self) -> &ConfigLoader {
        &self.loader
    }

    /// Whether the handle has been created
    pub fn is_created(&self) -> bool {
        self.handle.get().is_some()
    }

    /// Return the handle, creating it on first use
    pub async fn get_or_create(&self) -> RegistryResult<RegistryHandle> {
        if let Some(handle) = self.handle.get() {
            return Ok(handle.clone());
        }

        let loader = self.loader.clone();
        let connector = self.connector.clone();
        let logger = self.logger.clone();
        let handle = self
            .creation
            .get_or_try_init(move || create(loader.clone(), connector.clone(), logger.clone()))
            .await?;

        Ok(self.handle.get_or_init(|| handle).clone())
    }
}

async fn create(
    loader: ConfigLoader,
    connector: Arc<dyn Connector>,
    logger: Arc<dyn Logger>,
) -> RegistryResult<RegistryHandle> {
    let result = connect_from_config(&loader, connector.as_ref(), logger.as_ref()).await;

    match &result {
        Ok(_) => logger.info("mcp_client_created"),
        Err(e) => logger.error(&format!("mcp_client_creation_failed: {}", e)),
    }
    result
}

async fn connect_from_config(
    loader: &ConfigLoader,
    connector: &dyn Connector,
    logger: &dyn Logger,
) -> RegistryResult<RegistryHandle> {
    let document = loader.load().await?;
    let config = adapt(&document)?;
    logger.info(&format!(
        "mcp_config_converted: {} server(s) [{}]",
        config.len(),
        config.names().join(", ")
    ));
    connector.connect(&config).await
}
