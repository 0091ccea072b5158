//! Toolhub Core
//!
//! Process-wide, concurrency-safe cache of MCP tool descriptors.
//!
//! Tools are fetched once from the registry servers named in an IDE-style
//! `.mcp.json` document and served to any number of concurrent consumers.
//! Concurrent callers share one fetch; failures are never cached; the cache
//! can be invalidated at any time without performing I/O.
//!
//! ```rust,ignore
//! use toolhub_core::{Settings, ToolContext};
//!
//! let context = ToolContext::bootstrap(&Settings::load()?);
//!
//! // Later, from any task
//! let tools = context
//!     .get_subset(&["confluence_search", "confluence_get_page"])
//!     .await?;
//!
//! // After editing .mcp.json
//! context.invalidator().reset();
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod mcp;
pub mod registry;
pub mod sync;
pub mod tools;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{adapt, ConfigLoader, Settings};
pub use context::ToolContext;
pub use error::{RegistryError, RegistryResult};
pub use logging::{init_tracing, Logger, NoOpLogger, TracingLogger};
pub use registry::{Connector, RegistryClient, RegistryClientSingleton, RegistryHandle, StdioConnector, ToolSource};
pub use sync::SingleFlight;
pub use tools::{CacheInvalidator, CacheState, CacheStatus, ToolCache, WarmupScheduler};
pub use types::{CanonicalConfig, ServerConfig, ToolDescriptor, ToolSet, ToolSummary, Transport};
